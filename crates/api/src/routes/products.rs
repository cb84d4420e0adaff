//! Product route handlers.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header::LOCATION},
    response::IntoResponse,
};
use mini_shop_core::{Criteria, Pageable, ProductId};

use super::headers;
use crate::criteria::ProductCriteria;
use crate::dto::ProductDto;
use crate::error::{AppError, Result};
use crate::services::ProductService;
use crate::state::AppState;

const ENTITY_NAME: &str = "backendProduct";

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProductDto>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(dto) = payload?;
    if dto.id.is_some() {
        return Err(AppError::bad_request_alert(
            "A new product cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let saved = ProductService::new(state.pool()).save(dto).await?;
    let id = saved
        .id
        .ok_or_else(|| AppError::Internal("saved product has no id".to_string()))?
        .to_string();

    let mut response_headers: HeaderMap = headers::entity_creation_alert(ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/products/{id}")) {
        response_headers.insert(LOCATION, location);
    }
    Ok((StatusCode::CREATED, response_headers, Json(saved)))
}

/// `PUT /api/products/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    payload: std::result::Result<Json<ProductDto>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(dto) = payload?;
    let Some(body_id) = dto.id else {
        return Err(AppError::bad_request_alert(
            "Invalid id",
            ENTITY_NAME,
            "idnull",
        ));
    };
    if body_id != id {
        return Err(AppError::bad_request_alert(
            "Invalid ID",
            ENTITY_NAME,
            "idinvalid",
        ));
    }
    let input = dto.into_input()?;

    let service = ProductService::new(state.pool());
    if !service.exists(id).await? {
        return Err(AppError::bad_request_alert(
            "Entity not found",
            ENTITY_NAME,
            "idnotfound",
        ));
    }

    let updated = service.update(id, input).await?;
    Ok((
        headers::entity_update_alert(ENTITY_NAME, &id.to_string()),
        Json(updated),
    ))
}

/// `GET /api/products?title.contains=...&page=0&size=20&sort=id,desc`
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    let criteria = ProductCriteria::from_pairs(&params)?;
    let pageable = Pageable::from_pairs(&params)?;

    let page = ProductService::new(state.pool())
        .find_by_criteria(&criteria, &pageable)
        .await?;

    Ok((headers::pagination(&uri, &page), Json(page.content)))
}

/// `GET /api/products/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDto>> {
    ProductService::new(state.pool())
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// `DELETE /api/products/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    ProductService::new(state.pool()).delete(id).await?;
    Ok((
        StatusCode::NO_CONTENT,
        headers::entity_deletion_alert(ENTITY_NAME, &id.to_string()),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{json, send};

    #[tokio::test]
    async fn test_create_with_id_is_rejected() {
        let response = send(
            "POST",
            "/api/products",
            Some(r#"{"id": 1, "title": "AAA", "price": 1, "image": "a.png"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["x-backendapp-error"], "error.idexists");
        assert_eq!(json(response).await["errorKey"], "idexists");
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let response = send(
            "POST",
            "/api/products",
            Some(r#"{"price": 1, "image": "a.png"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["message"], "error.validation");
        assert_eq!(body["fieldErrors"][0]["field"], "title");
    }

    #[tokio::test]
    async fn test_create_requires_price() {
        let response = send(
            "POST",
            "/api/products",
            Some(r#"{"title": "AAA", "image": "a.png"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = send("POST", "/api/products", Some("{not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_without_body_id() {
        let response = send(
            "PUT",
            "/api/products/1",
            Some(r#"{"title": "AAA", "price": 1, "image": "a.png"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["x-backendapp-error"], "error.idnull");
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id() {
        let response = send(
            "PUT",
            "/api/products/1",
            Some(r#"{"id": 2, "title": "AAA", "price": 1, "image": "a.png"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["x-backendapp-error"], "error.idinvalid");
    }

    #[tokio::test]
    async fn test_update_validates_body_before_lookup() {
        let response = send(
            "PUT",
            "/api/products/987654",
            Some(r#"{"id": 987654, "price": 1}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("x-backendapp-error").is_none());
        let body = json(response).await;
        assert_eq!(body["message"], "error.validation");
        assert_eq!(body["fieldErrors"][0]["field"], "image");
        assert_eq!(body["fieldErrors"][1]["field"], "title");
    }

    #[tokio::test]
    async fn test_price_beyond_column_precision_is_a_field_error() {
        let response = send(
            "POST",
            "/api/products",
            Some(r#"{"title": "t", "price": 1e20, "image": "i"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["fieldErrors"][0]["field"], "price");
        assert_eq!(body["fieldErrors"][0]["message"], "range");
    }

    #[tokio::test]
    async fn test_nul_in_text_is_bad_request() {
        let response = send(
            "POST",
            "/api/products",
            Some(r#"{"title": "a\u0000b", "price": 1, "image": "i"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["fieldErrors"][0]["field"], "title");

        let response = send("GET", "/api/products?title.equals=a%00b", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_on_collection_is_method_not_allowed() {
        let response = send(
            "PUT",
            "/api/products",
            Some(r#"{"id": 1, "title": "AAA", "price": 1, "image": "a.png"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let response = send("GET", "/api/products/abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_filter_value_is_bad_request() {
        let response = send("GET", "/api/products?price.greaterThan=cheap", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_paging_is_bad_request() {
        let response = send("GET", "/api/products?size=0", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_sort_property_is_bad_request() {
        let response = send("GET", "/api/products?sort=password,asc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
