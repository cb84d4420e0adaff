//! Cart item route handlers.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header::LOCATION},
    response::IntoResponse,
};
use mini_shop_core::{CartItemId, Criteria, Pageable};

use super::headers;
use crate::criteria::CartItemCriteria;
use crate::dto::CartItemDto;
use crate::error::{AppError, Result};
use crate::services::CartItemService;
use crate::state::AppState;

const ENTITY_NAME: &str = "backendCartItem";

/// `POST /api/cart-items`
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CartItemDto>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(dto) = payload?;
    if dto.id.is_some() {
        return Err(AppError::bad_request_alert(
            "A new cart item cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let saved = CartItemService::new(state.pool()).save(dto).await?;
    let id = saved
        .id
        .ok_or_else(|| AppError::Internal("saved cart item has no id".to_string()))?
        .to_string();

    let mut response_headers: HeaderMap = headers::entity_creation_alert(ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/cart-items/{id}")) {
        response_headers.insert(LOCATION, location);
    }
    Ok((StatusCode::CREATED, response_headers, Json(saved)))
}

/// `PUT /api/cart-items/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CartItemId>,
    payload: std::result::Result<Json<CartItemDto>, JsonRejection>,
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

    let service = CartItemService::new(state.pool());
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

/// `GET /api/cart-items?productId.equals=...&page=0&size=20`
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    let criteria = CartItemCriteria::from_pairs(&params)?;
    let pageable = Pageable::from_pairs(&params)?;

    let page = CartItemService::new(state.pool())
        .find_by_criteria(&criteria, &pageable)
        .await?;

    Ok((headers::pagination(&uri, &page), Json(page.content)))
}

/// `GET /api/cart-items/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CartItemId>,
) -> Result<Json<CartItemDto>> {
    CartItemService::new(state.pool())
        .find_one(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("cart item {id}")))
}

/// `DELETE /api/cart-items/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CartItemId>,
) -> Result<impl IntoResponse> {
    CartItemService::new(state.pool()).delete(id).await?;
    Ok((
        StatusCode::NO_CONTENT,
        headers::entity_deletion_alert(ENTITY_NAME, &id.to_string()),
    ))
}
