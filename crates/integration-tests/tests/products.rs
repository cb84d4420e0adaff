//! Integration tests for `/api/products`.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (`shop-cli migrate`)
//! - The API server running (`cargo run -p mini-shop-api`)

use mini_shop_integration_tests::{TestClient, header, id_of, unique};
use reqwest::StatusCode;
use serde_json::{Value, json};

const PATH: &str = "/api/products";

fn product(title: &str, price: f64, image: &str) -> Value {
    json!({"title": title, "price": price, "image": image})
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_create_product() {
    let client = TestClient::new();
    let title = unique("AAAAAAAAAA");

    let response = client.post(PATH, &product(&title, 1.5, "a.png")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let alert = header(&response, "x-backendapp-alert").expect("missing alert header");
    assert!(alert.starts_with("A new backendProduct is created with identifier"));
    let location = header(&response, "location").expect("missing location header");
    let param = header(&response, "x-backendapp-params").expect("missing params header");

    let created: Value = response.json().await.expect("Failed to parse body");
    let id = id_of(&created);
    assert_eq!(location, format!("{PATH}/{id}"));
    assert_eq!(param, id.to_string());
    assert_eq!(created["title"], title.as_str());
    assert_eq!(created["price"], 1.5);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_create_product_with_existing_id() {
    let client = TestClient::new();
    let title = unique("AAA");

    let mut body = product(&title, 1.0, "a.png");
    body["id"] = json!(1);
    let response = client.post(PATH, &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        header(&response, "x-backendapp-error").as_deref(),
        Some("error.idexists")
    );
    assert_eq!(client.total(&format!("{PATH}?title.equals={title}")).await, 0);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_required_fields() {
    let client = TestClient::new();
    for missing in ["title", "price", "image"] {
        let mut body = product(&unique("AAA"), 1.0, "a.png");
        body.as_object_mut().expect("object").remove(missing);

        let response = client.post(PATH, &body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{missing}");
        let problem: Value = response.json().await.expect("Failed to parse problem");
        assert_eq!(problem["fieldErrors"][0]["field"], missing);
    }
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_get_product() {
    let client = TestClient::new();
    let created = client
        .create(PATH, &product(&unique("AAA"), 3.25, "c.png"))
        .await;
    let id = id_of(&created);

    let response = client.get(&format!("{PATH}/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = response.json().await.expect("Failed to parse body");
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_get_non_existing_product() {
    let client = TestClient::new();
    let response = client.get(&format!("{PATH}/{}", i64::MAX)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_list_has_pagination_headers() {
    let client = TestClient::new();
    let marker = unique("PAGE");
    for _ in 0..3 {
        client.create(PATH, &product(&marker, 1.0, "p.png")).await;
    }

    let response = client
        .get(&format!("{PATH}?title.equals={marker}&size=2&sort=id,desc"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-total-count").as_deref(), Some("3"));
    let link = header(&response, "link").expect("missing link header");
    assert!(link.contains("rel=\"next\""));
    assert!(link.contains("rel=\"last\""));
    assert!(link.contains("rel=\"first\""));
    assert!(!link.contains("rel=\"prev\""));

    let page: Value = response.json().await.expect("Failed to parse page");
    let ids: Vec<i64> = page
        .as_array()
        .expect("array")
        .iter()
        .map(id_of)
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids[0] > ids[1], "sorted by id descending");
}

// ============================================================================
// Filters
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_filters_select_exactly_the_matching_products() {
    let client = TestClient::new();
    let marker = unique("flt");
    let cheap = id_of(
        &client
            .create(PATH, &product(&format!("{marker}-apple"), 1.0, "x.png"))
            .await,
    );
    let pricey = id_of(
        &client
            .create(PATH, &product(&format!("{marker}-mango"), 100.0, "y.png"))
            .await,
    );
    let scope = format!("title.contains={marker}");

    let cases: Vec<(String, Vec<i64>)> = vec![
        (format!("title.equals={marker}-apple"), vec![cheap]),
        (format!("title.notEquals={marker}-apple"), vec![pricey]),
        (format!("title.in={marker}-apple,{marker}-mango"), vec![cheap, pricey]),
        (format!("title.notIn={marker}-apple"), vec![pricey]),
        ("title.specified=true".to_string(), vec![cheap, pricey]),
        ("title.specified=false".to_string(), vec![]),
        // contains is case-insensitive
        ("title.contains=APPLE".to_string(), vec![cheap]),
        ("title.doesNotContain=apple".to_string(), vec![pricey]),
        ("price.equals=100".to_string(), vec![pricey]),
        ("price.greaterThan=1".to_string(), vec![pricey]),
        ("price.greaterThanOrEqual=1".to_string(), vec![cheap, pricey]),
        ("price.lessThan=100".to_string(), vec![cheap]),
        ("price.lessThanOrEqual=100".to_string(), vec![cheap, pricey]),
        (format!("id.equals={cheap}"), vec![cheap]),
        (format!("id.in={cheap},{pricey}"), vec![cheap, pricey]),
        ("image.equals=y.png".to_string(), vec![pricey]),
    ];

    for (filter, expected) in cases {
        let ids = client
            .ids(&format!("{PATH}?{scope}&{filter}&sort=id,asc"))
            .await;
        assert_eq!(ids, expected, "{filter}");
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_distinct_filter() {
    let client = TestClient::new();
    let marker = unique("dst");
    let id = id_of(&client.create(PATH, &product(&marker, 1.0, "d.png")).await);

    let ids = client
        .ids(&format!("{PATH}?title.equals={marker}&distinct=true"))
        .await;
    assert_eq!(ids, vec![id]);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_invalid_filter_value() {
    let client = TestClient::new();
    let response = client.get(&format!("{PATH}?price.greaterThan=abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_update_product() {
    let client = TestClient::new();
    let id = id_of(
        &client
            .create(PATH, &product(&unique("AAA"), 1.0, "a.png"))
            .await,
    );
    let title = unique("BBB");

    let response = client
        .put(
            &format!("{PATH}/{id}"),
            &json!({"id": id, "title": title, "price": 2.5, "image": "b.png"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "x-backendapp-alert"),
        Some(format!("A backendProduct is updated with identifier {id}"))
    );

    let updated: Value = response.json().await.expect("Failed to parse body");
    assert_eq!(updated["title"], title.as_str());
    assert_eq!(updated["price"], 2.5);
    assert_eq!(updated["image"], "b.png");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_update_rejections() {
    let client = TestClient::new();
    let id = id_of(
        &client
            .create(PATH, &product(&unique("AAA"), 1.0, "a.png"))
            .await,
    );
    let body = product(&unique("BBB"), 1.0, "b.png");

    // No id in body
    let response = client.put(&format!("{PATH}/{id}"), &body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        header(&response, "x-backendapp-error").as_deref(),
        Some("error.idnull")
    );

    // Body id differs from path id
    let mut mismatched = body.clone();
    mismatched["id"] = json!(id + 1);
    let response = client.put(&format!("{PATH}/{id}"), &mismatched).await;
    assert_eq!(
        header(&response, "x-backendapp-error").as_deref(),
        Some("error.idinvalid")
    );

    // No such row
    let mut missing = body.clone();
    missing["id"] = json!(i64::MAX);
    let response = client
        .put(&format!("{PATH}/{}", i64::MAX), &missing)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        header(&response, "x-backendapp-error").as_deref(),
        Some("error.idnotfound")
    );

    // PUT on the collection
    let mut with_id = body;
    with_id["id"] = json!(id);
    let response = client.put(PATH, &with_id).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_delete_product() {
    let client = TestClient::new();
    let marker = unique("DEL");
    let id = id_of(&client.create(PATH, &product(&marker, 1.0, "a.png")).await);
    client.create(PATH, &product(&marker, 1.0, "a.png")).await;

    let scoped = format!("{PATH}?title.equals={marker}");
    assert_eq!(client.ids(&scoped).await.len(), 2);

    let response = client.delete(&format!("{PATH}/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        header(&response, "x-backendapp-alert"),
        Some(format!("A backendProduct is deleted with identifier {id}"))
    );

    assert_eq!(client.ids(&scoped).await.len(), 1);
    let response = client.get(&format!("{PATH}/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
