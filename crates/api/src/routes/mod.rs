//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (database)
//!
//! # Products
//! POST   /api/products           - Create
//! GET    /api/products           - List with filters and paging
//! GET    /api/products/{id}      - Get one
//! PUT    /api/products/{id}      - Replace
//! DELETE /api/products/{id}      - Delete
//!
//! # Cart items
//! POST   /api/cart-items
//! GET    /api/cart-items
//! GET    /api/cart-items/{id}
//! PUT    /api/cart-items/{id}
//! DELETE /api/cart-items/{id}
//!
//! # News
//! POST   /api/news
//! GET    /api/news
//! GET    /api/news/{id}
//! PUT    /api/news/{id}
//! DELETE /api/news/{id}
//! ```
//!
//! `PUT` on a collection URL is answered with 405 by the router.

pub mod cart_items;
pub mod headers;
pub mod health;
pub mod news;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route(
            "/cart-items",
            get(cart_items::list).post(cart_items::create),
        )
        .route(
            "/cart-items/{id}",
            get(cart_items::show)
                .put(cart_items::update)
                .delete(cart_items::delete),
        )
        .route("/news", get(news::list).post(news::create))
        .route(
            "/news/{id}",
            get(news::show).put(news::update).delete(news::delete),
        )
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}
