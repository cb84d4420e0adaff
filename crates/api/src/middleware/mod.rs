//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. CORS (only when allowed origins are configured)
//! 3. `TraceLayer` (request span)
//! 4. Request ID (recorded into the request span)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::request_id_middleware;
