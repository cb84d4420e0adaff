//! CORS for browser clients on other origins.

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::routes::headers::{ALERT_HEADER, ERROR_HEADER, PARAMS_HEADER, TOTAL_COUNT_HEADER};

/// Build a CORS layer for `origins`, or `None` when the list is empty.
///
/// Origins that are not valid header values are skipped with a warning.
#[must_use]
pub fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    let exposed: Vec<HeaderName> = vec![
        ALERT_HEADER.clone(),
        ERROR_HEADER.clone(),
        PARAMS_HEADER.clone(),
        TOTAL_COUNT_HEADER.clone(),
        header::LINK,
        header::LOCATION,
    ];

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
            .expose_headers(exposed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_origins_disables_cors() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["bad\norigin".to_string()]).is_none());
    }

    #[test]
    fn test_origins_enable_cors() {
        assert!(cors_layer(&["http://localhost:4200".to_string()]).is_some());
    }
}
