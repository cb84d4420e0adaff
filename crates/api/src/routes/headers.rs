//! Alert and pagination response headers.
//!
//! Clients read `X-backendApp-alert` to show a toast after a write and
//! `X-backendApp-error` after a rejected one. List endpoints add
//! `X-Total-Count` and an RFC 8288 `Link` header for page navigation.

use axum::http::header::LINK;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri};
use mini_shop_core::Page;
use url::form_urlencoded;

/// Application name used in header names and alert text.
pub const APPLICATION_NAME: &str = "backendApp";

/// `X-backendApp-alert`
pub static ALERT_HEADER: HeaderName = HeaderName::from_static("x-backendapp-alert");
/// `X-backendApp-error`
pub static ERROR_HEADER: HeaderName = HeaderName::from_static("x-backendapp-error");
/// `X-backendApp-params`
pub static PARAMS_HEADER: HeaderName = HeaderName::from_static("x-backendapp-params");
/// `X-Total-Count`
pub static TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

fn insert(headers: &mut HeaderMap, name: &HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name.clone(), value);
        }
        Err(_) => tracing::warn!(header = %name, value, "Dropping non-ASCII header value"),
    }
}

fn alert(message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, &ALERT_HEADER, message);
    let encoded: String = form_urlencoded::byte_serialize(param.as_bytes()).collect();
    insert(&mut headers, &PARAMS_HEADER, &encoded);
    headers
}

/// Headers announcing a created entity.
#[must_use]
pub fn entity_creation_alert(entity_name: &str, id: &str) -> HeaderMap {
    alert(
        &format!("A new {entity_name} is created with identifier {id}"),
        id,
    )
}

/// Headers announcing an updated entity.
#[must_use]
pub fn entity_update_alert(entity_name: &str, id: &str) -> HeaderMap {
    alert(
        &format!("A {entity_name} is updated with identifier {id}"),
        id,
    )
}

/// Headers announcing a deleted entity.
#[must_use]
pub fn entity_deletion_alert(entity_name: &str, id: &str) -> HeaderMap {
    alert(
        &format!("A {entity_name} is deleted with identifier {id}"),
        id,
    )
}

/// Headers describing a rejected request.
#[must_use]
pub fn failure_alert(entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, &ERROR_HEADER, &format!("error.{error_key}"));
    insert(&mut headers, &PARAMS_HEADER, entity_name);
    headers
}

/// `X-Total-Count` and `Link` headers for one page of a listing at `uri`.
#[must_use]
pub fn pagination<T>(uri: &Uri, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        TOTAL_COUNT_HEADER.clone(),
        HeaderValue::from(page.total_elements),
    );

    let size = page.size;
    let last = page.total_pages().saturating_sub(1);
    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(link(uri, u64::from(page.number) + 1, size, "next"));
    }
    if page.has_previous() {
        links.push(link(uri, u64::from(page.number) - 1, size, "prev"));
    }
    links.push(link(uri, last, size, "last"));
    links.push(link(uri, 0, size, "first"));
    insert(&mut headers, &LINK, &links.join(","));
    headers
}

/// One `<uri>; rel="..."` entry with `page` and `size` replaced.
fn link(uri: &Uri, page: u64, size: u32, rel: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(existing) = uri.query() {
        for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
            if key != "page" && key != "size" {
                query.append_pair(&key, &value);
            }
        }
    }
    query
        .append_pair("page", &page.to_string())
        .append_pair("size", &size.to_string());
    format!("<{}?{}>; rel=\"{rel}\"", uri.path(), query.finish())
}
