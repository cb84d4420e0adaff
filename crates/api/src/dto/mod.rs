//! JSON request and response bodies.
//!
//! DTO fields are optional so that a missing field reaches validation and is
//! reported as a field error rather than a deserialization failure.

mod cart_item;
mod news;
mod product;

pub use cart_item::CartItemDto;
pub use news::NewsDto;
pub use product::ProductDto;

use validator::{ValidationError, ValidationErrors};

/// Build a single-field validation failure.
fn field_error(field: &'static str, code: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code));
    errors
}
