//! Per-entity filter criteria built from list query parameters.
//!
//! Each criteria type routes `field.operator=value` parameters to typed
//! filters (see [`mini_shop_core::filter`]). The repositories turn them into
//! SQL through [`crate::db::Specification`].

mod cart_item;
mod news;
mod product;

pub use cart_item::CartItemCriteria;
pub use news::NewsCriteria;
pub use product::ProductCriteria;
