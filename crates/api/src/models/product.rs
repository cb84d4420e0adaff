//! Product domain model.

use mini_shop_core::ProductId;
use rust_decimal::Decimal;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
}

/// Column values for inserting or replacing a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub title: String,
    pub price: Decimal,
    pub image: String,
}
