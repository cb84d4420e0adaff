//! Cart item domain model.

use mini_shop_core::{CartItemId, ProductId};

use super::Product;

/// An item in the cart, loaded together with its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    /// The referenced product, if any.
    pub product: Option<Product>,
}

/// Column values for inserting or replacing a cart item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItemInput {
    pub product_id: Option<ProductId>,
}
