use mini_shop_core::CartItemId;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use super::{ProductDto, field_error};
use crate::models::{CartItem, CartItemInput};

/// Cart item as exchanged over `/api/cart-items`.
///
/// Only `product.id` is read from requests; the other product fields are
/// ignored. Responses carry the product's `id`, `title` and `price`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    #[serde(default)]
    pub id: Option<CartItemId>,

    #[serde(default)]
    pub product: Option<ProductDto>,
}

impl CartItemDto {
    /// Extract the product reference.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` if `product` is present without an `id`.
    pub fn into_input(self) -> Result<CartItemInput, ValidationErrors> {
        let product_id = match self.product {
            Some(product) => Some(product.id.ok_or_else(|| field_error("product", "idnull"))?),
            None => None,
        };
        Ok(CartItemInput { product_id })
    }
}

impl From<CartItem> for CartItemDto {
    fn from(item: CartItem) -> Self {
        Self {
            id: Some(item.id),
            product: item.product.map(|product| ProductDto {
                image: None,
                ..ProductDto::from(product)
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mini_shop_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::Product;

    #[test]
    fn test_only_product_id_is_used() {
        let dto: CartItemDto =
            serde_json::from_str(r#"{"product": {"id": 7, "title": "ignored", "price": 1}}"#)
                .unwrap();
        let input = dto.into_input().unwrap();
        assert_eq!(input.product_id, Some(ProductId::new(7)));
    }

    #[test]
    fn test_product_is_optional() {
        let dto: CartItemDto = serde_json::from_str("{}").unwrap();
        assert_eq!(dto.into_input().unwrap().product_id, None);
    }

    #[test]
    fn test_product_without_id_is_rejected() {
        let dto: CartItemDto = serde_json::from_str(r#"{"product": {"title": "x"}}"#).unwrap();
        let errors = dto.into_input().unwrap_err();
        assert!(errors.field_errors().contains_key("product"));
    }

    #[test]
    fn test_nested_product_omits_image() {
        let dto = CartItemDto::from(CartItem {
            id: CartItemId::new(2),
            product: Some(Product {
                id: ProductId::new(7),
                title: "AAA".to_string(),
                price: Decimal::new(250, 2),
                image: "a.png".to_string(),
            }),
        });
        assert_eq!(
            serde_json::to_string(&dto).unwrap(),
            r#"{"id":2,"product":{"id":7,"title":"AAA","price":2.5}}"#
        );
    }

    #[test]
    fn test_serializes_without_product() {
        let dto = CartItemDto {
            id: Some(CartItemId::new(2)),
            product: None,
        };
        assert_eq!(
            serde_json::to_string(&dto).unwrap(),
            r#"{"id":2,"product":null}"#
        );
    }
}
