use mini_shop_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::field_error;
use crate::models::{Product, ProductInput};

/// Product as exchanged over `/api/products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<ProductId>,

    #[serde(default)]
    #[validate(required, length(max = 255), does_not_contain(pattern = "\0"))]
    pub title: Option<String>,

    /// Serialized as a JSON number.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(required)]
    pub price: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required, length(max = 255), does_not_contain(pattern = "\0"))]
    pub image: Option<String>,
}

/// `NUMERIC(21,2)` leaves 19 digits before the decimal point.
fn price_fits_column(price: Decimal) -> bool {
    price.abs() < Decimal::from(10_000_000_000_000_000_000_u64)
}

impl ProductDto {
    /// Validate the body and extract the column values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` if a required field is missing, a text field
    /// is too long or contains NUL, or the price does not fit the column.
    pub fn into_input(self) -> Result<ProductInput, ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);
        if self.price.is_some_and(|price| !price_fits_column(price)) {
            errors.add("price", ValidationError::new("range"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        let Some(title) = self.title else {
            return Err(field_error("title", "required"));
        };
        let Some(price) = self.price else {
            return Err(field_error("price", "required"));
        };
        let Some(image) = self.image else {
            return Err(field_error("image", "required"));
        };
        Ok(ProductInput {
            title,
            price,
            image,
        })
    }
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: Some(product.id),
            title: Some(product.title),
            price: Some(product.price),
            image: Some(product.image),
        }
    }
}
