//! Cart item service.

use mini_shop_core::{CartItemId, Page, Pageable};
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::ServiceError;
use crate::criteria::CartItemCriteria;
use crate::db::CartItemRepository;
use crate::dto::CartItemDto;
use crate::models::CartItemInput;

/// Service for managing cart items.
pub struct CartItemService<'a> {
    cart_items: CartItemRepository<'a>,
}

impl<'a> CartItemService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            cart_items: CartItemRepository::new(pool),
        }
    }

    /// Insert a new cart item.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the product reference has no id.
    /// Returns `ServiceError::Repository` with `InvalidReference` if the
    /// product does not exist.
    #[instrument(skip(self))]
    pub async fn save(&self, dto: CartItemDto) -> Result<CartItemDto, ServiceError> {
        debug!("Request to save CartItem");
        let input = dto.into_input()?;
        let item = self.cart_items.create(input).await?;
        Ok(item.into())
    }

    /// Point an existing cart item at the product in `input`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the row is gone or the product
    /// does not exist.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: CartItemId,
        input: CartItemInput,
    ) -> Result<CartItemDto, ServiceError> {
        debug!("Request to update CartItem");
        let item = self.cart_items.update(id, input).await?;
        Ok(item.into())
    }

    /// Get one cart item by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the query fails.
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: CartItemId) -> Result<Option<CartItemDto>, ServiceError> {
        debug!("Request to get CartItem");
        Ok(self.cart_items.get_by_id(id).await?.map(CartItemDto::from))
    }

    /// Check whether a cart item exists.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the query fails.
    pub async fn exists(&self, id: CartItemId) -> Result<bool, ServiceError> {
        Ok(self.cart_items.exists(id).await?)
    }

    /// Delete a cart item. Deleting a missing item is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the delete fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CartItemId) -> Result<(), ServiceError> {
        debug!("Request to delete CartItem");
        self.cart_items.delete(id).await?;
        Ok(())
    }

    /// Find one page of cart items matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` for an unknown sort property or a
    /// failed query.
    #[instrument(skip_all, fields(criteria = %criteria, page = %pageable))]
    pub async fn find_by_criteria(
        &self,
        criteria: &CartItemCriteria,
        pageable: &Pageable,
    ) -> Result<Page<CartItemDto>, ServiceError> {
        debug!("Request to find CartItems by criteria");
        let page = self.cart_items.find_by_criteria(criteria, pageable).await?;
        Ok(page.map(CartItemDto::from))
    }
}
