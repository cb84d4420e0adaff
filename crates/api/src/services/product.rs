//! Product service.

use mini_shop_core::{Page, Pageable, ProductId};
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::ServiceError;
use crate::criteria::ProductCriteria;
use crate::db::ProductRepository;
use crate::dto::ProductDto;
use crate::models::ProductInput;

/// Service for managing products.
pub struct ProductService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> ProductService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// Validate and insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for invalid fields.
    /// Returns `ServiceError::Repository` if the insert fails.
    #[instrument(skip(self))]
    pub async fn save(&self, dto: ProductDto) -> Result<ProductDto, ServiceError> {
        debug!("Request to save Product");
        let input = dto.into_input()?;
        let product = self.products.create(&input).await?;
        Ok(product.into())
    }

    /// Replace an existing product with already validated values.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` with `NotFound` if the row is gone.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<ProductDto, ServiceError> {
        debug!("Request to update Product");
        let product = self.products.update(id, &input).await?;
        Ok(product.into())
    }

    /// Get one product by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the query fails.
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: ProductId) -> Result<Option<ProductDto>, ServiceError> {
        debug!("Request to get Product");
        Ok(self.products.get_by_id(id).await?.map(ProductDto::from))
    }

    /// Check whether a product exists.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the query fails.
    pub async fn exists(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(self.products.exists(id).await?)
    }

    /// Delete a product. Deleting a missing product is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` with `Conflict` if a cart item
    /// still references the product.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        debug!("Request to delete Product");
        if !self.products.delete(id).await? {
            debug!("Product was already absent");
        }
        Ok(())
    }

    /// Find one page of products matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` for an unknown sort property or a
    /// failed query.
    #[instrument(skip_all, fields(criteria = %criteria, page = %pageable))]
    pub async fn find_by_criteria(
        &self,
        criteria: &ProductCriteria,
        pageable: &Pageable,
    ) -> Result<Page<ProductDto>, ServiceError> {
        debug!("Request to find Products by criteria");
        let page = self.products.find_by_criteria(criteria, pageable).await?;
        Ok(page.map(ProductDto::from))
    }
}
