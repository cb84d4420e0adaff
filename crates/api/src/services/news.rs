//! News service.

use mini_shop_core::{NewsId, Page, Pageable};
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::ServiceError;
use crate::criteria::NewsCriteria;
use crate::db::NewsRepository;
use crate::dto::NewsDto;
use crate::models::NewsInput;

/// Service for managing news.
pub struct NewsService<'a> {
    news: NewsRepository<'a>,
}

impl<'a> NewsService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            news: NewsRepository::new(pool),
        }
    }

    /// Validate and insert a news entry.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for invalid fields.
    /// Returns `ServiceError::Repository` if the insert fails.
    #[instrument(skip(self))]
    pub async fn save(&self, dto: NewsDto) -> Result<NewsDto, ServiceError> {
        debug!("Request to save News");
        let input = dto.into_input()?;
        Ok(self.news.create(&input).await?.into())
    }

    /// Replace an existing news entry with already validated values.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` with `NotFound` if the row is gone.
    #[instrument(skip(self))]
    pub async fn update(&self, id: NewsId, input: NewsInput) -> Result<NewsDto, ServiceError> {
        debug!("Request to update News");
        Ok(self.news.update(id, &input).await?.into())
    }

    /// Get one news entry by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the query fails.
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: NewsId) -> Result<Option<NewsDto>, ServiceError> {
        debug!("Request to get News");
        Ok(self.news.get_by_id(id).await?.map(NewsDto::from))
    }

    /// Check whether a news entry exists.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the query fails.
    pub async fn exists(&self, id: NewsId) -> Result<bool, ServiceError> {
        Ok(self.news.exists(id).await?)
    }

    /// Delete a news entry. Deleting a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the delete fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: NewsId) -> Result<(), ServiceError> {
        debug!("Request to delete News");
        self.news.delete(id).await?;
        Ok(())
    }

    /// Find one page of news matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` for an unknown sort property or a
    /// failed query.
    #[instrument(skip_all, fields(criteria = %criteria, page = %pageable))]
    pub async fn find_by_criteria(
        &self,
        criteria: &NewsCriteria,
        pageable: &Pageable,
    ) -> Result<Page<NewsDto>, ServiceError> {
        debug!("Request to find News by criteria");
        let page = self.news.find_by_criteria(criteria, pageable).await?;
        Ok(page.map(NewsDto::from))
    }
}
