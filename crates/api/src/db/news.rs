//! News repository.

use mini_shop_core::{NewsId, Page, Pageable};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::specification::{push_order_by, push_page};
use super::{RepositoryError, Specification, to_total};
use crate::criteria::NewsCriteria;
use crate::models::{News, NewsInput};

#[derive(sqlx::FromRow)]
struct NewsRow {
    id: i64,
    image: String,
}

impl From<NewsRow> for News {
    fn from(row: NewsRow) -> Self {
        Self {
            id: NewsId::new(row.id),
            image: row.image,
        }
    }
}

fn sort_column(property: &str) -> Option<&'static str> {
    match property {
        "id" => Some("n.id"),
        "image" => Some("n.image"),
        _ => None,
    }
}

fn push_criteria(builder: &mut QueryBuilder<'_, Postgres>, criteria: &NewsCriteria) {
    Specification::new(builder)
        .range("n.id", &criteria.id)
        .string("n.image", &criteria.image);
}

/// Repository for news database operations.
pub struct NewsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsRepository<'a> {
    /// Create a new news repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a news entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &NewsInput) -> Result<News, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(
            "INSERT INTO shop.news (image) VALUES ($1) RETURNING id, image",
        )
        .bind(&input.image)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace an existing news entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no news entry has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: NewsId, input: &NewsInput) -> Result<News, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>(
            "UPDATE shop.news SET image = $2 WHERE id = $1 RETURNING id, image",
        )
        .bind(id)
        .bind(&input.image)
        .fetch_optional(self.pool)
        .await?;

        row.map(News::from).ok_or(RepositoryError::NotFound)
    }

    /// Get a news entry by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: NewsId) -> Result<Option<News>, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRow>("SELECT id, image FROM shop.news WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(News::from))
    }

    /// Check whether a news entry exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: NewsId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM shop.news WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Delete a news entry. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: NewsId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.news WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find one page of news matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidSort` if a sort property is unknown.
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_by_criteria(
        &self,
        criteria: &NewsCriteria,
        pageable: &Pageable,
    ) -> Result<Page<News>, RepositoryError> {
        let mut select = QueryBuilder::<Postgres>::new(if criteria.distinct {
            "SELECT DISTINCT n.id, n.image FROM shop.news n"
        } else {
            "SELECT n.id, n.image FROM shop.news n"
        });
        push_criteria(&mut select, criteria);
        push_order_by(&mut select, &pageable.sort, sort_column, "n.id")?;
        push_page(&mut select, pageable);

        let mut count = QueryBuilder::<Postgres>::new(if criteria.distinct {
            "SELECT COUNT(DISTINCT n.id) FROM shop.news n"
        } else {
            "SELECT COUNT(*) FROM shop.news n"
        });
        push_criteria(&mut count, criteria);

        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;
        let rows: Vec<NewsRow> = select.build_query_as().fetch_all(self.pool).await?;

        Ok(Page::new(
            rows.into_iter().map(News::from).collect(),
            pageable,
            to_total(total)?,
        ))
    }

    /// Count all news entries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shop.news")
            .fetch_one(self.pool)
            .await?;

        to_total(count)
    }
}
