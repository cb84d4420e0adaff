//! Product repository.

use mini_shop_core::{Page, Pageable, ProductId};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::specification::{push_order_by, push_page};
use super::{RepositoryError, Specification, map_delete_error, to_total};
use crate::criteria::ProductCriteria;
use crate::models::{Product, ProductInput};

const COLUMNS: &str = "p.id, p.title, p.price, p.image";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    price: Decimal,
    image: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            title: row.title,
            price: row.price,
            image: row.image,
        }
    }
}

/// Map a sortable API property to its column.
fn sort_column(property: &str) -> Option<&'static str> {
    match property {
        "id" => Some("p.id"),
        "title" => Some("p.title"),
        "price" => Some("p.price"),
        "image" => Some("p.image"),
        _ => None,
    }
}

fn push_criteria(builder: &mut QueryBuilder<'_, Postgres>, criteria: &ProductCriteria) {
    Specification::new(builder)
        .range("p.id", &criteria.id)
        .string("p.title", &criteria.title)
        .range("p.price", &criteria.price)
        .string("p.image", &criteria.image);
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a product and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO shop.product AS p (title, price, image)
            VALUES ($1, $2, $3)
            RETURNING p.id, p.title, p.price, p.image
            ",
        )
        .bind(&input.title)
        .bind(input.price)
        .bind(&input.image)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace every column of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE shop.product AS p
            SET title = $2, price = $3, image = $4
            WHERE p.id = $1
            RETURNING p.id, p.title, p.price, p.image
            ",
        )
        .bind(id)
        .bind(&input.title)
        .bind(input.price)
        .bind(&input.image)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT p.id, p.title, p.price, p.image
            FROM shop.product p
            WHERE p.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Check whether a product exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM shop.product WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Delete a product. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a cart item still references it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| map_delete_error(e, "product"))?;

        Ok(result.rows_affected() > 0)
    }

    /// Find one page of products matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidSort` if a sort property is unknown.
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_by_criteria(
        &self,
        criteria: &ProductCriteria,
        pageable: &Pageable,
    ) -> Result<Page<Product>, RepositoryError> {
        let mut select = QueryBuilder::<Postgres>::new(if criteria.distinct {
            "SELECT DISTINCT "
        } else {
            "SELECT "
        });
        select.push(COLUMNS).push(" FROM shop.product p");
        push_criteria(&mut select, criteria);
        push_order_by(&mut select, &pageable.sort, sort_column, "p.id")?;
        push_page(&mut select, pageable);

        let mut count = QueryBuilder::<Postgres>::new(if criteria.distinct {
            "SELECT COUNT(DISTINCT p.id) FROM shop.product p"
        } else {
            "SELECT COUNT(*) FROM shop.product p"
        });
        push_criteria(&mut count, criteria);

        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;
        let rows: Vec<ProductRow> = select.build_query_as().fetch_all(self.pool).await?;

        Ok(Page::new(
            rows.into_iter().map(Product::from).collect(),
            pageable,
            to_total(total)?,
        ))
    }

    /// Count all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shop.product")
            .fetch_one(self.pool)
            .await?;

        to_total(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mini_shop_core::Criteria;

    use super::*;

    #[test]
    fn test_sort_whitelist() {
        assert_eq!(sort_column("price"), Some("p.price"));
        assert_eq!(sort_column("p.price"), None);
        assert_eq!(sort_column("id; DROP TABLE shop.product"), None);
    }

    #[test]
    fn test_criteria_render_against_product_columns() {
        let criteria = ProductCriteria::from_pairs(&[
            ("title.contains", "aaa"),
            ("price.greaterThan", "1"),
        ])
        .unwrap();

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM shop.product p");
        push_criteria(&mut qb, &criteria);
        assert_eq!(
            qb.sql(),
            r"SELECT COUNT(*) FROM shop.product p WHERE UPPER(p.title) LIKE $1 ESCAPE '\' AND p.price > $2"
        );
    }
}
