//! Cart item repository.
//!
//! Cart items are always loaded with their product through a `LEFT JOIN`, so
//! callers get the full product without a second round trip.

use mini_shop_core::{CartItemId, Page, Pageable, ProductId};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::specification::{push_order_by, push_page};
use super::{RepositoryError, Specification, map_write_error, to_total};
use crate::criteria::CartItemCriteria;
use crate::models::{CartItem, CartItemInput, Product};

const SELECT_JOINED: &str = "ci.id, ci.product_id, p.title AS product_title, \
     p.price AS product_price, p.image AS product_image \
     FROM shop.cart_item ci LEFT JOIN shop.product p ON p.id = ci.product_id";

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: i64,
    product_id: Option<i64>,
    product_title: Option<String>,
    product_price: Option<Decimal>,
    product_image: Option<String>,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        let product = match (
            row.product_id,
            row.product_title,
            row.product_price,
            row.product_image,
        ) {
            (Some(id), Some(title), Some(price), Some(image)) => Some(Product {
                id: ProductId::new(id),
                title,
                price,
                image,
            }),
            _ => None,
        };

        Self {
            id: CartItemId::new(row.id),
            product,
        }
    }
}

fn sort_column(property: &str) -> Option<&'static str> {
    match property {
        "id" => Some("ci.id"),
        "productId" | "product.id" => Some("ci.product_id"),
        _ => None,
    }
}

fn push_criteria(builder: &mut QueryBuilder<'_, Postgres>, criteria: &CartItemCriteria) {
    Specification::new(builder)
        .range("ci.id", &criteria.id)
        .range("ci.product_id", &criteria.product_id);
}

/// Repository for cart item database operations.
pub struct CartItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartItemRepository<'a> {
    /// Create a new cart item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a cart item and return it with its product loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: CartItemInput) -> Result<CartItem, RepositoryError> {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO shop.cart_item (product_id) VALUES ($1) RETURNING id")
                .bind(input.product_id)
                .fetch_one(self.pool)
                .await
                .map_err(|e| map_write_error(e, "product"))?;

        self.get_by_id(CartItemId::new(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Point an existing cart item at a different product (or none).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no cart item has this id.
    /// Returns `RepositoryError::InvalidReference` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CartItemId,
        input: CartItemInput,
    ) -> Result<CartItem, RepositoryError> {
        let result = sqlx::query("UPDATE shop.cart_item SET product_id = $2 WHERE id = $1")
            .bind(id)
            .bind(input.product_id)
            .execute(self.pool)
            .await
            .map_err(|e| map_write_error(e, "product"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Get a cart item by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(&format!(
            "SELECT {SELECT_JOINED} WHERE ci.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(CartItem::from))
    }

    /// Check whether a cart item exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: CartItemId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM shop.cart_item WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Delete a cart item. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: CartItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.cart_item WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find one page of cart items matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidSort` if a sort property is unknown.
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_by_criteria(
        &self,
        criteria: &CartItemCriteria,
        pageable: &Pageable,
    ) -> Result<Page<CartItem>, RepositoryError> {
        let mut select = QueryBuilder::<Postgres>::new(if criteria.distinct {
            "SELECT DISTINCT "
        } else {
            "SELECT "
        });
        select.push(SELECT_JOINED);
        push_criteria(&mut select, criteria);
        push_order_by(&mut select, &pageable.sort, sort_column, "ci.id")?;
        push_page(&mut select, pageable);

        let mut count = QueryBuilder::<Postgres>::new(if criteria.distinct {
            "SELECT COUNT(DISTINCT ci.id) FROM shop.cart_item ci"
        } else {
            "SELECT COUNT(*) FROM shop.cart_item ci"
        });
        push_criteria(&mut count, criteria);

        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;
        let rows: Vec<CartItemRow> = select.build_query_as().fetch_all(self.pool).await?;

        Ok(Page::new(
            rows.into_iter().map(CartItem::from).collect(),
            pageable,
            to_total(total)?,
        ))
    }
}
