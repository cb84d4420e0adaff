//! Translate filter criteria into SQL predicates.
//!
//! A [`Specification`] appends `WHERE`/`AND` clauses to a
//! [`sqlx::QueryBuilder`], binding every user value as a parameter. Column
//! names never come from the request; callers pass them as literals or
//! resolve them through a whitelist (see [`push_order_by`]).

use mini_shop_core::{Filter, Pageable, RangeFilter, Sort, StringFilter};
use sqlx::postgres::PgHasArrayType;
use sqlx::{Encode, Postgres, QueryBuilder, Type};

use super::RepositoryError;

/// Appends filter predicates to a query under construction.
pub struct Specification<'q, 'args> {
    builder: &'q mut QueryBuilder<'args, Postgres>,
    has_where: bool,
}

impl<'q, 'args> Specification<'q, 'args> {
    /// Start a `WHERE` clause on a builder that has none yet.
    pub const fn new(builder: &'q mut QueryBuilder<'args, Postgres>) -> Self {
        Self {
            builder,
            has_where: false,
        }
    }

    /// Open the next predicate and return the builder positioned after
    /// `WHERE` or `AND`.
    fn predicate(&mut self) -> &mut QueryBuilder<'args, Postgres> {
        self.builder
            .push(if self.has_where { " AND " } else { " WHERE " });
        self.has_where = true;
        &mut *self.builder
    }

    /// Add the equality, membership and presence conditions of `filter`.
    pub fn filter<T>(&mut self, column: &str, filter: &Filter<T>) -> &mut Self
    where
        T: Clone + Send + 'args + Encode<'args, Postgres> + Type<Postgres> + PgHasArrayType,
        Vec<T>: Encode<'args, Postgres> + Type<Postgres>,
    {
        if let Some(value) = &filter.equals {
            self.predicate()
                .push(format_args!("{column} = "))
                .push_bind(value.clone());
        }
        if let Some(value) = &filter.not_equals {
            self.predicate()
                .push(format_args!("{column} <> "))
                .push_bind(value.clone());
        }
        if let Some(values) = &filter.in_list {
            self.predicate()
                .push(format_args!("{column} = ANY("))
                .push_bind(values.clone())
                .push(")");
        }
        if let Some(values) = &filter.not_in {
            self.predicate()
                .push(format_args!("NOT ({column} = ANY("))
                .push_bind(values.clone())
                .push("))");
        }
        if let Some(specified) = filter.specified {
            let check = if specified { "IS NOT NULL" } else { "IS NULL" };
            self.predicate().push(format_args!("{column} {check}"));
        }
        self
    }

    /// Add the conditions of a range filter, bounds included.
    pub fn range<T>(&mut self, column: &str, filter: &RangeFilter<T>) -> &mut Self
    where
        T: Clone + Send + 'args + Encode<'args, Postgres> + Type<Postgres> + PgHasArrayType,
        Vec<T>: Encode<'args, Postgres> + Type<Postgres>,
    {
        self.filter(column, &filter.base);
        let bounds = [
            (">", &filter.greater_than),
            ("<", &filter.less_than),
            (">=", &filter.greater_than_or_equal),
            ("<=", &filter.less_than_or_equal),
        ];
        for (op, bound) in bounds {
            if let Some(value) = bound {
                self.predicate()
                    .push(format_args!("{column} {op} "))
                    .push_bind(value.clone());
            }
        }
        self
    }

    /// Add the conditions of a string filter.
    ///
    /// `contains` and `doesNotContain` compare case-insensitively and treat
    /// the value literally, so `%` and `_` match only themselves.
    pub fn string(&mut self, column: &str, filter: &StringFilter) -> &mut Self {
        self.filter(column, &filter.base);
        if let Some(value) = &filter.contains {
            self.predicate()
                .push(format_args!("UPPER({column}) LIKE "))
                .push_bind(like_pattern(value))
                .push(r" ESCAPE '\'");
        }
        if let Some(value) = &filter.does_not_contain {
            self.predicate()
                .push(format_args!("NOT (UPPER({column}) LIKE "))
                .push_bind(like_pattern(value))
                .push(r" ESCAPE '\')");
        }
        self
    }
}

/// Build an upper-cased `%value%` pattern with LIKE wildcards escaped.
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.to_uppercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Append `ORDER BY` for the requested sorts followed by `tiebreak`.
///
/// `resolve` maps an API property name to a column expression and returns
/// `None` for anything not sortable.
///
/// # Errors
///
/// Returns `RepositoryError::InvalidSort` for an unknown property.
pub fn push_order_by<F>(
    builder: &mut QueryBuilder<'_, Postgres>,
    sorts: &[Sort],
    resolve: F,
    tiebreak: &str,
) -> Result<(), RepositoryError>
where
    F: Fn(&str) -> Option<&'static str>,
{
    let mut columns = Vec::with_capacity(sorts.len() + 1);
    for sort in sorts {
        let column = resolve(&sort.property)
            .ok_or_else(|| RepositoryError::InvalidSort(sort.property.clone()))?;
        columns.push(format!("{column} {}", sort.direction.as_sql()));
    }
    if !sorts
        .iter()
        .any(|sort| resolve(&sort.property) == Some(tiebreak))
    {
        columns.push(format!("{tiebreak} ASC"));
    }
    builder.push(" ORDER BY ").push(columns.join(", "));
    Ok(())
}

/// Append `LIMIT`/`OFFSET` for a page request.
pub fn push_page(builder: &mut QueryBuilder<'_, Postgres>, pageable: &Pageable) {
    builder
        .push(" LIMIT ")
        .push_bind(pageable.limit())
        .push(" OFFSET ")
        .push_bind(pageable.offset());
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mini_shop_core::{Direction, FilterParam};
    use rust_decimal::Decimal;

    use super::*;

    fn select() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new("SELECT p.id FROM shop.product p")
    }

    #[test]
    fn test_empty_filters_add_nothing() {
        let mut qb = select();
        Specification::new(&mut qb)
            .range("p.id", &RangeFilter::<i64>::default())
            .string("p.title", &StringFilter::default());
        assert_eq!(qb.sql(), "SELECT p.id FROM shop.product p");
    }

    #[test]
    fn test_filter_predicates_are_joined_with_and() {
        let mut filter = Filter::<i64>::default();
        filter.equals = Some(1);
        filter.in_list = Some(vec![1, 2]);
        filter.not_in = Some(vec![3]);
        filter.specified = Some(false);

        let mut qb = select();
        Specification::new(&mut qb).filter("p.id", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT p.id FROM shop.product p WHERE p.id = $1 AND p.id = ANY($2) \
             AND NOT (p.id = ANY($3)) AND p.id IS NULL"
        );
    }

    #[test]
    fn test_range_bounds() {
        let mut filter = RangeFilter::<Decimal>::default();
        filter.greater_than = Some(Decimal::ONE);
        filter.less_than_or_equal = Some(Decimal::TEN);

        let mut qb = select();
        Specification::new(&mut qb).range("p.price", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT p.id FROM shop.product p WHERE p.price > $1 AND p.price <= $2"
        );
    }

    #[test]
    fn test_string_contains_is_case_insensitive() {
        let mut filter = StringFilter::default();
        filter
            .apply(&FilterParam::split("title.doesNotContain", "bbb").unwrap())
            .unwrap();

        let mut qb = select();
        Specification::new(&mut qb).string("p.title", &filter);
        assert_eq!(
            qb.sql(),
            r"SELECT p.id FROM shop.product p WHERE NOT (UPPER(p.title) LIKE $1 ESCAPE '\')"
        );
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("aaa"), "%AAA%");
        assert_eq!(like_pattern("50%_off"), r"%50\%\_OFF%");
        assert_eq!(like_pattern(r"a\b"), r"%A\\B%");
    }

    #[test]
    fn test_order_by_appends_tiebreak() {
        let resolve = |p: &str| match p {
            "id" => Some("p.id"),
            "title" => Some("p.title"),
            _ => None,
        };

        let mut qb = select();
        let sorts = vec![Sort {
            property: "title".to_string(),
            direction: Direction::Desc,
        }];
        push_order_by(&mut qb, &sorts, resolve, "p.id").unwrap();
        assert!(qb.sql().ends_with(" ORDER BY p.title DESC, p.id ASC"));

        let mut qb = select();
        let sorts = Sort::parse("id,desc");
        push_order_by(&mut qb, &sorts, resolve, "p.id").unwrap();
        assert!(qb.sql().ends_with(" ORDER BY p.id DESC"));
    }

    #[test]
    fn test_order_by_rejects_unknown_property() {
        let mut qb = select();
        let err = push_order_by(&mut qb, &Sort::parse("password"), |_| None, "p.id").unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidSort(p) if p == "password"));
    }

    #[test]
    fn test_push_page() {
        let mut qb = select();
        push_page(&mut qb, &Pageable::new(2, 10));
        assert!(qb.sql().ends_with(" LIMIT $1 OFFSET $2"));
    }
}
