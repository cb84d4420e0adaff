//! Typed query-string filters.
//!
//! List endpoints accept filters in the form `field.operator=value`, for
//! example `title.contains=shirt` or `price.greaterThan=10`. Each filterable
//! field of an entity is represented by one of the filter types below, and an
//! entity's criteria struct routes incoming parameters to them through the
//! [`Criteria`] trait.
//!
//! # Operators
//!
//! | Operator | `Filter` | `RangeFilter` | `StringFilter` |
//! |---|---|---|---|
//! | `equals`, `notEquals` | yes | yes | yes |
//! | `in`, `notIn` | yes | yes | yes |
//! | `specified` | yes | yes | yes |
//! | `greaterThan`, `lessThan`, `greaterThanOrEqual`, `lessThanOrEqual` | | yes | |
//! | `contains`, `doesNotContain` | | | yes |
//!
//! `in` and `notIn` take a comma-separated list; repeating the key appends to
//! the list. Unknown operators are ignored, values that fail to parse are
//! reported as [`FilterError::InvalidValue`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Query parameter that toggles `SELECT DISTINCT`.
pub const DISTINCT_PARAM: &str = "distinct";

/// Errors raised while parsing filter parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A recognised parameter carried a value of the wrong type.
    #[error("invalid value for {param}: {value:?}")]
    InvalidValue {
        /// Full parameter name, e.g. `price.greaterThan`.
        param: String,
        /// The raw value as received.
        value: String,
    },
}

/// A single `field.operator=value` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParam<'a> {
    pub field: &'a str,
    pub operator: &'a str,
    pub value: &'a str,
}

impl<'a> FilterParam<'a> {
    /// Split a query key on its first `.`.
    ///
    /// Returns `None` for keys without an operator (`page`, `sort`, ...).
    #[must_use]
    pub fn split(key: &'a str, value: &'a str) -> Option<Self> {
        let (field, operator) = key.split_once('.')?;
        if field.is_empty() || operator.is_empty() {
            return None;
        }
        Some(Self {
            field,
            operator,
            value,
        })
    }

    fn invalid(&self) -> FilterError {
        FilterError::InvalidValue {
            param: format!("{}.{}", self.field, self.operator),
            value: self.value.to_string(),
        }
    }

    fn parse<T: FilterValue>(&self) -> Result<T, FilterError> {
        T::parse_value(self.value).ok_or_else(|| self.invalid())
    }

    fn parse_list<T: FilterValue>(&self) -> Result<Vec<T>, FilterError> {
        self.value
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| T::parse_value(part).ok_or_else(|| self.invalid()))
            .collect()
    }

    fn parse_bool(&self) -> Result<bool, FilterError> {
        parse_bool(self.value).ok_or_else(|| self.invalid())
    }
}

/// Parse a boolean query value (`true`/`false`, case-insensitive).
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A value type that can appear in a filter.
pub trait FilterValue: Sized + Clone + fmt::Debug {
    /// Parse a raw query-string value.
    fn parse_value(raw: &str) -> Option<Self>;
}

impl FilterValue for i64 {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FilterValue for Decimal {
    fn parse_value(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::from_str(raw)
            .or_else(|_| Self::from_scientific(raw))
            .ok()
    }
}

impl FilterValue for String {
    /// Text columns cannot hold NUL, so a value containing one is invalid.
    fn parse_value(raw: &str) -> Option<Self> {
        (!raw.contains('\0')).then(|| raw.to_string())
    }
}

fn extend<T>(target: &mut Option<Vec<T>>, values: Vec<T>) {
    target.get_or_insert_with(Vec::new).extend(values);
}

/// Equality, membership and null-check filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<T> {
    pub equals: Option<T>,
    pub not_equals: Option<T>,
    pub in_list: Option<Vec<T>>,
    pub not_in: Option<Vec<T>>,
    pub specified: Option<bool>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            equals: None,
            not_equals: None,
            in_list: None,
            not_in: None,
            specified: None,
        }
    }
}

impl<T: FilterValue> Filter<T> {
    /// Apply one parameter. Returns `Ok(false)` if the operator is unknown.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidValue` if the value cannot be parsed.
    pub fn apply(&mut self, param: &FilterParam<'_>) -> Result<bool, FilterError> {
        match param.operator {
            "equals" => self.equals = Some(param.parse()?),
            "notEquals" => self.not_equals = Some(param.parse()?),
            "in" => extend(&mut self.in_list, param.parse_list()?),
            "notIn" => extend(&mut self.not_in, param.parse_list()?),
            "specified" => self.specified = Some(param.parse_bool()?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Returns `true` if no operator is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.in_list.is_none()
            && self.not_in.is_none()
            && self.specified.is_none()
    }
}

/// Filter for ordered values (ids, prices).
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter<T> {
    pub base: Filter<T>,
    pub greater_than: Option<T>,
    pub less_than: Option<T>,
    pub greater_than_or_equal: Option<T>,
    pub less_than_or_equal: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            base: Filter::default(),
            greater_than: None,
            less_than: None,
            greater_than_or_equal: None,
            less_than_or_equal: None,
        }
    }
}

impl<T: FilterValue> RangeFilter<T> {
    /// Apply one parameter. Returns `Ok(false)` if the operator is unknown.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidValue` if the value cannot be parsed.
    pub fn apply(&mut self, param: &FilterParam<'_>) -> Result<bool, FilterError> {
        match param.operator {
            "greaterThan" => self.greater_than = Some(param.parse()?),
            "lessThan" => self.less_than = Some(param.parse()?),
            "greaterThanOrEqual" => self.greater_than_or_equal = Some(param.parse()?),
            "lessThanOrEqual" => self.less_than_or_equal = Some(param.parse()?),
            _ => return self.base.apply(param),
        }
        Ok(true)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.base.is_empty()
            && self.greater_than.is_none()
            && self.less_than.is_none()
            && self.greater_than_or_equal.is_none()
            && self.less_than_or_equal.is_none()
    }
}

/// Filter for text columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringFilter {
    pub base: Filter<String>,
    pub contains: Option<String>,
    pub does_not_contain: Option<String>,
}

impl StringFilter {
    /// Apply one parameter. Returns `Ok(false)` if the operator is unknown.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidValue` if the value cannot be parsed.
    pub fn apply(&mut self, param: &FilterParam<'_>) -> Result<bool, FilterError> {
        match param.operator {
            "contains" => self.contains = Some(param.parse()?),
            "doesNotContain" => self.does_not_contain = Some(param.parse()?),
            _ => return self.base.apply(param),
        }
        Ok(true)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.base.is_empty() && self.contains.is_none() && self.does_not_contain.is_none()
    }
}

/// Per-entity set of filters built from query parameters.
///
/// Implementors route each `field.operator=value` parameter to the filter for
/// that field; parameters for unknown fields are ignored.
pub trait Criteria: Default {
    /// Route one parameter. Returns `Ok(false)` if the field or operator is
    /// not recognised.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidValue` if the value cannot be parsed.
    fn apply(&mut self, param: &FilterParam<'_>) -> Result<bool, FilterError>;

    /// Set the `distinct` flag.
    fn set_distinct(&mut self, distinct: bool);

    /// Build criteria from decoded query-string pairs.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidValue` for the first malformed value.
    fn from_pairs<K, V>(pairs: &[(K, V)]) -> Result<Self, FilterError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if key == DISTINCT_PARAM {
                let distinct = parse_bool(value).ok_or_else(|| FilterError::InvalidValue {
                    param: DISTINCT_PARAM.to_string(),
                    value: value.to_string(),
                })?;
                criteria.set_distinct(distinct);
            } else if let Some(param) = FilterParam::split(key, value) {
                criteria.apply(&param)?;
            }
        }
        Ok(criteria)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn param<'a>(key: &'a str, value: &'a str) -> FilterParam<'a> {
        FilterParam::split(key, value).unwrap()
    }

    #[test]
    fn test_split_requires_field_and_operator() {
        assert!(FilterParam::split("page", "1").is_none());
        assert!(FilterParam::split(".equals", "1").is_none());
        assert!(FilterParam::split("id.", "1").is_none());

        let p = param("price.greaterThan", "10");
        assert_eq!(p.field, "price");
        assert_eq!(p.operator, "greaterThan");
    }

    #[test]
    fn test_filter_equality_operators() {
        let mut filter = Filter::<i64>::default();
        assert!(filter.apply(&param("id.equals", "5")).unwrap());
        assert!(filter.apply(&param("id.notEquals", "6")).unwrap());
        assert_eq!(filter.equals, Some(5));
        assert_eq!(filter.not_equals, Some(6));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_in_accumulates_across_repeated_keys() {
        let mut filter = Filter::<String>::default();
        filter.apply(&param("title.in", "AAA,BBB")).unwrap();
        filter.apply(&param("title.in", "CCC")).unwrap();
        assert_eq!(
            filter.in_list,
            Some(vec!["AAA".to_string(), "BBB".to_string(), "CCC".to_string()])
        );
    }

    #[test]
    fn test_specified_parses_bool() {
        let mut filter = Filter::<i64>::default();
        filter.apply(&param("id.specified", "FALSE")).unwrap();
        assert_eq!(filter.specified, Some(false));

        let err = filter.apply(&param("id.specified", "maybe")).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidValue {
                param: "id.specified".to_string(),
                value: "maybe".to_string(),
            }
        );
    }

    #[test]
    fn test_string_value_rejects_nul() {
        let mut filter = StringFilter::default();
        assert!(filter.apply(&param("title.equals", "a\0b")).is_err());
        assert!(filter.apply(&param("title.contains", "\0")).is_err());
        assert!(filter.apply(&param("title.in", "ok,a\0b")).is_err());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_unknown_operator_is_ignored() {
        let mut filter = StringFilter::default();
        assert!(!filter.apply(&param("title.startsWith", "A")).unwrap());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_range_filter_parses_decimal_bounds() {
        let mut filter = RangeFilter::<Decimal>::default();
        filter.apply(&param("price.greaterThan", "99")).unwrap();
        filter.apply(&param("price.lessThanOrEqual", "100.50")).unwrap();
        filter.apply(&param("price.in", "1,2.5")).unwrap();

        assert_eq!(filter.greater_than, Some(Decimal::new(99, 0)));
        assert_eq!(filter.less_than_or_equal, Some(Decimal::new(10050, 2)));
        assert_eq!(
            filter.base.in_list,
            Some(vec![Decimal::new(1, 0), Decimal::new(25, 1)])
        );
    }

    #[test]
    fn test_range_filter_rejects_non_numeric() {
        let mut filter = RangeFilter::<i64>::default();
        let err = filter.apply(&param("id.lessThan", "ten")).unwrap_err();
        assert!(err.to_string().contains("id.lessThan"));
    }

    #[test]
    fn test_string_filter_keeps_raw_text() {
        let mut filter = StringFilter::default();
        filter.apply(&param("image.contains", " foo ")).unwrap();
        filter.apply(&param("image.doesNotContain", "bar")).unwrap();
        assert_eq!(filter.contains.as_deref(), Some(" foo "));
        assert_eq!(filter.does_not_contain.as_deref(), Some("bar"));
    }

    #[derive(Default)]
    struct SampleCriteria {
        id: RangeFilter<i64>,
        distinct: Option<bool>,
    }

    impl Criteria for SampleCriteria {
        fn apply(&mut self, param: &FilterParam<'_>) -> Result<bool, FilterError> {
            match param.field {
                "id" => self.id.apply(param),
                _ => Ok(false),
            }
        }

        fn set_distinct(&mut self, distinct: bool) {
            self.distinct = Some(distinct);
        }
    }

    #[test]
    fn test_criteria_from_pairs_skips_paging_and_unknown_fields() {
        let pairs = [
            ("page", "1"),
            ("sort", "id,desc"),
            ("id.greaterThan", "3"),
            ("other.equals", "x"),
            ("distinct", "true"),
        ];
        let criteria = SampleCriteria::from_pairs(&pairs).unwrap();
        assert_eq!(criteria.id.greater_than, Some(3));
        assert_eq!(criteria.distinct, Some(true));
    }

    #[test]
    fn test_criteria_from_pairs_rejects_bad_distinct() {
        let result = SampleCriteria::from_pairs(&[("distinct", "yes")]);
        assert!(result.is_err());
    }
}
