use std::fmt;

use mini_shop_core::{Criteria, FilterError, FilterParam, RangeFilter, StringFilter};
use rust_decimal::Decimal;

/// Filters accepted by `GET /api/products`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCriteria {
    pub id: RangeFilter<i64>,
    pub title: StringFilter,
    pub price: RangeFilter<Decimal>,
    pub image: StringFilter,
    pub distinct: bool,
}

impl Criteria for ProductCriteria {
    fn apply(&mut self, param: &FilterParam<'_>) -> Result<bool, FilterError> {
        match param.field {
            "id" => self.id.apply(param),
            "title" => self.title.apply(param),
            "price" => self.price.apply(param),
            "image" => self.image.apply(param),
            _ => Ok(false),
        }
    }

    fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }
}

impl fmt::Display for ProductCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("ProductCriteria");
        if !self.id.is_empty() {
            out.field("id", &self.id);
        }
        if !self.title.is_empty() {
            out.field("title", &self.title);
        }
        if !self.price.is_empty() {
            out.field("price", &self.price);
        }
        if !self.image.is_empty() {
            out.field("image", &self.image);
        }
        if self.distinct {
            out.field("distinct", &self.distinct);
        }
        out.finish()
    }
}
