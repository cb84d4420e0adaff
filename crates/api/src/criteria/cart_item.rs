use std::fmt;

use mini_shop_core::{Criteria, FilterError, FilterParam, RangeFilter};

/// Filters accepted by `GET /api/cart-items`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartItemCriteria {
    pub id: RangeFilter<i64>,
    /// Filter on the referenced product's id (`productId.*`).
    pub product_id: RangeFilter<i64>,
    pub distinct: bool,
}

impl Criteria for CartItemCriteria {
    fn apply(&mut self, param: &FilterParam<'_>) -> Result<bool, FilterError> {
        match param.field {
            "id" => self.id.apply(param),
            "productId" => self.product_id.apply(param),
            _ => Ok(false),
        }
    }

    fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }
}

impl fmt::Display for CartItemCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("CartItemCriteria");
        if !self.id.is_empty() {
            out.field("id", &self.id);
        }
        if !self.product_id.is_empty() {
            out.field("productId", &self.product_id);
        }
        if self.distinct {
            out.field("distinct", &self.distinct);
        }
        out.finish()
    }
}
