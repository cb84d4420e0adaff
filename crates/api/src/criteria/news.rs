use std::fmt;

use mini_shop_core::{Criteria, FilterError, FilterParam, RangeFilter, StringFilter};

/// Filters accepted by `GET /api/news`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsCriteria {
    pub id: RangeFilter<i64>,
    pub image: StringFilter,
    pub distinct: bool,
}

impl Criteria for NewsCriteria {
    fn apply(&mut self, param: &FilterParam<'_>) -> Result<bool, FilterError> {
        match param.field {
            "id" => self.id.apply(param),
            "image" => self.image.apply(param),
            _ => Ok(false),
        }
    }

    fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }
}

impl fmt::Display for NewsCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("NewsCriteria");
        if !self.id.is_empty() {
            out.field("id", &self.id);
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
