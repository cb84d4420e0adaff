//! News domain model.

use mini_shop_core::NewsId;

/// A news banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    pub id: NewsId,
    pub image: String,
}

/// Column values for inserting or replacing a news entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsInput {
    pub image: String,
}
