//! Domain models persisted by the repositories.

pub mod cart_item;
pub mod news;
pub mod product;

pub use cart_item::{CartItem, CartItemInput};
pub use news::{News, NewsInput};
pub use product::{Product, ProductInput};
