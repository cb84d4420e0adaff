//! Business logic between the HTTP handlers and the repositories.
//!
//! # Services
//!
//! - `product` - Catalog products
//! - `cart_item` - Cart items referencing products
//! - `news` - News banners
//!
//! Services take and return DTOs; they validate input and map entities so
//! handlers only deal with HTTP concerns.

mod cart_item;
mod error;
mod news;
mod product;

pub use cart_item::CartItemService;
pub use error::ServiceError;
pub use news::NewsService;
pub use product::ProductService;
