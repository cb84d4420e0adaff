//! Mini Shop Core - Shared types library.
//!
//! This crate provides common types used across all Mini Shop components:
//! - `api` - REST backend for products, cart items and news
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs
//! - [`filter`] - Typed `field.operator=value` filters and the [`Criteria`] trait
//! - [`page`] - Page requests (`page`, `size`, `sort`) and result pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod filter;
pub mod page;
pub mod types;

pub use filter::{Criteria, Filter, FilterError, FilterParam, FilterValue, RangeFilter, StringFilter};
pub use page::{Direction, Page, PageError, Pageable, Sort};
pub use types::*;
