//! Catalog domain module.
//!
//! Item records (menu items and books), the ordered catalog store that owns them,
//! the pure filter engine used for search, the built-in seed data, and the image
//! asset naming/fallback policy.

pub mod assets;
pub mod filter;
pub mod item;
pub mod seed;
pub mod store;

pub use assets::{AssetError, AssetLibrary, ImageSource, asset_file_name};
pub use filter::{ALL, CatalogQuery, CategoryFilter, StatusFilter, filter, matches};
pub use item::{Book, BookStatus, CatalogItem, MenuItem};
pub use store::Catalog;
