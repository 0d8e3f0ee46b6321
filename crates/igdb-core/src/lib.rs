pub mod types;
pub mod error;
pub mod normalize;
pub mod query;
pub mod source;
pub mod manifest;
pub mod addon;

pub use error::{CatalogError, Result};
pub use types::*;
pub use normalize::{item_id, parse_item_id, release_year, rewrite_image_url, to_meta, ImageSize};
pub use query::{GameQuery, SortOrder, CATALOG_LIMIT};
pub use source::GameSource;
pub use manifest::{Manifest, CatalogDescriptor, CATALOG_ID};
pub use addon::{Addon, CatalogRequest};
