//! Normalization pipeline for JD catalog records.
//!
//! Raw provider payloads (search hits, product base info, image lists and
//! prices) are fetched through a [`CatalogProvider`] and reshaped into the
//! display types defined in `jdcat-core`. [`Catalog`] ties the pieces
//! together; [`JdClient`] is the HTTP-backed provider.

pub mod batch;
pub mod brand;
pub mod client;
pub mod error;
pub mod facade;
pub mod photos;
pub mod price;
pub mod provider;
pub mod text;
pub mod types;

#[cfg(test)]
mod fake_provider;

pub use batch::{fetch_in_chunks, BatchOptions, BatchResult};
pub use brand::{extract_product_info, DEFAULT_STORE};
pub use client::JdClient;
pub use error::{ErrorKind, ProviderError};
pub use facade::{Catalog, CatalogOptions};
pub use photos::{
    build_photo_set, build_search_hit, build_search_result, relative_path, PLACEHOLDER_PHOTO,
};
pub use provider::{CatalogProvider, CatalogRequest, ProviderResponse};
