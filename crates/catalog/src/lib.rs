//! Remote catalog client and URL resolution.
//!
//! [`Resolver::resolve`] turns an arbitrary track/playlist URL into the
//! catalog's canonical descriptor, following at most one redirect hop.

pub mod client;
pub mod error;
pub mod resolver;
pub mod response;

pub use {
    client::{ApiVersion, CatalogClient, HttpCatalogClient},
    error::{Error, Result},
    resolver::Resolver,
    response::{CatalogResponse, Descriptor, Resolution},
};
