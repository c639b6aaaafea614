use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    Error, Result,
    client::{ApiVersion, CatalogClient},
    response::{CatalogResponse, Descriptor, Resolution},
};

/// Resolves user-facing URLs into catalog descriptors.
#[derive(Clone)]
pub struct Resolver {
    client: Arc<dyn CatalogClient>,
}

impl Resolver {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Resolve `url` through the catalog's `/resolve` endpoint.
    ///
    /// A redirect answer is followed exactly once; whatever the second hop
    /// returns is the descriptor, even if it looks like another redirect.
    /// Transport and parse failures are returned as errors, not as
    /// [`Resolution::NotFound`].
    pub async fn resolve(&self, url: &str) -> Result<Resolution> {
        let url = url.trim();
        url::Url::parse(url)
            .map_err(|e| Error::invalid_input(format!("invalid url '{url}': {e}")))?;

        let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
        let response = self
            .client
            .lookup(ApiVersion::V1, &format!("/resolve?url={encoded}"))
            .await?;

        match CatalogResponse::classify(response)? {
            CatalogResponse::ErrorList { message } => {
                debug!(url, message = %message, "catalog reports url not found");
                Ok(Resolution::NotFound)
            },
            CatalogResponse::Redirect { location } => {
                debug!(url, location = %location, "following catalog redirect");
                let target = self.client.fetch(&location).await?;
                let descriptor = Descriptor::new(target);
                info!(url, id = ?descriptor.id(), kind = ?descriptor.kind(), "resolved");
                Ok(Resolution::Resolved(descriptor))
            },
            CatalogResponse::Success(value) => {
                let descriptor = Descriptor::new(value);
                info!(url, id = ?descriptor.id(), kind = ?descriptor.kind(), "resolved");
                Ok(Resolution::Resolved(descriptor))
            },
        }
    }
}
