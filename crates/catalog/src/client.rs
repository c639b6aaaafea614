use std::time::Duration;

use {
    async_trait::async_trait,
    reqwest::{Client, redirect::Policy},
    serde_json::Value,
    shelve_config::CatalogConfig,
    tracing::debug,
};

use crate::{Error, Result};

/// Catalog API generation. Only v1 requests carry the client credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// GET `path` (including its query string) against the base URL for
    /// `version`, returning the parsed body.
    async fn lookup(&self, version: ApiVersion, path: &str) -> Result<Value>;

    /// GET an already absolute URL, returning the parsed body. No credential
    /// is appended.
    async fn fetch(&self, url: &str) -> Result<Value>;
}

/// [`CatalogClient`] over HTTPS.
///
/// HTTP-level redirects are not followed: the catalog reports its own
/// redirects in the JSON body and the resolver decides what to chase.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: Client,
    api_v1_base: String,
    api_v2_base: String,
    client_id: String,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(Policy::none())
            .user_agent(concat!("shelve/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Client)?;
        Ok(Self::with_client(http, config))
    }

    /// Use a preconfigured client (custom TLS, proxies, tests).
    pub fn with_client(http: Client, config: &CatalogConfig) -> Self {
        Self {
            http,
            api_v1_base: config.api_v1_base.trim_end_matches('/').to_string(),
            api_v2_base: config.api_v2_base.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
        }
    }

    /// Full request URL for a versioned lookup.
    pub fn endpoint(&self, version: ApiVersion, path: &str) -> String {
        match version {
            ApiVersion::V1 => {
                let sep = if path.contains('?') {
                    '&'
                } else {
                    '?'
                };
                format!("{}{path}{sep}client_id={}", self.api_v1_base, self.client_id)
            },
            ApiVersion::V2 => format!("{}{path}", self.api_v2_base),
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let resp = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| Error::transport(url, source))?;

        // Error and redirect statuses still carry a JSON body the resolver
        // needs, so the status code is only reported, never acted on.
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|source| Error::transport(url, source))?;

        serde_json::from_str(&body).map_err(|source| Error::Parse {
            url: url.to_string(),
            status,
            source,
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn lookup(&self, version: ApiVersion, path: &str) -> Result<Value> {
        debug!(?version, path, "catalog lookup");
        self.get_json(&self.endpoint(version, path)).await
    }

    async fn fetch(&self, url: &str) -> Result<Value> {
        debug!(url, "catalog fetch");
        self.get_json(url).await
    }
}
