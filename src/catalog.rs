//! Product lookup seam.
//!
//! The wishlist view resolves item refs to catalog records through this
//! trait; catalog logic itself lives in the host storefront.

use serde::Deserialize;

/// Minimal catalog record the wishlist view renders from.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[async_trait::async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Resolve product ids to catalog records. Unknown ids are simply
    /// absent from the result.
    async fn products_by_ids(&self, ids: &[u64]) -> Vec<Product>;
}

/// HTTP lookup against the storefront's product endpoint.
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into().trim_end_matches('/').to_owned() }
    }
}

#[derive(Deserialize)]
struct NodesResponse {
    #[serde(default)]
    nodes: Vec<Product>,
}

#[async_trait::async_trait]
impl CatalogLookup for HttpCatalog {
    async fn products_by_ids(&self, ids: &[u64]) -> Vec<Product> {
        if ids.is_empty() {
            return Vec::new();
        }

        let joined = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        let url = format!("{}/api/products?productIds={joined}", self.base_url);

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "product lookup request failed");
                return Vec::new();
            }
        };

        match response.json::<NodesResponse>().await {
            Ok(body) => body.nodes,
            Err(e) => {
                tracing::error!(error = %e, "product lookup decode failed");
                Vec::new()
            }
        }
    }
}
