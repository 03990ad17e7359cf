use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::domain::errors::LookupError;
use crate::domain::order::ProductSnapshot;
use crate::domain::ports::ProductLookup;

/// HTTP client for the product catalog service. Issues exactly one outbound
/// request per lookup, bounded by the configured timeout, and holds no state
/// between calls. Retry policy belongs to the caller.
pub struct HttpProductClient {
    client: Client,
    base_url: String,
}

impl HttpProductClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ProductLookup for HttpProductClient {
    async fn fetch_product(&self, product_id: &str) -> Result<ProductSnapshot, LookupError> {
        let url = format!("{}/products/{}", self.base_url, product_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(product_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(LookupError::RemoteError(response.status().as_u16()));
        }

        response.json::<ProductSnapshot>().await.map_err(|e| {
            if e.is_decode() {
                LookupError::MalformedResponse(e.to_string())
            } else {
                // Timeouts and dropped connections can also surface while
                // the body is being read.
                LookupError::Unreachable(e.to_string())
            }
        })
    }
}
