use std::time::Duration;

use async_trait::async_trait;
use common::{Health, Product, ProductInput};
use configs::ClientConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::TransportError;

/// The catalog service as seen by the client. Every failure is a
/// [`TransportError`]; callers only branch on success or failure.
#[async_trait]
pub trait ProductApi: Send + Sync {
    fn base_url(&self) -> &str;
    async fn health(&self) -> Result<Health, TransportError>;
    async fn list(&self) -> Result<Vec<Product>, TransportError>;
    async fn create(&self, input: &ProductInput) -> Result<Product, TransportError>;
    async fn update(&self, id: i32, input: &ProductInput) -> Result<ProductInput, TransportError>;
    async fn delete(&self, id: i32) -> Result<(), TransportError>;
}

pub struct HttpProductApi {
    client: Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::from_reqwest(base_url, e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(&cfg.base_url, cfg.request_timeout_secs.map(Duration::from_secs))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and turn connection problems and non-2xx answers into errors.
    async fn send(&self, url: &str, req: RequestBuilder) -> Result<Response, TransportError> {
        let resp = req
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;
        debug!(%url, status = %resp.status(), "response received");
        resp.error_for_status()
            .map_err(|e| TransportError::from_reqwest(url, e))
    }

    async fn decode<T: DeserializeOwned>(url: &str, resp: Response) -> Result<T, TransportError> {
        resp.json::<T>().await.map_err(|e| TransportError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn health(&self) -> Result<Health, TransportError> {
        let url = self.url("/health");
        let resp = self.send(&url, self.client.get(&url)).await?;
        Self::decode(&url, resp).await
    }

    async fn list(&self) -> Result<Vec<Product>, TransportError> {
        let url = self.url("/products");
        let resp = self.send(&url, self.client.get(&url)).await?;
        Self::decode(&url, resp).await
    }

    async fn create(&self, input: &ProductInput) -> Result<Product, TransportError> {
        let url = self.url("/products");
        let resp = self.send(&url, self.client.post(&url).json(input)).await?;
        Self::decode(&url, resp).await
    }

    async fn update(&self, id: i32, input: &ProductInput) -> Result<ProductInput, TransportError> {
        let url = self.url(&format!("/products/{id}"));
        let resp = self.send(&url, self.client.put(&url).json(input)).await?;
        Self::decode(&url, resp).await
    }

    async fn delete(&self, id: i32) -> Result<(), TransportError> {
        let url = self.url(&format!("/products/{id}"));
        self.send(&url, self.client.delete(&url)).await?;
        Ok(())
    }
}
