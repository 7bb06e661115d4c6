//! HTTP access to the product API.
//!
//! Action creators are generic over [`ProductApi`] so they can run against
//! the live server ([`HttpProductApi`]) or an in-process fake.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use proshop_core::{Product, ProductId};

/// Failure talking to the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// Text shown to the user: the server's `message` when it sent one,
    /// otherwise the transport error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } | Self::Transport(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Product endpoints used by the client.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError>;
    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError>;
    /// Create a product with the server's sample values.
    async fn create_product(&self) -> Result<Product, ApiError>;
}

/// [`ProductApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
    base: Url,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

impl HttpProductApi {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    #[must_use]
    pub const fn with_client(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    /// `{base}/api/products[/{id}]`, with the id percent-encoded.
    fn endpoint(&self, id: Option<&ProductId>) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::Transport(format!("invalid API base URL: {}", self.base)))?;
            segments.pop_if_empty().extend(["api", "products"]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

/// Pass through success responses; turn the rest into `ApiError::Server`,
/// preferring the server's `{"message": ...}` body.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageBody>(&body)
        .map(|b| b.message)
        .unwrap_or_else(|_| fallback_message(status));

    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

fn fallback_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.to_string(), str::to_owned)
}

#[async_trait]
impl ProductApi for HttpProductApi {
    #[tracing::instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.client.get(self.endpoint(None)?).send().await?;
        Ok(check(response).await?.json().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let response = self.client.get(self.endpoint(Some(id))?).send().await?;
        Ok(check(response).await?.json().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let response = self.client.delete(self.endpoint(Some(id))?).send().await?;
        check(response).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn create_product(&self) -> Result<Product, ApiError> {
        let response = self.client.post(self.endpoint(None)?).send().await?;
        Ok(check(response).await?.json().await?)
    }
}
