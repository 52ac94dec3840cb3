//! Network exchange with the posts service.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::error::{TransportError, TransportResult};
use crate::payload::SubmissionPayload;
use crate::types::{parse_posts, PostsCollection};

/// Base URL of the posts service during local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Sends a submission and returns the service's full posts collection.
///
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait PostsTransport: Send + Sync {
    async fn submit(
        &self,
        payload: SubmissionPayload,
        credential: &SecretString,
    ) -> TransportResult<PostsCollection>;
}

/// reqwest-backed transport posting multipart forms to `{base_url}/posts`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at another deployment of the posts service.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reuse an existing HTTP client (shared connection pool, proxies, ...).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/posts", self.base_url)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostsTransport for HttpTransport {
    async fn submit(
        &self,
        payload: SubmissionPayload,
        credential: &SecretString,
    ) -> TransportResult<PostsCollection> {
        let url = self.endpoint();
        let form = payload.into_form()?;

        debug!(url = %url, "Sending create-post request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Create-post request failed");
                TransportError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(error = %e, "Failed to read rejection body");
                    format!("<unreadable body: {e}>")
                }
            };
            warn!(status = status.as_u16(), body = %body, "Posts service rejected post");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(TransportError::Network)?;
        let posts = parse_posts(&body).map_err(|e| {
            warn!(error = %e, "Posts service returned an unreadable body");
            TransportError::Parse(e)
        })?;

        debug!(count = posts.len(), "Create-post request succeeded");
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_local_posts_route() {
        assert_eq!(HttpTransport::new().endpoint(), "http://localhost:3001/posts");
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let transport = HttpTransport::new().with_base_url("https://lost.example.com/api/");

        assert_eq!(transport.base_url(), "https://lost.example.com/api");
        assert_eq!(transport.endpoint(), "https://lost.example.com/api/posts");
    }
}
