//! Remote API client for the attachment listing endpoint.
//!
//! The resolver only depends on the [`AttachmentApi`] trait; the HTTP
//! implementation talks to the instance's text app.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use super::Router;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Attachment, AttachmentListRequest};

/// Route of the attachment listing endpoint.
pub const ATTACHMENTS_ROUTE: &str = "/apps/text/attachments";

/// Source of a session's attachment list.
#[async_trait]
pub trait AttachmentApi: Send + Sync {
    /// Fetch every attachment of the document named in `request`.
    async fn list_attachments(&self, request: &AttachmentListRequest) -> Result<Vec<Attachment>>;
}

/// [`AttachmentApi`] over HTTP.
#[derive(Clone)]
pub struct HttpAttachmentApi {
    client: Client,
    router: Router,
}

impl HttpAttachmentApi {
    /// Create a client for the instance behind `router`.
    pub fn new(router: Router, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, router })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.router()?,
            config.request_timeout(),
            &config.http.user_agent,
        )
    }

    /// Router of the instance this client talks to.
    pub fn router(&self) -> &Router {
        &self.router
    }
}

#[async_trait]
impl AttachmentApi for HttpAttachmentApi {
    async fn list_attachments(&self, request: &AttachmentListRequest) -> Result<Vec<Attachment>> {
        let url = self.router.generate_url(ATTACHMENTS_ROUTE, &[]);

        debug!(
            url = %url,
            document_id = ?request.document_id,
            session_id = ?request.session_id,
            "Fetching attachment list"
        );

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Attachment list request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let attachments: Vec<Attachment> = response
            .json()
            .await
            .map_err(|e| Error::Decode(format!("Failed to parse attachment list: {}", e)))?;

        debug!(count = attachments.len(), "Fetched attachment list");
        Ok(attachments)
    }
}
