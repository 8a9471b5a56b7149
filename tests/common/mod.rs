//! Common test utilities and helpers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use text_bridge::models::{Attachment, AttachmentListRequest};
use text_bridge::services::AttachmentApi;
use text_bridge::Result;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BASE_URL: &str = "https://cloud.example.com";

/// Install a test subscriber once; output only shows for failing tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("text_bridge=debug")
        .with_test_writer()
        .try_init();
}

/// Attachment with a name and image URLs derived from it.
pub fn image_attachment(name: &str) -> Attachment {
    let mut attachment = Attachment::named(name);
    attachment.is_image = true;
    attachment.mimetype = Some("image/png".to_string());
    attachment.preview_url = format!("/preview/{}", name);
    attachment.full_url = format!("/full/{}", name);
    attachment
}

/// In-memory attachment API answering from a script of responses.
///
/// Once the script runs out, the last response is repeated.
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Vec<Attachment>>>>,
    last: Mutex<Result<Vec<Attachment>>>,
    requests: Mutex<Vec<AttachmentListRequest>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedApi {
    pub fn new(responses: Vec<Result<Vec<Attachment>>>) -> Arc<Self> {
        Self::with_delay(responses, Duration::ZERO)
    }

    pub fn with_delay(responses: Vec<Result<Vec<Attachment>>>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(Ok(Vec::new())),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    /// Always answer with the same list.
    pub fn fixed(attachments: Vec<Attachment>) -> Arc<Self> {
        Self::new(vec![Ok(attachments)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<AttachmentListRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Wait until the API has been called `expected` times.
    pub async fn wait_for_calls(&self, expected: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls() < expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("API was not called in time");
    }
}

#[async_trait]
impl AttachmentApi for ScriptedApi {
    async fn list_attachments(&self, request: &AttachmentListRequest) -> Result<Vec<Attachment>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(response) => {
                *self.last.lock().unwrap() = response.clone();
                response
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

/// Mock server answering the attachment listing endpoint with `body`.
pub async fn listing_server(body: Value, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/index.php/apps/text/attachments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(&server)
        .await;

    server
}

/// Mock server failing the attachment listing endpoint.
pub async fn failing_listing_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/index.php/apps/text/attachments"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    server
}
