//! Testing utilities.
//!
//! [`MockTransport`] stands in for the posts service so pipelines can be
//! exercised without network access.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Notify;

use crate::error::{TransportError, TransportResult};
use crate::payload::SubmissionPayload;
use crate::transport::PostsTransport;
use crate::types::PostsCollection;

/// A submit call captured by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct SubmitCall {
    pub payload: SubmissionPayload,
    pub bearer: String,
}

/// Configurable in-process transport.
///
/// Responses are returned in the order they were queued; once the queue is
/// empty every call succeeds with an empty collection. Clones share state.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<TransportResult<PostsCollection>>>>,
    calls: Arc<Mutex<Vec<SubmitCall>>>,
    gate: Option<Arc<Notify>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn with_posts(self, posts: PostsCollection) -> Self {
        self.responses.lock().unwrap().push_back(Ok(posts));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queue a non-2xx status failure.
    pub fn with_status(self, status: u16, body: &str) -> Self {
        self.with_error(TransportError::Status {
            status,
            body: body.to_string(),
        })
    }

    /// Hold every call open until `gate` is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<SubmitCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<SubmitCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PostsTransport for MockTransport {
    async fn submit(
        &self,
        payload: SubmissionPayload,
        credential: &SecretString,
    ) -> TransportResult<PostsCollection> {
        self.calls.lock().unwrap().push(SubmitCall {
            payload,
            bearer: credential.expose_secret().to_string(),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}
