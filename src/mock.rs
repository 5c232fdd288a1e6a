// In-memory transport for exercising the client without a network.

use crate::api::{RawResponse, Transport};
use crate::error::{ClientError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// Canned responses keyed by URL, plus a log of every URL requested.
///
/// URLs with nothing registered answer `404 not found`.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, std::result::Result<RawResponse, String>>,
    calls: RefCell<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raw status and body for `url`.
    pub fn add_response(&mut self, url: impl Into<String>, status: u16, body: impl Into<String>) {
        self.responses.insert(
            url.into(),
            Ok(RawResponse {
                status,
                body: body.into(),
            }),
        );
    }

    /// Register a JSON body for `url`.
    pub fn add_json(&mut self, url: impl Into<String>, status: u16, body: &serde_json::Value) {
        self.add_response(url, status, body.to_string());
    }

    /// Make requests to `url` fail before any response arrives.
    pub fn add_failure(&mut self, url: impl Into<String>, message: impl Into<String>) {
        self.responses.insert(url.into(), Err(message.into()));
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<RawResponse> {
        self.calls.borrow_mut().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(res)) => Ok(res.clone()),
            Some(Err(msg)) => Err(ClientError::Request {
                message: msg.clone(),
                source: None,
            }),
            None => Ok(RawResponse {
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }
}
