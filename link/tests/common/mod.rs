//! Shared test support: a scripted mock transport.
#![allow(dead_code)]

use arango_link::{ApiResponse, Transport, TransportResult};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Transport that replays a scripted sequence of responses and records
/// every request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<TransportResult>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response
    pub fn expect(self, result: TransportResult) -> Self {
        self.responses.lock().unwrap().push_back(result);
        self
    }

    /// Everything the adapter sent, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, path: &str, body: Option<&Value>) -> TransportResult {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {}", method, path))
    }
}

impl Transport for MockTransport {
    fn get(&self, path: &str) -> TransportResult {
        self.record("GET", path, None)
    }

    fn head(&self, path: &str) -> TransportResult {
        self.record("HEAD", path, None)
    }

    fn post(&self, path: &str, body: &Value) -> TransportResult {
        self.record("POST", path, Some(body))
    }

    fn patch(&self, path: &str, body: &Value) -> TransportResult {
        self.record("PATCH", path, Some(body))
    }

    fn delete(&self, path: &str) -> TransportResult {
        self.record("DELETE", path, None)
    }
}

/// A bare 200 with an empty object body (collection-existence checks)
pub fn ok_empty() -> TransportResult {
    Ok(ApiResponse {
        status: 200,
        body: json!({}),
    })
}

/// A success response with the given body
pub fn ok_with(status: u16, body: Value) -> TransportResult {
    Ok(ApiResponse { status, body })
}

/// An error response with the given status and store error code
pub fn err_with(status: u16, error_num: Option<i64>, message: &str) -> TransportResult {
    Err(arango_link::ApiError {
        status: Some(status),
        error_num,
        message: message.to_string(),
    })
}
