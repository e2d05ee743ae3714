//! Mock backend for testing
//!
//! Returns configurable image bytes without invoking any external
//! renderer. Essential for unit tests and CI pipelines.

use std::sync::{Arc, Mutex};

use super::{ImageFormat, RenderBackend};
use crate::error::{PipevizError, Result};

/// Mock backend that returns predefined image bytes
pub struct MockBackend {
    /// Queue of byte responses to return (FIFO)
    responses: Arc<Mutex<Vec<Vec<u8>>>>,
    /// Default bytes when the queue is empty
    default_bytes: Vec<u8>,
    /// What is_available() reports
    available: bool,
    /// When set, render() fails with this message
    fail_with: Option<String>,
    /// Track all render calls (for assertions)
    requests: Arc<Mutex<Vec<(String, ImageFormat)>>>,
}

impl MockBackend {
    /// Create a mock backend that renders fixed placeholder bytes
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![])),
            default_bytes: b"mock image bytes".to_vec(),
            available: true,
            fail_with: None,
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Create with a queue of byte responses
    pub fn with_responses(responses: Vec<Vec<u8>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::new()
        }
    }

    /// Set the default bytes returned when the queue is empty
    pub fn with_default_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.default_bytes = bytes.into();
        self
    }

    /// Report the backend as unavailable
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Make every render call fail with the given message
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Add bytes to the response queue
    pub fn queue_response(&self, bytes: Vec<u8>) {
        self.responses.lock().unwrap().push(bytes);
    }

    /// Get all render calls made against this backend
    pub fn get_requests(&self) -> Vec<(String, ImageFormat)> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the most recent render call
    pub fn last_request(&self) -> Option<(String, ImageFormat)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn render(&self, dot_source: &str, format: ImageFormat) -> Result<Vec<u8>> {
        // Record the call
        self.requests
            .lock()
            .unwrap()
            .push((dot_source.to_string(), format));

        if let Some(message) = &self.fail_with {
            return Err(PipevizError::RenderFailed {
                details: message.clone(),
            });
        }

        // Get response from queue or use default
        let mut queue = self.responses.lock().unwrap();
        if queue.is_empty() {
            Ok(self.default_bytes.clone())
        } else {
            Ok(queue.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_returns_default_bytes() {
        let backend = MockBackend::new();
        let bytes = backend.render("digraph {}", ImageFormat::Png).unwrap();
        assert_eq!(bytes, b"mock image bytes");
    }

    #[test]
    fn test_mock_queue_is_fifo() {
        let backend = MockBackend::with_responses(vec![b"first".to_vec(), b"second".to_vec()]);
        assert_eq!(backend.render("d", ImageFormat::Png).unwrap(), b"first");
        assert_eq!(backend.render("d", ImageFormat::Png).unwrap(), b"second");
        // Queue exhausted, falls back to default
        assert_eq!(
            backend.render("d", ImageFormat::Png).unwrap(),
            b"mock image bytes"
        );
    }

    #[test]
    fn test_mock_records_requests() {
        let backend = MockBackend::new();
        backend.render("digraph a {}", ImageFormat::Svg).unwrap();
        backend.render("digraph b {}", ImageFormat::Png).unwrap();

        let requests = backend.get_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "digraph a {}");
        assert_eq!(requests[0].1, ImageFormat::Svg);
        assert_eq!(
            backend.last_request().unwrap().0,
            "digraph b {}"
        );
    }

    #[test]
    fn test_mock_failure_simulation() {
        let backend = MockBackend::new().failing("ran out of ink");
        let err = backend.render("d", ImageFormat::Png).unwrap_err();
        assert!(matches!(err, PipevizError::RenderFailed { .. }));
        assert!(err.to_string().contains("ran out of ink"));
    }

    #[test]
    fn test_mock_availability_toggle() {
        assert!(MockBackend::new().is_available());
        assert!(!MockBackend::new().unavailable().is_available());
    }
}
