//! Mock HTTP client for testing.
//!
//! Returns canned responses keyed by URL and records every request so tests
//! can assert on what was (or was not) sent.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response (any status)
    Success(Response),
    /// Fail before any response arrives
    Error(HttpError),
    /// Stream these chunks
    Stream(Vec<Bytes>),
    /// Stream these chunks, then fail
    StreamInterrupted(Vec<Bytes>, HttpError),
}

/// Mock HTTP client for testing.
///
/// Clones share configuration and recorded requests.
///
/// # Example
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://backend/v1/exports/e1",
///     MockResponse::Stream(vec![Bytes::from("PK")]),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a specific URL.
    ///
    /// Exact matches win; otherwise the longest configured URL that prefixes
    /// the request URL is used.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Recorded requests whose URL ends with `suffix`.
    pub fn requests_to(&self, suffix: &str) -> Vec<RecordedRequest> {
        lock(&self.requests)
            .iter()
            .filter(|request| request.url.ends_with(suffix))
            .cloned()
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        lock(&self.requests).push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = lock(&self.responses);

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        if let Some(response) = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone())
        {
            return Some(response);
        }

        lock(&self.default_response).clone()
    }

    fn buffered(&self, url: &str) -> Result<Response, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(chunks)) => Ok(Response::new(200, chunks.concat().into())),
            Some(MockResponse::StreamInterrupted(_, err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.buffered(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.buffered(url)
    }

    async fn get_stream(&self, url: &str, headers: &Headers) -> Result<ByteStream, HttpError> {
        self.record_request("GET", url, headers, None);

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                let items = chunks.into_iter().map(Ok::<Bytes, HttpError>);
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::StreamInterrupted(chunks, err)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok::<Bytes, HttpError>)
                    .chain(std::iter::once(Err(err)));
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::Success(response)) if response.is_success() => {
                let items = vec![Ok::<Bytes, HttpError>(response.body)];
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::Success(response)) => Err(HttpError::ServerError {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/health",
            MockResponse::Success(Response::new(200, Bytes::from("ok"))),
        );

        let response = client
            .get("https://example.com/health", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
    }

    #[tokio::test]
    async fn test_post_records_body() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(201, Bytes::new())));

        client
            .post("https://example.com/api", r#"{"name":"test"}"#, &Headers::new())
            .await
            .unwrap();

        let requests = client.requests_to("/api");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"name":"test"}"#));
    }

    #[tokio::test]
    async fn test_stream_chunks() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/file",
            MockResponse::Stream(vec![Bytes::from("ab"), Bytes::from("cd")]),
        );

        let stream = client
            .get_stream("https://example.com/file", &Headers::new())
            .await
            .unwrap();
        let chunks: Vec<_> = stream.collect().await;

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].as_ref().unwrap(), &Bytes::from("cd"));
    }

    #[tokio::test]
    async fn test_stream_interrupted_yields_error_last() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/file",
            MockResponse::StreamInterrupted(
                vec![Bytes::from("partial")],
                HttpError::Io("connection reset".to_string()),
            ),
        );

        let stream = client
            .get_stream("https://example.com/file", &Headers::new())
            .await
            .unwrap();
        let chunks: Vec<_> = stream.collect().await;

        assert!(chunks[0].is_ok());
        assert!(matches!(chunks[1], Err(HttpError::Io(_))));
    }

    #[tokio::test]
    async fn test_stream_non_success_status_is_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/file",
            MockResponse::Success(Response::new(404, Bytes::from("export not found"))),
        );

        let result = client
            .get_stream("https://example.com/file", &Headers::new())
            .await;

        match result {
            Err(HttpError::ServerError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "export not found");
            }
            _ => panic!("Expected ServerError"),
        }
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/v1",
            MockResponse::Success(Response::new(500, Bytes::new())),
        );
        client.set_response(
            "https://example.com/v1/exports",
            MockResponse::Success(Response::new(200, Bytes::new())),
        );
        client.set_response(
            "https://example.com",
            MockResponse::Success(Response::new(404, Bytes::new())),
        );

        for _ in 0..20 {
            let response = client
                .get("https://example.com/v1/exports/e1", &Headers::new())
                .await
                .unwrap();
            assert_eq!(response.status, 200);
        }

        let response = client
            .get("https://example.com/v1/projects/demo", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 500);
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.get("https://example.com/missing", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_clones_share_recordings() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));
        let cloned = client.clone();

        cloned.get("https://example.com", &Headers::new()).await.unwrap();

        assert_eq!(client.get_requests().len(), 1);
        client.clear_requests();
        assert!(cloned.get_requests().is_empty());
    }
}
