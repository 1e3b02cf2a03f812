//! Backend health probe for the `--health` command.

use std::time::Instant;

use crate::client::ChatClient;
use crate::traits::HttpClient;

/// Outcome of probing the backend
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub healthy: bool,
    pub response_time_ms: Option<u64>,
    /// Why the backend could not be reached
    pub error_message: Option<String>,
}

/// Probe `GET /` and time the answer.
pub async fn run_health_check<C: HttpClient>(client: &ChatClient<C>) -> HealthReport {
    let start = Instant::now();
    match client.health_check().await {
        Ok(healthy) => HealthReport {
            healthy,
            response_time_ms: Some(start.elapsed().as_millis() as u64),
            error_message: (!healthy).then(|| "backend answered with an error status".to_string()),
        },
        Err(err) => {
            tracing::warn!(error = %err, url = client.base_url(), "Health check failed");
            HealthReport {
                healthy: false,
                response_time_ms: None,
                error_message: Some(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::{HttpError, Response};
    use bytes::Bytes;

    #[tokio::test]
    async fn test_healthy_backend() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));
        let report = run_health_check(&ChatClient::new(mock, "http://localhost:8000")).await;

        assert!(report.healthy);
        assert!(report.response_time_ms.is_some());
        assert_eq!(report.error_message, None);
    }

    #[tokio::test]
    async fn test_error_status() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(500, Bytes::new())));
        let report = run_health_check(&ChatClient::new(mock, "http://localhost:8000")).await;

        assert!(!report.healthy);
        assert!(report.error_message.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let report = run_health_check(&ChatClient::new(mock, "http://localhost:8000")).await;

        assert!(!report.healthy);
        assert_eq!(report.response_time_ms, None);
        assert_eq!(
            report.error_message.as_deref(),
            Some("Connection failed: refused")
        );
    }
}
