use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

/// Failures surfaced at the HTTP boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, mistyped or oversized input
    #[error("{0}")]
    InvalidInput(String),

    #[error("rate limit exceeded, retry in {} seconds", .retry_after.as_secs().max(1))]
    RateLimited { retry_after: Duration },

    /// Unexpected conversion failure; the detail is logged, never returned
    #[error("internal error: {0}")]
    Internal(crate::Error),
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::InputTooLarge { .. } => ApiError::InvalidInput(err.to_string()),
            other => ApiError::Internal(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Generic message for every 500.
pub(crate) const INTERNAL_MESSAGE: &str = "failed to convert document";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(err) => {
                error!(error = %err, "conversion failed");
                INTERNAL_MESSAGE.to_string()
            },
            ApiError::InvalidInput(reason) => {
                warn!(reason = %reason, "rejected request");
                self.to_string()
            },
            ApiError::RateLimited { .. } => self.to_string(),
        };

        let mut response = (status, Json(json!({ "error": message }))).into_response();
        if let ApiError::RateLimited { retry_after } = self {
            let secs = retry_after.as_secs().max(1);
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn error_message(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err = ApiError::from(crate::Error::Zip("central directory corrupt".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_message(response).await, INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_oversized_input_is_bad_request() {
        let err = ApiError::from(crate::Error::InputTooLarge { len: 12, max: 10 });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(error_message(response).await.contains("limit is 10"));
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let response = ApiError::RateLimited {
            retry_after: Duration::from_millis(1500),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "1");
    }
}
