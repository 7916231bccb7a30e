//! Request handlers.
use super::AppState;
use super::error::ApiError;
use crate::convert::convert_with_limit;
use crate::docx::constants::content_type;
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{Extensions, HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::governor::Decision;

/// Value of the `Content-Disposition` header on every converted document.
pub const CONTENT_DISPOSITION: &str = r#"attachment; filename="output.docx""#;

/// POST /convert: `{"markdown": "..."}` in, `.docx` bytes out.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    extensions: Extensions,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let client = client_id(&headers, &extensions);
    if let Decision::Denied { retry_after } = state.governor.check(&client, Instant::now()) {
        return Err(ApiError::RateLimited { retry_after });
    }

    let body = body.map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;
    let markdown = markdown_field(&body)?;

    let bytes = convert_with_limit(&markdown, state.config.max_chars)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type::DOCX),
            (header::CONTENT_DISPOSITION, CONTENT_DISPOSITION),
        ],
        bytes,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Pull the `markdown` string out of a JSON body.
fn markdown_field(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::InvalidInput("request body must be a JSON object".to_string()))?;

    match value.get("markdown") {
        Some(Value::String(markdown)) => Ok(markdown.clone()),
        Some(_) => Err(ApiError::InvalidInput(
            "'markdown' must be a string".to_string(),
        )),
        None => Err(ApiError::InvalidInput(
            "missing 'markdown' field".to_string(),
        )),
    }
}

/// First `X-Forwarded-For` hop, else the peer address, else `"unknown"`.
pub fn client_id(headers: &HeaderMap, extensions: &Extensions) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty());

    if let Some(hop) = forwarded {
        return hop.to_string();
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_markdown_field() {
        assert_eq!(markdown_field(br##"{"markdown":"# hi"}"##).unwrap(), "# hi");
        assert!(matches!(
            markdown_field(br#"{"markdown":5}"#),
            Err(ApiError::InvalidInput(msg)) if msg.contains("must be a string")
        ));
        assert!(matches!(
            markdown_field(br#"{"text":"x"}"#),
            Err(ApiError::InvalidInput(msg)) if msg.contains("missing")
        ));
        assert!(matches!(
            markdown_field(b"not json"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            markdown_field(br#"["markdown"]"#),
            Err(ApiError::InvalidInput(msg)) if msg.contains("missing")
        ));
    }

    #[test]
    fn test_client_id_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1"),
        );
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
        assert_eq!(client_id(&headers, &extensions), "203.0.113.7");
    }

    #[test]
    fn test_client_id_falls_back_to_peer_then_unknown() {
        let headers = HeaderMap::new();
        let mut extensions = Extensions::new();
        assert_eq!(client_id(&headers, &extensions), "unknown");

        extensions.insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(client_id(&headers, &extensions), "192.0.2.1");
    }
}
