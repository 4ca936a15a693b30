//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use chatterbox_common::SyncError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::chat::ChatMessage;
use crate::presence::RoomSnapshot;

use super::transport::ChatterTransport;
use super::types::{
    ChangeRoomRequest, ChatterQuery, CreateRoomRequest, PostOutcome, PostRequest, PostResponse,
    RoomActionResponse, SetCloakedRequest,
};

/// Marks polling requests so the server does not count them as user activity.
const AJAX_IDLE_HEADER: &str = "x-ajax-idle";

/// Longest slice of an error body kept in an error message.
const ERROR_BODY_CHARS: usize = 200;

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Site origin, without a trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: "https://everything2.com".into(),
            request_timeout: Duration::from_secs(25),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// JSON-over-HTTPS transport. Session cookies persist across calls.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(AJAX_IDLE_HEADER, HeaderValue::from_static("1"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SyncError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value, SyncError> {
        debug!(path, ?query, "GET");
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, SyncError> {
        debug!(path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(network_error)?;
        read_json(response).await
    }

    async fn room_action<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RoomActionResponse, SyncError> {
        let value = self.post_json(path, body).await?;
        decode::<RoomActionResponse>(value)?.into_result()
    }
}

#[async_trait]
impl ChatterTransport for HttpTransport {
    async fn fetch_chatter(&self, query: &ChatterQuery) -> Result<Vec<ChatMessage>, SyncError> {
        let value = self.get_json("/api/chatter/", &query.to_params()).await?;
        check_embedded_error(&value)?;
        decode(value)
    }

    async fn post_message(&self, message: &str) -> Result<PostOutcome, SyncError> {
        let value = self
            .post_json("/api/chatter/create", &PostRequest { message })
            .await?;
        decode::<PostResponse>(value)?.into_outcome()
    }

    async fn clear_all(&self) -> Result<(), SyncError> {
        let value = self
            .post_json("/api/chatter/clear_all", &serde_json::json!({}))
            .await?;
        check_embedded_error(&value)
    }

    async fn fetch_room(&self) -> Result<RoomSnapshot, SyncError> {
        let value = self.get_json("/api/chatroom/", &[]).await?;
        check_embedded_error(&value)?;
        decode(value)
    }

    async fn change_room(&self, room_id: u64) -> Result<RoomActionResponse, SyncError> {
        self.room_action("/api/chatroom/change_room", &ChangeRoomRequest { room_id })
            .await
    }

    async fn set_cloaked(&self, cloaked: bool) -> Result<RoomActionResponse, SyncError> {
        self.room_action(
            "/api/chatroom/set_cloaked",
            &SetCloakedRequest {
                cloaked: u8::from(cloaked),
            },
        )
        .await
    }

    async fn create_room(
        &self,
        title: &str,
        doctext: &str,
    ) -> Result<RoomActionResponse, SyncError> {
        self.room_action(
            "/api/chatroom/create_room",
            &CreateRoomRequest {
                room_title: title,
                room_doctext: doctext,
            },
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

fn network_error(e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        SyncError::Network(format!("request timed out: {e}"))
    } else {
        SyncError::Network(e.to_string())
    }
}

async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, SyncError> {
    let status = response.status();
    let text = response.text().await.map_err(network_error)?;

    if !status.is_success() {
        return Err(http_error(status.as_u16(), status.canonical_reason(), &text));
    }

    serde_json::from_str(&text).map_err(|e| SyncError::Decode(e.to_string()))
}

/// Prefer the server's own `error` string; fall back to the reason phrase
/// and a slice of the body.
pub(crate) fn http_error(status: u16, reason: Option<&str>, body: &str) -> SyncError {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .filter(|e| !e.is_empty());

    let message = from_body.unwrap_or_else(|| {
        let reason = reason.unwrap_or("request failed");
        let snippet: String = body.trim().chars().take(ERROR_BODY_CHARS).collect();
        if snippet.is_empty() {
            reason.to_string()
        } else {
            format!("{reason}: {snippet}")
        }
    });

    SyncError::Http { status, message }
}

/// Application failures ride inside 2xx payloads.
pub(crate) fn check_embedded_error(value: &serde_json::Value) -> Result<(), SyncError> {
    if value.get("ignores").and_then(|v| v.as_bool()).unwrap_or(false) {
        return Err(SyncError::Ignored);
    }
    match value.get("error").and_then(|e| e.as_str()) {
        Some(e) if !e.is_empty() => Err(SyncError::Rejected(e.to_string())),
        _ => Ok(()),
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, SyncError> {
    serde_json::from_value(value).map_err(|e| SyncError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_body_error() {
        let err = http_error(403, Some("Forbidden"), r#"{"error": "Not allowed in this room"}"#);
        assert_eq!(
            err,
            SyncError::Http {
                status: 403,
                message: "Not allowed in this room".into()
            }
        );
        assert!(err.is_transport());
    }

    #[test]
    fn http_error_falls_back_to_reason_and_snippet() {
        let body = "x".repeat(500);
        let SyncError::Http { status, message } = http_error(502, Some("Bad Gateway"), &body) else {
            panic!("expected Http");
        };
        assert_eq!(status, 502);
        assert!(message.starts_with("Bad Gateway: xxx"));
        assert_eq!(message.len(), "Bad Gateway: ".len() + ERROR_BODY_CHARS);
    }

    #[test]
    fn http_error_empty_body() {
        assert_eq!(
            http_error(500, Some("Internal Server Error"), "  ").to_string(),
            "HTTP 500: Internal Server Error"
        );
    }

    #[test]
    fn embedded_errors() {
        assert_eq!(check_embedded_error(&serde_json::json!([])), Ok(()));
        assert_eq!(check_embedded_error(&serde_json::json!({"error": ""})), Ok(()));
        assert_eq!(
            check_embedded_error(&serde_json::json!({"error": "nope"})),
            Err(SyncError::Rejected("nope".into()))
        );
        assert_eq!(
            check_embedded_error(&serde_json::json!({"ignores": true})),
            Err(SyncError::Ignored)
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let transport = HttpTransport::new(HttpTransportConfig {
            base_url: "https://example.test/".into(),
            ..HttpTransportConfig::default()
        })
        .unwrap();
        assert_eq!(transport.url("/api/chatroom/"), "https://example.test/api/chatroom/");
    }
}
