//! Shared application core for the CityPulse city dashboard.
//!
//! The core is headless: all state lives in [`Model`], every mutation
//! goes through [`Event`] handled by [`CityPulse`], and side effects
//! (HTTP, timers, rendering) are emitted as capability operations for
//! the shell to execute. Shells (mobile, web) render the [`ViewModel`]
//! produced by `view` and feed user interactions back as events.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod domain;
pub mod event;
pub mod filter;
pub mod map_view;
pub mod model;
pub mod profile;
pub mod remote;
pub mod upload;
pub mod view;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use app::CityPulse;
pub use capabilities::{Capabilities, Effect};
pub use config::CoreConfig;
pub use event::Event;
pub use model::Model;
pub use view::ViewModel;

pub const MAX_ATTACHMENTS: usize = 5;
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;
pub const EXTENDED_MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;
pub const CHAT_REPLY_DELAY_MS: u64 = 1500;
pub const UPLOAD_RESET_DELAY_MS: u64 = 3000;
pub const MAX_CHAT_MESSAGES: usize = 200;
pub const MAX_TAGS: usize = 20;

pub const DEFAULT_SUMMARY_URL: &str =
    "https://fastapi-city-graph-apis-1081552206448.asia-south1.run.app/api/v1/get/overall/summary";
pub const DEFAULT_MOOD_URL: &str =
    "https://fastapi-city-graph-apis-1081552206448.asia-south1.run.app/api/v1/mood/map";
pub const DEFAULT_INGEST_URL: &str =
    "https://fastapi-city-graph-apis-1081552206448.asia-south1.run.app/api/v1/events/upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Transient,
    Permanent,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Timeout,
    Validation,
    NotFound,
    Deserialization,
    InvalidState,
    Internal,
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::InvalidState => "INVALID_STATE",
            Self::Internal => "INTERNAL_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    #[must_use]
    pub const fn default_severity(self) -> ErrorSeverity {
        match self {
            Self::Network | Self::Timeout => ErrorSeverity::Transient,
            Self::Validation
            | Self::NotFound
            | Self::Deserialization
            | Self::InvalidState
            | Self::Unknown => ErrorSeverity::Permanent,
            Self::Internal => ErrorSeverity::Fatal,
        }
    }

    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Network | Self::Timeout)
    }
}

/// Application-level error with a stable code for shells and a
/// human-readable message for logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub severity: ErrorSeverity,
    pub message: String,
    pub internal_message: Option<String>,
    pub context: HashMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
            internal_message: None,
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_internal(mut self, message: impl Into<String>) -> Self {
        self.internal_message = Some(message.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => "Connection problem. Please check your network.".to_string(),
            ErrorKind::Timeout => "The request took too long. Please try again.".to_string(),
            ErrorKind::Validation => self.message.clone(),
            ErrorKind::NotFound => "The requested item could not be found.".to_string(),
            ErrorKind::Deserialization => "The server sent an unexpected response.".to_string(),
            ErrorKind::InvalidState => "That action is not available right now.".to_string(),
            ErrorKind::Internal | ErrorKind::Unknown => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    #[must_use]
    pub fn from_http_status(status: u16, body: Option<&[u8]>) -> Self {
        let kind = match status {
            400 => ErrorKind::Validation,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::Timeout,
            500..=599 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        };

        let message = body
            .and_then(|b| serde_json::from_slice::<ApiErrorResponse>(b).ok())
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error: {status}"));

        Self::new(kind, message).with_context("http_status", status.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(internal) = &self.internal_message {
            write!(f, " (internal: {internal})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

pub type AppResult<T> = Result<T, AppError>;

/// Milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct UnixTimeMs(pub u64);

impl UnixTimeMs {
    #[must_use]
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn plus_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

/// Identifier of a chat message, generated core-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Coarse "n units ago" rendering used across list views.
#[must_use]
pub fn format_time_ago(now: UnixTimeMs, then: UnixTimeMs) -> String {
    let delta_ms = now.as_millis().saturating_sub(then.as_millis());
    let seconds = delta_ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} minute{} ago", plural(minutes))
    } else if hours < 24 {
        format!("{hours} hour{} ago", plural(hours))
    } else {
        format!("{days} day{} ago", plural(days))
    }
}

const fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ErrorKind::Network.code(), "NETWORK_ERROR");
        assert_eq!(ErrorKind::Deserialization.code(), "DESERIALIZATION_ERROR");
        assert_eq!(ErrorKind::InvalidState.code(), "INVALID_STATE");
    }

    #[test]
    fn retryable_kinds() {
        assert!(ErrorKind::Network.is_retryable());
        assert!(ErrorKind::Timeout.is_retryable());
        assert!(!ErrorKind::Validation.is_retryable());
        assert!(!ErrorKind::Internal.is_retryable());
    }

    #[test]
    fn error_builder_attaches_context() {
        let err = AppError::new(ErrorKind::Validation, "bad input")
            .with_context("field", "email")
            .with_internal("missing @");

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.context.get("field").map(String::as_str), Some("email"));
        assert!(err.to_string().contains("missing @"));
    }

    #[test]
    fn from_http_status_maps_kinds() {
        assert_eq!(
            AppError::from_http_status(404, None).kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            AppError::from_http_status(503, None).kind,
            ErrorKind::Internal
        );
        assert_eq!(
            AppError::from_http_status(400, None).kind,
            ErrorKind::Validation
        );

        let err = AppError::from_http_status(500, Some(br#"{"message":"db down"}"#));
        assert_eq!(err.message, "db down");
    }

    #[test]
    fn user_facing_messages_do_not_leak_internals() {
        let err = AppError::new(ErrorKind::Internal, "stack overflow in parser")
            .with_internal("frame 0x7f");
        assert_eq!(
            err.user_facing_message(),
            "Something went wrong. Please try again."
        );
    }

    #[test]
    fn format_time_ago_buckets() {
        let now = UnixTimeMs::new(10 * 24 * 3600 * 1000);
        assert_eq!(format_time_ago(now, now), "just now");
        assert_eq!(
            format_time_ago(now, UnixTimeMs::new(now.as_millis() - 90 * 1000)),
            "1 minute ago"
        );
        assert_eq!(
            format_time_ago(now, UnixTimeMs::new(now.as_millis() - 2 * 3600 * 1000)),
            "2 hours ago"
        );
        assert_eq!(
            format_time_ago(now, UnixTimeMs::new(now.as_millis() - 3 * 24 * 3600 * 1000)),
            "3 days ago"
        );
    }

    #[test]
    fn unix_time_plus_millis_saturates() {
        let t = UnixTimeMs::new(u64::MAX);
        assert_eq!(t.plus_millis(10), UnixTimeMs::new(u64::MAX));
    }
}
