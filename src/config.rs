//! Core configuration: endpoints, attachment limits and delays.
//!
//! Shells apply a validated config once at startup (before `Boot`).
//! Product variants differ only in config: the image-only 5 MB upload
//! and the image+video 10 MB upload are the same core.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::{
    AppError, ErrorKind, CHAT_REPLY_DELAY_MS, DEFAULT_INGEST_URL, DEFAULT_MAX_ATTACHMENT_BYTES,
    DEFAULT_MOOD_URL, DEFAULT_SUMMARY_URL, EXTENDED_MAX_ATTACHMENT_BYTES, MAX_ATTACHMENTS,
    UPLOAD_RESET_DELAY_MS,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name} URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
    #[error("{name} URL must use http or https")]
    UnsupportedScheme { name: &'static str },
    #[error("attachment limits must accept at least one MIME prefix")]
    NoAcceptedMimePrefixes,
    #[error("max_attachments must be between 1 and {max}")]
    AttachmentCapOutOfRange { max: usize },
    #[error("max_attachment_bytes must be greater than zero")]
    ZeroAttachmentBytes,
    #[error("delays must be greater than zero")]
    ZeroDelay,
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::new(ErrorKind::Validation, e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentLimits {
    pub max_attachments: usize,
    pub max_attachment_bytes: usize,
    pub accepted_mime_prefixes: Vec<String>,
}

impl AttachmentLimits {
    /// Image+video variant with the raised ceiling.
    #[must_use]
    pub fn extended() -> Self {
        Self {
            max_attachments: MAX_ATTACHMENTS,
            max_attachment_bytes: EXTENDED_MAX_ATTACHMENT_BYTES,
            accepted_mime_prefixes: vec!["image/".to_string(), "video/".to_string()],
        }
    }
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_attachments: MAX_ATTACHMENTS,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            accepted_mime_prefixes: vec!["image/".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    pub summary_url: String,
    pub mood_url: String,
    pub ingest_url: String,
    pub attachment_limits: AttachmentLimits,
    pub chat_reply_delay_ms: u64,
    pub upload_reset_delay_ms: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            summary_url: DEFAULT_SUMMARY_URL.to_string(),
            mood_url: DEFAULT_MOOD_URL.to_string(),
            ingest_url: DEFAULT_INGEST_URL.to_string(),
            attachment_limits: AttachmentLimits::default(),
            chat_reply_delay_ms: CHAT_REPLY_DELAY_MS,
            upload_reset_delay_ms: UPLOAD_RESET_DELAY_MS,
        }
    }
}

impl CoreConfig {
    /// Checks the config before it replaces the model's copy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("summary", &self.summary_url),
            ("mood", &self.mood_url),
            ("ingest", &self.ingest_url),
        ] {
            let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
                name,
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::UnsupportedScheme { name });
            }
        }

        if self.attachment_limits.accepted_mime_prefixes.is_empty() {
            return Err(ConfigError::NoAcceptedMimePrefixes);
        }
        if self.attachment_limits.max_attachments == 0
            || self.attachment_limits.max_attachments > MAX_ATTACHMENTS
        {
            return Err(ConfigError::AttachmentCapOutOfRange {
                max: MAX_ATTACHMENTS,
            });
        }
        if self.attachment_limits.max_attachment_bytes == 0 {
            return Err(ConfigError::ZeroAttachmentBytes);
        }
        if self.chat_reply_delay_ms == 0 || self.upload_reset_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay);
        }
        Ok(())
    }
}
