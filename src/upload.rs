//! Event upload form: attachment acceptance, tags and the payload
//! batch posted to the ingest endpoint.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::capabilities::time::TimerId;
use crate::config::AttachmentLimits;
use crate::{UnixTimeMs, MAX_TAGS};

/// A file handed over by the shell. Bodies stay raw bytes until
/// submission, when they are base64-encoded into the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    #[serde(with = "serde_bytes")]
    pub bytes: Vec<u8>,
}

impl Attachment {
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_accepted(&self, limits: &AttachmentLimits) -> bool {
        limits
            .accepted_mime_prefixes
            .iter()
            .any(|prefix| self.mime_type.starts_with(prefix.as_str()))
            && self.size_bytes() <= limits.max_attachment_bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    Idle,
    Submitting,
    Succeeded { reset_timer: TimerId },
    Failed { message: String },
}

impl UploadStatus {
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

impl Default for UploadStatus {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UploadForm {
    pub description: String,
    pub location: String,
    pub tag_draft: String,
    pub tags: Vec<String>,
    pub attachments: Vec<Attachment>,
    pub status: UploadStatus,
}

impl UploadForm {
    /// Moves the trimmed tag draft into the tag list. Empty and
    /// duplicate tags are dropped; the draft is cleared only when a
    /// tag was actually added.
    pub fn add_tag(&mut self) {
        let tag = self.tag_draft.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) || self.tags.len() >= MAX_TAGS {
            return;
        }
        self.tags.push(tag.to_string());
        self.tag_draft.clear();
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Appends the acceptable files and truncates to the attachment
    /// cap, keeping the oldest. Returns how many files were dropped
    /// by acceptance or the cap.
    pub fn accept_files(&mut self, files: Vec<Attachment>, limits: &AttachmentLimits) -> usize {
        let offered = files.len();
        let before = self.attachments.len();
        self.attachments
            .extend(files.into_iter().filter(|f| f.is_accepted(limits)));
        self.attachments.truncate(limits.max_attachments);
        offered - (self.attachments.len() - before)
    }

    pub fn remove_attachment(&mut self, index: usize) {
        if index < self.attachments.len() {
            self.attachments.remove(index);
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.attachments.is_empty() && !self.status.is_submitting()
    }

    /// Clears the form fields after a successful submission. The
    /// status is managed by the caller.
    pub fn reset_fields(&mut self) {
        self.description.clear();
        self.location.clear();
        self.tag_draft.clear();
        self.tags.clear();
        self.attachments.clear();
    }
}

/// One payload per attachment; metadata and timestamp are shared
/// across the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPayload {
    pub image_b64: String,
    pub image_description: String,
    pub location: String,
    pub tags: Vec<String>,
    pub timestamp: String,
}

#[must_use]
pub fn build_payloads(form: &UploadForm, now: UnixTimeMs) -> Vec<UploadPayload> {
    let timestamp = rfc3339(now);
    form.attachments
        .iter()
        .map(|attachment| UploadPayload {
            image_b64: BASE64.encode(&attachment.bytes),
            image_description: form.description.clone(),
            location: form.location.clone(),
            tags: form.tags.clone(),
            timestamp: timestamp.clone(),
        })
        .collect()
}

fn rfc3339(at: UnixTimeMs) -> String {
    let millis = i64::try_from(at.as_millis()).unwrap_or(0);
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn limits() -> AttachmentLimits {
        AttachmentLimits::default()
    }

    fn image(name: &str, size: usize) -> Attachment {
        Attachment {
            file_name: name.to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xAB; size],
        }
    }

    #[test]
    fn rejects_non_image_mime_types_by_default() {
        let mut form = UploadForm::default();
        let pdf = Attachment {
            file_name: "doc.pdf".into(),
            mime_type: "application/pdf".into(),
            bytes: vec![1, 2, 3],
        };
        let video = Attachment {
            file_name: "clip.mp4".into(),
            mime_type: "video/mp4".into(),
            bytes: vec![1, 2, 3],
        };
        form.accept_files(vec![pdf, video, image("a.jpg", 10)], &limits());
        assert_eq!(form.attachments.len(), 1);
        assert_eq!(form.attachments[0].file_name, "a.jpg");
    }

    #[test]
    fn extended_limits_accept_video() {
        let extended = AttachmentLimits::extended();
        let video = Attachment {
            file_name: "clip.mp4".into(),
            mime_type: "video/mp4".into(),
            bytes: vec![0; 8 * 1024 * 1024],
        };
        assert!(video.is_accepted(&extended));
        assert!(!video.is_accepted(&limits()));
    }

    #[test]
    fn rejects_oversized_files() {
        let too_big = image("big.jpg", limits().max_attachment_bytes + 1);
        assert!(!too_big.is_accepted(&limits()));
        let at_limit = image("ok.jpg", limits().max_attachment_bytes);
        assert!(at_limit.is_accepted(&limits()));
    }

    #[test]
    fn truncation_keeps_the_oldest_attachments() {
        let mut form = UploadForm::default();
        form.accept_files(vec![image("1.jpg", 1), image("2.jpg", 1)], &limits());
        form.accept_files(
            vec![
                image("3.jpg", 1),
                image("4.jpg", 1),
                image("5.jpg", 1),
                image("6.jpg", 1),
            ],
            &limits(),
        );
        let names: Vec<_> = form
            .attachments
            .iter()
            .map(|a| a.file_name.clone())
            .collect();
        assert_eq!(names, vec!["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg"]);
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let mut form = UploadForm::default();
        form.tag_draft = "  festival  ".into();
        form.add_tag();
        assert_eq!(form.tags, vec!["festival"]);
        assert!(form.tag_draft.is_empty());

        form.tag_draft = "festival".into();
        form.add_tag();
        assert_eq!(form.tags, vec!["festival"]);
        // A rejected duplicate leaves the draft for the user to edit.
        assert_eq!(form.tag_draft, "festival");

        form.tag_draft = "   ".into();
        form.add_tag();
        assert_eq!(form.tags, vec!["festival"]);
    }

    #[test]
    fn remove_tag_only_touches_the_named_tag() {
        let mut form = UploadForm::default();
        for t in ["food", "festival", "weekend"] {
            form.tag_draft = t.into();
            form.add_tag();
        }
        form.remove_tag("festival");
        assert_eq!(form.tags, vec!["food", "weekend"]);
    }

    #[test]
    fn one_payload_per_attachment_sharing_metadata() {
        let mut form = UploadForm {
            description: "street flooding".into(),
            location: "Silk Board".into(),
            ..UploadForm::default()
        };
        form.tag_draft = "rain".into();
        form.add_tag();
        form.accept_files(
            vec![image("a.jpg", 4), image("b.jpg", 6), image("c.jpg", 8)],
            &limits(),
        );

        let now = UnixTimeMs::new(1_735_905_600_000);
        let payloads = build_payloads(&form, now);
        assert_eq!(payloads.len(), 3);

        for payload in &payloads {
            assert_eq!(payload.image_description, "street flooding");
            assert_eq!(payload.location, "Silk Board");
            assert_eq!(payload.tags, vec!["rain"]);
            assert_eq!(payload.timestamp, payloads[0].timestamp);
        }
        assert_eq!(payloads[0].timestamp, "2025-01-03T12:00:00.000Z");

        // Bodies differ per attachment.
        assert_ne!(payloads[0].image_b64, payloads[1].image_b64);
        assert_eq!(payloads[0].image_b64, BASE64.encode(vec![0xAB; 4]));
    }

    #[test]
    fn can_submit_requires_an_attachment_and_no_inflight_submission() {
        let mut form = UploadForm::default();
        assert!(!form.can_submit());

        form.accept_files(vec![image("a.jpg", 1)], &limits());
        assert!(form.can_submit());

        form.status = UploadStatus::Submitting;
        assert!(!form.can_submit());
    }

    #[test]
    fn reset_clears_all_fields() {
        let mut form = UploadForm {
            description: "d".into(),
            location: "l".into(),
            tag_draft: "t".into(),
            ..UploadForm::default()
        };
        form.accept_files(vec![image("a.jpg", 1)], &limits());
        form.reset_fields();
        assert_eq!(form, UploadForm::default());
    }

    proptest! {
        #[test]
        fn add_tag_never_produces_duplicates(drafts in proptest::collection::vec("[a-z ]{0,8}", 0..30)) {
            let mut form = UploadForm::default();
            for draft in drafts {
                form.tag_draft = draft;
                form.add_tag();
            }
            let mut seen = std::collections::HashSet::new();
            for tag in &form.tags {
                prop_assert!(!tag.is_empty());
                prop_assert_eq!(tag.trim(), tag.as_str());
                prop_assert!(seen.insert(tag.clone()));
            }
        }

        #[test]
        fn attachment_count_never_exceeds_the_cap(batches in proptest::collection::vec(1usize..4, 0..6)) {
            let mut form = UploadForm::default();
            for (i, batch) in batches.into_iter().enumerate() {
                let files = (0..batch).map(|j| image(&format!("{i}-{j}.jpg"), 1)).collect();
                form.accept_files(files, &limits());
                prop_assert!(form.attachments.len() <= limits().max_attachments);
            }
        }
    }
}
