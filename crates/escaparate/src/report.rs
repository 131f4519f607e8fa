//! Soft checks and diagnostic attachments.
//!
//! A verification step usually asserts many small facts about one region; a
//! single run should surface all of them. [`Checks`] accumulates every
//! failed expectation instead of stopping at the first, and pairs failures
//! with [`Attachment`]s (text, JSON, screenshots) so a human can diagnose
//! from the report without re-running.

use crate::compare::{ComparisonResult, OrderedComparison};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// What kind of payload an attachment carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttachmentKind {
    /// Plain UTF-8 text
    Text,
    /// Pretty-printed JSON
    Json,
    /// PNG image bytes
    Png,
}

impl AttachmentKind {
    /// File extension used when attachments are written out
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Png => "png",
        }
    }
}

/// One diagnostic capture paired with a step
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Attachment name, used as the file stem when written out
    pub name: String,
    /// Payload kind
    pub kind: AttachmentKind,
    /// Raw payload bytes
    pub data: Vec<u8>,
}

impl Attachment {
    /// A text attachment
    #[must_use]
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttachmentKind::Text,
            data: text.into().into_bytes(),
        }
    }

    /// A JSON attachment rendered from any serializable value
    #[must_use]
    pub fn json(name: impl Into<String>, value: &impl Serialize) -> Self {
        let name = name.into();
        match serde_json::to_vec_pretty(value) {
            Ok(data) => Self {
                name,
                kind: AttachmentKind::Json,
                data,
            },
            Err(e) => Self {
                name: format!("{name}_error"),
                kind: AttachmentKind::Text,
                data: e.to_string().into_bytes(),
            },
        }
    }

    /// A PNG attachment from raw capture bytes
    #[must_use]
    pub fn png(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind: AttachmentKind::Png,
            data,
        }
    }

    /// The payload as text, when it is text-like
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self.kind {
            AttachmentKind::Text | AttachmentKind::Json => std::str::from_utf8(&self.data).ok(),
            AttachmentKind::Png => None,
        }
    }

    /// Write the attachment into a directory as `<name>.<ext>`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating or writing the file.
    pub fn write_to_dir(&self, dir: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let path = dir
            .as_ref()
            .join(format!("{}.{}", self.name, self.kind.extension()));
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Accumulator of soft expectations for one verification step.
///
/// Checks record their verdict and keep going; the caller converts the
/// whole set into a hard pass/fail once every fact has been gathered.
#[derive(Debug, Default)]
pub struct Checks {
    context: String,
    checked: usize,
    failures: Vec<String>,
    attachments: Vec<Attachment>,
}

impl Checks {
    /// A fresh accumulator labelled with the step it verifies
    #[must_use]
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            ..Self::default()
        }
    }

    /// Record a boolean expectation; returns it for chaining decisions
    pub fn check(&mut self, ok: bool, message: impl fmt::Display) -> bool {
        self.checked += 1;
        if !ok {
            let message = message.to_string();
            warn!(context = %self.context, %message, "check failed");
            self.failures.push(message);
        }
        ok
    }

    /// Record an equality expectation
    pub fn check_eq<T: PartialEq + fmt::Debug>(
        &mut self,
        actual: &T,
        expected: &T,
        subject: impl fmt::Display,
    ) -> bool {
        let ok = actual == expected;
        self.check(
            ok,
            format_args!("{subject}: got {actual:?}, expected {expected:?}"),
        );
        ok
    }

    /// Fold a comparator verdict list into this step
    pub fn record_comparisons(&mut self, results: &[ComparisonResult]) {
        for result in results {
            self.check(
                result.matched,
                format_args!(
                    "{}: {}",
                    result.subject,
                    result.reason.as_deref().unwrap_or("mismatch")
                ),
            );
        }
    }

    /// Fold an ordered comparison, including its length flag
    pub fn record_ordered(&mut self, comparison: &OrderedComparison) {
        self.record_comparisons(&comparison.results);
        if let Some(lengths) = comparison.length_mismatch {
            self.check(
                false,
                format_args!(
                    "length mismatch: {} live items, {} expected",
                    lengths.live, lengths.expected
                ),
            );
        }
    }

    /// Pair a diagnostic capture with this step
    pub fn attach(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Whether every expectation so far held
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of expectations recorded
    #[must_use]
    pub const fn checked(&self) -> usize {
        self.checked
    }

    /// The recorded failure messages
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// The attachments gathered so far
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Write every attachment into a directory.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error encountered.
    pub fn dump_attachments(&self, dir: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let dir = dir.as_ref();
        for attachment in &self.attachments {
            attachment.write_to_dir(dir)?;
        }
        Ok(())
    }

    /// Convert into a hard verdict for the test boundary.
    ///
    /// # Errors
    ///
    /// Returns [`CheckFailures`] carrying every recorded failure.
    pub fn into_result(self) -> std::result::Result<(), CheckFailures> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(CheckFailures {
                context: self.context,
                failures: self.failures,
            })
        }
    }
}

/// The aggregated failures of one verification step
#[derive(Debug, Error)]
#[error("{context}: {} failed check(s)\n{}", .failures.len(), .failures.join("\n"))]
pub struct CheckFailures {
    /// Step label
    pub context: String,
    /// Every failure message, in check order
    pub failures: Vec<String>,
}
