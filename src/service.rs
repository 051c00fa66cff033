//! The seam between the upload workflow and the split service.
//!
//! The workflow never talks HTTP directly; it calls a [`SplitService`] and
//! interprets the result. The production implementation is
//! [`crate::remote::HttpSplitService`]; tests substitute scripted fakes.
//!
//! # Why a trait?
//! Every interesting behaviour of the workflow — the confirmation gate, the
//! banner priority, the auto-reset window — is driven by *what the service
//! answers*, not by how the answer travelled. Putting the two calls behind
//! `Arc<dyn SplitService>` lets the whole state machine be exercised with
//! canned answers, no listener on a port, no network flakiness in CI.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SplitClientError;

/// One user-selected file plus the split size it will be uploaded with.
///
/// Mirrors what a browser form would carry: the file's display name, its
/// raw bytes, and the `pages_per_split` field. The attempt is captured when
/// validation starts and re-used verbatim for the split call, so a later
/// edit to the page field cannot change an upload already under way.
#[derive(Clone)]
pub struct UploadAttempt {
    /// Display name of the selected file, e.g. `report.pdf`.
    pub file_name: String,
    /// Raw file contents, uploaded as the multipart `file` part.
    pub bytes: Vec<u8>,
    /// Committed pages-per-split value, always ≥ 1.
    pub pages_per_split: u32,
}

impl UploadAttempt {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, pages_per_split: u32) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            pages_per_split,
        }
    }
}

impl fmt::Debug for UploadAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadAttempt")
            .field("file_name", &self.file_name)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("pages_per_split", &self.pages_per_split)
            .finish()
    }
}

/// The service's answer to a validation request.
///
/// Wire format is camelCase JSON. Only `isValid` is required; the other
/// fields default when the service omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Whether the file is a usable PDF for the requested split.
    pub is_valid: bool,
    /// Service-authored text: an error explanation, a warning to confirm,
    /// or an informational line on plain acceptance. Empty when omitted.
    #[serde(default)]
    pub message: String,
    /// True when the split size is questionable (e.g. larger than the page
    /// count) and the service wants an explicit go-ahead.
    #[serde(default)]
    pub needs_confirmation: bool,
    /// Page count of the document, when the service knows it.
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// The two remote operations of the split service.
///
/// Implementors must be `Send + Sync`: the workflow holds the service as
/// `Arc<dyn SplitService>` and calls it from async tasks.
#[async_trait::async_trait]
pub trait SplitService: Send + Sync {
    /// Short name for logs, e.g. `"http"`.
    fn name(&self) -> &str;

    /// Ask the service whether the attempt is splittable, without splitting.
    ///
    /// `Ok` carries the service's verdict (including rejections — an invalid
    /// file is a *successful* validation call with `is_valid: false`).
    /// `Err` means the call itself failed: timeout or transport.
    async fn validate(
        &self,
        attempt: &UploadAttempt,
    ) -> Result<ValidationReport, SplitClientError>;

    /// Split the attempt and return the packaged archive bytes.
    ///
    /// `Err(SplitRejected)` carries a service-authored refusal;
    /// `Err(SplitTransport)` a failure with no usable explanation.
    async fn split(&self, attempt: &UploadAttempt) -> Result<Vec<u8>, SplitClientError>;
}
