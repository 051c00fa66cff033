//! HTTP implementation of [`SplitService`] over reqwest.
//!
//! Both operations are multipart POSTs carrying the same two fields the
//! service expects: `file` (the PDF bytes, with filename) and
//! `pages_per_split` (decimal text). Responses differ:
//!
//! * `/api/validate-split` answers `200` with a camelCase JSON verdict
//!   ([`ValidationReport`]) — including rejections, which are *successful*
//!   calls with `isValid: false`.
//! * `/api/split-pdf` streams back raw ZIP bytes on success, or an error
//!   payload `{"detail": "..."}` with a non-success status.
//!
//! ## Why per-request timeouts?
//!
//! Validation is a quick page-count check, so it gets a hard deadline
//! (default 60 s) — a dead service should produce a timeout banner, not a
//! hung attempt. Splitting scales with document size and ships the whole
//! archive in one response, so it runs unbounded unless the caller opts
//! into [`ClientConfig::split_timeout_secs`]. Setting the deadline on the
//! request rather than the client keeps both policies on one `Client`.

use std::time::Duration;

use reqwest::multipart;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::SplitClientError;
use crate::service::{SplitService, UploadAttempt, ValidationReport};

/// Talks to a live split service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSplitService {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpSplitService {
    /// Build a service client for the configured base URL.
    pub fn new(config: ClientConfig) -> Result<Self, SplitClientError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SplitClientError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// The two endpoints share one form layout; built per call because
    /// `multipart::Form` is consumed by `send`.
    fn form(attempt: &UploadAttempt) -> Result<multipart::Form, reqwest::Error> {
        let file_part = multipart::Part::bytes(attempt.bytes.clone())
            .file_name(attempt.file_name.clone())
            .mime_str("application/pdf")?;
        Ok(multipart::Form::new()
            .part("file", file_part)
            .text("pages_per_split", attempt.pages_per_split.to_string()))
    }
}

#[async_trait::async_trait]
impl SplitService for HttpSplitService {
    fn name(&self) -> &str {
        "http"
    }

    async fn validate(
        &self,
        attempt: &UploadAttempt,
    ) -> Result<ValidationReport, SplitClientError> {
        let secs = self.config.validate_timeout_secs;
        let url = self.config.validate_endpoint();
        debug!(
            file = %attempt.file_name,
            bytes = attempt.bytes.len(),
            pages_per_split = attempt.pages_per_split,
            %url,
            "validating upload"
        );

        let form = Self::form(attempt).map_err(|e| SplitClientError::ValidationTransport {
            reason: e.to_string(),
        })?;

        let map_send_err = |e: reqwest::Error| {
            if e.is_timeout() {
                SplitClientError::ValidationTimeout { secs }
            } else {
                SplitClientError::ValidationTransport {
                    reason: e.to_string(),
                }
            }
        };

        let response = self
            .client
            .post(url)
            .multipart(form)
            .timeout(Duration::from_secs(secs))
            .send()
            .await
            .map_err(map_send_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SplitClientError::ValidationTransport {
                reason: format!("HTTP {status}"),
            });
        }

        let report: ValidationReport = response.json().await.map_err(map_send_err)?;
        debug!(
            is_valid = report.is_valid,
            needs_confirmation = report.needs_confirmation,
            total_pages = ?report.total_pages,
            "validation verdict"
        );
        Ok(report)
    }

    async fn split(&self, attempt: &UploadAttempt) -> Result<Vec<u8>, SplitClientError> {
        let url = self.config.split_endpoint();
        info!(
            file = %attempt.file_name,
            pages_per_split = attempt.pages_per_split,
            %url,
            "requesting split"
        );

        let form = Self::form(attempt).map_err(|e| SplitClientError::SplitTransport {
            reason: e.to_string(),
        })?;

        let mut request = self.client.post(url).multipart(form);
        if let Some(secs) = self.config.split_timeout_secs {
            request = request.timeout(Duration::from_secs(secs));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SplitClientError::SplitTransport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match error_detail(&body) {
                Some(detail) => SplitClientError::SplitRejected { detail },
                None => SplitClientError::SplitTransport {
                    reason: format!("HTTP {status}"),
                },
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SplitClientError::SplitTransport {
                reason: e.to_string(),
            })?;
        info!(archive_bytes = bytes.len(), "split archive received");
        Ok(bytes.to_vec())
    }
}

/// Pull the service-authored explanation out of an error payload.
///
/// The service sends `{"detail": "..."}`; anything else (HTML error page,
/// empty body, a blank `detail`, truncated JSON) yields `None` and the
/// caller falls back to a generic transport error. A blank explanation
/// would otherwise surface as an empty error banner.
fn error_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: String,
    }
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.detail)
        .filter(|detail| !detail.trim().is_empty())
}
