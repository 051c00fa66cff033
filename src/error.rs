//! Error types for the pdfsplit-client library.
//!
//! One enum, [`SplitClientError`], covers every failure the client can
//! surface. Variants are grouped by where the failure happens:
//!
//! * **Remote calls** — the validation or split request failed in transit,
//!   timed out, or the service answered with an error payload.
//! * **Local I/O** — the returned archive could not be written to disk.
//! * **Workflow misuse** — an operation was invoked in a phase that does
//!   not accept it (e.g. confirming when no confirmation is pending).
//! * **Configuration / preferences** — a bad knob value or an unreadable
//!   preferences file.
//!
//! Remote-call variants keep the transport detail (`reason`) separate from
//! the text shown to users. [`banner_message`] performs that mapping:
//! diagnostics go to logs via `Display`, while the banner only ever shows
//! service-authored detail or a fixed generic line.
//!
//! [`banner_message`]: SplitClientError::banner_message

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdfsplit-client library.
#[derive(Debug, Error)]
pub enum SplitClientError {
    // ── Validation call ───────────────────────────────────────────────────
    /// The validation request did not complete within the configured window.
    ///
    /// Validation is expected to be quick; a stall here usually means the
    /// service is unreachable or overloaded, so the client gives up rather
    /// than leaving the attempt stuck in `Validating` forever.
    #[error(
        "Validation request timed out after {secs}s.\n\
         Check that the split service is reachable, or raise --validate-timeout."
    )]
    ValidationTimeout { secs: u64 },

    /// The validation request failed in transit or returned an unreadable
    /// response.
    #[error("Validation request failed: {reason}")]
    ValidationTransport { reason: String },

    // ── Split call ────────────────────────────────────────────────────────
    /// The service refused the split and said why.
    ///
    /// `detail` is the service-authored explanation from the error payload
    /// and is safe to show to users verbatim.
    #[error("Split rejected by the service: {detail}")]
    SplitRejected { detail: String },

    /// The split request failed without a service-authored explanation:
    /// connection refused, connection dropped mid-transfer, or a non-success
    /// status with an unreadable body.
    #[error("Split request failed: {reason}")]
    SplitTransport { reason: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// The split succeeded remotely but the archive could not be written.
    #[error("Failed to write archive '{}'", .path.display())]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Workflow misuse ───────────────────────────────────────────────────
    /// `confirm` or `cancel` was called while no confirmation gate was open.
    #[error("Cannot {operation}: no confirmation is pending")]
    NoPendingConfirmation { operation: &'static str },

    /// A new file was selected while a remote call for the previous one was
    /// still in flight.
    #[error("An upload attempt is already {phase}; wait for it to finish or reset first")]
    AttemptInFlight { phase: &'static str },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The theme preferences file could not be read or written.
    #[error("Preferences file '{}' could not be {action}: {reason}", .path.display())]
    Preferences {
        path: PathBuf,
        action: &'static str,
        reason: String,
    },
}

impl SplitClientError {
    /// Sanitized, user-facing text for the status banner.
    ///
    /// Transport reasons stay in `Display` (and therefore in logs); the
    /// banner gets either the service-authored detail or a fixed generic
    /// line, so raw connection errors never reach the user verbatim.
    pub fn banner_message(&self) -> String {
        match self {
            SplitClientError::ValidationTimeout { .. } => {
                "Validation request timed out. Please try again.".to_string()
            }
            SplitClientError::ValidationTransport { .. } => {
                "Error validating PDF file.".to_string()
            }
            SplitClientError::SplitRejected { detail } => detail.clone(),
            SplitClientError::SplitTransport { .. } => {
                "An error occurred while splitting the PDF.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_timeout_display() {
        let e = SplitClientError::ValidationTimeout { secs: 60 };
        let msg = e.to_string();
        assert!(msg.contains("60s"), "got: {msg}");
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn split_rejected_display() {
        let e = SplitClientError::SplitRejected {
            detail: "PDF has only 3 pages".into(),
        };
        assert!(e.to_string().contains("PDF has only 3 pages"));
    }

    #[test]
    fn no_pending_confirmation_names_operation() {
        let e = SplitClientError::NoPendingConfirmation { operation: "confirm" };
        assert!(e.to_string().contains("confirm"));
    }

    #[test]
    fn banner_message_hides_transport_detail() {
        let e = SplitClientError::ValidationTransport {
            reason: "dns error: no such host".into(),
        };
        assert_eq!(e.banner_message(), "Error validating PDF file.");

        let e = SplitClientError::SplitTransport {
            reason: "connection reset by peer".into(),
        };
        assert_eq!(
            e.banner_message(),
            "An error occurred while splitting the PDF."
        );
    }

    #[test]
    fn banner_message_passes_service_detail_through() {
        let e = SplitClientError::SplitRejected {
            detail: "Pages per split cannot exceed total pages".into(),
        };
        assert_eq!(
            e.banner_message(),
            "Pages per split cannot exceed total pages"
        );
    }

    #[test]
    fn banner_message_for_timeout_is_the_fixed_line() {
        let e = SplitClientError::ValidationTimeout { secs: 5 };
        assert_eq!(
            e.banner_message(),
            "Validation request timed out. Please try again."
        );
    }

    #[test]
    fn archive_write_preserves_source() {
        use std::error::Error as _;
        let e = SplitClientError::ArchiveWrite {
            path: PathBuf::from("/tmp/out.zip"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/tmp/out.zip"));
        assert!(e.source().is_some());
    }
}
