//! The upload workflow state machine.
//!
//! One [`UploadWorkflow`] owns all client-side state for a single upload
//! attempt and mediates between file selection, the two remote calls, and
//! the status banner:
//!
//! ```text
//!              select_file
//!   Idle ─────────────────▶ Validating
//!                               │
//!        verdict invalid ◀──────┼──────▶ verdict needs confirmation
//!              │                │                  │
//!              ▼                ▼                  ▼
//!           Failed        (plain accept)   NeedsConfirmation
//!                               │            │            │
//!                               │        confirm()    cancel()
//!                               ▼            ▼            ▼
//!                           Processing ◀─────┘        Cancelled
//!                            │      │
//!                            ▼      ▼
//!                      Succeeded   Failed
//! ```
//!
//! Terminal phases (`Succeeded`, `Failed`, `Cancelled`) auto-revert to
//! `Idle` after a fixed display window (default 5 s); each new terminal
//! phase replaces any prior pending auto-reset. At most one attempt is in
//! flight at a time: selecting a file while one is validating, processing,
//! or awaiting confirmation is refused.
//!
//! ## Why the attempt lives inside the phase
//!
//! A pending file must exist exactly while a confirmation is pending —
//! never before, never after a decision. Storing the [`UploadAttempt`]
//! inside [`Phase::NeedsConfirmation`] makes that invariant structural:
//! `confirm` moves the attempt out (so exactly one split call can ever see
//! it), `cancel` drops it with the phase, and no other phase can hold one.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::archive::save_archive;
use crate::config::ClientConfig;
use crate::error::SplitClientError;
use crate::service::{SplitService, UploadAttempt, ValidationReport};
use crate::status::Banner;

/// Warning shown when a file is selected without a usable page count.
const PAGES_WARNING: &str = "Please specify the number of pages per split";

/// Cancelled-banner text.
const CANCELLED_NOTICE: &str = "Split operation cancelled";

// ── Pages-per-split field ─────────────────────────────────────────────────

/// The free-text pages-per-split field, with form-style coercion.
///
/// The raw string is kept as typed so partial input ("", "12" mid-edit)
/// survives; coercion happens at three points:
///
/// * [`set`] — values that parse below 1 snap to `"1"` immediately.
/// * [`commit`] — on blur, empty or below-1 input becomes `"1"`.
/// * [`parsed`] — an attempt only proceeds when the field holds a positive
///   integer; anything else halts it with [`PAGES_WARNING`].
///
/// [`set`]: PagesPerSplitField::set
/// [`commit`]: PagesPerSplitField::commit
/// [`parsed`]: PagesPerSplitField::parsed
#[derive(Debug, Clone)]
pub struct PagesPerSplitField {
    raw: String,
}

impl Default for PagesPerSplitField {
    fn default() -> Self {
        Self { raw: "1".to_string() }
    }
}

impl PagesPerSplitField {
    /// Record an edit. Parseable values below 1 snap to `"1"`; everything
    /// else (including empty and non-numeric text) is kept verbatim.
    pub fn set(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        match raw.trim().parse::<i64>() {
            Ok(n) if n < 1 => self.raw = "1".to_string(),
            _ => self.raw = raw,
        }
    }

    /// Leave-the-field coercion: empty or below-1 input becomes `"1"`.
    pub fn commit(&mut self) {
        let trimmed = self.raw.trim();
        let below_one = matches!(trimmed.parse::<i64>(), Ok(n) if n < 1);
        if trimmed.is_empty() || below_one {
            self.raw = "1".to_string();
        }
    }

    /// The positive integer this field holds, if any.
    pub fn parsed(&self) -> Option<u32> {
        self.raw.trim().parse::<u32>().ok().filter(|n| *n >= 1)
    }

    /// The raw text as last typed or coerced.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

// ── Phase ─────────────────────────────────────────────────────────────────

/// Where the current attempt stands.
#[derive(Debug)]
pub enum Phase {
    /// No attempt in flight.
    Idle,
    /// Validation call under way.
    Validating { file_name: String },
    /// The service wants an explicit go-ahead before splitting.
    NeedsConfirmation {
        attempt: UploadAttempt,
        message: String,
        /// Page count from the validation verdict, when the service knew it.
        total_pages: Option<u32>,
    },
    /// Split call under way.
    Processing { file_name: String },
    /// Terminal: archive saved.
    Succeeded {
        message: String,
        archive_path: PathBuf,
    },
    /// Terminal: the attempt failed; `message` is already user-facing.
    Failed { message: String },
    /// Terminal: the user declined a pending confirmation.
    Cancelled,
}

impl Phase {
    /// Short lower-case name, for logs and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Validating { .. } => "validating",
            Phase::NeedsConfirmation { .. } => "awaiting confirmation",
            Phase::Processing { .. } => "processing",
            Phase::Succeeded { .. } => "succeeded",
            Phase::Failed { .. } => "failed",
            Phase::Cancelled => "cancelled",
        }
    }

    /// `Some(label)` while a new selection must be refused.
    fn in_flight_label(&self) -> Option<&'static str> {
        match self {
            Phase::Validating { .. }
            | Phase::NeedsConfirmation { .. }
            | Phase::Processing { .. } => Some(self.label()),
            _ => None,
        }
    }
}

// ── Workflow ──────────────────────────────────────────────────────────────

/// Client-side controller for the select → validate → confirm → split
/// cycle. See the module docs for the state diagram.
pub struct UploadWorkflow {
    service: Arc<dyn SplitService>,
    config: ClientConfig,
    phase: Phase,
    pages_field: PagesPerSplitField,
    /// Local input warning, shown without leaving `Idle`.
    warning: Option<String>,
    /// When set, the moment the current terminal phase reverts to `Idle`.
    reset_deadline: Option<Instant>,
}

impl UploadWorkflow {
    pub fn new(service: Arc<dyn SplitService>, config: ClientConfig) -> Self {
        Self {
            service,
            config,
            phase: Phase::Idle,
            pages_field: PagesPerSplitField::default(),
            warning: None,
            reset_deadline: None,
        }
    }

    // ── Field plumbing ────────────────────────────────────────────────

    pub fn set_pages_per_split(&mut self, raw: impl Into<String>) {
        self.pages_field.set(raw);
    }

    pub fn commit_pages_per_split(&mut self) {
        self.pages_field.commit();
    }

    pub fn pages_per_split(&self) -> &str {
        self.pages_field.as_str()
    }

    // ── Observers ─────────────────────────────────────────────────────

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// True while a remote call is under way.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            Phase::Validating { .. } | Phase::Processing { .. }
        )
    }

    /// The pending confirmation message, if the gate is open.
    pub fn pending_confirmation(&self) -> Option<&str> {
        match &self.phase {
            Phase::NeedsConfirmation { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The document's page count reported alongside a pending confirmation,
    /// for prompts that want to show what the user is deciding about.
    pub fn pending_total_pages(&self) -> Option<u32> {
        match &self.phase {
            Phase::NeedsConfirmation { total_pages, .. } => *total_pages,
            _ => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// The single status line to show right now, if any.
    ///
    /// Several signals can be live at once (a local warning over an open
    /// confirmation gate, the processing note under it); priority picks
    /// exactly one line. See [`crate::status::BannerKind`].
    pub fn banner(&self) -> Option<Banner> {
        let mut candidates = Vec::new();
        match &self.phase {
            Phase::Idle => {}
            Phase::Validating { file_name } | Phase::Processing { file_name } => {
                candidates.push(Banner::processing(format!("Processing: {file_name}")));
            }
            Phase::NeedsConfirmation { attempt, message, .. } => {
                candidates.push(Banner::processing(format!(
                    "Processing: {}",
                    attempt.file_name
                )));
                candidates.push(Banner::warning(message.clone()));
            }
            Phase::Succeeded { message, .. } => {
                candidates.push(Banner::success(message.clone()));
            }
            Phase::Failed { message } => {
                candidates.push(Banner::error(message.clone()));
            }
            Phase::Cancelled => {
                candidates.push(Banner::cancelled(CANCELLED_NOTICE));
            }
        }
        if let Some(warning) = &self.warning {
            candidates.push(Banner::warning(warning.clone()));
        }
        Banner::highest(candidates)
    }

    // ── Operations ────────────────────────────────────────────────────

    /// Start an attempt with the selected file.
    ///
    /// Refused with [`SplitClientError::AttemptInFlight`] while an attempt
    /// is validating, processing, or awaiting confirmation. With no usable
    /// page count the attempt halts locally: a warning banner, no remote
    /// call, `Ok(())`. Remote outcomes (rejection, timeout, the split
    /// itself) land in the resulting [`Phase`], not in the return value.
    pub async fn select_file(
        &mut self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), SplitClientError> {
        if let Some(label) = self.phase.in_flight_label() {
            return Err(SplitClientError::AttemptInFlight { phase: label });
        }

        // Fresh attempt: stale banners and timers go away first.
        self.warning = None;
        self.reset_deadline = None;
        self.phase = Phase::Idle;

        let file_name = file_name.into();
        let Some(pages) = self.pages_field.parsed() else {
            debug!(
                file = %file_name,
                raw = self.pages_field.as_str(),
                "no usable page count, attempt halted"
            );
            self.warning = Some(PAGES_WARNING.to_string());
            return Ok(());
        };

        let attempt = UploadAttempt::new(file_name, bytes, pages);
        info!(
            file = %attempt.file_name,
            pages_per_split = pages,
            service = self.service.name(),
            "validating upload"
        );
        self.phase = Phase::Validating {
            file_name: attempt.file_name.clone(),
        };

        let verdict = self.service.validate(&attempt).await;
        self.apply_validation(attempt, verdict).await;
        Ok(())
    }

    /// Approve a pending confirmation and run the split.
    ///
    /// Only valid while the gate is open. The stored attempt is moved out,
    /// so exactly one split call sees the originally selected file.
    pub async fn confirm(&mut self) -> Result<(), SplitClientError> {
        let attempt = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::NeedsConfirmation { attempt, .. } => attempt,
            other => {
                self.phase = other;
                return Err(SplitClientError::NoPendingConfirmation {
                    operation: "confirm",
                });
            }
        };
        info!(file = %attempt.file_name, "confirmation accepted");
        self.run_split(attempt).await;
        Ok(())
    }

    /// Decline a pending confirmation, discarding the stored file.
    pub fn cancel(&mut self) -> Result<(), SplitClientError> {
        if !matches!(self.phase, Phase::NeedsConfirmation { .. }) {
            return Err(SplitClientError::NoPendingConfirmation {
                operation: "cancel",
            });
        }
        info!("confirmation declined");
        self.phase = Phase::Cancelled;
        self.arm_auto_reset();
        Ok(())
    }

    /// Return to `Idle` from any phase: drops a pending attempt, clears
    /// banners, and restores the page field to `"1"`.
    pub fn reset(&mut self) {
        debug!(from = self.phase.label(), "workflow reset");
        self.phase = Phase::Idle;
        self.pages_field = PagesPerSplitField::default();
        self.warning = None;
        self.reset_deadline = None;
    }

    // ── Auto-reset ────────────────────────────────────────────────────

    /// When the current terminal phase will revert to `Idle`, if armed.
    pub fn reset_deadline(&self) -> Option<Instant> {
        self.reset_deadline
    }

    /// Revert to `Idle` if the display window has elapsed. Returns whether
    /// a revert happened.
    pub fn poll_auto_reset(&mut self) -> bool {
        match self.reset_deadline {
            Some(deadline) if Instant::now() >= deadline => {
                debug!("display window elapsed, reverting to idle");
                self.reset_deadline = None;
                self.phase = Phase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Sleep until the armed deadline, then revert. Returns immediately
    /// with `false` when nothing is armed.
    pub async fn wait_for_auto_reset(&mut self) -> bool {
        let Some(deadline) = self.reset_deadline else {
            return false;
        };
        time::sleep_until(deadline).await;
        self.poll_auto_reset()
    }

    fn arm_auto_reset(&mut self) {
        let window = std::time::Duration::from_secs(self.config.display_window_secs);
        self.reset_deadline = Some(Instant::now() + window);
    }

    // ── Transitions ───────────────────────────────────────────────────

    async fn apply_validation(
        &mut self,
        attempt: UploadAttempt,
        verdict: Result<ValidationReport, SplitClientError>,
    ) {
        match verdict {
            Err(e) => {
                warn!(error = %e, "validation call failed");
                self.fail_with(e.banner_message());
            }
            Ok(report) if !report.is_valid => {
                info!(message = %report.message, "validation rejected the file");
                self.fail_with(report.message);
            }
            Ok(report) if report.needs_confirmation => {
                info!(
                    message = %report.message,
                    total_pages = ?report.total_pages,
                    "confirmation requested"
                );
                self.phase = Phase::NeedsConfirmation {
                    attempt,
                    message: report.message,
                    total_pages: report.total_pages,
                };
            }
            Ok(_) => self.run_split(attempt).await,
        }
    }

    async fn run_split(&mut self, attempt: UploadAttempt) {
        info!(
            file = %attempt.file_name,
            pages_per_split = attempt.pages_per_split,
            "splitting"
        );
        self.phase = Phase::Processing {
            file_name: attempt.file_name.clone(),
        };

        match self.service.split(&attempt).await {
            Ok(bytes) => {
                match save_archive(&self.config.download_dir, &attempt.file_name, &bytes).await {
                    Ok(path) => {
                        info!(path = %path.display(), "archive saved");
                        self.phase = Phase::Succeeded {
                            message: format!(
                                "PDF split successfully! Saved to {}",
                                path.display()
                            ),
                            archive_path: path,
                        };
                        self.arm_auto_reset();
                    }
                    Err(e) => {
                        warn!(error = %e, "archive save failed");
                        self.fail_with(e.banner_message());
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "split call failed");
                self.fail_with(e.banner_message());
            }
        }
    }

    fn fail_with(&mut self, message: String) {
        self.phase = Phase::Failed { message };
        self.arm_auto_reset();
    }
}
