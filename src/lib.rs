//! # pdfsplit-client
//!
//! Client for a remote PDF-splitting service: validate an upload, pass the
//! service's confirmation gate, run the split, and save the returned ZIP.
//!
//! ## Why this crate?
//!
//! The split service speaks two multipart POST endpoints and expects its
//! clients to carry a small but fiddly protocol around them: a validation
//! step with its own timeout, an optional server-signalled confirmation
//! pause, a strict priority order for which status line to show, and an
//! auto-reset window after every terminal outcome. This crate packages
//! that protocol as an explicit state machine ([`UploadWorkflow`]) so any
//! front-end — the bundled CLI, a GUI shell, a test harness — drives the
//! same sequencing instead of re-growing it around raw HTTP calls.
//!
//! ## Workflow Overview
//!
//! ```text
//! file + pages-per-split
//!  │
//!  ├─ 1. Select    local check (positive page count or warn, no call)
//!  ├─ 2. Validate  POST /api/validate-split, 60 s timeout → verdict JSON
//!  ├─ 3. Gate      service may request explicit user confirmation
//!  ├─ 4. Split     POST /api/split-pdf → ZIP bytes (no client timeout)
//!  ├─ 5. Save      atomic write as {name}_split.zip
//!  └─ 6. Settle    terminal banner, auto-reset to idle after 5 s
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pdfsplit_client::{ClientConfig, HttpSplitService, UploadWorkflow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .base_url("http://localhost:8000")
//!         .build()?;
//!     let service = Arc::new(HttpSplitService::new(config.clone())?);
//!     let mut workflow = UploadWorkflow::new(service, config);
//!
//!     let bytes = tokio::fs::read("report.pdf").await?;
//!     workflow.select_file("report.pdf", bytes).await?;
//!
//!     // The service may ask for a go-ahead (e.g. split size > page count).
//!     if workflow.pending_confirmation().is_some() {
//!         workflow.confirm().await?;
//!     }
//!     if let Some(banner) = workflow.banner() {
//!         println!("{}", banner.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfsplit` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdfsplit-client = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod archive;
pub mod config;
pub mod error;
pub mod remote;
pub mod service;
pub mod status;
pub mod theme;
pub mod workflow;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use archive::{save_archive, split_archive_name};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::SplitClientError;
pub use remote::HttpSplitService;
pub use service::{SplitService, UploadAttempt, ValidationReport};
pub use status::{Banner, BannerKind};
pub use theme::{ThemeMode, ThemePreferences};
pub use workflow::{PagesPerSplitField, Phase, UploadWorkflow};
