//! Configuration types for the split client.
//!
//! All client behaviour is controlled through [`ClientConfig`], built via its
//! [`ClientConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share configs across tasks, log them, and diff two runs to understand
//! why their behaviour differs.
//!
//! # Design choice: builder over constructor
//! A many-field constructor is unreadable and breaks on every new field.
//! The builder pattern lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::SplitClientError;
use std::path::PathBuf;

/// Configuration for the split client.
///
/// Built via [`ClientConfig::builder()`] or using
/// [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use pdfsplit_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://splitter.internal:8000")
///     .validate_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the split service. Default: `http://localhost:8000`.
    ///
    /// Both endpoints (`/api/validate-split` and `/api/split-pdf`) live under
    /// this one origin. Stored without a trailing slash; the builder
    /// normalises.
    pub base_url: String,

    /// Timeout for the validation request in seconds. Default: 60.
    ///
    /// Validation only opens the PDF and counts pages, so it should answer in
    /// well under a minute even for large documents. Bounding it means a dead
    /// or unreachable service surfaces as a timeout banner instead of leaving
    /// the attempt stuck in `Validating` indefinitely.
    pub validate_timeout_secs: u64,

    /// Timeout for the split request in seconds. Default: `None` (unbounded).
    ///
    /// Split duration scales with document size and the service streams the
    /// archive back as one response, so no single bound fits all inputs.
    /// Callers who front a service with known latency can set one.
    pub split_timeout_secs: Option<u64>,

    /// How long a finished attempt's banner stays visible before the workflow
    /// auto-resets, in seconds. Default: 5.
    ///
    /// Long enough to read a success or failure line, short enough that the
    /// next upload does not start against stale state.
    pub display_window_secs: u64,

    /// Directory where downloaded archives are saved. Default: `.`.
    pub download_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            validate_timeout_secs: 60,
            split_timeout_secs: None,
            display_window_secs: 5,
            download_dir: PathBuf::from("."),
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full URL of the validation endpoint.
    pub fn validate_endpoint(&self) -> String {
        format!("{}/api/validate-split", self.base_url)
    }

    /// Full URL of the split endpoint.
    pub fn split_endpoint(&self) -> String {
        format!("{}/api/split-pdf", self.base_url)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the service base URL. Trailing slashes are stripped so endpoint
    /// joins never produce `//validate-pdf`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn validate_timeout_secs(mut self, secs: u64) -> Self {
        self.config.validate_timeout_secs = secs.max(1);
        self
    }

    pub fn split_timeout_secs(mut self, secs: u64) -> Self {
        self.config.split_timeout_secs = Some(secs.max(1));
        self
    }

    pub fn display_window_secs(mut self, secs: u64) -> Self {
        self.config.display_window_secs = secs;
        self
    }

    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.download_dir = dir.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, SplitClientError> {
        let c = &self.config;
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(SplitClientError::InvalidConfig(format!(
                "Base URL must start with http:// or https://, got '{}'",
                c.base_url
            )));
        }
        if c.validate_timeout_secs == 0 {
            return Err(SplitClientError::InvalidConfig(
                "Validation timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_service_contract() {
        let c = ClientConfig::default();
        assert_eq!(c.base_url, "http://localhost:8000");
        assert_eq!(c.validate_timeout_secs, 60);
        assert_eq!(c.split_timeout_secs, None);
        assert_eq!(c.display_window_secs, 5);
        assert_eq!(c.download_dir, PathBuf::from("."));
    }

    #[test]
    fn builder_strips_trailing_slash() {
        let c = ClientConfig::builder()
            .base_url("http://splitter:8000///")
            .build()
            .unwrap();
        assert_eq!(c.base_url, "http://splitter:8000");
        assert_eq!(
            c.validate_endpoint(),
            "http://splitter:8000/api/validate-split"
        );
        assert_eq!(c.split_endpoint(), "http://splitter:8000/api/split-pdf");
    }

    #[test]
    fn builder_rejects_non_http_url() {
        let err = ClientConfig::builder()
            .base_url("ftp://splitter:21")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn zero_timeout_is_clamped_up() {
        let c = ClientConfig::builder()
            .validate_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(c.validate_timeout_secs, 1);
    }

    #[test]
    fn split_timeout_is_opt_in() {
        let c = ClientConfig::builder().split_timeout_secs(300).build().unwrap();
        assert_eq!(c.split_timeout_secs, Some(300));
    }
}
