//! Status banners and their display priority.
//!
//! At any moment the workflow may have several things worth saying at once:
//! a confirmation warning is pending while the attempt's processing note is
//! still live, or a local input warning sits over a terminal outcome. The
//! client shows exactly one line, chosen by a fixed priority:
//!
//! ```text
//! Error > Cancelled > Warning > Success > Processing
//! ```
//!
//! [`BannerKind`] derives `Ord` with variants declared in ascending
//! priority, so "pick the highest" is literally `Iterator::max`. Callers
//! that render banners (the CLI, a GUI shell) also use the kind to choose
//! styling.

/// The category of a status banner, ordered by display priority.
///
/// Declaration order is priority order: a later variant always wins over
/// an earlier one when both are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BannerKind {
    /// An upload attempt is in flight (validating or splitting).
    Processing,
    /// The last attempt finished with a saved archive.
    Success,
    /// The service flagged the attempt and wants confirmation.
    Warning,
    /// The user declined a pending confirmation.
    Cancelled,
    /// The last attempt failed.
    Error,
}

/// One displayable status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn processing(text: impl Into<String>) -> Self {
        Self { kind: BannerKind::Processing, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: BannerKind::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: BannerKind::Warning, text: text.into() }
    }

    pub fn cancelled(text: impl Into<String>) -> Self {
        Self { kind: BannerKind::Cancelled, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: BannerKind::Error, text: text.into() }
    }

    /// Pick the banner with the highest [`BannerKind`] priority.
    ///
    /// Returns `None` for an empty set. On equal priority the first
    /// candidate wins; in practice the workflow never produces two banners
    /// of the same kind at once.
    pub fn highest(candidates: impl IntoIterator<Item = Banner>) -> Option<Banner> {
        candidates
            .into_iter()
            .fold(None, |best: Option<Banner>, candidate| match best {
                Some(b) if b.kind >= candidate.kind => Some(b),
                _ => Some(candidate),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_priority_order() {
        assert!(BannerKind::Error > BannerKind::Cancelled);
        assert!(BannerKind::Cancelled > BannerKind::Warning);
        assert!(BannerKind::Warning > BannerKind::Success);
        assert!(BannerKind::Success > BannerKind::Processing);
    }

    #[test]
    fn highest_prefers_error_over_everything() {
        let picked = Banner::highest([
            Banner::processing("Splitting PDF..."),
            Banner::warning("Warning: 10 pages per split, PDF has 4 pages"),
            Banner::error("An error occurred while splitting the PDF."),
        ])
        .unwrap();
        assert_eq!(picked.kind, BannerKind::Error);
    }

    #[test]
    fn highest_of_warning_and_processing_is_warning() {
        let picked = Banner::highest([
            Banner::processing("Validating PDF..."),
            Banner::warning("confirm?"),
        ])
        .unwrap();
        assert_eq!(picked.kind, BannerKind::Warning);
    }

    #[test]
    fn highest_of_empty_is_none() {
        assert_eq!(Banner::highest([]), None);
    }

    #[test]
    fn equal_priority_keeps_the_first() {
        let picked = Banner::highest([
            Banner::success("first"),
            Banner::success("second"),
        ])
        .unwrap();
        assert_eq!(picked.text, "first");
    }
}
