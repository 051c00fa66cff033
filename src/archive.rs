//! Naming and saving of returned split archives.
//!
//! The service answers a split request with raw ZIP bytes and no filename,
//! so the client derives one from the uploaded file: `report.pdf` becomes
//! `report_split.zip`. Saving is atomic (temp file + rename) so an
//! interrupted download never leaves a half-written archive under the
//! final name.

use std::path::{Path, PathBuf};

use crate::error::SplitClientError;

/// Derive the archive name for an uploaded file.
///
/// A trailing `.pdf` is stripped case-insensitively; everything else in the
/// name is kept as-is. The input is treated as a plain file name, not a path.
pub fn split_archive_name(file_name: &str) -> String {
    // The boundary check keeps names ending in multibyte characters from
    // panicking the slice; such a suffix cannot be ".pdf" anyway.
    let stem = match file_name.len().checked_sub(4) {
        Some(cut)
            if file_name.is_char_boundary(cut)
                && file_name[cut..].eq_ignore_ascii_case(".pdf") =>
        {
            &file_name[..cut]
        }
        _ => file_name,
    };
    format!("{stem}_split.zip")
}

/// Save archive bytes under `dir`, named after the uploaded file.
///
/// Creates `dir` if missing, writes to a `.tmp` sibling, then renames into
/// place. Returns the final path.
pub async fn save_archive(
    dir: &Path,
    file_name: &str,
    bytes: &[u8],
) -> Result<PathBuf, SplitClientError> {
    let path = dir.join(split_archive_name(file_name));

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| SplitClientError::ArchiveWrite {
            path: path.clone(),
            source: e,
        })?;

    let tmp_path = path.with_extension("zip.tmp");
    tokio::fs::write(&tmp_path, bytes)
        .await
        .map_err(|e| SplitClientError::ArchiveWrite {
            path: path.clone(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| SplitClientError::ArchiveWrite {
            path: path.clone(),
            source: e,
        })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_pdf_extension_case_insensitively() {
        assert_eq!(split_archive_name("report.pdf"), "report_split.zip");
        assert_eq!(split_archive_name("REPORT.PDF"), "REPORT_split.zip");
        assert_eq!(split_archive_name("scan.Pdf"), "scan_split.zip");
    }

    #[test]
    fn keeps_names_without_pdf_extension() {
        assert_eq!(split_archive_name("notes"), "notes_split.zip");
        assert_eq!(split_archive_name("archive.zip"), "archive.zip_split.zip");
    }

    #[test]
    fn only_the_trailing_extension_is_stripped() {
        assert_eq!(split_archive_name("a.b.pdf"), "a.b_split.zip");
        assert_eq!(split_archive_name("pdf.pdf"), "pdf_split.zip");
        assert_eq!(split_archive_name(".pdf"), "_split.zip");
    }

    #[test]
    fn non_ascii_names_do_not_panic() {
        assert_eq!(split_archive_name("résumé.pdf"), "résumé_split.zip");
        assert_eq!(split_archive_name("日本語"), "日本語_split.zip");
        assert_eq!(split_archive_name("naïve"), "naïve_split.zip");
    }

    #[tokio::test]
    async fn save_writes_bytes_and_returns_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_archive(dir.path(), "report.pdf", b"PK\x03\x04zip-bytes")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("report_split.zip"));
        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, b"PK\x03\x04zip-bytes");
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        save_archive(dir.path(), "report.pdf", b"zip").await.unwrap();

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["report_split.zip".to_string()]);
    }

    #[tokio::test]
    async fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out/archives");
        let path = save_archive(&nested, "doc.pdf", b"zip").await.unwrap();
        assert!(path.starts_with(&nested));
        assert!(tokio::fs::metadata(&path).await.is_ok());
    }
}
