use std::fmt;
use std::path::PathBuf;

/// One row of the paginated listing endpoint.
///
/// The pipeline only ever consumes `id`; the remaining fields feed
/// progress logging and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillSummary {
    pub id: i64,
    pub bill_type: Option<String>,
    pub number: Option<i64>,
    pub year: Option<i64>,
}

/// Normalized single-bill record from the detail endpoint.
///
/// `id` is always present; every other field may be absent upstream and
/// stays `None` here. An absent field is never collapsed to an empty
/// string, which would be indistinguishable from "present but empty".
/// The record is built once per bill and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BillDetail {
    pub id: i64,
    pub bill_type: Option<String>,
    pub number: Option<i64>,
    pub year: Option<i64>,
    pub summary: Option<String>,
    pub presentation_date: Option<String>,
    pub advertised_document_url: Option<String>,
    pub appreciation_status: Option<String>,
}

impl BillDetail {
    /// Human-readable reference like `PL 1234/2025`, falling back to the
    /// numeric id when type/number/year are missing.
    pub fn reference(&self) -> String {
        match (&self.bill_type, self.number, self.year) {
            (Some(t), Some(n), Some(y)) => format!("{t} {n}/{y}"),
            _ => format!("#{}", self.id),
        }
    }
}

/// One attachment from the per-bill files endpoint.
///
/// `format`/`name`/`title` drive PDF classification; the three URL fields
/// are candidates in fixed priority order (`download_url`, `document_url`,
/// `url`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileRecord {
    pub format: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub download_url: Option<String>,
    pub document_url: Option<String>,
    pub url: Option<String>,
}

/// Result of one download attempt.
///
/// A failed document is never an `Err` anywhere in the pipeline; a single
/// bad document must not abort the batch, so failures travel as data with
/// their reason attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Validated file on disk.
    Downloaded { path: PathBuf, bytes: u64 },
    /// Server said the document does not exist (final 4xx).
    NotFound { status: u16 },
    /// Transport failure, retry budget exhausted, or a final 5xx.
    TransientError { message: String },
    /// Body transferred but too small to be a real document.
    ValidationFailed { bytes: u64 },
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Downloaded { .. })
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadOutcome::Downloaded { path, bytes } => {
                write!(f, "downloaded {} ({bytes} bytes)", path.display())
            }
            DownloadOutcome::NotFound { status } => write!(f, "not found (http {status})"),
            DownloadOutcome::TransientError { message } => write!(f, "transient error: {message}"),
            DownloadOutcome::ValidationFailed { bytes } => {
                write!(f, "validation failed ({bytes} bytes, too small)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_prefers_type_number_year() {
        let detail = BillDetail {
            id: 42,
            bill_type: Some("PL".into()),
            number: Some(1234),
            year: Some(2025),
            ..BillDetail::default()
        };
        assert_eq!(detail.reference(), "PL 1234/2025");
    }

    #[test]
    fn reference_falls_back_to_id() {
        let detail = BillDetail {
            id: 42,
            number: Some(1234),
            ..BillDetail::default()
        };
        assert_eq!(detail.reference(), "#42");
    }

    #[test]
    fn only_downloaded_counts_as_success() {
        assert!(DownloadOutcome::Downloaded {
            path: PathBuf::from("42.pdf"),
            bytes: 2048
        }
        .is_success());
        assert!(!DownloadOutcome::NotFound { status: 404 }.is_success());
        assert!(!DownloadOutcome::ValidationFailed { bytes: 12 }.is_success());
    }
}
