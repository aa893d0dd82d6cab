//! Pure decision logic for picking a bill's best document URL.
//!
//! The ordering is deliberate: an advertised URL from the detail record is
//! authoritative; PDF-classified attachments beat untyped ones; and as a
//! last resort any URL beats none, since some attachments are mislabeled
//! but still valid PDFs.

use crate::bill::{BillDetail, FileRecord};

/// The advertised full-text URL from the detail record, if usable.
pub fn advertised_url(detail: &BillDetail) -> Option<&str> {
    non_blank(detail.advertised_document_url.as_deref())
}

/// Heuristic PDF classification of one attachment.
///
/// A record qualifies when any of: declared format is "pdf", the name ends
/// with ".pdf", or the title mentions "pdf". All case-insensitive.
pub fn is_pdf_record(file: &FileRecord) -> bool {
    let format_is_pdf = file
        .format
        .as_deref()
        .is_some_and(|f| f.eq_ignore_ascii_case("pdf"));
    let name_is_pdf = file
        .name
        .as_deref()
        .is_some_and(|n| n.to_lowercase().ends_with(".pdf"));
    let title_mentions_pdf = file
        .title
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains("pdf"));
    format_is_pdf || name_is_pdf || title_mentions_pdf
}

/// First usable URL of one attachment, in fixed field-priority order.
pub fn candidate_url(file: &FileRecord) -> Option<&str> {
    non_blank(file.download_url.as_deref())
        .or_else(|| non_blank(file.document_url.as_deref()))
        .or_else(|| non_blank(file.url.as_deref()))
}

/// Picks the best URL from a file list.
///
/// First the attachments classified as PDF, in list order; then, if none
/// classified, any attachment with a usable URL. `None` means "no
/// retrievable document", a valid terminal outcome rather than an error.
pub fn pick_from_files(files: &[FileRecord]) -> Option<String> {
    files
        .iter()
        .filter(|file| is_pdf_record(file))
        .find_map(candidate_url)
        .or_else(|| files.iter().find_map(candidate_url))
        .map(str::to_string)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
