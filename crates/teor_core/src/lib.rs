//! Teor core: domain model and pure document-URL resolution logic.
mod bill;
mod resolve;

pub use bill::{BillDetail, BillSummary, DownloadOutcome, FileRecord};
pub use resolve::{advertised_url, candidate_url, is_pdf_record, pick_from_files};
