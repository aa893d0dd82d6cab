//! Network-backed driver for the document-URL decision in `teor_core`.

use teor_core::{advertised_url, pick_from_files, BillDetail};
use teor_logging::harvest_debug;

use crate::api::CamaraApi;

/// Best-known document URL for a bill.
///
/// The advertised URL from the detail record wins outright, with no
/// network traffic. Only when it is absent or blank is the file list
/// fetched — once, and discarded after the pick. `None` is a valid
/// terminal outcome: no retrievable document for this bill.
pub async fn resolve_pdf_url(api: &CamaraApi, detail: &BillDetail) -> Option<String> {
    if let Some(url) = advertised_url(detail) {
        return Some(url.to_string());
    }

    let files = api.bill_files(detail.id).await;
    harvest_debug!(
        "bill {} has no advertised URL, scanning {} attachment(s)",
        detail.id,
        files.len()
    );
    pick_from_files(&files)
}
