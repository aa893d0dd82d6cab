//! Streaming PDF fetcher.
//!
//! Downloads are chunked straight to disk, so peak memory stays bounded
//! regardless of document size, and the destination file only appears
//! after the body has passed the size check.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use teor_core::DownloadOutcome;
use teor_logging::{harvest_debug, harvest_warn};
use thiserror::Error;

use crate::http::{HttpClient, HttpError};
use crate::persist::{PdfWriter, PersistError};

/// A body at or below this size is an error page or an empty response,
/// not a document.
pub const MIN_PDF_BYTES: u64 = 1024;

#[derive(Debug, Error)]
enum DownloadFault {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("body read failed: {0}")]
    Body(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Download `url` to `{out_dir}/{id}.pdf`.
///
/// Never returns an error: every failure is folded into the outcome with
/// its reason preserved, because one bad document must not abort the
/// batch. A second call for the same id overwrites the previous file.
pub async fn download_pdf(
    http: &HttpClient,
    id: i64,
    url: &str,
    out_dir: &Path,
) -> DownloadOutcome {
    match try_download(http, id, url, out_dir).await {
        Ok(outcome) => outcome,
        Err(fault) => {
            harvest_warn!("download for bill {id} failed: {fault}");
            DownloadOutcome::TransientError {
                message: fault.to_string(),
            }
        }
    }
}

async fn try_download(
    http: &HttpClient,
    id: i64,
    url: &str,
    out_dir: &Path,
) -> Result<DownloadOutcome, DownloadFault> {
    reqwest::Url::parse(url).map_err(|err| DownloadFault::InvalidUrl(err.to_string()))?;

    let response = http.get_stream(url).await?;
    let status = response.status();
    if status.is_client_error() {
        return Ok(DownloadOutcome::NotFound {
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        return Ok(DownloadOutcome::TransientError {
            message: format!("http status {status} for {url}"),
        });
    }

    // Some endpoints serve PDFs with a generic content type; worth a log
    // line, never a rejection.
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !content_type.contains("pdf") && !url.to_ascii_lowercase().ends_with(".pdf") {
        harvest_debug!("bill {id}: content type '{content_type}' is not obviously PDF, saving anyway");
    }

    let writer = PdfWriter::new(out_dir.to_path_buf());
    let mut pending = writer.begin()?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| DownloadFault::Body(err.to_string()))?;
        pending.write_chunk(&chunk)?;
    }

    let bytes = pending.bytes_written();
    if bytes <= MIN_PDF_BYTES {
        // Dropping `pending` discards the undersized temp file.
        return Ok(DownloadOutcome::ValidationFailed { bytes });
    }

    let path = pending.commit(&format!("{id}.pdf"))?;
    harvest_debug!("bill {id}: wrote {} ({bytes} bytes)", path.display());
    Ok(DownloadOutcome::Downloaded { path, bytes })
}
