//! Teor engine: Câmara API access, URL resolution, and PDF download.
mod api;
mod download;
mod http;
mod persist;
mod resolve;

pub use api::{ApiError, CamaraApi, ListQuery, DEFAULT_BASE_URL};
pub use download::{download_pdf, MIN_PDF_BYTES};
pub use http::{HttpClient, HttpError, HttpSettings};
pub use persist::{ensure_output_dir, PdfWriter, PendingPdf, PersistError};
pub use resolve::resolve_pdf_url;
