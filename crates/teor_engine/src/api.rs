//! Client for the Câmara dos Deputados "proposições" endpoints.
//!
//! Every response wraps its payload in a `dados` envelope; a missing
//! envelope means an empty result, not an error.

use serde::Deserialize;
use teor_core::{BillDetail, BillSummary, FileRecord};
use teor_logging::{harvest_debug, harvest_warn};
use thiserror::Error;

use crate::http::{HttpClient, HttpError};

/// Public listing endpoint for legislative propositions.
pub const DEFAULT_BASE_URL: &str = "https://dadosabertos.camara.leg.br/api/v2/proposicoes";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Listing query: type code, year, page size. Sort is fixed to ascending
/// id so runs are deterministic.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub bill_type: String,
    pub year: i32,
    pub page_size: u32,
}

impl ListQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("siglaTipo", self.bill_type.clone()),
            ("ano", self.year.to_string()),
            ("ordem", "ASC".to_string()),
            ("ordenarPor", "id".to_string()),
            ("itens", self.page_size.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    dados: Option<T>,
}

#[derive(Debug, Deserialize)]
struct SummaryWire {
    id: i64,
    #[serde(default, rename = "siglaTipo")]
    sigla_tipo: Option<String>,
    #[serde(default)]
    numero: Option<i64>,
    #[serde(default)]
    ano: Option<i64>,
}

impl From<SummaryWire> for BillSummary {
    fn from(wire: SummaryWire) -> Self {
        BillSummary {
            id: wire.id,
            bill_type: wire.sigla_tipo,
            number: wire.numero,
            year: wire.ano,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailWire {
    id: i64,
    #[serde(default)]
    sigla_tipo: Option<String>,
    #[serde(default)]
    numero: Option<i64>,
    #[serde(default)]
    ano: Option<i64>,
    #[serde(default)]
    ementa: Option<String>,
    #[serde(default)]
    data_apresentacao: Option<String>,
    #[serde(default)]
    url_inteiro_teor: Option<String>,
    #[serde(default)]
    status_proposicao: Option<StatusWire>,
}

// The nested status object may be absent or null; either way projection
// must not fail, so the missing case degrades to an all-None status.
#[derive(Debug, Default, Deserialize)]
struct StatusWire {
    #[serde(default)]
    apreciacao: Option<String>,
}

impl From<DetailWire> for BillDetail {
    fn from(wire: DetailWire) -> Self {
        let status = wire.status_proposicao.unwrap_or_default();
        BillDetail {
            id: wire.id,
            bill_type: wire.sigla_tipo,
            number: wire.numero,
            year: wire.ano,
            summary: wire.ementa,
            presentation_date: wire.data_apresentacao,
            advertised_document_url: wire.url_inteiro_teor,
            appreciation_status: status.apreciacao,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileWire {
    #[serde(default)]
    formato: Option<String>,
    #[serde(default)]
    nome: Option<String>,
    #[serde(default)]
    titulo: Option<String>,
    #[serde(default, rename = "urlDownload")]
    url_download: Option<String>,
    #[serde(default, rename = "urlInteiroTeor")]
    url_inteiro_teor: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl From<FileWire> for FileRecord {
    fn from(wire: FileWire) -> Self {
        FileRecord {
            format: wire.formato,
            name: wire.nome,
            title: wire.titulo,
            download_url: wire.url_download,
            document_url: wire.url_inteiro_teor,
            url: wire.url,
        }
    }
}

/// Typed client over the proposition endpoints.
///
/// Owns the injected [`HttpClient`]; there is no process-wide session.
pub struct CamaraApi {
    http: HttpClient,
    base_url: String,
}

impl CamaraApi {
    /// `base_url` is the propositions collection URL (no trailing slash).
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// One page of the listing. A failure here is fatal to the run, so it
    /// propagates as a hard error.
    pub async fn list_bills(&self, query: &ListQuery) -> Result<Vec<BillSummary>, ApiError> {
        let response = self.http.get_ok(&self.base_url, &query.to_params()).await?;
        let envelope: Envelope<Vec<SummaryWire>> = decode(response).await?;
        let summaries = envelope
            .dados
            .unwrap_or_default()
            .into_iter()
            .map(BillSummary::from)
            .collect();
        Ok(summaries)
    }

    /// Normalized detail for one bill.
    ///
    /// A non-2xx status yields `Ok(None)`: some identifiers legitimately
    /// 404 (withdrawn or renumbered bills) and the pipeline continues.
    pub async fn bill_detail(&self, id: i64) -> Result<Option<BillDetail>, ApiError> {
        let url = format!("{}/{id}", self.base_url);
        let response = self.http.get(&url, &[]).await?;
        let status = response.status();
        if !status.is_success() {
            harvest_debug!("detail for bill {id} returned {status}, skipping");
            return Ok(None);
        }
        let envelope: Envelope<DetailWire> = decode(response).await?;
        Ok(envelope.dados.map(BillDetail::from))
    }

    /// Attachments of one bill. Soft on every axis: transport failure,
    /// error status, or an undecodable body all degrade to an empty list
    /// so that resolution falls through to "no URL found".
    pub async fn bill_files(&self, id: i64) -> Vec<FileRecord> {
        let url = format!("{}/{id}/arquivos", self.base_url);
        let response = match self.http.get(&url, &[]).await {
            Ok(response) => response,
            Err(err) => {
                harvest_warn!("file list for bill {id} failed: {err}");
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            harvest_debug!("file list for bill {id} returned {}", response.status());
            return Vec::new();
        }
        match response.json::<Envelope<Vec<FileWire>>>().await {
            Ok(envelope) => envelope
                .dados
                .unwrap_or_default()
                .into_iter()
                .map(FileRecord::from)
                .collect(),
            Err(err) => {
                harvest_warn!("file list for bill {id} had an invalid body: {err}");
                Vec::new()
            }
        }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}
