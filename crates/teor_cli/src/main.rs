//! Run loop: list bills, collect details, resolve document URLs, download
//! PDFs. Strictly sequential, with politeness pauses between upstream
//! calls.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use teor_core::BillDetail;
use teor_engine::{
    download_pdf, resolve_pdf_url, CamaraApi, HttpClient, HttpSettings, ListQuery,
    DEFAULT_BASE_URL,
};
use teor_logging::{harvest_debug, harvest_info, harvest_warn};

/// Pause between sequential per-bill detail calls.
const DETAIL_DELAY: Duration = Duration::from_millis(100);
/// Pause between sequential downloads.
const DOWNLOAD_DELAY: Duration = Duration::from_millis(150);

/// Downloads full-text PDFs for Câmara dos Deputados bills.
#[derive(Debug, Parser)]
#[command(name = "teor", version, about)]
struct Args {
    /// Bill type code (siglaTipo), e.g. PL, PLP, PEC.
    #[arg(long, default_value = "PL")]
    tipo: String,

    /// Legislative year to harvest.
    #[arg(long, default_value_t = 2025)]
    ano: i32,

    /// Page size for the listing call.
    #[arg(long, default_value_t = 100)]
    itens: u32,

    /// Output directory for the downloaded PDFs.
    #[arg(long, default_value = "inteiro_teor")]
    out: PathBuf,

    /// Base URL of the propositions API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Log per-bill decisions.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    teor_logging::initialize_terminal(args.verbose);
    run(args).await
}

async fn run(args: Args) -> anyhow::Result<()> {
    let http = HttpClient::new(HttpSettings::default())?;
    let api = CamaraApi::new(http, args.base_url);

    harvest_info!("listing bills ({} {})", args.tipo, args.ano);
    let query = ListQuery {
        bill_type: args.tipo,
        year: args.ano,
        page_size: args.itens,
    };
    // No bill list means nothing to process; this is the one fatal path.
    let summaries = api.list_bills(&query).await.context("listing bills failed")?;
    harvest_info!("bills listed: {}", summaries.len());

    harvest_info!("collecting details");
    let mut details: Vec<BillDetail> = Vec::with_capacity(summaries.len());
    for summary in &summaries {
        tokio::time::sleep(DETAIL_DELAY).await;
        match api.bill_detail(summary.id).await {
            Ok(Some(detail)) => details.push(detail),
            Ok(None) => harvest_debug!("bill {} has no detail record", summary.id),
            Err(err) => harvest_warn!("detail for bill {} failed: {err}", summary.id),
        }
    }
    harvest_info!("details collected: {}/{}", details.len(), summaries.len());

    harvest_info!("resolving document URLs");
    let mut resolved: Vec<(i64, String)> = Vec::new();
    for detail in &details {
        match resolve_pdf_url(&api, detail).await {
            Some(url) => resolved.push((detail.id, url)),
            None => harvest_debug!("{}: no retrievable document", detail.reference()),
        }
    }
    harvest_info!("URLs resolved: {}/{}", resolved.len(), details.len());

    harvest_info!("downloading PDFs to {}", args.out.display());
    let mut downloaded = 0usize;
    for (id, url) in &resolved {
        tokio::time::sleep(DOWNLOAD_DELAY).await;
        let outcome = download_pdf(api.http(), *id, url, &args.out).await;
        if outcome.is_success() {
            downloaded += 1;
        } else {
            harvest_warn!("bill {id}: {outcome}");
        }
    }
    harvest_info!("PDFs downloaded: {}/{}", downloaded, resolved.len());

    Ok(())
}
