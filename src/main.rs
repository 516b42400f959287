use tracing::{error, info, warn};

use ag_appraisal::config::AppConfig;
use ag_appraisal::export::{pdf_file_name, SharePayload};
use ag_appraisal::network::http_api::{self, ReportRoutes};
use ag_appraisal::report;
use ag_appraisal::summary::SummaryService;
use ag_appraisal::view::{PageModel, ReportView, ViewConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = AppConfig::from_env()?;

    // Refuse to serve anything for an invalid report.
    let report = report::load_from_file(&config.report_path)?;

    let view = ReportView::project(&report);
    if view.has_failures() {
        warn!(
            "Report {} has failing conclusions or tests",
            report.serial_number
        );
    }
    let page = PageModel::build(&view, ViewConfig::for_variant(config.variant))
        .with_meta(config.page_meta.clone());
    info!(
        "Projected {} ({:?} variant, {} gallery photos)",
        report.serial_number,
        config.variant,
        view.photos.len()
    );

    // Bounded by AG_SUMMARY_TIMEOUT_SECS; serving starts only after this returns.
    let summary = SummaryService::new(config.summary_api_key.clone(), config.summary_model.clone())
        .with_timeout(config.summary_timeout)
        .summarize(&report)
        .await;

    let share = SharePayload::for_report(&report, &config.public_url);
    let routes = ReportRoutes::new(&page, &summary, &share, &pdf_file_name(&report))?;

    http_api::serve(&config.bind_addr, routes).await
}
