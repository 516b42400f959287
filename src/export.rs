use serde::Serialize;
use tracing::{info, warn};

use crate::report::AppraisalReport;
use crate::view::PageModel;

// ── PDF export ─────────────────────────────────────────────────────

/// `AG_Appraisal_<brand, spaces as underscores>_<serial>.pdf`
pub fn pdf_file_name(report: &AppraisalReport) -> String {
    format!(
        "AG_Appraisal_{}_{}.pdf",
        report.brand.replace(' ', "_"),
        report.serial_number
    )
}

/// Renders a laid-out page to a downloadable document.
pub trait PdfExporter {
    fn export(&mut self, page: &PageModel, file_name: &str) -> Result<(), String>;
}

/// Tracks whether a download is in flight so the button can be disabled.
#[derive(Debug, Default)]
pub struct ExportTracker {
    in_flight: bool,
}

impl ExportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Mark an export as started and return the file name to write.
    /// Refuses while another export is still in flight.
    pub fn begin(&mut self, report: &AppraisalReport) -> Result<String, String> {
        if self.in_flight {
            return Err("An export is already in progress".to_string());
        }
        self.in_flight = true;
        Ok(pdf_file_name(report))
    }

    /// Clear the in-flight flag and report the outcome.
    pub fn finish(&mut self, file_name: &str, outcome: Result<(), String>) -> Result<(), String> {
        self.in_flight = false;
        match outcome {
            Ok(()) => {
                info!("Exported {}", file_name);
                Ok(())
            }
            Err(e) => {
                warn!("PDF export of {} failed: {}", file_name, e);
                Err(format!("Failed to export {}: {}", file_name, e))
            }
        }
    }

    /// Export the page under the report's file name. The flag is cleared
    /// whatever the outcome and the report is never touched.
    pub fn run<E>(
        &mut self,
        exporter: &mut E,
        report: &AppraisalReport,
        page: &PageModel,
    ) -> Result<String, String>
    where
        E: PdfExporter + ?Sized,
    {
        let file_name = self.begin(report)?;
        let outcome = exporter.export(page, &file_name);
        self.finish(&file_name, outcome)?;
        Ok(file_name)
    }
}

// ── Share ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_report(report: &AppraisalReport, url: &str) -> Self {
        SharePayload {
            title: format!("{} 鑑定報告", report.brand),
            url: url.to_string(),
        }
    }
}

/// The platform's native share sheet.
pub trait ShareTarget {
    fn share(&mut self, payload: &SharePayload) -> Result<(), String>;
}

/// Hand the payload to the share sheet if the platform has one.
///
/// Returns whether anything was shared. A missing target is a silent no-op;
/// a failing one is logged and otherwise ignored.
pub fn share_report(target: Option<&mut dyn ShareTarget>, payload: &SharePayload) -> bool {
    let Some(target) = target else {
        return false;
    };
    match target.share(payload) {
        Ok(()) => {
            info!("Shared \"{}\"", payload.title);
            true
        }
        Err(e) => {
            warn!("Share failed: {}", e);
            false
        }
    }
}
