pub mod page;

use serde::Serialize;

use crate::report::{AppraisalReport, AppraisalResult, GalleryPhoto, PhotoSlot, Verdict};

pub use page::{Gallery, PageAction, PageMeta, PageModel, ViewConfig, ViewVariant};

// ── Rows ───────────────────────────────────────────────────────────

/// One label/value line of the report, with the treatment to render it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub key: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    pub verdict: Verdict,
}

impl Row {
    fn new(key: &'static str, label: &'static str, value: &'static str, verdict: Verdict) -> Self {
        Row {
            key,
            label,
            value,
            verdict,
        }
    }
}

// ── Projection ─────────────────────────────────────────────────────

/// Everything the display surface needs from a report, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub brand: String,
    pub model_number: String,
    pub serial_number: String,
    pub warranty_date: String,
    /// overall, movement, card, package
    pub conclusions: Vec<Row>,
    /// case, strap, crystal, caseback, hands, crown, buckle, dial
    pub status: Vec<Row>,
    /// function, movement, waterproof
    pub performance: Vec<Row>,
    /// The front shot alone, for single-image layouts.
    pub front_photo: Option<String>,
    pub photos: Vec<GalleryPhoto>,
    pub notes: String,
    pub tags: Vec<String>,
}

impl ReportView {
    /// Project a validated report. Pure and total: the same report always
    /// yields an equal view.
    pub fn project(report: &AppraisalReport) -> Self {
        let conclusion = |key, label, result: AppraisalResult| {
            Row::new(key, label, result.label(), result.verdict())
        };
        let conclusions = vec![
            conclusion("overall", "整體原廠工藝鑑定", report.overall_result),
            conclusion("movement", "內部機芯鑑定", report.movement_result),
            conclusion("card", "官方保證卡鑑定", report.card_result),
            conclusion("package", "外盒及附件鑑定", report.package_result),
        ];

        let s = &report.status;
        let status = [
            ("case", "錶殼", s.case),
            ("strap", "錶帶", s.strap),
            ("crystal", "鏡面", s.crystal),
            ("caseback", "錶底", s.caseback),
            ("hands", "指針", s.hands),
            ("crown", "錶冠", s.crown),
            ("buckle", "錶扣", s.buckle),
            ("dial", "錶盤", s.dial),
        ]
        .into_iter()
        .map(|(key, label, value)| Row::new(key, label, value.label(), value.verdict()))
        .collect();

        let p = &report.performance;
        let performance = [
            ("function", "功能運作", p.function),
            ("movement", "走時精準度", p.movement),
            ("waterproof", "防水測試 (氣密)", p.waterproof),
        ]
        .into_iter()
        .map(|(key, label, value)| Row::new(key, label, value.label(), value.verdict()))
        .collect();

        ReportView {
            brand: report.brand.clone(),
            model_number: report.model_number.clone(),
            serial_number: report.serial_number.clone(),
            warranty_date: report.warranty_date.clone(),
            conclusions,
            status,
            performance,
            front_photo: report.photos.get(PhotoSlot::Front).map(str::to_string),
            photos: report.photos.gallery().collect(),
            notes: report.notes.clone(),
            tags: report.tags.clone(),
        }
    }

    /// The emphasized conclusion row.
    pub fn overall(&self) -> &Row {
        &self.conclusions[0]
    }

    pub fn has_failures(&self) -> bool {
        self.conclusions
            .iter()
            .chain(&self.status)
            .chain(&self.performance)
            .any(|row| row.verdict.is_fail())
    }
}
