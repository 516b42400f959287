pub mod classify;
pub mod photos;
pub mod schema;
pub mod vocab;

use serde::{Deserialize, Deserializer, Serialize};

pub use classify::{classify, is_failure};
pub use photos::{GalleryPhoto, PhotoCapture, PhotoSlot, Photos};
pub use schema::SchemaError;
pub use vocab::{AppraisalResult, PerformanceStatus, Verdict, Vocabulary, WatchStatus};

// ── Component condition slots ──────────────────────────────────────

/// The eight physical components graded on every watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentStatus {
    pub case: WatchStatus,
    pub strap: WatchStatus,
    pub crystal: WatchStatus,
    pub caseback: WatchStatus,
    pub hands: WatchStatus,
    pub crown: WatchStatus,
    pub buckle: WatchStatus,
    pub dial: WatchStatus,
}

// ── Functional test slots ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Performance {
    pub function: PerformanceStatus,
    pub movement: PerformanceStatus,
    pub waterproof: PerformanceStatus,
}

// ── Report ─────────────────────────────────────────────────────────

/// A single watch's authenticity and condition assessment.
///
/// Instances are only produced through [`schema::validate`] (directly, via
/// `FromStr`/`TryFrom`, or via the `Deserialize` impl, which delegates to the
/// validator), so every enum field always holds a member of its closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppraisalReport {
    pub brand: String,
    pub warranty_date: String,
    pub model_number: String,
    pub serial_number: String,
    pub overall_result: AppraisalResult,
    pub movement_result: AppraisalResult,
    pub card_result: AppraisalResult,
    pub package_result: AppraisalResult,
    pub status: ComponentStatus,
    pub performance: Performance,
    pub notes: String,
    pub tags: Vec<String>,
    pub photos: Photos,
}

impl<'de> Deserialize<'de> for AppraisalReport {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        schema::validate(&value).map_err(serde::de::Error::custom)
    }
}

impl std::str::FromStr for AppraisalReport {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        schema::parse(s)
    }
}

impl TryFrom<serde_json::Value> for AppraisalReport {
    type Error = SchemaError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        schema::validate(&value)
    }
}

/// Load a report from a JSON file on disk.
///
/// Unlike the host's other file loaders this never falls back to a default:
/// an unreadable or schema-invalid file is an error.
pub fn load_from_file(path: &std::path::Path) -> Result<AppraisalReport, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read report {}: {}", path.display(), e))?;
    let report = schema::parse(&contents)
        .map_err(|e| format!("Invalid report {}: {}", path.display(), e))?;
    tracing::info!(
        "Loaded report for {} {} ({} tags, {} gallery photos)",
        report.brand,
        report.model_number,
        report.tags.len(),
        report.photos.gallery().count()
    );
    Ok(report)
}
