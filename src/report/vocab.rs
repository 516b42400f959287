use serde::{Deserialize, Serialize};

// ── Pass / fail verdict ────────────────────────────────────────────

/// Visual treatment chosen for a result or status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_fail(self) -> bool {
        self == Verdict::Fail
    }
}

// ── Closed vocabularies ────────────────────────────────────────────

/// A closed set of values that travel as their display strings.
pub trait Vocabulary: Copy + 'static {
    fn members() -> &'static [Self];
    fn label(self) -> &'static str;

    /// Exact match against the display strings. No trimming, no case folding.
    fn from_label(label: &str) -> Option<Self> {
        Self::members().iter().copied().find(|m| m.label() == label)
    }

    /// Every display string, comma separated, for error messages.
    fn allowed() -> String {
        Self::members()
            .iter()
            .map(|m| m.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Vocabulary for AppraisalResult {
    fn members() -> &'static [Self] {
        &AppraisalResult::ALL
    }
    fn label(self) -> &'static str {
        AppraisalResult::label(self)
    }
}

impl Vocabulary for WatchStatus {
    fn members() -> &'static [Self] {
        &WatchStatus::ALL
    }
    fn label(self) -> &'static str {
        WatchStatus::label(self)
    }
}

impl Vocabulary for PerformanceStatus {
    fn members() -> &'static [Self] {
        &PerformanceStatus::ALL
    }
    fn label(self) -> &'static str {
        PerformanceStatus::label(self)
    }
}

// ── Appraisal result ───────────────────────────────────────────────

/// Outcome of a compliance check against original-manufacture standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppraisalResult {
    #[serde(rename = "符合原廠工藝標準")]
    Compliant,
    #[serde(rename = "不符合原廠工藝標準")]
    NonCompliant,
    #[serde(rename = "不適用")]
    NotApplicable,
    #[serde(rename = "未開蓋檢測")]
    NotOpened,
}

impl AppraisalResult {
    pub const ALL: [AppraisalResult; 4] = [
        AppraisalResult::Compliant,
        AppraisalResult::NonCompliant,
        AppraisalResult::NotApplicable,
        AppraisalResult::NotOpened,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AppraisalResult::Compliant => "符合原廠工藝標準",
            AppraisalResult::NonCompliant => "不符合原廠工藝標準",
            AppraisalResult::NotApplicable => "不適用",
            AppraisalResult::NotOpened => "未開蓋檢測",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        <Self as Vocabulary>::from_label(label)
    }

    pub fn verdict(self) -> Verdict {
        match self {
            AppraisalResult::NonCompliant => Verdict::Fail,
            AppraisalResult::Compliant
            | AppraisalResult::NotApplicable
            | AppraisalResult::NotOpened => Verdict::Pass,
        }
    }
}

// ── Component condition ────────────────────────────────────────────

/// Condition grade of a physical component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WatchStatus {
    #[serde(rename = "目測無瑕疵")]
    None,
    #[serde(rename = "正常使用痕跡")]
    Normal,
    #[serde(rename = "明顯使用痕跡")]
    Obvious,
    #[serde(rename = "有打磨痕跡")]
    Polished,
    #[serde(rename = "非原裝/不適用")]
    NonGenuine,
    #[serde(rename = "輕微碰崩刮痕")]
    Dented,
    #[serde(rename = "明顯碰崩刮痕")]
    HeavilyDented,
    #[serde(rename = "有後加塗層痕跡")]
    Coated,
    #[serde(rename = "非原裝")]
    NonGenuineCrystal,
}

impl WatchStatus {
    pub const ALL: [WatchStatus; 9] = [
        WatchStatus::None,
        WatchStatus::Normal,
        WatchStatus::Obvious,
        WatchStatus::Polished,
        WatchStatus::NonGenuine,
        WatchStatus::Dented,
        WatchStatus::HeavilyDented,
        WatchStatus::Coated,
        WatchStatus::NonGenuineCrystal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WatchStatus::None => "目測無瑕疵",
            WatchStatus::Normal => "正常使用痕跡",
            WatchStatus::Obvious => "明顯使用痕跡",
            WatchStatus::Polished => "有打磨痕跡",
            WatchStatus::NonGenuine => "非原裝/不適用",
            WatchStatus::Dented => "輕微碰崩刮痕",
            WatchStatus::HeavilyDented => "明顯碰崩刮痕",
            WatchStatus::Coated => "有後加塗層痕跡",
            WatchStatus::NonGenuineCrystal => "非原裝",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        <Self as Vocabulary>::from_label(label)
    }

    /// Condition grades are informational; none of them is styled as a failure.
    pub fn verdict(self) -> Verdict {
        Verdict::Pass
    }
}

// ── Functional test outcome ────────────────────────────────────────

/// Outcome of a functional or water-resistance test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceStatus {
    #[serde(rename = "檢測當下運作正常")]
    Normal,
    #[serde(rename = "部分功能未能正常運作")]
    Partial,
    #[serde(rename = "走時在可接受誤差範圍內")]
    AcceptableError,
    #[serde(rename = "建議抹油保養")]
    MaintenanceRequired,
    #[serde(rename = "不適用")]
    NotApplicable,
    #[serde(rename = "通過一般氣密測試")]
    WaterproofPass,
    #[serde(rename = "不通過一般氣密測試")]
    WaterproofFail,
}

impl PerformanceStatus {
    pub const ALL: [PerformanceStatus; 7] = [
        PerformanceStatus::Normal,
        PerformanceStatus::Partial,
        PerformanceStatus::AcceptableError,
        PerformanceStatus::MaintenanceRequired,
        PerformanceStatus::NotApplicable,
        PerformanceStatus::WaterproofPass,
        PerformanceStatus::WaterproofFail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PerformanceStatus::Normal => "檢測當下運作正常",
            PerformanceStatus::Partial => "部分功能未能正常運作",
            PerformanceStatus::AcceptableError => "走時在可接受誤差範圍內",
            PerformanceStatus::MaintenanceRequired => "建議抹油保養",
            PerformanceStatus::NotApplicable => "不適用",
            PerformanceStatus::WaterproofPass => "通過一般氣密測試",
            PerformanceStatus::WaterproofFail => "不通過一般氣密測試",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        <Self as Vocabulary>::from_label(label)
    }

    // Partial is a warning, not a failure.
    pub fn verdict(self) -> Verdict {
        match self {
            PerformanceStatus::WaterproofFail => Verdict::Fail,
            _ => Verdict::Pass,
        }
    }
}
