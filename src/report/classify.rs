use super::vocab::{AppraisalResult, PerformanceStatus, Verdict, WatchStatus};

/// Classify any display string from the three report vocabularies.
///
/// The verdict comes from the enum member the string names, never from
/// substring matching. Strings outside every vocabulary are treated as
/// passing, so the classifier is total.
pub fn classify(label: &str) -> Verdict {
    if let Some(result) = AppraisalResult::from_label(label) {
        return result.verdict();
    }
    if let Some(perf) = PerformanceStatus::from_label(label) {
        return perf.verdict();
    }
    if let Some(status) = WatchStatus::from_label(label) {
        return status.verdict();
    }
    Verdict::Pass
}

/// Shorthand used by renderers choosing the failure style.
pub fn is_failure(label: &str) -> bool {
    classify(label).is_fail()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_outcomes() {
        assert_eq!(classify(AppraisalResult::NonCompliant.label()), Verdict::Fail);
        assert_eq!(classify(AppraisalResult::Compliant.label()), Verdict::Pass);
        assert_eq!(classify(PerformanceStatus::WaterproofFail.label()), Verdict::Fail);
        assert_eq!(classify(PerformanceStatus::WaterproofPass.label()), Verdict::Pass);
    }

    #[test]
    fn shared_not_applicable_label_passes() {
        // "不適用" exists in both the result and performance vocabularies.
        assert!(!is_failure("不適用"));
    }

    #[test]
    fn substring_overlap_does_not_fail() {
        // Contains the negative marker but is not a vocabulary member.
        assert!(!is_failure("不符合"));
        assert!(!is_failure("外觀不符合原廠工藝標準但可修復"));
        assert!(!is_failure(PerformanceStatus::Partial.label()));
    }

    #[test]
    fn unknown_and_empty_labels_pass() {
        assert_eq!(classify(""), Verdict::Pass);
        assert_eq!(classify("whatever"), Verdict::Pass);
    }
}
