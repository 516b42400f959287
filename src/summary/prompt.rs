use super::SummaryRequest;

/// Render the appraiser prompt for a summary request.
pub fn build_prompt(request: &SummaryRequest) -> String {
    format!(
        r#"As a professional luxury watch appraiser, provide a concise one-paragraph summary for an appraisal report based on the following data:
Brand: {}
Model: {}
Overall Conclusion: {}
Condition:
- Case: {}
- Strap: {}
- Movement Performance: {}
- Notes: {}
- Tags: {}

Return only the summary in Traditional Chinese. Keep it professional and objective."#,
        request.brand,
        request.model_number,
        request.overall_result,
        request.case_status,
        request.strap_status,
        request.function_performance,
        request.notes,
        request.tags.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::report;

    #[test]
    fn prompt_lists_report_fields() {
        let prompt = build_prompt(&SummaryRequest::from_report(&report()));
        assert!(prompt.contains("Brand: Rolex 勞力士"));
        assert!(prompt.contains("Model: 126610LV"));
        assert!(prompt.contains("Overall Conclusion: 符合原廠工藝標準"));
        assert!(prompt.contains("- Case: 正常使用痕跡"));
        assert!(prompt.contains("- Movement Performance: 檢測當下運作正常"));
        assert!(prompt.contains("- Tags: 極佳品相, 全套原裝"));
        assert!(prompt.ends_with("Keep it professional and objective."));
    }

    #[test]
    fn empty_tags_render_blank() {
        let mut request = SummaryRequest::from_report(&report());
        request.tags.clear();
        assert!(build_prompt(&request).contains("- Tags: \n"));
    }
}
