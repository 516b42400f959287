pub mod prompt;

use std::time::Duration;

use serde::Serialize;
use tracing;

use crate::report::AppraisalReport;

pub use prompt::build_prompt;

/// Returned when the model answers without any text.
pub const EMPTY_SUMMARY_FALLBACK: &str = "無法生成摘要。";
/// Returned when the request cannot be made or fails.
pub const ERROR_SUMMARY_FALLBACK: &str = "生成摘要時發生錯誤。";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The report fields the summarizer is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub brand: String,
    pub model_number: String,
    pub overall_result: String,
    pub case_status: String,
    pub strap_status: String,
    pub function_performance: String,
    pub notes: String,
    pub tags: Vec<String>,
}

impl SummaryRequest {
    pub fn from_report(report: &AppraisalReport) -> Self {
        SummaryRequest {
            brand: report.brand.clone(),
            model_number: report.model_number.clone(),
            overall_result: report.overall_result.label().to_string(),
            case_status: report.status.case.label().to_string(),
            strap_status: report.status.strap.label().to_string(),
            function_performance: report.performance.function.label().to_string(),
            notes: report.notes.clone(),
            tags: report.tags.clone(),
        }
    }

    pub fn prompt(&self) -> String {
        build_prompt(self)
    }
}

pub struct SummaryService {
    api_key: Option<String>,
    pub model: String,
    api_base: String,
    timeout: Duration,
}

impl SummaryService {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.filter(|k| !k.is_empty());
        if api_key.is_some() {
            tracing::info!("Summary API key found, AI summary enabled");
        } else {
            tracing::warn!("Summary API key not set, AI summary disabled");
        }
        Self {
            api_key,
            model: model.into(),
            api_base: API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Upper bound on the whole request, connect through body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the service at another `models` endpoint.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Summarize a report. Never fails: any error degrades to a fixed
    /// fallback sentence.
    pub async fn summarize(&self, report: &AppraisalReport) -> String {
        let request = SummaryRequest::from_report(report);

        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("Skipping summary for {}: no API key", request.brand);
            return ERROR_SUMMARY_FALLBACK.to_string();
        };

        let endpoint = format!("{}/{}:generateContent", self.api_base, self.model);
        match generate_with_gemini(&endpoint, api_key, self.timeout, &request).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::warn!("Summary response for {} carried no text", request.brand);
                EMPTY_SUMMARY_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::error!("Gemini API error: {}", e);
                ERROR_SUMMARY_FALLBACK.to_string()
            }
        }
    }
}

/// Pull the first candidate's text out of a `generateContent` response.
/// Blank text counts as no text.
pub fn extract_text(resp_json: &serde_json::Value) -> Option<String> {
    let parts = resp_json["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

pub async fn generate_with_gemini(
    endpoint: &str,
    api_key: &str,
    timeout: Duration,
    request: &SummaryRequest,
) -> Result<Option<String>, String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    let body = serde_json::json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": request.prompt() }]
            }
        ]
    });

    let response = client
        .post(endpoint)
        .header("x-goog-api-key", api_key)
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("HTTP request failed: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(format!("Gemini API returned {}: {}", status, text));
    }

    let resp_json: serde_json::Value = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response JSON: {}", e))?;

    Ok(extract_text(&resp_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::report;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Read one request, headers plus `Content-Length` bytes of body.
    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    #[test]
    fn request_carries_only_summary_fields() {
        let request = SummaryRequest::from_report(&report());
        assert_eq!(request.brand, "Rolex 勞力士");
        assert_eq!(request.overall_result, "符合原廠工藝標準");
        assert_eq!(request.case_status, "正常使用痕跡");
        assert_eq!(request.strap_status, "目測無瑕疵");
        assert_eq!(request.function_performance, "檢測當下運作正常");
        assert_eq!(request.tags, vec!["極佳品相", "全套原裝"]);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 8);
        assert!(value.get("serialNumber").is_none());
    }

    #[test]
    fn extracts_candidate_text() {
        let resp = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "此錶品相優異，" }, { "text": "符合原廠標準。" }] }
            }]
        });
        assert_eq!(extract_text(&resp).as_deref(), Some("此錶品相優異，符合原廠標準。"));
    }

    #[test]
    fn missing_or_blank_text_is_none() {
        assert_eq!(extract_text(&json!({})), None);
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        let blank = json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] });
        assert_eq!(extract_text(&blank), None);
    }

    #[test]
    fn empty_key_disables_service() {
        let service = SummaryService::new(Some(String::new()), DEFAULT_MODEL);
        assert!(!service.has_api_key());
    }

    #[tokio::test]
    async fn summarize_without_key_falls_back() {
        let service = SummaryService::new(None, DEFAULT_MODEL);
        assert_eq!(service.summarize(&report()).await, ERROR_SUMMARY_FALLBACK);
    }

    #[tokio::test]
    async fn unanswered_request_times_out_to_fallback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold connections without ever answering.
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let service = SummaryService::new(Some("test-key".into()), DEFAULT_MODEL)
            .with_api_base(format!("http://{}/v1beta/models", addr))
            .with_timeout(Duration::from_millis(200));
        let summary = tokio::time::timeout(Duration::from_secs(10), service.summarize(&report()))
            .await
            .expect("summarize must give up on its own");
        assert_eq!(summary, ERROR_SUMMARY_FALLBACK);
        server.abort();
    }

    #[tokio::test]
    async fn answered_request_returns_model_text() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let body = json!({
                "candidates": [{ "content": { "parts": [{ "text": "品相優異。" }] } }]
            })
            .to_string();
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            request
        });

        let service = SummaryService::new(Some("test-key".into()), "test-model")
            .with_api_base(format!("http://{}/v1beta/models", addr))
            .with_timeout(Duration::from_secs(5));
        assert_eq!(service.summarize(&report()).await, "品相優異。");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/test-model:generateContent "));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    }
}
