use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::export::SharePayload;
use crate::view::PageModel;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportBody<'a> {
    page: &'a PageModel,
    summary: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportNameBody<'a> {
    file_name: &'a str,
}

/// Pre-serialized responses. The report never changes while served, so
/// every body is rendered once at start-up.
#[derive(Debug, Clone)]
pub struct ReportRoutes {
    report: String,
    share: String,
    export_name: String,
}

impl ReportRoutes {
    pub fn new(
        page: &PageModel,
        summary: &str,
        share: &SharePayload,
        file_name: &str,
    ) -> Result<Self, String> {
        let to_json = |what: &str, r: serde_json::Result<String>| {
            r.map_err(|e| format!("Failed to serialize {}: {}", what, e))
        };
        Ok(ReportRoutes {
            report: to_json("report", serde_json::to_string(&ReportBody { page, summary }))?,
            share: to_json("share payload", serde_json::to_string(share))?,
            export_name: to_json(
                "export name",
                serde_json::to_string(&ExportNameBody { file_name }),
            )?,
        })
    }

    /// Resolve a raw request to a status line and JSON body.
    pub fn respond(&self, request: &str) -> (&'static str, String) {
        let mut parts = request.split_whitespace();
        let method = parts.next().unwrap_or("");
        let path = parts.next().unwrap_or("");
        let path = path.split('?').next().unwrap_or("");

        match (method, path) {
            ("OPTIONS", _) => ("204 No Content", String::new()),
            ("GET", "/report") => ("200 OK", self.report.clone()),
            ("GET", "/share") => ("200 OK", self.share.clone()),
            ("GET", "/export-name") => ("200 OK", self.export_name.clone()),
            ("GET", _) => ("404 Not Found", "{\"error\":\"not found\"}".to_string()),
            _ => (
                "405 Method Not Allowed",
                "{\"error\":\"method not allowed\"}".to_string(),
            ),
        }
    }
}

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\n\
        Content-Type: application/json; charset=utf-8\r\n\
        Access-Control-Allow-Origin: *\r\n\
        Access-Control-Allow-Methods: GET, OPTIONS\r\n\
        Access-Control-Allow-Headers: Content-Type\r\n\
        Content-Length: {}\r\n\
        \r\n\
        {}",
        status,
        body.len(),
        body,
    )
}

/// Lightweight read-only HTTP API serving one projected report.
pub async fn serve(bind_addr: &str, routes: ReportRoutes) -> Result<(), String> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("Failed to bind HTTP API on {}: {}", bind_addr, e))?;

    info!("HTTP API listening on http://{}", bind_addr);
    let routes = Arc::new(routes);

    loop {
        let (mut stream, addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("HTTP API accept error: {}", e);
                continue;
            }
        };

        let routes = Arc::clone(&routes);
        tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            let n = match stream.read(&mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    warn!("Failed to read request from {}: {}", addr, e);
                    return;
                }
            };
            let request = String::from_utf8_lossy(&buf[..n]);
            let (status, body) = routes.respond(&request);
            info!("{} {}", request.lines().next().unwrap_or(""), status);

            if let Err(e) = stream.write_all(http_response(status, &body).as_bytes()).await {
                warn!("Failed to write response to {}: {}", addr, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::pdf_file_name;
    use crate::report::fixtures::report;
    use crate::view::{ReportView, ViewConfig};

    fn routes() -> ReportRoutes {
        let report = report();
        let page = PageModel::build(&ReportView::project(&report), ViewConfig::full());
        let share = SharePayload::for_report(&report, "http://127.0.0.1:9002/");
        ReportRoutes::new(&page, "摘要", &share, &pdf_file_name(&report)).unwrap()
    }

    #[test]
    fn report_route_returns_page_and_summary() {
        let (status, body) = routes().respond("GET /report HTTP/1.1\r\nHost: x\r\n\r\n");
        assert_eq!(status, "200 OK");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["summary"], "摘要");
        assert_eq!(json["page"]["emphasized"]["key"], "overall");
        assert_eq!(json["page"]["status"][3]["label"], "錶底");
    }

    #[test]
    fn share_and_export_name_routes() {
        let routes = routes();
        let (_, body) = routes.respond("GET /share?x=1 HTTP/1.1");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Rolex 勞力士 鑑定報告");

        let (_, body) = routes.respond("GET /export-name HTTP/1.1");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["fileName"], "AG_Appraisal_Rolex_勞力士_V82J9102.pdf");
    }

    #[test]
    fn preflight_unknown_and_unsupported() {
        let routes = routes();
        assert_eq!(routes.respond("OPTIONS /report HTTP/1.1").0, "204 No Content");
        assert_eq!(routes.respond("GET /admin HTTP/1.1").0, "404 Not Found");
        assert_eq!(routes.respond("POST /report HTTP/1.1").0, "405 Method Not Allowed");
        assert_eq!(routes.respond("DELETE /admin HTTP/1.1").0, "405 Method Not Allowed");
        assert_eq!(routes.respond("").0, "405 Method Not Allowed");
    }

    #[test]
    fn content_length_counts_bytes() {
        let response = http_response("200 OK", "鑑定");
        assert!(response.contains("Content-Length: 6\r\n"));
    }
}
