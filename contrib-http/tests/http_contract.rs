//! Exercises the HTTP contract against a one-shot local responder.

use contrib_core::{ContributionSettings, ServiceError, SettingsService};
use contrib_http::HttpSettingsService;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as seen by the responder: request line and body.
#[derive(Debug)]
struct Captured {
    request_line: String,
    body: String,
}

/// Serves exactly one response and hands back what the client sent.
async fn respond_once(
    status: &'static str,
    body: &'static str,
) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        Captured {
            request_line: head.lines().next().unwrap_or_default().to_string(),
            body: String::from_utf8_lossy(&buf[header_end..header_end + content_length])
                .to_string(),
        }
    });

    (base_url, handle)
}

const SUMMARY_BODY: &str = r#"{"employeeName":"Alex Johnson","planType":"Traditional 401(k)","annualSalary":95000,"payFrequency":24,"ytdContribution":4100,"ytdEmployerMatch":1640,"companyMatchPercent":4.0,"age":30,"retirementAge":65,"estimatedBalanceAtRetirement":685000,"contributionType":"percent","contributionValue":7.0}"#;

#[tokio::test]
async fn fetch_summary_reads_service_payload() {
    let (base_url, server) = respond_once("200 OK", SUMMARY_BODY).await;
    let service = HttpSettingsService::new(base_url);

    let summary = service.fetch_summary().await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(request.request_line, "GET /api/summary HTTP/1.1");
    assert_eq!(summary.employee_name, "Alex Johnson");
    assert_eq!(summary.settings(), ContributionSettings::percent(dec!(7)));
}

#[tokio::test]
async fn fetch_settings_reads_election_on_file() {
    let (base_url, server) = respond_once(
        "200 OK",
        r#"{"contributionType":"dollar","contributionValue":250}"#,
    )
    .await;
    let service = HttpSettingsService::new(base_url);

    let settings = service.fetch_settings().await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(request.request_line, "GET /api/settings HTTP/1.1");
    assert_eq!(settings, ContributionSettings::dollar(dec!(250)));
}

#[tokio::test]
async fn submit_settings_posts_json_and_returns_echo() {
    let (base_url, server) = respond_once(
        "201 Created",
        r#"{"contributionType":"percent","contributionValue":75.0}"#,
    )
    .await;
    let service = HttpSettingsService::new(base_url);

    let echo = service
        .submit_settings(&ContributionSettings::percent(dec!(80)))
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert_eq!(request.request_line, "POST /api/settings HTTP/1.1");
    let sent: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({ "contributionType": "percent", "contributionValue": 80.0 })
    );
    assert_eq!(echo, ContributionSettings::percent(dec!(75)));
}

#[tokio::test]
async fn non_success_status_carries_body_text() {
    let (base_url, server) = respond_once(
        "400 Bad Request",
        r#"{"error": "Percent contributions must be between 0 and 75."}"#,
    )
    .await;
    let service = HttpSettingsService::new(base_url);

    let result = service
        .submit_settings(&ContributionSettings::percent(dec!(90)))
        .await;
    server.await.unwrap();

    assert_eq!(
        result,
        Err(ServiceError::Status {
            status: 400,
            message: r#"{"error": "Percent contributions must be between 0 and 75."}"#.to_string(),
        })
    );
}

#[tokio::test]
async fn non_success_status_allows_empty_body() {
    let (base_url, server) = respond_once("500 Internal Server Error", "").await;
    let service = HttpSettingsService::new(base_url);

    let result = service.fetch_summary().await;
    server.await.unwrap();

    assert_eq!(
        result,
        Err(ServiceError::Status {
            status: 500,
            message: String::new(),
        })
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (base_url, server) = respond_once("200 OK", r#"{"employeeName": 5}"#).await;
    let service = HttpSettingsService::new(base_url);

    let result = service.fetch_summary().await;
    server.await.unwrap();

    assert!(matches!(result, Err(ServiceError::Decode(_))));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let service = HttpSettingsService::new(base_url);

    let result = service.fetch_summary().await;

    assert!(matches!(result, Err(ServiceError::Transport(_))));
}
