// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use expenseshare::api::{ApiClient, ClientConfig};
use expenseshare::application::SplitService;
use expenseshare::domain::{Amount, Expense, Share, User, UserId};
use rust_decimal::Decimal;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub fn dec(s: &str) -> Amount {
    Decimal::from_str(s).unwrap()
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

pub fn user(id: UserId) -> User {
    User::new(id, format!("User {}", id), "EUR")
}

/// Build an expense from (user id, share) pairs.
pub fn expense(
    id: i64,
    amount: &str,
    payer: UserId,
    shares: &[(UserId, &str)],
    date: &str,
) -> Expense {
    Expense {
        id,
        description: format!("Expense {}", id),
        amount: dec(amount),
        paid_by: user(payer),
        shares: shares
            .iter()
            .map(|(uid, share)| Share::new(user(*uid), dec(share)))
            .collect(),
        created_at: parse_date(date),
    }
}

/// A request as seen by the stub backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub body: String,
}

/// A response the stub backend replays.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.into(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/plain;charset=UTF-8"),
            body: body.into(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
        }
    }
}

/// Loopback HTTP server answering each connection with the next stub response.
pub struct StubBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubBackend {
    pub async fn start(responses: Vec<StubResponse>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                if let Ok(request) = read_request(&mut stream).await {
                    recorded.lock().unwrap().push(request);
                }
                let _ = write_response(&mut stream, &response).await;
            }
        });

        Ok(Self {
            base_url: format!("http://{}/api", addr),
            requests,
        })
    }

    pub fn service(&self) -> SplitService {
        let client = ApiClient::new(ClientConfig::new(self.base_url.clone())).unwrap();
        SplitService::new(client)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    Ok(RecordedRequest {
        method: request_line.next().unwrap_or_default().to_string(),
        target: request_line.next().unwrap_or_default().to_string(),
        body,
    })
}

async fn write_response(stream: &mut TcpStream, response: &StubResponse) -> std::io::Result<()> {
    let content_type = response
        .content_type
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let raw = format!(
        "HTTP/1.1 {} Stub\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        content_type,
        response.body.len(),
        response.body
    );
    stream.write_all(raw.as_bytes()).await?;
    stream.shutdown().await
}
