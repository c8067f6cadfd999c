// src/test_support.rs
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::core::ServiceClient;

/// Client pointed at the local discard port; every request is refused.
pub fn unreachable_client() -> ServiceClient {
    ServiceClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap()
}

/// One request as the local backend saw it
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

type Responder = dyn Fn(&SeenRequest) -> (u16, String) + Send + Sync;

/// Status that leaves the request unanswered
pub const NO_ANSWER: u16 = 0;

/// Minimal HTTP/1.1 backend on a random local port. Every connection gets
/// one answer from `respond` and is then closed.
pub struct LocalBackend {
    client: ServiceClient,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    task: JoinHandle<()>,
}

impl LocalBackend {
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&SeenRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let respond: Arc<Responder> = Arc::new(respond);

        let task = {
            let seen = Arc::clone(&seen);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let seen = Arc::clone(&seen);
                    let respond = Arc::clone(&respond);
                    tokio::spawn(async move {
                        let _ = serve(stream, seen, respond).await;
                    });
                }
            })
        };

        let client =
            ServiceClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        Self { client, seen, task }
    }

    pub fn client(&self) -> ServiceClient {
        self.client.clone()
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl Drop for LocalBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(
    stream: TcpStream,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    respond: Arc<Responder>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut chunked = false;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 || line == "\r\n" {
            break;
        }
        let lower = line.to_ascii_lowercase();
        if let Some(value) = lower.strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
        if lower.starts_with("transfer-encoding:") && lower.contains("chunked") {
            chunked = true;
        }
    }

    let mut body = Vec::new();
    if chunked {
        loop {
            let mut size_line = String::new();
            reader.read_line(&mut size_line).await?;
            let size = usize::from_str_radix(size_line.trim(), 16).unwrap_or(0);
            let mut chunk = vec![0; size + 2];
            reader.read_exact(&mut chunk).await?;
            if size == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..size]);
        }
    } else {
        body.resize(content_length, 0);
        reader.read_exact(&mut body).await?;
    }

    let request = SeenRequest {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let (status, payload) = respond(&request);
    seen.lock().unwrap().push(request);
    if status == NO_ANSWER {
        std::future::pending::<()>().await;
    }

    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    );
    let stream = reader.get_mut();
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// A `.pdf` file on disk for upload tests
pub fn resume_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, b"%PDF-1.4 resume").unwrap();
    path
}
