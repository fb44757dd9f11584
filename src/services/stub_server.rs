//! Minimal canned-response HTTP server for exercising the prediction
//! client without a real endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, Notify};

pub struct StubServer {
    addr: std::net::SocketAddr,
    hits: Arc<AtomicUsize>,
    release: Arc<Notify>,
    last_request: Arc<Mutex<Option<Vec<u8>>>>,
}

impl StubServer {
    /// Serve `body` with `status` to every connection.
    pub async fn spawn(status: u16, body: &str) -> Self {
        Self::spawn_inner(status, body, false).await
    }

    /// Same, but each response is held back until `release()` is
    /// called. Lets tests observe in-flight state.
    pub async fn spawn_gated(status: u16, body: &str) -> Self {
        Self::spawn_inner(status, body, true).await
    }

    async fn spawn_inner(status: u16, body: &str, gated: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());
        let last_request = Arc::new(Mutex::new(None));
        let body = body.to_string();

        let task_hits = hits.clone();
        let task_release = release.clone();
        let task_request = last_request.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                task_hits.fetch_add(1, Ordering::SeqCst);

                let request = read_request(&mut socket).await;
                *task_request.lock().await = Some(request);

                if gated {
                    task_release.notified().await;
                }

                let reason = match status {
                    200 => "OK",
                    500 => "Internal Server Error",
                    _ => "Response",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            addr,
            hits,
            release,
            last_request,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Unblock one gated response.
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub async fn last_request(&self) -> String {
        let guard = self.last_request.lock().await;
        String::from_utf8_lossy(guard.as_deref().unwrap_or(&[])).to_string()
    }
}

/// Read one full HTTP request: headers, then a content-length body or
/// a chunked body up to its terminator.
async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return buf,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers.lines().find_map(|line| {
        line.strip_prefix("content-length:")
            .and_then(|v| v.trim().parse::<usize>().ok())
    });

    if let Some(len) = content_length {
        while buf.len() < header_end + len {
            match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
    } else if headers.contains("transfer-encoding: chunked") {
        while find_subslice(&buf[header_end..], b"0\r\n\r\n").is_none() {
            match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
    }

    buf
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
