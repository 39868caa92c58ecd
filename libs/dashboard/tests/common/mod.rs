//! Common test utilities for dashboard integration tests
//!
//! Provides a minimal HTTP/1.1 server that answers canned JSON responses.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: String,
}

#[derive(Default)]
struct Routes {
    responses: HashMap<String, Canned>,
    requests: Vec<String>,
}

/// Mock holdings API answering by request path
///
/// Unknown paths answer 404 with an API error body. Every request target
/// (path plus query string) is recorded.
pub struct MockApiServer {
    pub addr: SocketAddr,
    routes: Arc<Mutex<Routes>>,
    shutdown: Arc<Notify>,
}

impl MockApiServer {
    /// Create and start a new mock API server
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(Mutex::new(Routes::default()));
        let shutdown = Arc::new(Notify::new());

        let routes_clone = routes.clone();
        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                let routes = routes_clone.clone();
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, routes).await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_clone.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            routes,
            shutdown,
        }
    }

    async fn handle_connection(mut stream: TcpStream, routes: Arc<Mutex<Routes>>) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            match stream.read(&mut chunk).await {
                Ok(0) => return,
                Ok(n) => {
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                Err(_) => return,
            }
        }

        let request = String::from_utf8_lossy(&buf);
        let target = request
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .unwrap_or("/")
            .to_string();
        let path = target.split('?').next().unwrap_or("/").to_string();

        let canned = {
            let mut routes = routes.lock();
            routes.requests.push(target.clone());
            routes.responses.get(&path).cloned()
        };
        let canned = canned.unwrap_or(Canned {
            status: 404,
            body: r#"{"code":"not_found","message":"no route"}"#.to_string(),
        });

        verbose_println!("mock api: {} -> {}", target, canned.status);

        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            canned.status,
            reason(canned.status),
            canned.body.len(),
            canned.body
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    }

    /// Answer `path` with `status` and `body`
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.routes.lock().responses.insert(
            path.to_string(),
            Canned {
                status,
                body: body.to_string(),
            },
        );
    }

    /// Request targets received so far
    pub fn requests(&self) -> Vec<String> {
        self.routes.lock().requests.clone()
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

pub const HOLDINGS_JSON: &str = r#"[
    {"entity":"zurich","instrument_type":"stock","symbol":"NESN","quantity":120},
    {"entity":"zurich","instrument_type":"crypto","symbol":"BTC","quantity":0.75},
    {"entity":"new_york","instrument_type":"stock","symbol":"AAPL","quantity":40}
]"#;

pub const TRADES_JSON: &str = r#"{"rows":[
    {"trade_id":"t-1","entity":"zurich","instrument_type":"crypto","symbol":"BTC","quantity":0.1,"price":64000.5,"ts":"2025-03-01T10:00:00Z"},
    ["t-2","new_york","stock","AAPL",5,null,"2025-03-01T09:59:00Z"]
]}"#;
