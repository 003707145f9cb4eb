//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{header, HeaderMap, StatusCode};
use axum::Router;
use tokio::net::TcpListener;
use trace_relay::{HttpServer, RelayConfig, Shutdown};

/// A downstream service that records the headers of every request it sees.
#[allow(dead_code)]
pub struct MockBackend {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<HeaderMap>>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Header `name` of the most recent request.
    pub fn last_header(&self, name: &str) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|h| h.get(name))
            .map(|v| v.to_str().unwrap().to_string())
    }
}

/// Start a mock backend answering every path with a fixed response.
#[allow(dead_code)]
pub async fn start_mock_backend(
    status: StatusCode,
    content_type: &'static str,
    body: &'static str,
) -> MockBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let captured = requests.clone();

    let app = Router::new().fallback(move |headers: HeaderMap| {
        let captured = captured.clone();
        async move {
            captured.lock().unwrap().push(headers);
            (status, [(header::CONTENT_TYPE, content_type)], body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend { addr, requests }
}

/// Start a backend that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        drop(socket);
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Relay config for tests: named instance, optional target, no OTLP export.
#[allow(dead_code)]
pub fn relay_config(name: &str, target: Option<String>) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.service.name = name.to_string();
    config.relay.target_url = target;
    config
}

/// Start a relay on an ephemeral port. The listener is bound before this
/// returns, so requests can be sent immediately.
#[allow(dead_code)]
pub async fn spawn_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
