//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cep_gateway::config::{GatewayConfig, ProviderConfig, ProviderSchema};
use cep_gateway::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// A scripted upstream listening on an ephemeral port.
pub struct Upstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start an upstream that waits `delay`, then answers every request with
/// `status` and a JSON `body`.
pub async fn start_upstream(delay: Duration, status: u16, body: &'static str) -> Upstream {
    start_programmable_upstream(move || async move {
        tokio::time::sleep(delay).await;
        (status, body.to_string())
    })
    .await
}

/// Start an upstream whose response is produced by `f` per request.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> Upstream
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let f = Arc::new(f);

    let counter = hits.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            let f = f.clone();
            tokio::spawn(async move {
                let _ = respond(socket, f().await).await;
            });
        }
    });

    Upstream { addr, hits }
}

async fn respond(mut socket: TcpStream, (status, body): (u16, String)) -> std::io::Result<()> {
    // Drain the request head so closing the socket does not reset the client.
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
    }

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

pub fn brasil_api(name: &str, upstream: &Upstream) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        url_template: format!("http://{}/api/cep/v1/{{key}}", upstream.addr),
        schema: ProviderSchema::BrasilApi,
    }
}

pub fn via_cep(name: &str, upstream: &Upstream) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        url_template: format!("http://{}/ws/{{key}}/json/", upstream.addr),
        schema: ProviderSchema::ViaCep,
    }
}

/// A running gateway; triggers shutdown when dropped.
pub struct Gateway {
    pub base_url: String,
    shutdown: Shutdown,
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_gateway(providers: Vec<ProviderConfig>, deadline_ms: u64) -> Gateway {
    start_reloadable_gateway(providers, deadline_ms).await.0
}

/// Like [`start_gateway`], also returning the channel the server reads
/// configuration updates from.
pub async fn start_reloadable_gateway(
    providers: Vec<ProviderConfig>,
    deadline_ms: u64,
) -> (Gateway, mpsc::UnboundedSender<GatewayConfig>) {
    let config = gateway_config(providers, deadline_ms);

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (updates_tx, config_updates) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    let gateway = Gateway {
        base_url: format!("http://{}", addr),
        shutdown,
    };
    (gateway, updates_tx)
}

pub fn gateway_config(providers: Vec<ProviderConfig>, deadline_ms: u64) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.providers = providers;
    config.race.deadline_ms = deadline_ms;
    config.outbound.system_proxy = false;
    config
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
