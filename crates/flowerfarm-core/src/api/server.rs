//! HTTP server runner

use std::future::Future;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use super::router::{AppState, build_router};
use crate::config::{Config, ServerConfig};
use crate::storage::Database;

/// Bind the configured host and port.
///
/// The host may be an IPv4 or IPv6 address (brackets optional) or a name
/// such as `localhost`; names are resolved and the first address that
/// binds wins.
pub async fn bind(server: &ServerConfig) -> Result<TcpListener> {
    let host = server.host.trim_start_matches('[').trim_end_matches(']');
    TcpListener::bind((host, server.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", server.host, server.port))
}

/// Serve the API on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, db: &Database, config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = AppState::from_config(db, config);
    let router = build_router(state, &config.cors);

    let addr = listener.local_addr().context("Listener has no local address")?;
    tracing::info!(%addr, service = %config.service.name, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    fn local(port: u16) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
        }
    }

    #[tokio::test]
    async fn test_bind_resolves_hostname() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 0,
        };
        let listener = bind(&server).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_serve_answers_health_and_shuts_down() {
        let db = Database::in_memory().await.unwrap();
        let config = Config::default();
        let listener = bind(&local(0)).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            serve(listener, &db, &config, async {
                let _ = rx.await;
            })
            .await
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health/ HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("Flower Farm API is running"));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
