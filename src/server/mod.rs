//! Local preview server

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Portfolio;

/// Build the router serving the generated site
pub fn router(public_dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Resolve the bind address; `localhost` binds the IPv4 loopback
pub fn bind_addr(ip: &str, port: u16) -> Result<SocketAddr> {
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    Ok(format!("{}:{}", bind_ip, port).parse()?)
}

/// Start the preview server, regenerating on changes when `watch` is set
pub async fn start(site: &Portfolio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let app = router(&site.public_dir);
    let addr = bind_addr(ip, port)?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let site = site.clone();
        tokio::spawn(async move {
            if let Err(e) = crate::commands::generate::watch(&site).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        assert_eq!(bind_addr("localhost", 4000).unwrap().to_string(), "127.0.0.1:4000");
        assert_eq!(bind_addr("0.0.0.0", 8080).unwrap().to_string(), "0.0.0.0:8080");
        assert!(bind_addr("not an ip", 80).is_err());
    }

    #[tokio::test]
    async fn test_serves_generated_pages() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("blog")).unwrap();
        std::fs::write(dir.path().join("blog/index.html"), "<h1>Blog</h1>").unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(dir.path());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /blog/ HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("<h1>Blog</h1>"));
    }
}
