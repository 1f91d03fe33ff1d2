//! HTTP Fetcher - the network collaborator
//!
//! Design decisions:
//! 1. One pooled `reqwest::Client` per fetcher, timeout applied to the whole request
//! 2. Body streamed chunk by chunk so the size cap holds even without Content-Length
//! 3. Non-2xx is an error, never an empty document

use async_trait::async_trait;
use futures_util::StreamExt;
use url::Url;

use super::Fetcher;
use crate::config::{check_scheme, FeedConfig};
use crate::error::{FeedError, Result};

pub struct HttpFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        check_scheme(url)?;
        tracing::debug!(%url, "sending request");

        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::ACCEPT,
                "application/rss+xml, application/xml;q=0.9, text/xml;q=0.8, */*;q=0.1",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let limit = self.max_body_bytes;
        let declared = response.content_length();
        if declared.is_some_and(|len| len > limit as u64) {
            return Err(FeedError::BodyTooLarge { limit });
        }

        let mut body = Vec::with_capacity(declared.unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len() + chunk.len() > limit {
                return Err(FeedError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(%url, bytes = body.len(), "response body received");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio_test::{assert_err, assert_ok};

    /// Serve exactly one canned HTTP/1.1 response on a random local port
    async fn serve_once(status_line: &'static str, body: Vec<u8>) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/rss+xml\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            let _ = socket.shutdown().await;
        });

        Url::parse(&format!("http://{addr}/feed.xml")).unwrap()
    }

    fn fetcher(max_body_bytes: usize) -> HttpFetcher {
        let config = FeedConfig {
            timeout_secs: 5,
            max_body_bytes,
            ..FeedConfig::default()
        };
        HttpFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_body() {
        let url = serve_once("200 OK", b"<rss/>".to_vec()).await;
        let body = assert_ok!(fetcher(1024).fetch(&url).await);
        assert_eq!(body, b"<rss/>");
    }

    #[tokio::test]
    async fn test_error_status() {
        let url = serve_once("404 Not Found", b"gone".to_vec()).await;
        let err = assert_err!(fetcher(1024).fetch(&url).await);
        assert!(matches!(err, FeedError::HttpStatus { status: 404, .. }));
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_body_limit() {
        let url = serve_once("200 OK", vec![b'x'; 64]).await;
        let err = assert_err!(fetcher(16).fetch(&url).await);
        assert!(matches!(err, FeedError::BodyTooLarge { limit: 16 }));
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let url = Url::parse("file:///etc/passwd").unwrap();
        let err = assert_err!(fetcher(16).fetch(&url).await);
        assert!(matches!(err, FeedError::UnsupportedScheme(s) if s == "file"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_fetch_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/")).unwrap();
        let err = assert_err!(fetcher(16).fetch(&url).await);
        assert!(matches!(err, FeedError::Fetch(_)));
    }
}
