//! Snapshot Fetcher

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode, Url};
use tracing::info;

use crate::domain::snapshots::errors::FetchError;

/// Default time allowed for downloading a snapshot.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest snapshot accepted from any source, downloaded or uploaded.
pub const MAX_SNAPSHOT_BYTES: usize = 64 * 1024 * 1024;

#[automock]
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    /// Download the raw snapshot document at `url`.
    async fn fetch(&self, url: Url) -> Result<Vec<u8>, FetchError>;
}

/// Fetches snapshots over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSnapshotFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpSnapshotFetcher {
    /// Build a fetcher whose requests give up after `timeout` and whose bodies are capped at
    /// [`MAX_SNAPSHOT_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            max_bytes: MAX_SNAPSHOT_BYTES,
        })
    }

    /// Replace the body size cap.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn too_large(&self) -> FetchError {
        FetchError::TooLarge {
            limit: self.max_bytes,
        }
    }
}

#[async_trait]
impl SnapshotFetcher for HttpSnapshotFetcher {
    async fn fetch(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let mut response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        let content_length = response.content_length();

        info!(content_length, "snapshot resource received");

        let limit = u64::try_from(self.max_bytes).unwrap_or(u64::MAX);

        if content_length.is_some_and(|length| length > limit) {
            return Err(self.too_large());
        }

        // Announced lengths can lie and chunked bodies announce none, so count as we read.
        let mut snapshot = Vec::new();

        while let Some(chunk) = response.chunk().await? {
            if snapshot.len().saturating_add(chunk.len()) > self.max_bytes {
                return Err(self.too_large());
            }

            snapshot.extend_from_slice(&chunk);
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tokio::{
        io::{AsyncReadExt as _, AsyncWriteExt as _},
        net::TcpListener,
    };

    use super::*;

    /// Serve one HTTP/1.1 response on a local port and return the URL to request.
    async fn serve_once(head: String, body: Vec<u8>) -> TestResult<Url> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = Url::parse(&format!("http://{}/snapshot.csv", listener.local_addr()?))?;

        tokio::spawn(async move {
            let Ok((mut socket, _peer)) = listener.accept().await else {
                return;
            };

            let mut request = [0_u8; 4096];
            let _read = socket.read(&mut request).await;

            // The client may hang up once it has seen enough.
            let _head = socket.write_all(head.as_bytes()).await;
            let _body = socket.write_all(&body).await;
            let _flush = socket.shutdown().await;
        });

        Ok(url)
    }

    fn fetcher(max_bytes: usize) -> TestResult<HttpSnapshotFetcher> {
        Ok(HttpSnapshotFetcher::new(Duration::from_secs(5))?.with_max_bytes(max_bytes))
    }

    #[tokio::test]
    async fn downloads_bodies_within_the_limit() -> TestResult {
        let body = b"tea,120\nmug,40\n".to_vec();
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );

        let url = serve_once(head, body.clone()).await?;
        let snapshot = fetcher(64)?.fetch(url).await?;

        assert_eq!(snapshot, body);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_announced_length_over_the_limit() -> TestResult {
        let body = vec![b'a'; 256];
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );

        let url = serve_once(head, body).await?;
        let result = fetcher(16)?.fetch(url).await;

        assert!(
            matches!(result, Err(FetchError::TooLarge { limit: 16 })),
            "expected TooLarge, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn rejects_unannounced_bodies_over_the_limit() -> TestResult {
        let body = vec![b'a'; 256];
        let head = "HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n".to_owned();

        let url = serve_once(head, body).await?;
        let result = fetcher(16)?.fetch(url).await;

        assert!(
            matches!(result, Err(FetchError::TooLarge { limit: 16 })),
            "expected TooLarge, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn non_ok_statuses_are_rejected() -> TestResult {
        let head =
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_owned();

        let url = serve_once(head, Vec::new()).await?;
        let result = fetcher(16)?.fetch(url).await;

        assert!(
            matches!(result, Err(FetchError::Status(StatusCode::NOT_FOUND))),
            "expected Status(404), got {result:?}"
        );

        Ok(())
    }
}
