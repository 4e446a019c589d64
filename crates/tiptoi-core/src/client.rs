use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;

use crate::config::ClientConfig;
use crate::{AudioCandidate, CatalogEntry, FetchError, download, scrape};

/// HTTP client for the vendor site, built once from a [`ClientConfig`].
///
/// Clones share the connection pool.
#[derive(Clone)]
pub struct GmeClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl GmeClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(2)
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Fetch the catalog page and extract every listed product.
    ///
    /// An empty listing is returned as `Ok(vec![])`.
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, FetchError> {
        let (base, body) = self.get_page(&self.config.catalog_url).await?;
        let entries = tokio::task::spawn_blocking(move || scrape::parse_catalog(&body, &base))
            .await
            .map_err(|e| FetchError::Task(e.to_string()))?;
        tracing::info!(count = entries.len(), "catalog loaded");
        Ok(entries)
    }

    /// Fetch a product detail page and collect its audio-file links.
    pub async fn fetch_audio_links(
        &self,
        detail_url: &str,
    ) -> Result<Vec<AudioCandidate>, FetchError> {
        tracing::debug!(url = detail_url, "looking for audio links");
        let (base, body) = self.get_page(detail_url).await?;
        let marker = self.config.audio_marker.clone();
        let links =
            tokio::task::spawn_blocking(move || scrape::parse_audio_links(&body, &base, &marker))
                .await
                .map_err(|e| FetchError::Task(e.to_string()))?;
        if links.is_empty() {
            return Err(FetchError::NoCandidates);
        }
        tracing::debug!(url = detail_url, count = links.len(), "audio links found");
        Ok(links)
    }

    /// Download `file_url` into `destination_dir`, returning the written path.
    pub async fn download_file(
        &self,
        file_url: &str,
        destination_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        let path = download::target_path(file_url, destination_dir)?;
        let resp = self.get(file_url, None).await?;
        let written = download::write_stream(resp.bytes_stream(), &path).await?;
        tracing::info!(path = %path.display(), bytes = written, "written file");
        Ok(path)
    }

    async fn get_page(&self, url: &str) -> Result<(Url, String), FetchError> {
        let resp = self.get(url, Some(self.config.timeout)).await?;
        let base = resp.url().clone();
        let body = resp.text().await?;
        Ok((base, body))
    }

    async fn get(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, FetchError> {
        let mut req = self.http.get(url);
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "request failed");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> GmeClient {
        GmeClient::new(ClientConfig {
            catalog_url: format!("{}/catalog", server.url()),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    const CATALOG_HTML: &str = r#"<html><body>
        <div class="mt-show-more-listing"><a href="/products/bauernhof" title="Bauernhof">more</a></div>
        <div class="mt-show-more-listing"><a href="https://other.test/wald">Wald</a></div>
    </body></html>"#;

    #[tokio::test]
    async fn fetch_catalog_resolves_links_against_page_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/catalog")
            .match_header("user-agent", "curl")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(CATALOG_HTML)
            .create_async()
            .await;

        let entries = client_for(&server).fetch_catalog().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            entries,
            vec![
                CatalogEntry::new("Bauernhof", format!("{}/products/bauernhof", server.url())),
                CatalogEntry::new("Wald", "https://other.test/wald"),
            ]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/catalog")
            .with_status(404)
            .create_async()
            .await;

        let err = client_for(&server).fetch_catalog().await.unwrap_err();

        match err {
            FetchError::Status { url, status } => {
                assert_eq!(status, 404);
                assert_eq!(url, format!("{}/catalog", server.url()));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_audio_links_keeps_gme_links_in_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/bauernhof")
            .with_status(200)
            .with_body(
                r#"<a href="files/Bauernhof.gme">Download</a>
                   <a href="/manual.pdf">Manual</a>
                   <a href="https://cdn.test/x/Tiere.gme">Tiere</a>"#,
            )
            .create_async()
            .await;
        let detail_url = format!("{}/products/bauernhof", server.url());

        let links = client_for(&server)
            .fetch_audio_links(&detail_url)
            .await
            .unwrap();

        assert_eq!(
            links,
            vec![
                AudioCandidate::new(
                    "Bauernhof.gme",
                    format!("{}/products/files/Bauernhof.gme", server.url())
                ),
                AudioCandidate::new("Tiere.gme", "https://cdn.test/x/Tiere.gme"),
            ]
        );
    }

    #[tokio::test]
    async fn detail_page_without_audio_links_has_no_candidates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/empty")
            .with_status(200)
            .with_body(r#"<a href="/manual.pdf">Manual</a>"#)
            .create_async()
            .await;
        let detail_url = format!("{}/products/empty", server.url());

        let err = client_for(&server)
            .fetch_audio_links(&detail_url)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::NoCandidates));
    }

    #[tokio::test]
    async fn download_writes_file_named_after_last_segment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/files/bauernhof.gme")
            .with_status(200)
            .with_body(b"GME-DATA")
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let file_url = format!("{}/files/bauernhof.gme", server.url());

        let path = client_for(&server)
            .download_file(&file_url, dir.path())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(path, dir.path().join("bauernhof.gme"));
        assert_eq!(std::fs::read(&path).unwrap(), b"GME-DATA");
    }

    #[tokio::test]
    async fn failed_download_creates_no_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/files/missing.gme")
            .with_status(404)
            .create_async()
            .await;
        let dir = tempfile::tempdir().unwrap();
        let file_url = format!("{}/files/missing.gme", server.url());

        let err = client_for(&server)
            .download_file(&file_url, dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
