//! Live adapter for the `HttpClient` port using `reqwest`.

use std::path::{Path, PathBuf};

use reqwest::Client;

use crate::ports::http::{HttpClient, HttpFuture};

/// Live HTTP client backed by `reqwest`.
pub struct LiveHttpClient {
    client: Client,
}

impl LiveHttpClient {
    /// Creates a new live HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for LiveHttpClient {
    fn download<'a>(&'a self, url: &str, dest: &Path) -> HttpFuture<'a, ()> {
        let url = url.to_string();
        let dest: PathBuf = dest.to_path_buf();

        Box::pin(async move {
            let response = self.client.get(&url).send().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("request to {url} failed: {e}").into()
                },
            )?;

            let status = response.status();
            if !status.is_success() {
                return Err(format!("request to {url} failed: HTTP {}", status.as_u16()).into());
            }

            let body = response.bytes().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("failed to read response body from {url}: {e}").into()
                },
            )?;

            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&dest, &body)?;
            Ok(())
        })
    }

    fn get_text<'a>(&'a self, url: &str) -> HttpFuture<'a, String> {
        let url = url.to_string();

        Box::pin(async move {
            let response = self.client.get(&url).send().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("request to {url} failed: {e}").into()
                },
            )?;

            let status = response.status();
            if !status.is_success() {
                return Err(format!("request to {url} failed: HTTP {}", status.as_u16()).into());
            }

            response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                format!("failed to read response body from {url}: {e}").into()
            })
        })
    }
}
