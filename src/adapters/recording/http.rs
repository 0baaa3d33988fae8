//! Recording adapter for the `HttpClient` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::http::{HttpClient, HttpFuture};

/// Records HTTP interactions while delegating to an inner implementation.
pub struct RecordingHttpClient {
    inner: Box<dyn HttpClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpClient {
    /// Creates a new recording HTTP client wrapping the given implementation.
    pub fn new(inner: Box<dyn HttpClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct DownloadInput<'a> {
    url: &'a str,
    dest: &'a str,
}

#[derive(Serialize)]
struct UrlInput<'a> {
    url: &'a str,
}

impl HttpClient for RecordingHttpClient {
    fn download<'a>(&'a self, url: &str, dest: &Path) -> HttpFuture<'a, ()> {
        let url = url.to_string();
        let dest = dest.to_path_buf();

        Box::pin(async move {
            let result = self.inner.download(&url, &dest).await;
            let input = DownloadInput { url: &url, dest: &dest.display().to_string() };
            record_result(&self.recorder, "http", "download", &input, &result);
            result
        })
    }

    fn get_text<'a>(&'a self, url: &str) -> HttpFuture<'a, String> {
        let url = url.to_string();

        Box::pin(async move {
            let result = self.inner.get_text(&url).await;
            let input = UrlInput { url: &url };
            record_result(&self.recorder, "http", "get_text", &input, &result);
            result
        })
    }
}
