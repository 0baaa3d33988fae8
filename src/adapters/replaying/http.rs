//! Replaying adapter for the `HttpClient` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::http::{HttpClient, HttpFuture};

/// Serves recorded HTTP responses from a cassette.
pub struct ReplayingHttpClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpClient {
    /// Creates a new replaying HTTP client from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl HttpClient for ReplayingHttpClient {
    fn download<'a>(&'a self, _url: &str, _dest: &Path) -> HttpFuture<'a, ()> {
        let output = next_output(&self.replayer, "http", "download");
        Box::pin(async move { replay_result(&output, "http::download") })
    }

    fn get_text<'a>(&'a self, _url: &str) -> HttpFuture<'a, String> {
        let output = next_output(&self.replayer, "http", "get_text");
        Box::pin(async move { replay_result(&output, "http::get_text") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn replays_get_text() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "http".into(),
                method: "get_text".into(),
                input: json!({"url": "https://example.com"}),
                output: json!({"ok": "body text"}),
            }],
        };
        let http = ReplayingHttpClient::new(CassetteReplayer::new(&cassette));
        let body = http.get_text("https://example.com").await.unwrap();
        assert_eq!(body, "body text");
    }
}
