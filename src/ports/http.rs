//! HTTP client port for downloads and reference-database queries.

use std::error::Error;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

/// Boxed future type alias used by [`HttpClient`] to keep the trait
/// dyn-compatible.
pub type HttpFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Performs HTTP requests.
///
/// The installer uses `download` to fetch release tarballs; the table
/// generator uses `get_text` to query the reference database. Both are
/// recorded and replayed through cassettes, so no test ever touches the
/// network.
pub trait HttpClient: Send + Sync {
    /// Fetches `url` and writes the response body to `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response status is not
    /// a success, or the body cannot be written.
    fn download<'a>(&'a self, url: &str, dest: &Path) -> HttpFuture<'a, ()>;

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response status is
    /// not a success.
    fn get_text<'a>(&'a self, url: &str) -> HttpFuture<'a, String>;
}
