//! Minimal HTML fetch client with safe logging.
//!
//! - Per-request options: extra headers, query params, timeout
//! - Default headers (user agent, language) applied to every request
//! - A single attempt per request; callers decide what a failure means
//! - Optional *raw* response logging via `HLTB_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```no_run
//! # async fn demo() -> Result<(), hltb_http::HttpError> {
//! let client = hltb_http::HttpClient::new(reqwest::header::HeaderMap::new())?;
//! let url = reqwest::Url::parse("https://howlongtobeat.com/game/10270").unwrap();
//! let html = client.get_text(&url, hltb_http::RequestOpts::default()).await?;
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response status, and final errors; raw bodies (target `http.raw`) only
//! when `HLTB_HTTP_RAW=1`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "HLTB_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let mut val = v.to_str().unwrap_or("").to_string();
            if key.eq_ignore_ascii_case("authorization") || key.eq_ignore_ascii_case("cookie") {
                val = "<redacted>".into();
            }
            (key, val)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned error {status} for {url}: {snippet}")]
    Api {
        status: StatusCode,
        url: String,
        snippet: String,
    },
}

// ==============================
// Request Options
// ==============================

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use hltb_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     query: Some(vec![("q".into(), "celeste".into())]),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert!(opts.headers.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts {
    pub timeout: Option<Duration>,
    pub headers: Option<HeaderMap>,
    pub query: Option<Vec<(String, String)>>,
}

/// Build a header map from string pairs, rejecting invalid names or values.
///
/// ```
/// use hltb_http::header_map;
///
/// let headers = header_map([("Accept-Language", "en-US,en")]).unwrap();
/// assert_eq!(headers["accept-language"], "en-US,en");
/// assert!(header_map([("bad header", "x")]).is_err());
/// ```
pub fn header_map<'a, I>(pairs: I) -> Result<HeaderMap, HttpError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HttpError::Build(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HttpError::Build(format!("invalid header value for {name}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client that sends `default_headers` with every request.
    ///
    /// ```no_run
    /// use hltb_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new(reqwest::header::HeaderMap::new())?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(default_headers: HeaderMap) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .default_headers(default_headers)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            default_timeout: Duration::from_secs(15),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// GET `url` and return the body as text. Non-2xx statuses are errors.
    pub async fn get_text(&self, url: &Url, opts: RequestOpts) -> Result<String, HttpError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HttpError::Url(format!("unsupported scheme in {url}")));
        }

        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let mut rb = self.inner.get(url.clone()).timeout(timeout);
        if let Some(q) = &opts.query {
            rb = rb.query(q);
        }
        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        tracing::debug!(
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            query=?opts.query,
            timeout_ms=timeout.as_millis() as u64,
            "http.request.start"
        );

        let t0 = Instant::now();
        let resp = rb.send().await.map_err(|err| {
            tracing::warn!(url=%url, message=%err, "http.network_error.send");
            HttpError::Network(err.to_string())
        })?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|err| {
            tracing::warn!(url=%url, message=%err, "http.network_error.body");
            HttpError::Network(err.to_string())
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            %status,
            duration_ms=dur_ms,
            body_len=body.len(),
            "http.response.headers"
        );

        if raw_enabled() {
            let truncated = body.len() > RAW_MAX_BODY;
            tracing::info!(
                target:"http.raw",
                status=%status,
                duration_ms=dur_ms,
                headers=?redact_headers(&headers),
                body=%snip(&body, RAW_MAX_BODY),
                truncated
            );
        }

        if status.is_success() {
            return Ok(body);
        }

        let snippet = snip(&body, 500);
        tracing::warn!(%status, url=%url, body_snippet=%snippet, "http.error");
        Err(HttpError::Api {
            status,
            url: url.to_string(),
            snippet,
        })
    }
}

// ==============================
// Helpers
// ==============================

fn snip(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
