use std::time::Duration;

use url::Url;

// ── Options ────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RemoteOptions {
    pub timeout_secs: u64,
    pub verify_tls: bool,
    pub user_agent: Option<String>,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            verify_tls: true,
            user_agent: None,
        }
    }
}

// ── Errors ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteError {
    InvalidUrl,
    Transport(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl => write!(f, "Invalid URL"),
            Self::Transport(msg) => write!(f, "{}", msg),
        }
    }
}

// ── Transport ──────────────────────────────────────────

/// Low-level GET transport. `Fetcher` validates URLs before calling in here,
/// so implementations never see a malformed URL.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<String, String>;
}

/// Blocking reqwest transport. Follows redirects (reqwest default, max 10),
/// single attempt, no retry.
pub struct HttpTransport {
    options: RemoteOptions,
}

impl HttpTransport {
    pub fn new(options: RemoteOptions) -> Self {
        Self { options }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<String, String> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.options.timeout_secs))
            .danger_accept_invalid_certs(!self.options.verify_tls);
        if let Some(ua) = &self.options.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        let client = builder
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;

        let resp = client
            .get(url.as_str())
            .send()
            .map_err(|e| format!("Request failed: {}", e))?;

        // The body is returned for any HTTP status; callers validate content.
        resp.text()
            .map_err(|e| format!("Failed to read response body: {}", e))
    }
}

// ── Fetcher ────────────────────────────────────────────

pub struct Fetcher {
    transport: Box<dyn Transport + Send + Sync>,
}

impl Fetcher {
    pub fn new(options: RemoteOptions) -> Self {
        Self {
            transport: Box::new(HttpTransport::new(options)),
        }
    }

    pub fn with_transport(transport: Box<dyn Transport + Send + Sync>) -> Self {
        Self { transport }
    }

    /// Fetch a URL and return the response body as text. A malformed URL
    /// fails before any network I/O.
    pub fn fetch(&self, url: &str) -> Result<String, RemoteError> {
        let parsed = Url::parse(url).map_err(|_| RemoteError::InvalidUrl)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(RemoteError::InvalidUrl);
        }
        self.transport.get(&parsed).map_err(RemoteError::Transport)
    }
}
