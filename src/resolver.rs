use serde_json::Value;
use url::form_urlencoded;

use crate::remote::Fetcher;

// ── Errors ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    ConnectionFailed,
    MalformedResponse,
    RemoteApiError,
    NoMatchingSite,
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::ConnectionFailed => "Failed to connect to the API",
            Self::MalformedResponse => "API returned an invalid response",
            Self::RemoteApiError => "API error",
            Self::NoMatchingSite => "No site associated with this URL",
        };
        write!(f, "{}", msg)
    }
}

// ── Resolution ─────────────────────────────────────────

/// Ask the Piwik REST API which site id tracks `site_url` and pick the first
/// id that is not the global tracking id, in the order the API returned them.
pub fn resolve_site_id(
    fetcher: &Fetcher,
    api_base_url: &str,
    auth_token: &str,
    site_url: &str,
    global_site_id: Option<u32>,
) -> Result<u32, ResolveError> {
    let url = query_url(api_base_url, auth_token, site_url);
    let body = fetcher.fetch(&url).map_err(|e| {
        log::warn!("Piwik API request failed: {}", e);
        ResolveError::ConnectionFailed
    })?;

    let parsed: Value =
        serde_json::from_str(&body).map_err(|_| ResolveError::MalformedResponse)?;

    // The API reports failures as {"result":"error",...} rather than an HTTP
    // error status.
    if parsed.get("result").and_then(Value::as_str) == Some("error") {
        return Err(ResolveError::RemoteApiError);
    }

    let sites = parsed.as_array().ok_or(ResolveError::MalformedResponse)?;
    for site in sites {
        if let Some(id) = site_id_of(site) {
            if Some(id) != global_site_id {
                return Ok(id);
            }
        }
    }
    Err(ResolveError::NoMatchingSite)
}

/// Build the `SitesManager.getSitesIdFromSiteUrl` query URL.
fn query_url(api_base_url: &str, auth_token: &str, site_url: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("module", "API")
        .append_pair("format", "JSON")
        .append_pair("method", "SitesManager.getSitesIdFromSiteUrl")
        .append_pair("token_auth", auth_token)
        .append_pair("url", site_url)
        .finish();
    format!("{}/?{}", api_base_url.trim_end_matches('/'), query)
}

/// `idsite` arrives as a JSON number or a numeric string depending on the
/// Piwik version.
fn site_id_of(site: &Value) -> Option<u32> {
    match site.get("idsite")? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ── Resolver seam ──────────────────────────────────────

/// Seam between the settings sanitizer and the Piwik API, so sanitization
/// can be exercised without network access.
pub trait SiteIdResolver {
    fn resolve(&self, auth_token: &str) -> Result<u32, ResolveError>;
}

/// Production resolver: queries the configured REST host over https for the
/// site id tracking the host's own URL.
pub struct ApiSiteIdResolver<'a> {
    fetcher: &'a Fetcher,
    api_host: &'a str,
    site_url: &'a str,
    global_site_id: Option<u32>,
}

impl<'a> ApiSiteIdResolver<'a> {
    pub fn new(
        fetcher: &'a Fetcher,
        api_host: &'a str,
        site_url: &'a str,
        global_site_id: Option<u32>,
    ) -> Self {
        Self {
            fetcher,
            api_host,
            site_url,
            global_site_id,
        }
    }
}

impl SiteIdResolver for ApiSiteIdResolver<'_> {
    fn resolve(&self, auth_token: &str) -> Result<u32, ResolveError> {
        let api_base = format!("https://{}", self.api_host);
        resolve_site_id(
            self.fetcher,
            &api_base,
            auth_token,
            self.site_url,
            self.global_site_id,
        )
    }
}
