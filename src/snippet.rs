use serde::{Deserialize, Serialize};

use crate::config::TrackingConfig;
use crate::settings::AnalyticsSettings;

/// One Google Analytics account to emit tracker calls for. A non-empty
/// namespace prefixes the call names so multiple tracking scopes can coexist
/// on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleAccount {
    pub id: String,
    pub namespace: Option<String>,
}

// ── Piwik ──────────────────────────────────────────────

/// Render the Piwik tracking block. Consuming pages rely on this exact
/// markup shape (the `_paq` bootstrap, the deferred async `piwik.js` insert,
/// the noscript pixel), so the template is substitution-only; inputs are
/// trusted configuration values.
pub fn piwik_tracking_code(track_domain: &str, api_host: &str, site_id: u32) -> String {
    format!(
        r#"<!-- Piwik -->
<script type="text/javascript">
var _paq=_paq||[];
_paq.push(["setDocumentTitle",document.domain+"/"+document.title]);
_paq.push(["setCookieDomain","{domain}"]);
_paq.push(["setDomains",["{domain}"]]);
_paq.push(["trackPageView"]);
_paq.push(["enableLinkTracking"]);
(function(d,t,u,g,s) {{
u=("https:"==d.location.protocol?"https":"http")+"://{api}/";
_paq.push(["setTrackerUrl",u+"piwik.php"]);
_paq.push(["setSiteId",{id}]);
g=d.createElement(t);
s=d.getElementsByTagName(t)[0];
g.type="text/javascript";
g.defer=true;
g.async=true;
g.src=u+"piwik.js";
s.parentNode.insertBefore(g,s);
}})(document,"script");
</script>
<noscript><img src="//{api}/piwik.php?idsite={id}&rec=1" style="border:0" alt="" /></noscript>
<!-- End Piwik Code -->
"#,
        domain = track_domain,
        api = api_host,
        id = site_id,
    )
}

// ── Google ─────────────────────────────────────────────

/// Render the Google tracking block: one `_setAccount` and one
/// `_trackPageview` call per account, in slice order. An empty slice renders
/// nothing at all rather than an empty scaffold.
pub fn google_tracking_code(accounts: &[GoogleAccount]) -> String {
    let mut calls = String::new();
    for account in accounts {
        let ns = match account.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{}.", ns),
            _ => String::new(),
        };
        calls.push_str(&google_api_call(&[
            format!("{}_setAccount", ns),
            account.id.clone(),
        ]));
        calls.push_str(&google_api_call(&[format!("{}_trackPageview", ns)]));
    }
    if calls.is_empty() {
        return String::new();
    }
    format!(
        r#"<script type="text/javascript">
var _gaq=_gaq||[];
{calls}(function() {{
var ga=document.createElement('script');
ga.type='text/javascript';
ga.async=true;
ga.src=('https:'==document.location.protocol?'https://ssl':'http://www')+'.google-analytics.com/ga.js';
var s=document.getElementsByTagName('script')[0];
s.parentNode.insertBefore(ga,s);
}})();
</script>
"#,
        calls = calls,
    )
}

/// One `_gaq.push` statement; the call is serialized as a JSON array literal.
fn google_api_call(call: &[String]) -> String {
    format!(
        "_gaq.push({});\n",
        serde_json::to_string(call).unwrap_or_default()
    )
}

// ── Footer assembly ────────────────────────────────────

/// Assemble the full tracking markup appended at footer-render time: global
/// Piwik, per-site Piwik once a site id has been resolved, then the Google
/// block over the global account and the site's own web property. Blocks
/// with missing or incomplete configuration are omitted, not errors.
pub fn footer_tracking_code(
    config: &TrackingConfig,
    settings: &AnalyticsSettings,
    site_domain: &str,
) -> String {
    let mut out = String::new();

    if let (Some(domain), Some(api), Some(id)) = (
        config.piwik_global_tracking_domain.as_deref(),
        config.piwik_global_tracking_rest_api.as_deref(),
        config.piwik_global_tracking_id,
    ) {
        out.push_str(&piwik_tracking_code(domain, api, id));
    }

    if let (Some(api), Some(id)) = (
        config.piwik_global_tracking_rest_api.as_deref(),
        settings.piwik_site_id,
    ) {
        out.push_str(&piwik_tracking_code(site_domain, api, id));
    }

    let mut accounts = Vec::new();
    if let Some(id) = &config.google_global_tracking_id {
        accounts.push(GoogleAccount {
            id: id.clone(),
            namespace: config.google_global_tracking_namespace.clone(),
        });
    }
    if !settings.google_web_property_id.is_empty() {
        accounts.push(GoogleAccount {
            id: settings.google_web_property_id.clone(),
            namespace: None,
        });
    }
    out.push_str(&google_tracking_code(&accounts));

    out
}
