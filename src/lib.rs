//! Analytics tracking for embedding web platforms: renders Piwik and legacy
//! Google Analytics snippets for page footers, sanitizes the admin-form
//! settings behind them, and resolves the Piwik site id over the REST API.

pub mod config;
pub mod form;
pub mod remote;
pub mod resolver;
pub mod settings;
pub mod snippet;


// Re-export the types hosts touch directly
pub use config::TrackingConfig;
pub use remote::{Fetcher, RemoteError, RemoteOptions};
pub use resolver::{resolve_site_id, ApiSiteIdResolver, ResolveError, SiteIdResolver};
pub use settings::{sanitize, AnalyticsSettings, MemoryStore, SettingsStore};
pub use snippet::{footer_tracking_code, google_tracking_code, piwik_tracking_code, GoogleAccount};
