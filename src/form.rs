use crate::settings::{AnalyticsSettings, SETTINGS_NAME};

// ── Descriptors ────────────────────────────────────────

/// One input widget in the host's admin form.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsField {
    pub key: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub css_class: &'static str,
    pub value: String,
}

/// A titled group of fields with its intro text.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSection {
    pub id: &'static str,
    pub title: &'static str,
    pub intro: &'static str,
    pub fields: Vec<SettingsField>,
}

/// Describe the admin form for the current settings. The host renders the
/// sections and posts the field values back as a flat string map.
pub fn settings_sections(settings: &AnalyticsSettings) -> Vec<SettingsSection> {
    vec![
        SettingsSection {
            id: "piwik",
            title: "Piwik Analytics",
            intro: "Enter your Piwik Auth Token below to enable tracking.",
            fields: vec![SettingsField {
                key: "piwik_auth_token",
                label: "Auth Token",
                input_type: "text",
                css_class: "regular-text code",
                value: settings.piwik_auth_token.clone(),
            }],
        },
        SettingsSection {
            id: "google",
            title: "Google Analytics",
            intro: "Enter your Google Web Property ID below to enable tracking.",
            fields: vec![SettingsField {
                key: "google_web_property_id",
                label: "Web Property ID",
                input_type: "text",
                css_class: "regular-text code",
                value: settings.google_web_property_id.clone(),
            }],
        },
    ]
}

// ── Widgets ────────────────────────────────────────────

/// Render a field descriptor as an input widget. Unknown input types render
/// nothing.
pub fn render_field(field: &SettingsField) -> String {
    match field.input_type {
        "text" => format!(
            r#"<input type="text" id="{id}" class="{class}" name="{name}[{id}]" value="{value}" />"#,
            id = field.key,
            class = field.css_class,
            name = SETTINGS_NAME,
            value = html_escape(&field.value),
        ),
        _ => String::new(),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
