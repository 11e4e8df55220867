use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use client_core::{CategoryLabels, SessionOptions};
use serde::Deserialize;
use shared::domain::{ConnectionName, RecordContext};
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "explorer.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub connection: String,
    pub record_identifier: String,
    pub object_type: String,
    pub record_id: Option<String>,
    pub page_origin: String,
    pub label_all: String,
    pub label_image: String,
    pub label_document: String,
    pub label_other: String,
}

impl Default for Settings {
    fn default() -> Self {
        let labels = CategoryLabels::default();
        Self {
            api_base_url: "http://127.0.0.1:8080/api".into(),
            connection: "default".into(),
            record_identifier: "File_Container__c".into(),
            object_type: "Case".into(),
            record_id: None,
            page_origin: "http://localhost".into(),
            label_all: labels.all,
            label_image: labels.image,
            label_document: labels.document,
            label_other: labels.other,
        }
    }
}

impl Settings {
    pub fn api_base(&self) -> anyhow::Result<Url> {
        Url::parse(&self.api_base_url)
            .with_context(|| format!("invalid api base url '{}'", self.api_base_url))
    }

    pub fn labels(&self) -> CategoryLabels {
        CategoryLabels {
            all: self.label_all.clone(),
            image: self.label_image.clone(),
            document: self.label_document.clone(),
            other: self.label_other.clone(),
        }
    }

    pub fn session_options(&self) -> anyhow::Result<SessionOptions> {
        let page_origin = Url::parse(&self.page_origin)
            .with_context(|| format!("invalid page origin '{}'", self.page_origin))?;
        Ok(
            SessionOptions::new(ConnectionName::new(self.connection.clone()), page_origin)
                .with_labels(self.labels()),
        )
    }

    /// Record to open at startup, when one is configured.
    pub fn record_context(&self) -> Option<RecordContext> {
        let record_id = self.record_id.as_deref()?.trim();
        if record_id.is_empty() {
            return None;
        }
        Some(RecordContext::new(
            self.record_identifier.clone(),
            self.object_type.clone(),
            record_id,
        ))
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE), |key| {
        std::env::var(key).ok()
    })
}

/// File values first, then environment overrides. A missing file is not an error.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        apply_file_values(&mut settings, &file_cfg);
    }

    if let Some(v) = env("EXPLORER_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__CONNECTION") {
        settings.connection = v;
    }
    if let Some(v) = env("APP__RECORD_IDENTIFIER") {
        settings.record_identifier = v;
    }
    if let Some(v) = env("APP__OBJECT_TYPE") {
        settings.object_type = v;
    }
    if let Some(v) = env("APP__RECORD_ID") {
        settings.record_id = Some(v);
    }
    if let Some(v) = env("APP__PAGE_ORIGIN") {
        settings.page_origin = v;
    }

    Ok(settings)
}

fn apply_file_values(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    let fields: [(&str, &mut String); 9] = [
        ("api_base_url", &mut settings.api_base_url),
        ("connection", &mut settings.connection),
        ("record_identifier", &mut settings.record_identifier),
        ("object_type", &mut settings.object_type),
        ("page_origin", &mut settings.page_origin),
        ("label_all", &mut settings.label_all),
        ("label_image", &mut settings.label_image),
        ("label_document", &mut settings.label_document),
        ("label_other", &mut settings.label_other),
    ];
    for (key, slot) in fields {
        if let Some(v) = file_cfg.get(key) {
            *slot = v.clone();
        }
    }
    if let Some(v) = file_cfg.get("record_id") {
        settings.record_id = Some(v.clone());
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
