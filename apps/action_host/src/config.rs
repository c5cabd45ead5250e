use std::{collections::HashMap, fs};

use anyhow::{bail, Context};
use url::Url;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub record_id: String,
    pub action_title: String,
    pub sum_header_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8443".into(),
            record_id: String::new(),
            action_title: "Add Entry".into(),
            sum_header_label: "Number Adder".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("host.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("record_id") {
                settings.record_id = v.clone();
            }
            if let Some(v) = file_cfg.get("action_title") {
                settings.action_title = v.clone();
            }
            if let Some(v) = file_cfg.get("sum_header_label") {
                settings.sum_header_label = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("ACTION_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("ACTION_RECORD_ID") {
        settings.record_id = v;
    }
    if let Ok(v) = std::env::var("ACTION_TITLE") {
        settings.action_title = v;
    }
    if let Ok(v) = std::env::var("ACTION_SUM_HEADER_LABEL") {
        settings.sum_header_label = v;
    }

    settings
}

pub fn validate(settings: &Settings) -> anyhow::Result<()> {
    let url = Url::parse(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        bail!(
            "server url must start with http:// or https://, got '{}'",
            settings.server_url
        );
    }
    if settings.record_id.trim().is_empty() {
        bail!("a record id is required; pass --record-id or set ACTION_RECORD_ID");
    }
    Ok(())
}
