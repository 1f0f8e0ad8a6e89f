use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use url::Url;

use crate::render::{is_renderable_pattern, DEFAULT_DATE_FORMAT};

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub date_format: String,
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            username: "nancy@chinookcorp.com".into(),
            password: "password123".into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            timeout: None,
        }
    }
}

/// One configuration layer. Used for the TOML file, the environment and
/// the command line alike.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub date_format: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Overrides {
    pub fn from_env(env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let timeout_secs = env("DASHBOARD_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("DASHBOARD_TIMEOUT_SECS is not a number: '{raw}'"))
            })
            .transpose()?;

        Ok(Self {
            base_url: env("DASHBOARD_BASE_URL"),
            username: env("DASHBOARD_USERNAME"),
            password: env("DASHBOARD_PASSWORD"),
            date_format: env("DASHBOARD_DATE_FORMAT"),
            timeout_secs,
        })
    }
}

impl Settings {
    pub fn apply(&mut self, layer: Overrides) {
        if let Some(v) = layer.base_url {
            self.base_url = v;
        }
        if let Some(v) = layer.username {
            self.username = v;
        }
        if let Some(v) = layer.password {
            self.password = v;
        }
        if let Some(v) = layer.date_format {
            self.date_format = v;
        }
        if let Some(v) = layer.timeout_secs {
            self.timeout = Some(Duration::from_secs(v));
        }
    }

    pub fn validate(mut self) -> anyhow::Result<Self> {
        let url = Url::parse(self.base_url.trim())
            .with_context(|| format!("invalid base url '{}'", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("base url '{}' must use http or https", self.base_url);
        }
        self.base_url = url.as_str().trim_end_matches('/').to_string();

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            bail!("invalid date format '{}'", self.date_format);
        }
        if !is_renderable_pattern(&self.date_format) {
            bail!(
                "date format '{}' needs timezone data that backend dates do not carry",
                self.date_format
            );
        }

        if self.timeout == Some(Duration::ZERO) {
            bail!("timeout must be at least one second");
        }

        Ok(self)
    }
}

/// Defaults, then the TOML file, then `DASHBOARD_*` environment variables.
pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let file_cfg: Overrides = toml::from_str(raw).context("failed to parse dashboard config")?;
        settings.apply(file_cfg);
    }

    settings.apply(Overrides::from_env(env)?);
    Ok(settings)
}

/// An explicit `path` must exist; the default `dashboard.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };

    settings_from_sources(raw.as_deref(), |key| std::env::var(key).ok())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
