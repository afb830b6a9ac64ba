//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::{Deserialize, Serialize};

use super::types::Res;

/// Default number of recent triage decisions shown on the dashboard.
fn default_recent_decisions() -> usize {
    5
}

/// Critical alerts are shown unless turned off.
fn default_critical_alerts() -> bool {
    true
}

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Configuration for the mediflow application.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inner: Arc::new(ConfigInner::default()),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Report format (`OUTPUT_FORMAT`), either `text` or `json`.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Number of recent triage decisions listed on the dashboard (`RECENT_DECISIONS`).
    /// Must be between 1 and 100.
    #[serde(default = "default_recent_decisions")]
    pub recent_decisions: usize,
    /// Whether to raise the banner for critical patients still waiting (`CRITICAL_ALERTS`).
    #[serde(default = "default_critical_alerts")]
    pub critical_alerts: bool,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            recent_decisions: default_recent_decisions(),
            critical_alerts: default_critical_alerts(),
        }
    }
}

impl ConfigInner {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Res<()> {
        if self.recent_decisions < 1 || self.recent_decisions > 100 {
            return Err(anyhow::anyhow!("Recent decisions must be between 1 and 100."));
        }

        Ok(())
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("MEDIFLOW"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }
}

// Tests.
