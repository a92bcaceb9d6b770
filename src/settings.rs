use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use tracing::warn;

use crate::{board::Credentials, report::Grouping};

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Page size used when fetching actions, unless configured otherwise.
const DEFAULT_ACTIONS_LIMIT: u32 = 100;

/// Contents of `settings.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub trello_api_key: String,
    pub trello_api_secret: String,
    pub trello_user_name: String,
    pub trello_board_id: String,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Offset of the default report start. Local time is used when absent.
    #[serde(default)]
    pub utc_offset_hours: Option<i32>,
    #[serde(default = "default_actions_limit")]
    pub actions_limit: u32,
    #[serde(default = "default_dir")]
    pub snapshot_dir: PathBuf,
    #[serde(default = "default_dir")]
    pub output_dir: PathBuf,
}

fn default_actions_limit() -> u32 {
    DEFAULT_ACTIONS_LIMIT
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Settings {
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Can't read settings from {path:?}"))?;
        Self::from_json(&text).with_context(|| format!("Invalid settings in {path:?}"))
    }

    /// Empty project or category lists are allowed, everything just ends up in the fallback
    /// buckets.
    pub fn from_json(text: &str) -> Result<Self> {
        let settings = serde_json::from_str::<Settings>(text)?;
        if settings.projects.is_empty() {
            warn!("No projects configured, all spend will be reported as unassigned");
        }
        if settings.categories.is_empty() {
            warn!("No categories configured, all spend will be reported as uncategorized");
        }
        Ok(settings)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            key: self.trello_api_key.clone(),
            token: self.trello_api_secret.clone(),
        }
    }

    pub fn grouping(&self) -> Grouping<'_> {
        Grouping {
            projects: &self.projects,
            categories: &self.categories,
        }
    }

    pub fn utc_offset(&self) -> Result<Option<FixedOffset>> {
        self.utc_offset_hours
            .map(|hours| {
                FixedOffset::east_opt(hours * 3600)
                    .ok_or_else(|| anyhow!("utcOffsetHours {hours} is out of range"))
            })
            .transpose()
    }
}
