//! Grader configuration.
//!
//! Every field falls back to the built-in defaults, so a `lernwerk.toml`
//! only needs to name what it changes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::evaluator::HeuristicTables;
use crate::feedback::FeedbackTemplates;

/// Free-text answers shorter than this (in characters, trimmed) are rejected.
pub const DEFAULT_MIN_ANSWER_CHARS: usize = 20;

/// File name searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = "lernwerk.toml";

/// Top-level grader configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GraderConfig {
    /// Short-circuit threshold for free-text answers.
    pub min_answer_chars: usize,
    /// Breakpoint tables for the free-text heuristics.
    pub heuristics: HeuristicTables,
    /// Feedback string table.
    pub feedback: FeedbackTemplates,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            min_answer_chars: DEFAULT_MIN_ANSWER_CHARS,
            heuristics: HeuristicTables::default(),
            feedback: FeedbackTemplates::default(),
        }
    }
}

impl GraderConfig {
    /// Reject tables that could push the composite above 100.
    pub fn validate(&self) -> Result<()> {
        self.heuristics
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid heuristics: {e}"))
    }

    /// Parse and validate a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GraderConfig =
            toml::from_str(content).context("failed to parse grader config")?;
        config.validate()?;
        Ok(config)
    }
}

/// Load config from an explicit path, or from `lernwerk.toml` in the working
/// directory, or fall back to defaults when neither exists.
pub fn load_config_from(path: Option<&Path>) -> Result<GraderConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            local.exists().then_some(local)
        }
    };

    let Some(config_path) = config_path else {
        tracing::debug!("no config file found, using defaults");
        return Ok(GraderConfig::default());
    };

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config: {}", config_path.display()))?;
    let config = GraderConfig::from_toml_str(&content)
        .with_context(|| format!("invalid config: {}", config_path.display()))?;
    tracing::debug!("loaded config from {}", config_path.display());
    Ok(config)
}
