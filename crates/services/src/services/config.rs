//! Environment-driven configuration for the generation pipeline.

use std::time::Duration;

use strum_macros::{Display, EnumString};
use thiserror::Error;

use super::{generation::GenerationSettings, section_validator::JudgeSettings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// How generated markup is validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ValidatorMode {
    /// Judge model first, keyword check on any failure
    #[default]
    Judge,
    /// Keyword check only
    Keyword,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub generation: GenerationSettings,
    pub judge: JudgeSettings,
    pub validator_mode: ValidatorMode,
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let mut generation = GenerationSettings::default();
        if let Some(model) = get("GENERATION_MODEL") {
            generation.model = model;
        }
        if let Some(secs) = get("GENERATION_TIMEOUT_SECS") {
            generation.timeout = parse_secs("GENERATION_TIMEOUT_SECS", &secs)?;
        }

        let mut judge = JudgeSettings::default();
        if let Some(model) = get("JUDGE_MODEL") {
            judge.model = model;
        }
        if let Some(secs) = get("JUDGE_TIMEOUT_SECS") {
            judge.timeout = parse_secs("JUDGE_TIMEOUT_SECS", &secs)?;
        }

        let validator_mode = match get("VALIDATOR_MODE") {
            Some(mode) => mode.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "VALIDATOR_MODE",
                value: mode,
            })?,
            None => ValidatorMode::default(),
        };

        Ok(Self {
            api_key,
            base_url: get("OPENAI_BASE_URL"),
            generation,
            judge,
            validator_mode,
        })
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::Invalid {
            key,
            value: value.to_string(),
        })
}
