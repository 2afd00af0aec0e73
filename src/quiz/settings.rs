use anyhow::{Context, Result};
use directories_next::BaseDirs;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::QuizError;

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub time_limit: Duration,
    pub tick_period: Duration,
    pub default_question_count: usize,
    pub max_question_count: usize,
    pub max_distractors: usize,
    pub min_same_category_pool: usize,
    pub default_source: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            time_limit: Duration::from_secs(20),
            tick_period: Duration::from_millis(100),
            default_question_count: 5,
            max_question_count: 100,
            max_distractors: 3,
            min_same_category_pool: 3,
            default_source: PathBuf::from("terms.csv"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    pub time_limit_ms: Option<u64>,
    pub tick_period_ms: Option<u64>,
    pub default_question_count: Option<usize>,
    pub max_question_count: Option<usize>,
    pub max_distractors: Option<usize>,
    pub min_same_category_pool: Option<usize>,
    pub default_source: Option<PathBuf>,
}

impl TryFrom<RawSettings> for Settings {
    type Error = QuizError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        let defaults = Settings::default();
        let settings = Settings {
            time_limit: raw
                .time_limit_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.time_limit),
            tick_period: raw
                .tick_period_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_period),
            default_question_count: raw
                .default_question_count
                .unwrap_or(defaults.default_question_count),
            max_question_count: raw
                .max_question_count
                .unwrap_or(defaults.max_question_count),
            max_distractors: raw.max_distractors.unwrap_or(defaults.max_distractors),
            min_same_category_pool: raw
                .min_same_category_pool
                .unwrap_or(defaults.min_same_category_pool),
            default_source: raw.default_source.unwrap_or(defaults.default_source),
        };

        if settings.time_limit == Duration::default() {
            return Err(QuizError::InvalidSettings("time limit must be positive".into()));
        }
        if settings.tick_period == Duration::default() {
            return Err(QuizError::InvalidSettings("tick period must be positive".into()));
        }
        if settings.max_question_count == 0 {
            return Err(QuizError::InvalidSettings(
                "at least one question must be allowed".into(),
            ));
        }
        if settings.default_question_count == 0
            || settings.default_question_count > settings.max_question_count
        {
            return Err(QuizError::InvalidSettings(format!(
                "default question count must be between 1 and {}",
                settings.max_question_count
            )));
        }
        Ok(settings)
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path = BaseDirs::new()
        .context("could not locate system directories")?
        .config_dir()
        .to_path_buf();
    path.push("terms-quiz");
    path.push("settings.json");
    Ok(path)
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Settings> {
        let raw: RawSettings = serde_json::from_str(json).context("malformed settings")?;
        Ok(Settings::try_from(raw)?)
    }

    /// Reads the per-user settings file. Anything missing or broken falls back to defaults.
    pub fn load() -> Settings {
        let path = match get_config_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("{:#}, using default settings", e);
                return Settings::default();
            }
        };
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(_) => {
                info!("No settings file at {:?}, using default settings", path);
                return Settings::default();
            }
        };
        match Settings::from_json(&json) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Ignoring settings file {:?}: {:#}", path, e);
                Settings::default()
            }
        }
    }
}
