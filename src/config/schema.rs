use crate::client::{Credentials, DEFAULT_API_BASE, MAX_PER_PAGE};
use crate::error::ConfigError;
use crate::item::{RawId, StatusId};
use crate::retention::{HARD_CAP, RetentionPolicy};
use directories::UserDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path the config was read from - not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_token_secret: String,

    /// Account whose timeline and likes are purged
    pub screen_name: String,

    /// Items at most this many days old are kept
    pub keep_days: u32,
    /// Ids kept forever; TOML strings or integers
    #[serde(default)]
    pub keep_ids: Vec<RawId>,

    /// Posts/reposts allowed to survive a run (default: 3100)
    #[serde(default = "default_hard_cap")]
    pub hard_cap: usize,
    /// Statuses requested per page, 1..=200 (default: 200)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_hard_cap() -> usize {
    HARD_CAP
}

fn default_per_page() -> u32 {
    MAX_PER_PAGE
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.into()
}

impl Config {
    /// `~/.langolier/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        Ok(home.join(".langolier").join("config.toml"))
    }

    /// Read, apply environment overrides and validate. `~` in `path` is
    /// expanded.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned()),
            None => Self::default_path()?,
        };

        let contents = fs::read_to_string(&config_path).map_err(|err| {
            ConfigError::Load(format!("failed to read {}: {err}", config_path.display()))
        })?;
        let mut config = Self::from_toml(&contents)?;
        config.config_path = config_path;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_env_overrides(&mut self) {
        let overrides = [
            ("LANGOLIER_CONSUMER_KEY", &mut self.consumer_key),
            ("LANGOLIER_CONSUMER_SECRET", &mut self.consumer_secret),
            ("LANGOLIER_ACCESS_TOKEN", &mut self.access_token),
            ("LANGOLIER_ACCESS_TOKEN_SECRET", &mut self.access_token_secret),
        ];

        for (var, field) in overrides {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    *field = value;
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_name.trim().is_empty() {
            return Err(ConfigError::Validation("screen_name must not be empty".into()));
        }

        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(ConfigError::Validation(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }

        let api_base = url::Url::parse(&self.api_base)
            .map_err(|err| ConfigError::Validation(format!("api_base: {err}")))?;
        if !matches!(api_base.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "api_base must be an http(s) URL, got {}",
                self.api_base
            )));
        }

        self.keep_ids()?;
        Ok(())
    }

    pub fn keep_ids(&self) -> Result<Vec<StatusId>, ConfigError> {
        self.keep_ids
            .iter()
            .map(|raw| {
                raw.to_status_id()
                    .map_err(|err| ConfigError::Validation(format!("keep_ids: {err}")))
            })
            .collect()
    }

    pub fn retention_policy(&self) -> Result<RetentionPolicy, ConfigError> {
        Ok(RetentionPolicy::new(self.keep_days, self.keep_ids()?))
    }

    /// Fails when any of the four OAuth values is missing.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let fields = [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("access_token", &self.access_token),
            ("access_token_secret", &self.access_token_secret),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(ConfigError::Validation(format!("{name} is not set")));
        }

        Ok(Credentials {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            access_token: self.access_token.clone(),
            access_token_secret: self.access_token_secret.clone(),
        })
    }
}
