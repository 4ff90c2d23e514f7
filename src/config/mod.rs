mod logging;

use anyhow::Result;
pub use logging::*;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::message::metadata::MENTION_KEY;
use crate::resolver::MentionOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct MentionConfig {
    /// Metadata key the mention list is stored under
    #[serde(default = "default_mention_key")]
    pub metadata_key: String,

    /// Character that introduces a mention in message text
    #[serde(default = "default_mention_prefix")]
    pub prefix: char,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            metadata_key: default_mention_key(),
            prefix: default_mention_prefix(),
        }
    }
}

fn default_mention_key() -> String {
    MENTION_KEY.to_string()
}

fn default_mention_prefix() -> char {
    '@'
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mention: MentionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Environment lookup by full variable name.
type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_env(path, &process_env)
    }

    pub fn load_from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_env(bytes, &process_env)
    }

    fn load_with_env(path: &str, env: EnvLookup<'_>) -> Result<Self> {
        let resolved_path = env("CONFIG_PATH").unwrap_or_else(|| path.to_string());
        let content = std::fs::read_to_string(&resolved_path)?;
        Self::from_bytes_with_env(content.as_bytes(), env)
    }

    fn from_bytes_with_env(bytes: &[u8], env: EnvLookup<'_>) -> Result<Self> {
        let mut config: Config = serde_yaml::from_slice(bytes)?;
        config.apply_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mention.metadata_key.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "mention.metadata_key",
            });
        }

        if self.mention.prefix.is_whitespace() || self.mention.prefix.is_alphanumeric() {
            return Err(ConfigError::Invalid {
                field: "mention.prefix",
                value: self.mention.prefix.to_string(),
                reason: "prefix must be a symbol such as '@'",
            });
        }

        self.logging.validate()
    }

    fn apply_env_overrides(&mut self, env: EnvLookup<'_>) -> Result<(), ConfigError> {
        override_from_env(env, &mut self.mention.metadata_key, "MENTION_KEY");
        override_from_env(env, &mut self.logging.min_level, "LOG_LEVEL");

        if let Some(value) = env_var(env, "MENTION_PREFIX") {
            let trimmed = value.trim();
            let mut chars = trimmed.chars();
            match (chars.next(), chars.next()) {
                (None, _) => {}
                (Some(prefix), None) => self.mention.prefix = prefix,
                (Some(_), Some(_)) => {
                    return Err(ConfigError::Invalid {
                        field: "mention.prefix",
                        value: trimmed.to_string(),
                        reason: "prefix must be a single character",
                    });
                }
            }
        }

        Ok(())
    }

    pub fn mention_options(&self) -> MentionOptions {
        MentionOptions {
            metadata_key: self.mention.metadata_key.clone(),
            prefix: self.mention.prefix,
        }
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_var(env: EnvLookup<'_>, suffix: &str) -> Option<String> {
    env(&format!("CHAT_MESSAGE_MODEL_{}", suffix))
}

fn override_from_env(env: EnvLookup<'_>, target: &mut String, suffix: &str) {
    if let Some(value) = env_var(env, suffix) {
        if !value.trim().is_empty() {
            *target = value;
        }
    }
}
