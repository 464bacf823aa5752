//! Runtime configuration file parsing.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// What a nullish receiver (`undefined` or `null`) turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NullishReceiver {
    /// The realm's global object.
    #[default]
    Global,
    /// `undefined` itself, as strict-mode code would see it.
    Undefined,
}

/// How a receiver is handed to the callable during `call`/`apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InvocationStrategy {
    /// The receiver is passed straight through as `this`.
    #[default]
    Thunk,
    /// The callable is parked on the receiver under a fresh symbol key, invoked through it and
    /// removed again.
    TransientProperty,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReceiverConfig {
    pub nullish: NullishReceiver,
    pub strategy: InvocationStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Value of the global object's `name` property.
    pub name: String,
}
impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            name: "global".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct RuntimeConfig {
    pub receiver: ReceiverConfig,
    pub global: GlobalConfig,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format, every key optional:
    /// ```toml
    /// [receiver]
    /// nullish = "global"      # or "undefined"
    /// strategy = "thunk"      # or "transient-property"
    ///
    /// [global]
    /// name = "global"
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = RuntimeConfig::parse("").unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.receiver.nullish, NullishReceiver::Global);
        assert_eq!(config.receiver.strategy, InvocationStrategy::Thunk);
        assert_eq!(config.global.name, "global");
    }

    #[test]
    fn test_parse_full_config() {
        let config = RuntimeConfig::parse(
            r#"
            [receiver]
            nullish = "undefined"
            strategy = "transient-property"

            [global]
            name = "window"
            "#,
        )
        .unwrap();
        assert_eq!(config.receiver.nullish, NullishReceiver::Undefined);
        assert_eq!(config.receiver.strategy, InvocationStrategy::TransientProperty);
        assert_eq!(config.global.name, "window");
    }

    #[test]
    fn test_parse_rejects_unknown_strategy() {
        let err = RuntimeConfig::parse("[receiver]\nstrategy = \"magic\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuntimeConfig::load(Path::new("/nonexistent/jsbind.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/jsbind.toml"));
    }
}
