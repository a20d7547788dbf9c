// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for xfer-tools.
//!
//! [`XferConfig`] holds the transport defaults applied to every `ssh`/`scp`
//! invocation, plus logging settings. It is loaded from TOML, overlaid with
//! `XFER_*` environment variables, and checked by [`validate_config`] before
//! [`XferConfig::transport_args`] may be called.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::path::Path;

use xfer_ssh::{compression_argument, timeout_argument};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// An `XFER_*` environment variable held an unusable value.
    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv {
        /// Variable name.
        key: String,
        /// Raw value found.
        value: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent operation but deserve attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The connect timeout is unusually large.
    LargeTimeout {
        /// Timeout value in seconds.
        secs: u32,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::LargeTimeout { secs } => {
                write!(f, "connect timeout is unusually large ({secs}s)")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level settings for xfer-tools.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct XferConfig {
    /// Log level override (e.g. `"debug"`, `"info"`, `"warn"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Pass the compression flag to every invocation. Unset means off; an
    /// explicit `false` still overrides a lower layer during merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<bool>,

    /// Connection timeout in seconds (1 to 3600).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u32>,
}

impl Default for XferConfig {
    fn default() -> Self {
        Self {
            log_level: Some("info".into()),
            compression: None,
            connect_timeout_secs: None,
        }
    }
}

impl XferConfig {
    /// Whether compression is requested.
    pub fn compression_enabled(&self) -> bool {
        self.compression.unwrap_or(false)
    }

    /// Transport flags implied by this config, compression first.
    ///
    /// # Panics
    ///
    /// Panics if `connect_timeout_secs` is `Some(0)`. Run
    /// [`validate_config`] first.
    pub fn transport_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.compression_enabled() {
            args.push(compression_argument().to_string());
        }
        if let Some(secs) = self.connect_timeout_secs {
            args.push(timeout_argument(secs));
        }
        args
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum allowed connect timeout in seconds (one hour).
const MAX_TIMEOUT_SECS: u32 = 3_600;

/// Threshold above which a timeout generates a warning.
const LARGE_TIMEOUT_THRESHOLD: u32 = 300;

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "XFER_LOG_LEVEL";
/// Environment variable overriding `compression`.
pub const ENV_COMPRESSION: &str = "XFER_COMPRESSION";
/// Environment variable overriding `connect_timeout_secs`.
pub const ENV_CONNECT_TIMEOUT: &str = "XFER_CONNECT_TIMEOUT";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load an [`XferConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`XferConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<XferConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => XferConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML string into an [`XferConfig`].
pub fn parse_toml(content: &str) -> Result<XferConfig, ConfigError> {
    toml::from_str::<XferConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `XFER_LOG_LEVEL`
/// - `XFER_COMPRESSION` (`1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`)
/// - `XFER_CONNECT_TIMEOUT` (seconds)
pub fn apply_env_overrides(config: &mut XferConfig) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var(ENV_LOG_LEVEL) {
        config.log_level = Some(val);
    }
    if let Ok(val) = std::env::var(ENV_COMPRESSION) {
        let enabled = parse_bool(&val).ok_or_else(|| invalid_env(ENV_COMPRESSION, &val))?;
        config.compression = Some(enabled);
    }
    if let Ok(val) = std::env::var(ENV_CONNECT_TIMEOUT) {
        let secs = val
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid_env(ENV_CONNECT_TIMEOUT, &val))?;
        config.connect_timeout_secs = Some(secs);
    }
    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid_env(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors (unknown log levels, out-of-range timeouts) are returned as a
/// [`ConfigError::ValidationError`]; soft issues come back as warnings.
pub fn validate_config(config: &XferConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level
        && !VALID_LOG_LEVELS.contains(&level.as_str())
    {
        errors.push(format!("invalid log_level '{level}'"));
    }

    if let Some(t) = config.connect_timeout_secs {
        if t == 0 || t > MAX_TIMEOUT_SECS {
            errors.push(format!(
                "connect_timeout_secs {t} out of range (1..={MAX_TIMEOUT_SECS})"
            ));
        } else if t > LARGE_TIMEOUT_THRESHOLD {
            warnings.push(ConfigWarning::LargeTimeout { secs: t });
        }
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configs; values set in `overlay` win.
pub fn merge_configs(base: XferConfig, overlay: XferConfig) -> XferConfig {
    XferConfig {
        log_level: overlay.log_level.or(base.log_level),
        compression: overlay.compression.or(base.compression),
        connect_timeout_secs: overlay.connect_timeout_secs.or(base.connect_timeout_secs),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
