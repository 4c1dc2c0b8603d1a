//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.bitbench/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::radix::MAX_WIDTH;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BitbenchConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub base: PadConfig,
    #[serde(default)]
    pub xor: PadConfig,
    #[serde(default)]
    pub boolean: BooleanConfig,
    #[serde(default)]
    pub kmap: KmapConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PadConfig {
    pub pad_bits: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BooleanConfig {
    pub strict: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KmapConfig {
    pub variables: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PAD_BITS: usize = 32;
pub const DEFAULT_KMAP_VARIABLES: usize = 3;
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_FILE: &str = "bitbench.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub log_level: log::LevelFilter,
    pub log_file: Option<PathBuf>,
    pub base_pad_bits: usize,
    pub xor_pad_bits: usize,
    pub strict_boolean: bool,
    pub kmap_variables: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&BitbenchConfig::default(), &CliOverrides::default())
    }
}

/// Values supplied on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub strict_boolean: Option<bool>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.bitbench/`, the home of the config, log and saved layout.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".bitbench"))
}

/// Returns the path to `~/.bitbench/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.bitbench/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BitbenchConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<BitbenchConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(BitbenchConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(BitbenchConfig::default());
    }

    let contents = fs::read_to_string(&path)?;
    let config: BitbenchConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# bitbench configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "info"                 # "off", "error", "warn", "info", "debug", "trace"
#                                    # Or set BITBENCH_LOG_LEVEL
# log_file = "bitbench.log"          # Path relative to ~/.bitbench/

# [base]
# pad_bits = 32                      # Width of the padded binary readout

# [xor]
# pad_bits = 32

# [boolean]
# strict = false                     # Show parse errors instead of treating
#                                    # malformed expressions as false.
#                                    # Or set BITBENCH_STRICT_BOOLEAN=1

# [kmap]
# variables = 3                      # 2, 3 or 4
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &BitbenchConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |name| std::env::var(name).ok())
}

fn resolve_with_env<F>(config: &BitbenchConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("BITBENCH_LOG_LEVEL"))
        .or_else(|| config.general.log_level.clone())
        .and_then(|s| parse_level(&s))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Strict Boolean parsing: CLI → env → config → default
    let strict_boolean = cli
        .strict_boolean
        .or_else(|| env("BITBENCH_STRICT_BOOLEAN").map(|v| parse_flag(&v)))
        .or(config.boolean.strict)
        .unwrap_or(false);

    let log_file = data_dir().map(|dir| {
        let name = config
            .general
            .log_file
            .as_deref()
            .unwrap_or(DEFAULT_LOG_FILE);
        dir.join(name)
    });

    let kmap_variables = match config.kmap.variables {
        Some(v @ 2..=4) => v,
        Some(v) => {
            warn!("kmap.variables = {} is out of range, using {}", v, DEFAULT_KMAP_VARIABLES);
            DEFAULT_KMAP_VARIABLES
        }
        None => DEFAULT_KMAP_VARIABLES,
    };

    ResolvedConfig {
        log_level,
        log_file,
        base_pad_bits: config.base.pad_bits.unwrap_or(DEFAULT_PAD_BITS).clamp(1, MAX_WIDTH),
        xor_pad_bits: config.xor.pad_bits.unwrap_or(DEFAULT_PAD_BITS).clamp(1, MAX_WIDTH),
        strict_boolean,
        kmap_variables,
    }
}

fn parse_level(s: &str) -> Option<log::LevelFilter> {
    match s.parse() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Unknown log level '{}', ignoring", s);
            None
        }
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = BitbenchConfig::default();
        assert!(config.general.log_level.is_none());
        assert!(config.kmap.variables.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&BitbenchConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.base_pad_bits, DEFAULT_PAD_BITS);
        assert_eq!(resolved.xor_pad_bits, DEFAULT_PAD_BITS);
        assert!(!resolved.strict_boolean);
        assert_eq!(resolved.kmap_variables, DEFAULT_KMAP_VARIABLES);
    }

    #[test]
    fn test_resolve_caps_pad_bits() {
        let config = BitbenchConfig {
            base: PadConfig { pad_bits: Some(70_000) },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_pad_bits, MAX_WIDTH);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = BitbenchConfig {
            general: GeneralConfig {
                log_level: Some("debug".to_string()),
                log_file: Some("custom.log".to_string()),
            },
            base: PadConfig { pad_bits: Some(16) },
            xor: PadConfig { pad_bits: Some(0) },
            boolean: BooleanConfig { strict: Some(true) },
            kmap: KmapConfig { variables: Some(4) },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, log::LevelFilter::Debug);
        assert!(resolved.log_file.is_none_or(|p| p.ends_with("custom.log")));
        assert_eq!(resolved.base_pad_bits, 16);
        assert_eq!(resolved.xor_pad_bits, 1);
        assert!(resolved.strict_boolean);
        assert_eq!(resolved.kmap_variables, 4);
    }

    #[test]
    fn test_env_overrides_file_and_cli_overrides_env() {
        let config = BitbenchConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
                log_file: None,
            },
            boolean: BooleanConfig { strict: Some(false) },
            ..Default::default()
        };
        let env = |name: &str| match name {
            "BITBENCH_LOG_LEVEL" => Some("trace".to_string()),
            "BITBENCH_STRICT_BOOLEAN" => Some("1".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.log_level, log::LevelFilter::Trace);
        assert!(resolved.strict_boolean);

        let cli = CliOverrides {
            log_level: Some("error".to_string()),
            strict_boolean: Some(false),
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.log_level, log::LevelFilter::Error);
        assert!(!resolved.strict_boolean);
    }

    #[test]
    fn test_out_of_range_kmap_variables_fall_back() {
        let config = BitbenchConfig {
            kmap: KmapConfig { variables: Some(7) },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.kmap_variables, DEFAULT_KMAP_VARIABLES);
    }

    #[test]
    fn test_unknown_log_level_ignored() {
        let cli = CliOverrides {
            log_level: Some("loud".to_string()),
            strict_boolean: None,
        };
        let resolved = resolve_with_env(&BitbenchConfig::default(), &cli, no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[xor]
pad_bits = 8
"#;
        let config: BitbenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.xor.pad_bits, Some(8));
        assert!(config.base.pad_bits.is_none());
        assert!(config.boolean.strict.is_none());
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r#"
[general]
log_level = "debug"
log_file = "bb.log"

[base]
pad_bits = 64

[boolean]
strict = true

[kmap]
variables = 2
"#;
        let config: BitbenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_file.as_deref(), Some("bb.log"));
        assert_eq!(config.base.pad_bits, Some(64));
        assert_eq!(config.boolean.strict, Some(true));
        assert_eq!(config.kmap.variables, Some(2));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let result: Result<BitbenchConfig, _> = toml::from_str("[base]\npad_bits = \"wide\"");
        assert!(result.is_err());
    }
}
