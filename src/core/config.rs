//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → CLI flags.
//!
//! Config lives at `~/.tally/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Open the history panel at startup.
    pub show_history: Option<bool>,
    /// Open the memory panel at startup.
    pub show_memory: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    pub level: Option<LogLevel>,
}

/// Verbosity of the debug log file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_filter(self) -> simplelog::LevelFilter {
        use simplelog::LevelFilter;
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "tally.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub show_history: bool,
    pub show_memory: bool,
    pub log_file: PathBuf,
    pub log_level: LogLevel,
}

/// CLI flags that override the config file (None / false = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub show_history: bool,
    pub show_memory: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tally/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tally").join("config.toml"))
}

/// Load config from `~/.tally/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TallyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TallyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TallyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TallyConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TallyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Tally Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → CLI flags.

# [general]
# show_history = false    # Open the history panel at startup
# show_memory = false     # Open the memory panel at startup

# [logging]
# file = "tally.log"      # Debug log path (the terminal itself stays clean)
# level = "info"          # "off", "error", "warn", "info", "debug"
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

/// Resolve the final config by collapsing: defaults → config file → CLI.
pub fn resolve(config: &TallyConfig, cli: &CliOverrides) -> ResolvedConfig {
    let show_history = cli.show_history || config.general.show_history.unwrap_or(false);
    let show_memory = cli.show_memory || config.general.show_memory.unwrap_or(false);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let log_level = cli
        .log_level
        .or(config.logging.level)
        .unwrap_or_default();

    ResolvedConfig {
        show_history,
        show_memory,
        log_file,
        log_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TallyConfig::default();
        assert!(config.general.show_history.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&TallyConfig::default(), &CliOverrides::default());
        assert!(!resolved.show_history);
        assert!(!resolved.show_memory);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(resolved.log_level, LogLevel::Info);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TallyConfig {
            general: GeneralConfig {
                show_history: Some(true),
                show_memory: Some(true),
            },
            logging: LoggingConfig {
                file: Some(PathBuf::from("/tmp/t.log")),
                level: Some(LogLevel::Debug),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert!(resolved.show_history);
        assert!(resolved.show_memory);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/t.log"));
        assert_eq!(resolved.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_resolve_cli_flags_win() {
        let config = TallyConfig {
            logging: LoggingConfig {
                file: Some(PathBuf::from("from-file.log")),
                level: Some(LogLevel::Warn),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            show_history: true,
            show_memory: false,
            log_file: Some(PathBuf::from("from-cli.log")),
            log_level: Some(LogLevel::Debug),
        };
        let resolved = resolve(&config, &cli);
        assert!(resolved.show_history);
        assert_eq!(resolved.log_file, PathBuf::from("from-cli.log"));
        assert_eq!(resolved.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
show_history = true
"#;
        let config: TallyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.show_history, Some(true));
        assert!(config.general.show_memory.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
show_history = true
show_memory = false

[logging]
file = "debug.log"
level = "debug"
"#;
        let config: TallyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.show_history, Some(true));
        assert_eq!(config.general.show_memory, Some(false));
        assert_eq!(config.logging.file.as_deref(), Some(std::path::Path::new("debug.log")));
        assert_eq!(config.logging.level, Some(LogLevel::Debug));
    }
}
