//! Shell configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. the TOML file (`--config PATH`, else `<config dir>/quill/config.toml`
//!    when it exists)
//! 3. `QUILL_LOG_LEVEL`
//! 4. command-line flags
//!
//! ```toml
//! prompt = "quill> "
//! line_width = 80
//! log_level = "warn"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use quill_editor::{EditorConfig, MAX_CAPACITY, MIN_CAPACITY, keys::is_printable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{Cli, LogLevel};

/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Directory under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "quill";

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "QUILL_LOG_LEVEL";

/// Prompt used when none is configured.
pub const DEFAULT_PROMPT: &str = "quill> ";

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an unusable value.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Name of the setting.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// The configuration file as written, every key optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    /// Prompt shown before the line.
    pub prompt: Option<String>,
    /// Line width in cells, prompt included.
    pub line_width: Option<usize>,
    /// Log verbosity.
    pub log_level: Option<LogLevel>,
}

impl ConfigToml {
    /// Reads and parses `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parses `text`; `path` is only used in errors.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellConfig {
    /// Prompt shown before the line.
    pub prompt: String,
    /// Line width in cells, prompt included.
    pub line_width: usize,
    /// Log verbosity.
    pub log_level: LogLevel,
    /// File the settings were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            line_width: quill_editor::DEFAULT_CAPACITY,
            log_level: LogLevel::default(),
            source: None,
        }
    }
}

impl ShellConfig {
    /// Applies the keys present in a configuration file.
    pub fn apply_file(&mut self, file: ConfigToml) {
        if let Some(prompt) = file.prompt {
            self.prompt = prompt;
        }
        if let Some(line_width) = file.line_width {
            self.line_width = line_width;
        }
        if let Some(log_level) = file.log_level {
            self.log_level = log_level;
        }
    }

    /// Applies the `QUILL_LOG_LEVEL` value. Unrecognized values are ignored.
    pub fn apply_env_log_level(&mut self, value: Option<&str>) {
        if let Some(level) = value.and_then(LogLevel::from_str_loose) {
            self.log_level = level;
        }
    }

    /// Applies command-line flags.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(prompt) = &cli.prompt {
            self.prompt.clone_from(prompt);
        }
        if let Some(width) = cli.width {
            self.line_width = width;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        } else if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
    }

    /// Checks that the prompt fits the line and is printable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_width < MIN_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "line_width",
                reason: format!("{} is below the minimum of {MIN_CAPACITY}", self.line_width),
            });
        }
        if self.line_width > MAX_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "line_width",
                reason: format!("{} is above the maximum of {MAX_CAPACITY}", self.line_width),
            });
        }
        if let Some(byte) = self.prompt.bytes().find(|&b| !is_printable(b)) {
            return Err(ConfigError::Invalid {
                field: "prompt",
                reason: format!("contains non-printable byte 0x{byte:02x}"),
            });
        }
        if self.prompt.len() + 1 >= self.line_width {
            return Err(ConfigError::Invalid {
                field: "prompt",
                reason: format!(
                    "{} cells leave no room on a line of {}",
                    self.prompt.len(),
                    self.line_width
                ),
            });
        }
        Ok(())
    }

    /// Editor settings derived from this configuration.
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig::default().with_line_width(self.line_width)
    }

    /// Renders the settings as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }
}

/// Default configuration file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE))
}

/// Resolves the configuration from the process environment.
pub fn resolve(cli: &Cli) -> Result<ShellConfig, ConfigError> {
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    resolve_with(cli, env_level.as_deref(), default_config_path())
}

/// Resolves the configuration from explicit inputs.
///
/// An explicit `--config` file must exist; the default location is skipped
/// when absent.
pub fn resolve_with(
    cli: &Cli,
    env_log_level: Option<&str>,
    default_path: Option<PathBuf>,
) -> Result<ShellConfig, ConfigError> {
    let mut config = ShellConfig::default();

    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => default_path.filter(|path| path.is_file()),
    };
    if let Some(path) = path {
        config.apply_file(ConfigToml::load(&path)?);
        config.source = Some(path);
    }

    config.apply_env_log_level(env_log_level);
    config.apply_cli(cli);
    config.validate()?;
    Ok(config)
}
