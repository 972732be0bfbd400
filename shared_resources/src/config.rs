use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crossterm::event::KeyCode;
use tracing::Level;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("hotkey \"{0}\" is neither a function key (F1-F12) nor a single character")]
    InvalidHotkey(String),
    #[error("log level \"{0}\" is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct KeyboardConfigFile {
    pub hotkey: String,
    pub poll_period_ms: u64,
}

impl Default for KeyboardConfigFile {
    fn default() -> Self {
        KeyboardConfigFile {
            hotkey: String::from("F4"),
            poll_period_ms: 25,
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingConfigFile {
    pub level: String,
}

impl Default for LoggingConfigFile {
    fn default() -> Self {
        LoggingConfigFile {
            level: String::from("warn"),
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub keyboard: KeyboardConfigFile,
    pub logging: LoggingConfigFile,
}

/// Key that triggers writing the next sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    code: KeyCode,
}

impl Hotkey {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let text = text.trim();
        let mut chars = text.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            (Some('F' | 'f'), Some(_)) => match text[1..].parse::<u8>() {
                Ok(num @ 1..=12) => KeyCode::F(num),
                _ => return Err(ConfigError::InvalidHotkey(text.to_owned())),
            },
            _ => return Err(ConfigError::InvalidHotkey(text.to_owned())),
        };
        Ok(Hotkey { code })
    }

    pub fn code(&self) -> KeyCode {
        self.code
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            KeyCode::F(num) => write!(f, "F{num}"),
            KeyCode::Char(c) => write!(f, "{c}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyboardConfig {
    pub hotkey: Hotkey,
    pub poll_period: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
}

#[derive(Debug, Clone)]
pub struct MacroConfig {
    pub keyboard: KeyboardConfig,
    pub logging: LoggingConfig,
}

pub fn parse_log_level(text: &str) -> Result<Level, ConfigError> {
    Level::from_str(text.trim()).map_err(|_| ConfigError::InvalidLogLevel(text.to_owned()))
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_config_file(path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let config_contents = match path {
        Some(path) => read_file(path)?,
        None => match fs::read_to_string(CONFIG_FILE_PATH) {
            Ok(content) => content,
            Err(_) => match fs::read_to_string(FALLBACK_CONFIG_FILE_PATH) {
                Ok(content) => {
                    tracing::info!("No configuration file provided, using {FALLBACK_CONFIG_FILE_PATH}");
                    content
                }
                Err(_) => {
                    tracing::info!("No configuration file found, using default settings");
                    return Ok(ConfigFile::default());
                }
            },
        },
    };
    Ok(serde_json::from_str(&config_contents)?)
}

impl MacroConfig {
    /// Loads `path` if given, otherwise `config.json`, then `_config.json`,
    /// then the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_file(read_config_file(path)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_file(serde_json::from_str(json)?)
    }

    pub fn from_file(config_file: ConfigFile) -> Result<Self, ConfigError> {
        Ok(MacroConfig {
            keyboard: KeyboardConfig {
                hotkey: Hotkey::parse(&config_file.keyboard.hotkey)?,
                poll_period: Duration::from_millis(config_file.keyboard.poll_period_ms),
            },
            logging: LoggingConfig {
                level: parse_log_level(&config_file.logging.level)?,
            },
        })
    }
}
