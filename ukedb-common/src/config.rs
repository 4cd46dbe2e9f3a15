//! Configuration loading and root folder resolution
//!
//! Two files configure a run:
//! 1. **Bootstrap TOML** (`ukedb.toml`): root folder, fetch pool size,
//!    yt-dlp location, logging
//! 2. **Channel list** (`<root>/data/channels.toml`): the channels to import
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. `UKEDB_ROOT_FOLDER` environment variable
//! 3. `root_folder` in the TOML config file
//! 4. OS-dependent default (fallback)

use crate::models::ChannelList;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "UKEDB_ROOT_FOLDER";

/// Default number of concurrent channel downloads
pub const DEFAULT_WORKERS: usize = 6;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Root folder holding `data/` and the raw `.json/` directory
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Size of the channel download pool
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// yt-dlp executable (name on PATH or absolute path)
    #[serde(default = "default_yt_dlp")]
    pub yt_dlp_path: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            workers: DEFAULT_WORKERS,
            yt_dlp_path: default_yt_dlp(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_yt_dlp() -> String {
    "yt-dlp".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load the bootstrap config.
///
/// An explicitly requested file must exist. Without one, the platform
/// config file is used when present; otherwise defaults apply with a warning.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                warn!("No ukedb.toml found, using built-in defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config: TomlConfig = toml::from_str(&content)?;
    if config.workers == 0 {
        return Err(Error::Config("workers must be at least 1".to_string()));
    }

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Platform config file location (`<config_dir>/ukedb/ukedb.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ukedb").join("ukedb.toml"))
}

/// Resolve the root folder following the priority order above
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent default
    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("ukedb"))
        .unwrap_or_else(|| PathBuf::from("./ukedb_data"))
}

/// Every file location a run touches, derived from the root folder
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub raw_dir: PathBuf,
    pub catalog_csv: PathBuf,
    pub published_json: PathBuf,
    pub channels_toml: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data_dir = root.join("data");
        Self {
            raw_dir: root.join(".json"),
            catalog_csv: data_dir.join("tutorials.csv"),
            published_json: data_dir.join("published.json"),
            channels_toml: data_dir.join("channels.toml"),
            data_dir,
            root,
        }
    }

    /// Create the data and raw directories if missing
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.raw_dir)?;
        Ok(())
    }
}

/// Load the channel list
pub fn load_channels(path: &Path) -> Result<ChannelList> {
    if !path.exists() {
        return Err(Error::NotFound(format!("channel list {}", path.display())));
    }
    let content = std::fs::read_to_string(path)?;
    let channels: ChannelList = toml::from_str(&content)?;
    debug!(
        path = %path.display(),
        channels = channels.channels.len(),
        "Loaded channel list"
    );
    Ok(channels)
}

/// Write the channel list back (atomic)
pub fn write_channels(channels: &ChannelList, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(channels)?;
    write_atomic(path, content.as_bytes())
}

/// Write a file atomically: write `<path>.tmp`, then rename over `path`.
///
/// Readers never observe a half-written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = (|| -> Result<()> {
        let mut file = std::fs::File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}
