//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "CDMP_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "cdmp.db";

/// Default API listen port
pub const DEFAULT_PORT: u16 = 5780;

/// Optional settings read from `config.toml`
///
/// Every key is optional; a missing file or a missing key falls back to the
/// compiled default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Folder holding the database
    pub root_folder: Option<PathBuf>,
    /// API listen port
    pub port: Option<u16>,
    /// Tracing filter directive (e.g. "info", "cdmp_api=debug")
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config.toml: {}", e)))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the platform config file if one exists
    ///
    /// A file that exists but fails to parse is logged and ignored so that a
    /// typo never prevents startup.
    pub fn load_default() -> Option<Self> {
        let path = config_file_path()?;
        match Self::load(&path) {
            Ok(config) => {
                debug!("Loaded configuration from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Root folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    config: Option<&TomlConfig>,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(root_folder) = config.and_then(|c| c.root_folder.as_ref()) {
        return root_folder.clone();
    }

    default_root_folder()
}

/// Create the root folder if needed and return the database path inside it
pub fn prepare_root_folder(root_folder: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root_folder)?;
    Ok(database_path(root_folder))
}

/// Database path for a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

/// Locate the platform config file
///
/// Linux checks `~/.config/cdmp/config.toml` then `/etc/cdmp/config.toml`.
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("cdmp").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/cdmp/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("cdmp"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/cdmp"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("cdmp"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/cdmp"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("cdmp"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\cdmp"))
    } else {
        PathBuf::from("./cdmp_data")
    }
}
