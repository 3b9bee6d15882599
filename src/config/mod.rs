use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub mod api;

pub use api::{ApiConfig, ApiConfigPatch, EndpointKind};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Path opened at startup (defaults to `/`)
    #[serde(default)]
    pub start_path: Option<String>,

    /// Local storage database; defaults to the data directory
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn start_path(&self) -> &str {
        self.start_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .unwrap_or("/")
    }
}

/// Read the config file. A missing file gives the defaults; an invalid
/// one is returned as an error so the caller can report it once logging
/// is up.
pub fn load() -> Result<Config, toml::de::Error> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    match fs::read_to_string(&path) {
        Ok(content) => parse(&content),
        Err(_) => Ok(Config::default()),
    }
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("CAPA_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("capa").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("capa").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "capa", "capa")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("capa"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("capa"));
    }
    directories::ProjectDirs::from("io", "capa", "capa").map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn storage_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("storage.sqlite3"))
}

pub fn log_file_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("capa.log"))
}

/// Open `path` for appending, creating its directory first
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::options().create(true).append(true).open(path)
}
