use std::{env, fs, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";
const SETTINGS_PATH_VAR: &str = "TASKDECK_SETTINGS";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    pub jwt_expiration_in_minutes: i64,
    pub default_admin_username: String,
    pub default_admin_password: String,
    #[serde(default)]
    pub static_files_dir: Option<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Settings {
    /// Load `settings.json`, or the file named by `TASKDECK_SETTINGS`.
    pub fn load() -> Result<Settings, SettingsError> {
        let path = env::var_os(SETTINGS_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME));
        Settings::load_from(path)
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Settings, SettingsError> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse { path, source })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }
}
