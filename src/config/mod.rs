/// Configuration management for the presentation builder store
///
/// Handles the local service bind address and the location of the database file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory name used under the per-user data directory
const APP_DIR_NAME: &str = "presentation-builder";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Local service configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// Local HTTP service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, loopback by default since only the local UI talks to it
    pub host: String,
    /// Port number
    pub port: u16,
}

/// Location of the embedded database file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding the database file (created on startup if missing)
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`
    pub file_name: String,
}

impl DatabaseConfig {
    /// Full path of the database file
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR overrides
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("PRESENTATION_BUILDER_HOST")
                    .unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("PRESENTATION_BUILDER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3004),
            },
            database: DatabaseConfig {
                data_dir: std::env::var_os("PRESENTATION_BUILDER_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_dir),
                file_name: "presentation-builder.db".to_string(),
            },
        }
    }
}

/// Per-user application data directory
///
/// Checks XDG_DATA_HOME, then APPDATA (Windows), then $HOME/.local/share.
/// Falls back to a relative `data` directory when none of them is set.
fn default_data_dir() -> PathBuf {
    let lookup = |key: &str| std::env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from);
    user_data_dir(lookup)
}

fn user_data_dir(lookup: impl Fn(&str) -> Option<PathBuf>) -> PathBuf {
    if let Some(dir) = lookup("XDG_DATA_HOME").or_else(|| lookup("APPDATA")) {
        return dir.join(APP_DIR_NAME);
    }
    match lookup("HOME") {
        Some(home) => home.join(".local").join("share").join(APP_DIR_NAME),
        None => PathBuf::from("data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<PathBuf> {
        let map: HashMap<String, PathBuf> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), PathBuf::from(v)))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn xdg_data_home_wins() {
        let dir = user_data_dir(env(&[("XDG_DATA_HOME", "/xdg"), ("HOME", "/home/u")]));
        assert_eq!(dir, PathBuf::from("/xdg/presentation-builder"));
    }

    #[test]
    fn home_fallback() {
        let dir = user_data_dir(env(&[("HOME", "/home/u")]));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share/presentation-builder"));
    }

    #[test]
    fn relative_fallback_without_env() {
        assert_eq!(user_data_dir(env(&[])), PathBuf::from("data"));
    }

    #[test]
    fn database_path_joins_dir_and_file() {
        let db = DatabaseConfig {
            data_dir: PathBuf::from("/tmp/pb"),
            file_name: "presentation-builder.db".to_string(),
        };
        assert_eq!(db.database_path(), PathBuf::from("/tmp/pb/presentation-builder.db"));
    }
}
