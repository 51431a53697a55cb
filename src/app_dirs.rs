use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "wordrace";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Directory holding the words file and both score files.
    pub fn data_dir() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|proj_dirs| proj_dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn settings_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|proj_dirs| proj_dirs.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("wordrace_settings.json"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("wordrace.log")
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|proj_dirs| proj_dirs.data_local_dir().join("wordrace.log"))
                .unwrap_or_else(|| PathBuf::from("wordrace.log"))
        }
    }
}
