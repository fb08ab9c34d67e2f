use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "scramble")
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|pd| pd.config_dir().join("config.json"))
    }

    pub fn log_dir() -> PathBuf {
        if let Some(pd) = Self::project_dirs() {
            pd.cache_dir().join("logs")
        } else {
            std::env::temp_dir().join("scramble").join("logs")
        }
    }
}
