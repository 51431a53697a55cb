use crate::app_dirs::AppDirs;
use crate::deck::Direction;
use crate::selection::PolicyKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const MIN_ANSWERS: usize = 1;
pub const MAX_ANSWERS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub direction: Direction,
    pub show_stats: bool,
    pub policy: PolicyKind,
    pub answer_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            show_stats: true,
            policy: PolicyKind::Weakest,
            answer_count: 4,
        }
    }
}

impl Settings {
    /// Brings hand-edited values back into range.
    pub fn clamped(mut self) -> Self {
        self.answer_count = self.answer_count.clamp(MIN_ANSWERS, MAX_ANSWERS);
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::settings_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Settings {
        let Ok(bytes) = fs::read(&self.path) else {
            return Settings::default();
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring unreadable settings: {e}");
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(settings).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
