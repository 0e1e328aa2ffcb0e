use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr};

use crate::constants::BEST_SCORE_FILE;

/// Best score persisted as a single JSON integer.
#[derive(Debug, Clone)]
pub struct BestScoreStore {
    path: PathBuf,
}

impl BestScoreStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        BestScoreStore { path: dir.as_ref().join(BEST_SCORE_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable data counts as no best score yet.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(raw.trim()).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt best score in {}: {e}", self.path.display());
                0
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => {
                log::warn!("Unable to read {}: {e}", self.path.display());
                0
            },
        }
    }

    pub fn save(&self, best: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(&best)?;
        fs::write(&self.path, raw).wrap_err_with(|| format!("Unable to write {}", self.path.display()))?;
        log::debug!("saved best score {best}");
        Ok(())
    }
}
