use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk shape of the best-score file. Versioned so a future format
/// change can migrate instead of silently resetting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct BestScoreFile {
    #[serde(default = "default_version")]
    version: u32,
    best: u32,
}

fn default_version() -> u32 {
    1
}

/// Persists the single best-score scalar across runs.
///
/// Missing or corrupt files read as 0; a fresh install simply has no best
/// yet.
#[derive(Debug, Clone)]
pub struct BestScoreStore {
    path: PathBuf,
}

impl BestScoreStore {
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("YULE2048_BEST_PATH") {
            return Self {
                path: PathBuf::from(explicit),
            };
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("yule2048");
        path.push("best_score.json");
        Self { path }
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> u32 {
        let Ok(bytes) = fs::read(&self.path) else {
            return 0;
        };
        serde_json::from_slice::<BestScoreFile>(&bytes)
            .map(|file| file.best)
            .unwrap_or(0)
    }

    pub fn save(&self, best: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = BestScoreFile {
            version: default_version(),
            best,
        };
        let text = serde_json::to_string_pretty(&file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        atomic_write(&self.path, text.as_bytes())
    }
}

/// Write-then-rename so a crash mid-save never truncates the previous best.
fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            // Rename can fail across filesystems; fall back to copy.
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}
