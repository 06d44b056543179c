use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AudioSettings {
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub mute_all: bool,
    pub music_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_volume: 1.0,
            sfx_volume: 1.0,
            mute_all: false,
            music_enabled: true,
        }
    }
}

impl AudioSettings {
    pub fn clamp(mut self) -> Self {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    pub fn effective_music_gain(self) -> f32 {
        if self.mute_all || !self.music_enabled {
            0.0
        } else {
            self.music_volume
        }
    }

    pub fn effective_sfx_gain(self) -> f32 {
        if self.mute_all {
            0.0
        } else {
            self.sfx_volume
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameplaySettings {
    pub show_countdown: bool,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            show_countdown: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub gameplay: GameplaySettings,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            audio: AudioSettings::default(),
            gameplay: GameplaySettings::default(),
        }
    }
}

impl PlayerSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.audio = self.audio.clamp();
        self
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("YULE2048_SETTINGS_PATH") {
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
        path.push("settings.json");
        Self { path }
    }

    pub fn load(&self) -> PlayerSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            return PlayerSettings::default();
        };
        serde_json::from_slice::<PlayerSettings>(&bytes)
            .map(PlayerSettings::sanitized)
            .unwrap_or_else(|_| PlayerSettings::default())
    }

    pub fn save(&self, settings: &PlayerSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
