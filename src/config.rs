//! Configuration persistence for capture settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::render::redact::DEFAULT_BLOCKS;

/// Capture settings persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Whether to show the loupe while tracking the pointer
    pub magnifier_enabled: bool,
    /// Pixelation blocks along a redaction target's longer side
    #[serde(default = "default_pixelation_blocks")]
    pub pixelation_blocks: u32,
    /// Whether the uploaded URL is copied to the clipboard
    pub copy_url_to_clipboard: bool,
}

fn default_pixelation_blocks() -> u32 {
    DEFAULT_BLOCKS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Loupe on by default for precise selection
            magnifier_enabled: true,
            pixelation_blocks: default_pixelation_blocks(),
            // The original workflow is upload-then-paste
            copy_url_to_clipboard: true,
        }
    }
}

impl Config {
    const DIR_NAME: &'static str = "pearsnap";
    const FILE_NAME: &'static str = "config.json";

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::DIR_NAME).join(Self::FILE_NAME))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("no config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load from a specific path, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("error parsing config, using defaults: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            log::error!("no config directory available, not saving");
            return;
        };
        self.save_to(&path);
    }

    /// Save to a specific path
    pub fn save_to(&self, path: &Path) {
        let write = || -> anyhow::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let raw = serde_json::to_string_pretty(self)?;
            std::fs::write(path, raw)?;
            Ok(())
        };
        if let Err(err) = write() {
            log::error!("failed to save config: {err}");
        }
    }
}
