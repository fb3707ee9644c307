use crate::flower::{ColorParseError, Rgb, RAINBOW};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

/// User configuration, loaded from an optional YAML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Frames per second for the animation loop.
    #[serde(default = "default_fps")]
    pub(crate) fps: u32,
    /// Replacement for the rainbow palette: exactly 8 `#rrggbb` colors.
    #[serde(default)]
    pub(crate) palette: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self { fps: default_fps(), palette: None }
    }
}

fn default_fps() -> u32 {
    30
}

/// Errors that can occur when loading configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("palette must list exactly 8 colors, found {0}")]
    PaletteSize(usize),

    #[error(transparent)]
    Color(#[from] ColorParseError),
}

impl Config {
    /// Load configuration from `path`, or from the default location when no
    /// path is given. A missing default file yields the defaults; an
    /// explicitly requested file must exist.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// The palette the flower will use: the configured override, validated,
    /// or the built-in rainbow.
    pub(crate) fn resolve_palette(&self) -> Result<[Rgb; 8], ConfigError> {
        let Some(entries) = &self.palette else {
            return Ok(*RAINBOW);
        };
        if entries.len() != 8 {
            return Err(ConfigError::PaletteSize(entries.len()));
        }
        let mut palette = [Rgb::BLACK; 8];
        for (slot, entry) in palette.iter_mut().zip(entries) {
            *slot = Rgb::from_hex(entry)?;
        }
        Ok(palette)
    }
}

/// Platform default config file location.
fn default_config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "bloom")?;
    Some(dirs.config_dir().join("config.yaml"))
}
