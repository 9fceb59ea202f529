use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::core::particles::DEFAULT_PARTICLE_COUNT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Portfolio Hero".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Host settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub transparent: bool,
    pub particle_count: usize,
    pub seed: Option<u64>,
    pub antialias: bool,
    pub window: WindowSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transparent: true,
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: None,
            antialias: true,
            window: WindowSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid settings JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Defaults, then the `--config` file if given, then flags
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.apply_cli(cli))
    }

    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if cli.opaque {
            self.transparent = false;
        }
        if cli.no_msaa {
            self.antialias = false;
        }
        if let Some(count) = cli.particles {
            self.particle_count = count;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(width) = cli.width {
            self.window.width = width;
        }
        if let Some(height) = cli.height {
            self.window.height = height;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn partial_window_keeps_other_fields() {
        let settings = Settings::from_json(r#"{"window": {"width": 640}}"#).unwrap();
        assert_eq!(settings.window.width, 640);
        assert_eq!(settings.window.height, 720);
        assert_eq!(settings.window.title, "Portfolio Hero");
    }

    #[test]
    fn cli_overrides_file() {
        let file = Settings::from_json(r#"{"particle_count": 10, "seed": 3}"#).unwrap();
        let cli = Cli {
            particles: Some(99),
            opaque: true,
            ..Cli::default()
        };
        let merged = file.apply_cli(&cli);
        assert_eq!(merged.particle_count, 99);
        assert_eq!(merged.seed, Some(3));
        assert!(!merged.transparent);
        assert!(merged.antialias);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Settings::from_json("{ particle_count: }").is_err());
    }
}
