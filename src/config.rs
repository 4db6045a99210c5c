// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Editor configuration system

use crate::io::stl::DEFAULT_SOLID_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const CONFIG_FILE: &str = "meshedit.toml";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Name written after `solid` / `endsolid` in ASCII output
    pub solid_name: String,
    /// Write binary STL instead of ASCII
    pub binary_output: bool,
    /// Sphere tessellation level when none is given
    pub sphere_level: u32,
    /// Cylinder sector count when none is given
    pub cylinder_sectors: u32,
    /// Origin for generated shapes when none is given
    pub origin: [f32; 3],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            solid_name: DEFAULT_SOLID_NAME.to_string(),
            binary_output: false,
            sphere_level: 12,
            cylinder_sectors: 32,
            origin: [0.0, 0.0, 0.0],
        }
    }
}

impl EditorConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: EditorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// An explicit `path` must exist; otherwise `meshedit.toml` is used when
    /// present and defaults apply when it is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(CONFIG_FILE).exists() => Self::from_file(CONFIG_FILE)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `MESHEDIT_*` overrides from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("MESHEDIT_SOLID_NAME") {
            self.solid_name = name;
        }

        if let Some(binary) = lookup("MESHEDIT_BINARY") {
            self.binary_output = binary.parse().unwrap_or(self.binary_output);
        }

        if let Some(level) = lookup("MESHEDIT_SPHERE_LEVEL") {
            self.sphere_level = level.parse().unwrap_or(self.sphere_level);
        }

        if let Some(sectors) = lookup("MESHEDIT_CYLINDER_SECTORS") {
            self.cylinder_sectors = sectors.parse().unwrap_or(self.cylinder_sectors);
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let file = NamedTempFile::new()?;
        let config = EditorConfig {
            solid_name: "part".into(),
            binary_output: true,
            sphere_level: 6,
            cylinder_sectors: 10,
            origin: [1.0, 2.0, 3.0],
        };
        config.save(file.path())?;
        assert_eq!(EditorConfig::from_file(file.path())?, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let file = NamedTempFile::new()?;
        std::fs::write(file.path(), "sphere_level = 4\n")?;
        let config = EditorConfig::from_file(file.path())?;
        assert_eq!(config.sphere_level, 4);
        assert_eq!(config.solid_name, DEFAULT_SOLID_NAME);
        assert_eq!(config.cylinder_sectors, 32);
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MESHEDIT_SOLID_NAME", "override"),
            ("MESHEDIT_BINARY", "true"),
            ("MESHEDIT_SPHERE_LEVEL", "not a number"),
        ]
        .into_iter()
        .collect();

        let mut config = EditorConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.solid_name, "override");
        assert!(config.binary_output);
        assert_eq!(config.sphere_level, 12);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(EditorConfig::load(Some(Path::new("/nonexistent/meshedit.toml"))).is_err());
    }
}
