//! Session configuration.
//!
//! Settings come from an optional YAML file; every field has a default, so an empty file (or
//! no file at all) is valid. Command-line flags are applied on top by the CLI.

use std::{fs, path::Path, path::PathBuf};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DATA_FILE: &str = "workers.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorWhen {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// File loaded at startup and used by `save` without an argument.
    pub data_file: PathBuf,
    /// Ask before `clear`, `save` and `exit`.
    pub confirm: bool,
    pub color: ColorWhen,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            confirm: true,
            color: ColorWhen::Auto,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SettingsError {
    #[error("cannot read config '{}': {source}", .path.display())]
    #[diagnostic(code(roster::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    #[diagnostic(code(roster::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Settings {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_yields_defaults() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let settings = Settings::from_yaml("confirm: false\ncolor: never\n").unwrap();
        assert!(!settings.confirm);
        assert_eq!(settings.color, ColorWhen::Never);
        assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_yaml("colour: never\n").is_err());
    }
}
