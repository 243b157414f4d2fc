//! Defines the command-line arguments for the Roster console.
//!
//! This module uses the `clap` crate with its "derive" feature. Every flag overrides the
//! matching field of the YAML settings file.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::settings::{ColorWhen, Settings};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "roster",
    version,
    about = "Interactive console manager for a collection of worker records."
)]
pub struct RosterArgs {
    /// Data file loaded at startup and written by `save`.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// YAML settings file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not ask before `clear`, `save` and `exit`.
    #[arg(long)]
    pub no_confirm: bool,

    /// When to color output.
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorWhen>,

    /// Log more to stderr (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl RosterArgs {
    /// Applies the flags that were given on top of `settings`.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(file) = &self.file {
            settings.data_file = file.clone();
        }
        if self.no_confirm {
            settings.confirm = false;
        }
        if let Some(color) = self.color {
            settings.color = color;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let args = RosterArgs::parse_from(["roster", "--file", "staff.xml", "--no-confirm", "-vv"]);
        let settings = args.apply(Settings::default());
        assert_eq!(settings.data_file, PathBuf::from("staff.xml"));
        assert!(!settings.confirm);
        assert_eq!(settings.color, ColorWhen::Auto);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn absent_flags_keep_settings() {
        let args = RosterArgs::parse_from(["roster"]);
        let base = Settings {
            confirm: false,
            color: ColorWhen::Never,
            ..Settings::default()
        };
        assert_eq!(args.apply(base.clone()), base);
    }
}
