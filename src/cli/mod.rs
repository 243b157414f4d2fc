//! The Roster Command-Line Interface.
//!
//! Wires the process together: arguments, logging, settings, the startup load of the data
//! file and the interactive loop.

use std::process;

use clap::Parser;
use miette::Report;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::cli::args::RosterArgs;
use crate::cli::output::ConsoleSink;
use crate::errors::CodecError;
use crate::input::LineSource;
use crate::repl::run_repl;
use crate::session::Session;
use crate::settings::Settings;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = RosterArgs::parse();
    init_logging(args.verbose);

    let settings = match &args.config {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!("{:?}", Report::new(err));
                process::exit(2);
            }
        },
        None => Settings::default(),
    };
    let settings = args.apply(settings);
    tracing::debug!(?settings, "settings resolved");

    let output = Box::new(ConsoleSink::new(settings.color));
    let mut session = Session::new(settings, LineSource::stdin(), output);
    load_data_file(&mut session);

    if let Err(err) = run_repl(&mut session) {
        eprintln!("{:?}", Report::new(err));
        process::exit(1);
    }
}

/// Stderr subscriber. `RUST_LOG` wins; otherwise verbosity picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the configured data file if it exists. Problems are reported; the session starts
/// either way.
fn load_data_file(session: &mut Session) {
    let path = session.settings.data_file.clone();
    match session.load(&path) {
        Ok(report) => {
            session.say(format!(
                "Loaded {} workers from '{}'",
                report.loaded,
                path.display()
            ));
            for skipped in &report.skipped {
                session.complain(format!(
                    "worker #{} skipped: {}",
                    skipped.index, skipped.error
                ));
            }
        }
        Err(CodecError::Missing { .. }) => {
            tracing::info!(path = %path.display(), "no data file, starting empty");
        }
        Err(err) => {
            eprintln!("{:?}", Report::new(err));
            session.complain("starting with an empty collection");
        }
    }
}
