//! # Roster Test Harness
//!
//! Builds sessions fed from in-memory text with a captured transcript.

use std::path::Path;

use roster::cli::output::OutputBuffer;
use roster::input::LineSource;
use roster::settings::Settings;
use roster::Session;

/// Answers for one `add` form, in prompt order.
pub fn add_answers(name: &str, position: &str) -> String {
    format!(
        "{name}\n12.25\n-40\n1800\n2023-05-01T09:30:00+02:00\n2025-01-31T18:00:00\n{position}\n\
         1988-11-02T07:15:00\nGREEN\nBLUE\nRUSSIA\n"
    )
}

/// A session reading `input`, saving to `data_file`, with confirmations on.
pub fn session_with(input: &str, data_file: &Path) -> (Session, OutputBuffer) {
    let out = OutputBuffer::new();
    let settings = Settings {
        data_file: data_file.to_path_buf(),
        ..Settings::default()
    };
    let session = Session::new(
        settings,
        LineSource::from_text("<test>", input),
        Box::new(out.clone()),
    );
    (session, out)
}
