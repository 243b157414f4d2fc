//! Handles all user-facing output for the console.
//!
//! Commands never print directly; they talk to an [`OutputSink`]. The console gets a
//! colorized sink, tests get a buffer they can inspect afterwards.

use std::{cell::RefCell, io::Write, rc::Rc};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::session::OutputSink;
use crate::settings::ColorWhen;

// ============================================================================
// CONSOLE SINK
// ============================================================================

/// Writes messages to stdout and errors to stderr, colorized when the terminal allows it.
pub struct ConsoleSink {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl ConsoleSink {
    pub fn new(when: ColorWhen) -> Self {
        let choice = color_choice(when);
        Self {
            stdout: StandardStream::stdout(choice),
            stderr: StandardStream::stderr(choice),
        }
    }
}

impl OutputSink for ConsoleSink {
    fn emit(&mut self, text: &str) {
        let _ = writeln!(self.stdout, "{text}");
    }

    fn error(&mut self, text: &str) {
        let _ = self.stdout.flush();
        let _ = self
            .stderr
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(self.stderr, "error:");
        let _ = self.stderr.reset();
        let _ = writeln!(self.stderr, " {text}");
    }

    fn prompt(&mut self, text: &str) {
        let _ = self
            .stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
        let _ = write!(self.stdout, "{text}");
        let _ = self.stdout.reset();
        let _ = self.stdout.flush();
    }
}

fn color_choice(when: ColorWhen) -> ColorChoice {
    match when {
        ColorWhen::Always => ColorChoice::Always,
        ColorWhen::Never => ColorChoice::Never,
        ColorWhen::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
        ColorWhen::Auto => ColorChoice::Never,
    }
}

// ============================================================================
// OUTPUT BUFFER
// ============================================================================

/// Everything written to an [`OutputBuffer`], split by channel.
#[derive(Debug, Default)]
struct Transcript {
    messages: Vec<String>,
    errors: Vec<String>,
    prompts: Vec<String>,
}

/// Collects output in memory for testing or programmatic capture.
///
/// Clones share one transcript, so a test can keep a handle while the session owns the sink.
#[derive(Debug, Default, Clone)]
pub struct OutputBuffer {
    transcript: Rc<RefCell<Transcript>>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.transcript.borrow().messages.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.transcript.borrow().errors.clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.transcript.borrow().prompts.clone()
    }

    /// True when any message line contains `needle`.
    pub fn said(&self, needle: &str) -> bool {
        self.transcript
            .borrow()
            .messages
            .iter()
            .any(|line| line.contains(needle))
    }

    /// True when any error line contains `needle`.
    pub fn complained(&self, needle: &str) -> bool {
        self.transcript
            .borrow()
            .errors
            .iter()
            .any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        *self.transcript.borrow_mut() = Transcript::default();
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        self.transcript.borrow_mut().messages.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.transcript.borrow_mut().errors.push(text.to_string());
    }

    fn prompt(&mut self, text: &str) {
        self.transcript.borrow_mut().prompts.push(text.to_string());
    }
}
