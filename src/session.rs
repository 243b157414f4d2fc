//! The process-wide state of one console session.
//!
//! Everything the commands touch lives here and is passed around as `&mut Session`: the
//! collection, the identifier generator, the input stack, the output sink, the command
//! registry and the call path of running scripts.

use std::path::Path;

use chrono::{DateTime, Local};

use crate::commands::{self, CommandRegistry};
use crate::errors::{CodecError, CommandError, CommandResult, InputError};
use crate::input::{InputStack, LineSource, Prompter};
use crate::model::IdGenerator;
use crate::settings::Settings;
use crate::store::WorkerStore;
use crate::xml::{self, Skipped};

/// Destination for everything shown to the user. Injectable so sessions can run headless.
pub trait OutputSink {
    /// A line of regular output.
    fn emit(&mut self, text: &str);
    /// A line describing a failure.
    fn error(&mut self, text: &str);
    /// A prompt; no line break is added.
    fn prompt(&mut self, text: &str);
}

/// Summary of a data file load.
#[derive(Debug)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<Skipped>,
}

pub struct Session {
    pub store: WorkerStore,
    pub ids: IdGenerator,
    pub settings: Settings,
    input: InputStack,
    output: Box<dyn OutputSink>,
    registry: CommandRegistry,
    running_scripts: Vec<String>,
    started_at: DateTime<Local>,
    exit_requested: bool,
}

impl Session {
    /// A session with every built-in command registered.
    pub fn new(settings: Settings, input: LineSource, output: Box<dyn OutputSink>) -> Self {
        Self {
            store: WorkerStore::new(),
            ids: IdGenerator::new(),
            settings,
            input: InputStack::new(input),
            output,
            registry: commands::builtin_registry(),
            running_scripts: Vec::new(),
            started_at: Local::now(),
            exit_requested: false,
        }
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Runs one command line. Failures are reported to the output sink before being returned,
    /// so callers that only drive the loop may ignore the result.
    pub fn execute(&mut self, line: &str) -> CommandResult {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(());
        };
        let args: Vec<&str> = tokens.collect();

        let result = match self.registry.handler(name) {
            Some(handler) => {
                tracing::debug!(command = name, ?args, depth = self.input.depth(), "dispatch");
                handler(self, &args)
            }
            None => Err(CommandError::UnknownCommand {
                name: name.to_string(),
            }),
        };

        if let Err(err) = &result {
            tracing::debug!(command = name, error = %err, "command failed");
            self.complain(err.to_string());
        }
        result
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    // ------------------------------------------------------------------------
    // Input and output
    // ------------------------------------------------------------------------

    pub fn prompter(&mut self) -> Prompter<'_> {
        Prompter::new(&mut self.input, self.output.as_mut())
    }

    pub fn input(&self) -> &InputStack {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputStack {
        &mut self.input
    }

    pub fn script_mode(&self) -> bool {
        self.input.script_mode()
    }

    /// Next raw line from the active source.
    pub fn read_line(&mut self) -> Result<Option<String>, InputError> {
        Ok(self.input.read_line()?)
    }

    pub fn say(&mut self, text: impl AsRef<str>) {
        self.output.emit(text.as_ref());
    }

    pub fn complain(&mut self, text: impl AsRef<str>) {
        self.output.error(text.as_ref());
    }

    pub fn prompt(&mut self, text: &str) {
        self.output.prompt(text);
    }

    /// Asks a yes/no question, or answers "yes" when confirmations are turned off.
    pub fn confirm(&mut self, question: &str) -> Result<bool, InputError> {
        if !self.settings.confirm {
            return Ok(true);
        }
        self.prompter().confirm(question)
    }

    // ------------------------------------------------------------------------
    // Scripts
    // ------------------------------------------------------------------------

    pub(crate) fn is_running_script(&self, path: &str) -> bool {
        self.running_scripts.iter().any(|running| running == path)
    }

    pub(crate) fn enter_script(&mut self, path: &str) {
        self.running_scripts.push(path.to_string());
    }

    pub(crate) fn leave_script(&mut self) {
        self.running_scripts.pop();
    }

    /// Paths of the scripts currently executing, outermost first.
    pub fn running_scripts(&self) -> &[String] {
        &self.running_scripts
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Replaces the collection with the contents of `path`.
    ///
    /// On failure the collection is left as it was. On success the identifier generator is
    /// moved past every loaded identifier.
    pub fn load(&mut self, path: &Path) -> Result<LoadReport, CodecError> {
        let decoded = xml::load(path)?;
        self.store = decoded.workers.into_iter().collect();
        if let Some(max) = self.store.max_id() {
            self.ids.observe(max);
        }
        Ok(LoadReport {
            loaded: self.store.len(),
            skipped: decoded.skipped,
        })
    }
}
