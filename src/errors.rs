//! Roster error types.
//!
//! One enum per layer, all `thiserror` + `miette` diagnostics with stable codes:
//!
//! - **`InputError`**: the field reader ran out of input or could not read it
//! - **`ScriptError`**: `execute_script` could not start or finish a script
//! - **`CodecError`**: a data file could not be read, parsed or written
//! - **`RecordError`**: one `<worker>` element was rejected during load
//! - **`CommandError`**: what a command handler returns to the dispatcher
//!
//! Field validation failures are not errors: the reader reports them and asks again.

use std::{io, path::PathBuf, sync::Arc};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::model::WorkerId;

// ============================================================================
// INPUT
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
pub enum InputError {
    #[error("input ended while reading {field}")]
    #[diagnostic(code(roster::input::exhausted))]
    Exhausted { field: String },

    #[error("failed to read input: {0}")]
    #[diagnostic(code(roster::input::io))]
    Io(#[from] io::Error),
}

// ============================================================================
// SCRIPTS
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
pub enum ScriptError {
    #[error("recursive execution of '{path}' is not allowed")]
    #[diagnostic(
        code(roster::script::recursion),
        help("a script may not run itself, directly or through another script")
    )]
    Recursive { path: String },

    #[error("cannot open script '{path}': {source}")]
    #[diagnostic(code(roster::script::open))]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed reading script '{path}': {source}")]
    #[diagnostic(code(roster::script::read))]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
pub enum CodecError {
    #[error("data file '{}' not found", .path.display())]
    #[diagnostic(code(roster::xml::missing))]
    Missing { path: PathBuf },

    #[error("cannot read '{}': {source}", .path.display())]
    #[diagnostic(code(roster::xml::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write '{}': {source}", .path.display())]
    #[diagnostic(
        code(roster::xml::write),
        help("the previous contents of the file were left untouched")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode the collection: {message}")]
    #[diagnostic(code(roster::xml::encode))]
    Encode { message: String },

    #[error("malformed XML: {message}")]
    #[diagnostic(code(roster::xml::malformed))]
    Malformed {
        message: String,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("expected root element <workers>, found <{found}>")]
    #[diagnostic(code(roster::xml::root))]
    WrongRoot { found: String },
}

/// Why a single `<worker>` element was skipped.
#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum RecordError {
    #[error("missing <{tag}> element")]
    #[diagnostic(code(roster::record::missing))]
    MissingElement { tag: &'static str },

    #[error("<{tag}> holds '{value}', expected {expected}")]
    #[diagnostic(code(roster::record::invalid))]
    InvalidValue {
        tag: &'static str,
        value: String,
        expected: String,
    },

    #[error("<{tag}> value '{value}' violates the field constraint")]
    #[diagnostic(code(roster::record::constraint))]
    Constraint { tag: &'static str, value: String },

    #[error("id {id} is already taken by an earlier record")]
    #[diagnostic(code(roster::record::duplicate))]
    DuplicateId { id: WorkerId },
}

// ============================================================================
// COMMANDS
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
pub enum CommandError {
    #[error("unknown command '{name}'")]
    #[diagnostic(code(roster::command::unknown), help("type 'help' for the list of commands"))]
    UnknownCommand { name: String },

    #[error("{command}: missing {what}")]
    #[diagnostic(code(roster::command::missing_argument))]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("{command}: '{value}' is not a valid {what}")]
    #[diagnostic(code(roster::command::invalid_argument))]
    InvalidArgument {
        command: &'static str,
        what: &'static str,
        value: String,
        #[help]
        help: Option<String>,
    },

    #[error("worker with id {id} not found")]
    #[diagnostic(code(roster::command::not_found))]
    NotFound { id: WorkerId },

    #[error("no worker ids left to assign")]
    #[diagnostic(
        code(roster::command::ids_exhausted),
        help("the collection already holds the largest possible id")
    )]
    IdsExhausted,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codec(#[from] CodecError),
}

pub type CommandResult = Result<(), CommandError>;
