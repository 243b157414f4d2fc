//! Roster REPL (Read-Eval-Print Loop)
//!
//! Reads command lines from the session's base input until `exit` is confirmed or the input
//! ends. Each line goes through the session dispatcher; failures are reported there and the
//! loop carries on.

use std::io;

use crate::errors::InputError;
use crate::session::Session;

const PROMPT: &str = "> ";

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplExit {
    /// `exit` was confirmed.
    Requested,
    /// The input ran out (Ctrl+D or the end of piped input).
    EndOfInput,
}

/// Main REPL entry point
pub fn run_repl(session: &mut Session) -> Result<ReplExit, InputError> {
    session.say("Roster: worker collection manager");
    session.say("Type 'help' for the list of commands, 'exit' to quit");

    let mut line_number = 0usize;
    while !session.exit_requested() {
        session.prompt(PROMPT);
        let line = match session.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                session.say("");
                session.say("Goodbye!");
                return Ok(ReplExit::EndOfInput);
            }
            // The offending bytes are already consumed; the next line is unaffected.
            Err(InputError::Io(err)) if err.kind() == io::ErrorKind::InvalidData => {
                session.complain(format!("line ignored: {err}"));
                continue;
            }
            Err(err) => return Err(err),
        };
        line_number += 1;
        tracing::trace!(line = line_number, "repl input");
        // Failures are already reported by the dispatcher.
        let _ = session.execute(&line);
    }
    session.say("Goodbye!");
    Ok(ReplExit::Requested)
}
