//! # Session Control Commands
//!
//! - **`help`**: lists every registered command with its usage and a one-line summary
//! - **`exit`**: ends the session after confirmation

use unicode_width::UnicodeWidthStr;

use super::{Command, CommandFn, CommandRegistry};

// ============================================================================
// COMMANDS
// ============================================================================

/// Lists the registered commands, usage column aligned.
///
/// Usage: help
pub const CMD_HELP: CommandFn = |session, _args| {
    let width = session
        .registry()
        .iter()
        .map(|command| command.usage.width())
        .max()
        .unwrap_or(0);
    let lines: Vec<String> = session
        .registry()
        .iter()
        .map(|command| {
            let pad = width - command.usage.width();
            format!("  {}{}  {}", command.usage, " ".repeat(pad), command.summary)
        })
        .collect();

    session.say("Available commands:");
    for line in lines {
        session.say(line);
    }
    Ok(())
};

/// Asks whether to leave without saving, then sets the exit flag.
///
/// Usage: exit
pub const CMD_EXIT: CommandFn = |session, _args| {
    if session.confirm("Exit without saving?")? {
        session.request_exit();
    }
    Ok(())
};

// ============================================================================
// REGISTRATION
// ============================================================================

pub fn register_help(registry: &mut CommandRegistry) {
    registry.register(Command::new("help", CMD_HELP).summary("show this list of commands"));
}

pub fn register_exit(registry: &mut CommandRegistry) {
    registry.register(Command::new("exit", CMD_EXIT).summary("leave the program without saving"));
}

#[cfg(test)]
mod tests {
    use crate::cli::output::OutputBuffer;
    use crate::input::LineSource;
    use crate::session::Session;
    use crate::settings::Settings;

    fn session(input: &str) -> (Session, OutputBuffer) {
        let out = OutputBuffer::new();
        let session = Session::new(
            Settings::default(),
            LineSource::from_text("<test>", input),
            Box::new(out.clone()),
        );
        (session, out)
    }

    #[test]
    fn help_lists_commands_with_aligned_summaries() {
        let (mut session, out) = session("");
        session.execute("help").unwrap();
        let messages = out.messages();
        assert_eq!(messages[0], "Available commands:");
        assert_eq!(messages.len(), 1 + session.registry().len());

        let summary_column = |line: &str, summary: &str| line.find(summary).unwrap();
        let help = summary_column(&messages[1], "show this list");
        let exit = summary_column(messages.last().unwrap(), "leave the program");
        assert_eq!(help, exit);
    }

    #[test]
    fn exit_only_after_confirmation() {
        let (mut session, _out) = session("no\nyes\n");
        session.execute("exit").unwrap();
        assert!(!session.exit_requested());
        session.execute("exit").unwrap();
        assert!(session.exit_requested());
    }

    #[test]
    fn exit_without_confirmation_when_disabled() {
        let out = OutputBuffer::new();
        let settings = Settings {
            confirm: false,
            ..Settings::default()
        };
        let mut session = Session::new(settings, LineSource::from_text("<test>", ""), Box::new(out));
        session.execute("exit").unwrap();
        assert!(session.exit_requested());
    }
}
