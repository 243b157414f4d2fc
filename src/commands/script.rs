//! # Script Execution
//!
//! `execute_script <path>` runs the lines of a file as if they were typed. Commands inside the
//! script that ask for field values read them from the following script lines.
//!
//! ## Design Principles
//!
//! - **Literal Call Path**: scripts are identified by the path string as typed. A path already
//!   on the call path is refused before the file is opened.
//! - **Always Restore**: whatever happens inside, the previous input source is active again and
//!   the call path is popped when the command returns.
//! - **Contained Failures**: a failing command is reported and the script moves on; only a read
//!   failure ends the script early.

use std::path::Path;

use crate::errors::ScriptError;
use crate::session::Session;

use super::{args, Command, CommandFn, CommandRegistry};

/// Runs the script at `path` against `session`.
pub fn run_script(session: &mut Session, path: &str) -> Result<(), ScriptError> {
    if session.is_running_script(path) {
        return Err(ScriptError::Recursive {
            path: path.to_string(),
        });
    }
    session
        .input_mut()
        .push_file(Path::new(path))
        .map_err(|source| ScriptError::Open {
            path: path.to_string(),
            source,
        })?;
    session.enter_script(path);
    tracing::debug!(script = path, depth = session.running_scripts().len(), "script started");
    session.say(format!("Executing script '{path}'"));

    let outcome = run_lines(session, path);

    session.input_mut().restore();
    session.leave_script();
    tracing::debug!(script = path, ok = outcome.is_ok(), "script finished");
    if outcome.is_ok() {
        session.say(format!("Script '{path}' finished"));
    }
    outcome
}

fn run_lines(session: &mut Session, path: &str) -> Result<(), ScriptError> {
    while !session.exit_requested() {
        let line = match session.input_mut().read_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(source) => {
                return Err(ScriptError::Read {
                    path: path.to_string(),
                    source,
                })
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        session.say(format!(">> {line}"));
        // Failures are already reported by the dispatcher.
        let _ = session.execute(line);
    }
    Ok(())
}

/// Usage: execute_script <path>
pub const CMD_EXECUTE_SCRIPT: CommandFn = |session, args| {
    let path = args::first("execute_script", args, "script path")?;
    run_script(session, path)?;
    Ok(())
};

pub fn register_script_commands(registry: &mut CommandRegistry) {
    registry.register(
        Command::new("execute_script", CMD_EXECUTE_SCRIPT)
            .usage("execute_script <path>")
            .summary("run the commands in a file"),
    );
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::cli::output::OutputBuffer;
    use crate::errors::CommandError;
    use crate::input::LineSource;
    use crate::settings::Settings;

    fn session(input: &str) -> (Session, OutputBuffer) {
        let out = OutputBuffer::new();
        let session = Session::new(
            Settings::default(),
            LineSource::from_text("<terminal>", input),
            Box::new(out.clone()),
        );
        (session, out)
    }

    fn write(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path.display().to_string()
    }

    #[test]
    fn script_lines_are_echoed_and_dispatched() {
        let dir = tempfile::tempdir().unwrap();
        let script = write(dir.path(), "list.txt", "\n  info  \nbogus\nshow\n");
        let (mut session, out) = session("");

        run_script(&mut session, &script).unwrap();

        assert!(out.said(">> info"));
        assert!(out.said(">> bogus"));
        assert!(out.said(">> show"));
        assert!(out.complained("unknown command 'bogus'"));
        assert!(out.said("collection is empty"));
        assert!(!session.script_mode());
        assert!(session.running_scripts().is_empty());
    }

    #[test]
    fn commands_read_their_fields_from_the_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = write(
            dir.path(),
            "add.txt",
            "add\nAnna\n1\n2\n300\n\n\nCOOK\n2000-01-01T00:00:00\n\nRED\nINDIA\nhead\n",
        );
        let (mut session, out) = session("");

        run_script(&mut session, &script).unwrap();

        assert_eq!(session.store.len(), 1);
        assert!(out.prompts().is_empty());
        assert!(out.said("Name: Anna"));
        assert!(out.errors().is_empty());
    }

    #[test]
    fn self_invocation_is_refused_and_the_outer_script_continues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("self.txt").display().to_string();
        fs::write(&path, format!("execute_script {path}\ninfo\n")).unwrap();
        let (mut session, out) = session("");

        run_script(&mut session, &path).unwrap();

        assert!(out.complained("recursive execution"));
        assert!(out.said("Elements: 0"));
        assert!(session.running_scripts().is_empty());
    }

    #[test]
    fn transitive_recursion_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt").display().to_string();
        let b = dir.path().join("b.txt").display().to_string();
        fs::write(&a, format!("execute_script {b}\n")).unwrap();
        fs::write(&b, format!("execute_script {a}\n")).unwrap();
        let (mut session, out) = session("");

        run_script(&mut session, &a).unwrap();

        let refusals = out
            .errors()
            .iter()
            .filter(|line| line.contains("recursive execution"))
            .count();
        assert_eq!(refusals, 1);
        assert_eq!(session.input().depth(), 0);
    }

    #[test]
    fn previous_source_is_active_after_the_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = write(dir.path(), "partial.txt", "add\nAnna\n");
        let (mut session, _out) = session("still here\n");

        run_script(&mut session, &script).unwrap();

        assert_eq!(session.input().active_name(), "<terminal>");
        assert_eq!(session.read_line().unwrap().as_deref(), Some("still here"));
        assert!(session.store.is_empty());
    }

    #[test]
    fn read_failure_ends_the_script_and_restores_the_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, b"info\n\xff\xfe\ninfo\n").unwrap();
        let (mut session, out) = session("after\n");

        let err = session
            .execute(&format!("execute_script {}", path.display()))
            .unwrap_err();

        assert!(matches!(err, CommandError::Script(ScriptError::Read { .. })));
        assert!(out.complained("failed reading script"));
        assert_eq!(out.messages().iter().filter(|m| *m == ">> info").count(), 1);
        assert_eq!(session.input().depth(), 0);
        assert!(session.running_scripts().is_empty());
        assert!(!session.script_mode());
        assert_eq!(session.read_line().unwrap().as_deref(), Some("after"));
    }

    #[test]
    fn missing_scripts_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt").display().to_string();
        let (mut session, _out) = session("");
        let err = session
            .execute(&format!("execute_script {missing}"))
            .unwrap_err();
        assert!(matches!(err, CommandError::Script(ScriptError::Open { .. })));
        assert_eq!(session.input().depth(), 0);
    }

    #[test]
    fn exit_inside_a_script_stops_it() {
        let dir = tempfile::tempdir().unwrap();
        let script = write(dir.path(), "exit.txt", "exit\nyes\ninfo\n");
        let (mut session, out) = session("");

        run_script(&mut session, &script).unwrap();

        assert!(session.exit_requested());
        assert!(!out.said(">> info"));
    }
}
