//! # Persistence Commands
//!
//! `save [path]` writes the collection as XML, to the configured data file unless a path is
//! given. The file is only loaded at startup, so there is no matching `load` command.

use std::path::PathBuf;

use crate::xml::{self, SaveOutcome};

use super::{Command, CommandFn, CommandRegistry};

/// Usage: save [path]
pub const CMD_SAVE: CommandFn = |session, args| {
    if session.store.is_empty() {
        session.say("nothing to save");
        return Ok(());
    }

    let path = args
        .first()
        .map(|raw| PathBuf::from(*raw))
        .unwrap_or_else(|| session.settings.data_file.clone());
    let question = format!(
        "Save {} workers to '{}'?",
        session.store.len(),
        path.display()
    );
    if !session.confirm(&question)? {
        return Ok(());
    }

    match xml::save(&path, &session.store)? {
        SaveOutcome::Written { count } => {
            session.say(format!("Saved {count} workers to '{}'", path.display()))
        }
        SaveOutcome::NothingToSave => session.say("nothing to save"),
    }
    Ok(())
};

pub fn register_persist_commands(registry: &mut CommandRegistry) {
    registry.register(
        Command::new("save", CMD_SAVE)
            .usage("save [path]")
            .summary("write the collection to the data file"),
    );
}
