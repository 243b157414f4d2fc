//! # Collection Commands
//!
//! Whole-collection views and bulk removal. None of these take arguments.
//!
//! - **`show`**, **`head`**: print records
//! - **`info`**: describe the collection itself
//! - **`remove_head`**, **`clear`**: remove records

use crate::model::{time, Worker};
use crate::session::Session;

use super::{Command, CommandFn, CommandRegistry};

const EMPTY: &str = "collection is empty";

/// Prints one record per message and returns how many were printed.
pub(crate) fn print_records<'w>(
    session: &mut Session,
    records: impl IntoIterator<Item = &'w Worker>,
) -> usize {
    let rendered: Vec<String> = records.into_iter().map(ToString::to_string).collect();
    for record in &rendered {
        session.say(record);
    }
    rendered.len()
}

// ============================================================================
// VIEWING
// ============================================================================

/// Usage: show
pub const CMD_SHOW: CommandFn = |session, _args| {
    let records: Vec<_> = session.store.iter().cloned().collect();
    if print_records(session, &records) == 0 {
        session.say(EMPTY);
    }
    Ok(())
};

/// Usage: info
pub const CMD_INFO: CommandFn = |session, _args| {
    let started = time::format_local(&session.started_at().naive_local());
    let lines = [
        "Collection type: insertion-ordered sequence".to_string(),
        format!("Initialized: {started}"),
        format!("Elements: {}", session.store.len()),
        "Element type: Worker".to_string(),
        "Generated fields: id, creationDate".to_string(),
    ];
    for line in lines {
        session.say(line);
    }
    Ok(())
};

/// Usage: head
pub const CMD_HEAD: CommandFn = |session, _args| {
    match session.store.first().map(ToString::to_string) {
        Some(record) => session.say(record),
        None => session.say(EMPTY),
    }
    Ok(())
};

// ============================================================================
// REMOVAL
// ============================================================================

/// Shows the first record, then removes it.
///
/// Usage: remove_head
pub const CMD_REMOVE_HEAD: CommandFn = |session, _args| {
    match session.store.remove_first() {
        Some(worker) => {
            session.say(worker.to_string());
            session.say(format!("Removed worker {}", worker.id));
        }
        None => session.say(EMPTY),
    }
    Ok(())
};

/// Usage: clear
pub const CMD_CLEAR: CommandFn = |session, _args| {
    if session.store.is_empty() {
        session.say(EMPTY);
        return Ok(());
    }
    if session.confirm("Remove every worker?")? {
        let count = session.store.len();
        session.store.clear();
        session.say(format!("Removed {count} workers"));
    }
    Ok(())
};

// ============================================================================
// REGISTRATION
// ============================================================================

pub fn register_collection_commands(registry: &mut CommandRegistry) {
    registry.register(Command::new("show", CMD_SHOW).summary("print every worker"));
    registry.register(Command::new("info", CMD_INFO).summary("describe the collection"));
    registry.register(Command::new("head", CMD_HEAD).summary("print the first worker"));
    registry.register(
        Command::new("remove_head", CMD_REMOVE_HEAD).summary("print and remove the first worker"),
    );
    registry.register(Command::new("clear", CMD_CLEAR).summary("remove every worker"));
}
