//! # Query Commands
//!
//! Commands that select workers by identifier, position or name.
//!
//! Positions are compared by their declaration order
//! (`LABORER < COOK < HUMAN_RESOURCES < MANAGER < ENGINEER`). A worker without a position is
//! never "less than" anything.

use crate::model::{Position, Worker};

use super::collection::print_records;
use super::{args, Command, CommandFn, CommandRegistry};

fn below(worker: &Worker, bound: Position) -> bool {
    worker.position.map_or(false, |position| position < bound)
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Removes every worker whose id is greater than the argument.
///
/// Usage: remove_greater <id>
pub const CMD_REMOVE_GREATER: CommandFn = |session, args| {
    let id = args::worker_id("remove_greater", args)?;
    let removed = session.store.remove_where(|worker| worker.id > id);
    session.say(format!("Removed {removed} workers"));
    Ok(())
};

/// Usage: count_less_than_position <position>
pub const CMD_COUNT_LESS_THAN_POSITION: CommandFn = |session, args| {
    let bound = args::position("count_less_than_position", args)?;
    let count = session.store.iter().filter(|worker| below(worker, bound)).count();
    session.say(count.to_string());
    Ok(())
};

/// Case-sensitive literal prefix match on the name.
///
/// Usage: filter_starts_with_name <prefix>
pub const CMD_FILTER_STARTS_WITH_NAME: CommandFn = |session, args| {
    let prefix = args::first("filter_starts_with_name", args, "name prefix")?;
    let matches: Vec<Worker> = session
        .store
        .iter()
        .filter(|worker| worker.name.starts_with(prefix))
        .cloned()
        .collect();
    if print_records(session, &matches) == 0 {
        session.say(format!("no worker name starts with '{prefix}'"));
    }
    Ok(())
};

/// Usage: filter_less_than_position <position>
pub const CMD_FILTER_LESS_THAN_POSITION: CommandFn = |session, args| {
    let bound = args::position("filter_less_than_position", args)?;
    let matches: Vec<Worker> = session
        .store
        .iter()
        .filter(|worker| below(worker, bound))
        .cloned()
        .collect();
    if print_records(session, &matches) == 0 {
        session.say(format!("no worker has a position below {bound}"));
    }
    Ok(())
};

// ============================================================================
// REGISTRATION
// ============================================================================

pub fn register_query_commands(registry: &mut CommandRegistry) {
    registry.register(
        Command::new("remove_greater", CMD_REMOVE_GREATER)
            .usage("remove_greater <id>")
            .summary("remove every worker with a greater id"),
    );
    registry.register(
        Command::new("count_less_than_position", CMD_COUNT_LESS_THAN_POSITION)
            .usage("count_less_than_position <position>")
            .summary("count workers with a lower position"),
    );
    registry.register(
        Command::new("filter_starts_with_name", CMD_FILTER_STARTS_WITH_NAME)
            .usage("filter_starts_with_name <prefix>")
            .summary("print workers whose name starts with the prefix"),
    );
    registry.register(
        Command::new("filter_less_than_position", CMD_FILTER_LESS_THAN_POSITION)
            .usage("filter_less_than_position <position>")
            .summary("print workers with a lower position"),
    );
}
