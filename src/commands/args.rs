//! Argument helpers shared by command handlers.

use crate::errors::CommandError;
use crate::model::{Choice, Position, WorkerId};

/// The first argument, or a "missing" error naming `what`.
pub fn first<'a>(
    command: &'static str,
    args: &[&'a str],
    what: &'static str,
) -> Result<&'a str, CommandError> {
    args.first()
        .copied()
        .ok_or(CommandError::MissingArgument { command, what })
}

/// The first argument parsed as a worker identifier.
pub fn worker_id(command: &'static str, args: &[&str]) -> Result<WorkerId, CommandError> {
    let raw = first(command, args, "worker id")?;
    raw.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        what: "worker id",
        value: raw.to_string(),
        help: Some("ids are non-negative whole numbers".to_string()),
    })
}

/// The first argument looked up as a position name, case-insensitively.
pub fn position(command: &'static str, args: &[&str]) -> Result<Position, CommandError> {
    let raw = first(command, args, "position")?;
    Position::lookup(raw).ok_or_else(|| CommandError::InvalidArgument {
        command,
        what: "position",
        value: raw.to_string(),
        help: Some(format!("allowed positions: {}", Position::listing())),
    })
}
