//! # Record Editing Commands
//!
//! `add` and `update` share one form: [`read_worker`] asks for every editable field in a fixed
//! order. Without a current record every required field must be answered; with one, every field
//! shows its current value and an empty answer keeps it.

use chrono::{Local, NaiveDate};

use crate::errors::{CommandError, InputError};
use crate::input::reader::{self, Field};
use crate::input::Prompter;
use crate::model::{
    rules, time, Color, Coordinates, Country, Person, Position, Worker, WorkerId,
};

use super::{args, Command, CommandFn, CommandRegistry};

// ============================================================================
// THE WORKER FORM
// ============================================================================

/// A required field: answered anew, or kept from `current` on an empty answer.
fn ask<T: Clone>(
    prompter: &mut Prompter<'_>,
    field: Field<'_, T>,
    current: Option<(&T, String)>,
) -> Result<T, InputError> {
    match current {
        Some((value, shown)) => Ok(prompter
            .read(field.current(Some(shown)))?
            .unwrap_or_else(|| value.clone())),
        None => prompter.require(field),
    }
}

/// An optional field. When editing, an empty answer keeps the current value, set or not.
fn ask_optional<T: Clone>(
    prompter: &mut Prompter<'_>,
    field: Field<'_, T>,
    current: Option<(&Option<T>, Option<String>)>,
) -> Result<Option<T>, InputError> {
    match current {
        Some((value, shown)) => Ok(prompter.read(field.current(shown))?.or_else(|| value.clone())),
        None => prompter.read(field.optional()),
    }
}

/// Reads every editable field of a worker.
///
/// `id` and `creation_date` are not asked for; they are copied into the result as given.
pub fn read_worker(
    prompter: &mut Prompter<'_>,
    id: WorkerId,
    creation_date: NaiveDate,
    current: Option<&Worker>,
) -> Result<Worker, InputError> {
    let name = ask(
        prompter,
        reader::text("name").check(|value: &String| rules::name(value)),
        current.map(|w| (&w.name, w.name.clone())),
    )?;

    prompter.heading("Coordinates:");
    let x = ask(
        prompter,
        reader::real("x (at most 42)").check(|value| rules::x(*value)),
        current.map(|w| (&w.coordinates.x, w.coordinates.x.to_string())),
    )?;
    let y = ask(
        prompter,
        reader::integer("y (at most 431)").check(|value| rules::y(*value)),
        current.map(|w| (&w.coordinates.y, w.coordinates.y.to_string())),
    )?;

    let salary = ask(
        prompter,
        reader::integer("salary (greater than 0)").check(|value| rules::salary(*value)),
        current.map(|w| (&w.salary, w.salary.to_string())),
    )?;
    let start_date = ask_optional(
        prompter,
        reader::zoned_date_time("start date"),
        current.map(|w| (&w.start_date, w.start_date.as_ref().map(time::format_zoned))),
    )?;
    let end_date = ask_optional(
        prompter,
        reader::date_time("end date"),
        current.map(|w| (&w.end_date, w.end_date.as_ref().map(time::format_local))),
    )?;
    let position = ask_optional(
        prompter,
        reader::choice::<Position>("position"),
        current.map(|w| (&w.position, w.position.map(|p| p.to_string()))),
    )?;

    prompter.heading("Person:");
    let person = current.map(|w| &w.person);
    let birthday = ask(
        prompter,
        reader::date_time("birthday"),
        person.map(|p| (&p.birthday, time::format_local(&p.birthday))),
    )?;
    let eye_color = ask_optional(
        prompter,
        reader::choice::<Color>("eye color"),
        person.map(|p| (&p.eye_color, p.eye_color.map(|c| c.to_string()))),
    )?;
    let hair_color = ask(
        prompter,
        reader::choice::<Color>("hair color"),
        person.map(|p| (&p.hair_color, p.hair_color.to_string())),
    )?;
    let nationality = ask(
        prompter,
        reader::choice::<Country>("nationality"),
        person.map(|p| (&p.nationality, p.nationality.to_string())),
    )?;

    Ok(Worker {
        id,
        name,
        coordinates: Coordinates { x, y },
        creation_date,
        salary,
        start_date,
        end_date,
        position,
        person: Person {
            birthday,
            eye_color,
            hair_color,
            nationality,
        },
    })
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Reads a new worker and appends it. The identifier is only consumed once the form is complete.
///
/// Usage: add
pub const CMD_ADD: CommandFn = |session, _args| {
    let id = session.ids.peek().ok_or(CommandError::IdsExhausted)?;
    let today = Local::now().date_naive();
    let worker = read_worker(&mut session.prompter(), id, today, None)?;

    let assigned = session.ids.generate().ok_or(CommandError::IdsExhausted)?;
    debug_assert_eq!(assigned, id);
    tracing::debug!(id = assigned, "worker added");

    if session.script_mode() {
        session.say(worker.to_string());
    } else {
        session.say(format!("Added worker {assigned}"));
    }
    session.store.add(worker);
    Ok(())
};

/// Re-reads every field of an existing worker, keeping the current value on empty input.
///
/// Usage: update <id>
pub const CMD_UPDATE: CommandFn = |session, args| {
    let id = args::worker_id("update", args)?;
    let existing = session
        .store
        .find_first(|worker| worker.id == id)
        .cloned()
        .ok_or(CommandError::NotFound { id })?;

    let updated = read_worker(
        &mut session.prompter(),
        existing.id,
        existing.creation_date,
        Some(&existing),
    )?;

    match session.store.find_mut(id) {
        Some(slot) => *slot = updated,
        None => return Err(CommandError::NotFound { id }),
    }
    session.say(format!("Updated worker {id}"));
    Ok(())
};

/// Usage: remove_by_id <id>
pub const CMD_REMOVE_BY_ID: CommandFn = |session, args| {
    let id = args::worker_id("remove_by_id", args)?;
    if session.store.remove_where(|worker| worker.id == id) == 0 {
        return Err(CommandError::NotFound { id });
    }
    session.say(format!("Removed worker {id}"));
    Ok(())
};

// ============================================================================
// REGISTRATION
// ============================================================================

pub fn register_add(registry: &mut CommandRegistry) {
    registry.register(Command::new("add", CMD_ADD).summary("add a new worker"));
}

pub fn register_edit_commands(registry: &mut CommandRegistry) {
    registry.register(
        Command::new("update", CMD_UPDATE)
            .usage("update <id>")
            .summary("edit the worker with the given id"),
    );
    registry.register(
        Command::new("remove_by_id", CMD_REMOVE_BY_ID)
            .usage("remove_by_id <id>")
            .summary("remove the worker with the given id"),
    );
}

#[cfg(test)]
mod tests {
    use crate::cli::output::OutputBuffer;
    use crate::errors::{CommandError, InputError};
    use crate::input::LineSource;
    use crate::model::{time, Color, Country, Position};
    use crate::session::Session;
    use crate::settings::Settings;
    use crate::store::fixtures::worker;

    const ANSWERS: &str = "Anna Maria\n41.5\n-7\n2500\n\
        2024-03-01T09:00:00+03:00\n\n cook \n1990-04-12T08:30:00\n\nred\njapan\n";

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
    fn add_reads_every_field_and_assigns_the_next_id() {
        let (mut session, out) = session(ANSWERS);
        session.execute("add").unwrap();

        let added = session.store.first().unwrap();
        assert_eq!(added.id, 1);
        assert_eq!(added.name, "Anna Maria");
        assert_eq!(added.coordinates.x, 41.5);
        assert_eq!(added.coordinates.y, -7);
        assert_eq!(added.salary, 2500);
        assert!(added.start_date.is_some());
        assert_eq!(added.end_date, None);
        assert_eq!(added.position, Some(Position::Cook));
        assert_eq!(added.person.eye_color, None);
        assert_eq!(added.person.hair_color, Color::Red);
        assert_eq!(added.person.nationality, Country::Japan);
        assert!(out.said("Added worker 1"));
        assert_eq!(session.ids.peek(), Some(2));
    }

    #[test]
    fn add_retries_invalid_answers() {
        let input = format!("R2D2\n{}", ANSWERS.replacen("41.5", "43\n41.5", 1));
        let (mut session, out) = session(&input);
        session.execute("add").unwrap();
        assert_eq!(session.store.len(), 1);
        assert!(out.complained("name: invalid value 'R2D2'"));
        assert!(out.complained("invalid value '43'"));
    }

    #[test]
    fn abandoned_add_stores_nothing_and_keeps_the_id() {
        let (mut session, _out) = session("Anna\n1\n");
        let err = session.execute("add").unwrap_err();
        assert!(matches!(err, CommandError::Input(InputError::Exhausted { .. })));
        assert!(session.store.is_empty());
        assert_eq!(session.ids.peek(), Some(1));
    }

    #[test]
    fn update_keeps_current_values_on_empty_answers() {
        let (mut session, out) = session("\n\n\n3000\n\n\nmanager\n\n\n\n\n");
        let mut original = worker(5, "Bob", Some(Position::Cook));
        original.person.eye_color = Some(Color::Blue);
        original.start_date = Some(time::parse_zoned("2024-03-01T09:00:00+03:00").unwrap());
        original.end_date = Some(time::parse_local("2025-01-31T18:00:00").unwrap());
        session.store.add(original.clone());

        session.execute("update 5").unwrap();

        let updated = session.store.first().unwrap();
        assert_eq!(updated.salary, 3000);
        assert_eq!(updated.position, Some(Position::Manager));
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.coordinates, original.coordinates);
        assert_eq!(updated.creation_date, original.creation_date);
        assert_eq!(updated.person, original.person);
        assert_eq!(updated.start_date, original.start_date);
        assert_eq!(updated.end_date, original.end_date);
        assert!(updated.start_date.is_some() && updated.end_date.is_some());
        assert!(out.said("Updated worker 5"));
        assert!(out
            .prompts()
            .iter()
            .any(|p| p.starts_with("Enter name (current: Bob)")));
    }

    #[test]
    fn update_and_remove_report_unknown_ids() {
        let (mut session, out) = session("");
        session.store.add(worker(1, "Ann", None));
        assert!(matches!(
            session.execute("update 9"),
            Err(CommandError::NotFound { id: 9 })
        ));
        assert!(matches!(
            session.execute("remove_by_id 9"),
            Err(CommandError::NotFound { id: 9 })
        ));
        assert!(session.execute("remove_by_id x").is_err());
        session.execute("remove_by_id 1").unwrap();
        assert!(session.store.is_empty());
        assert!(out.complained("worker with id 9 not found"));
    }
}
