//! # Roster Command System
//!
//! Commands are plain functions registered by name. The session tokenizes each line, looks
//! the first token up here and hands the remaining tokens to the handler.
//!
//! ## Module Structure
//!
//! - **`args`**: argument parsing shared by handlers
//! - **`collection`**: viewing and clearing the collection (`show`, `info`, `head`, ...)
//! - **`edit`**: creating, updating and removing workers
//! - **`query`**: position and name filters
//! - **`persist`**: `save`
//! - **`script`**: `execute_script`
//! - **`control`**: `help`, `exit`
//!
//! ## Design Principles
//!
//! - **Result-Returning Handlers**: a handler reports failure by returning `Err`; the session
//!   prints it and moves on to the next line
//! - **Own Your Arguments**: each handler checks its own arity and argument types

use im::HashMap;

use crate::errors::CommandResult;
use crate::session::Session;

pub mod args;
pub mod collection;
pub mod control;
pub mod edit;
pub mod persist;
pub mod query;
pub mod script;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A command handler: the session plus the arguments after the command name.
pub type CommandFn = fn(session: &mut Session, args: &[&str]) -> CommandResult;

/// A registered command and its help text.
#[derive(Clone)]
pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    pub handler: CommandFn,
}

impl Command {
    pub fn new(name: &'static str, handler: CommandFn) -> Self {
        Self {
            name,
            usage: name,
            summary: "",
            handler,
        }
    }

    pub fn usage(mut self, usage: &'static str) -> Self {
        self.usage = usage;
        self
    }

    pub fn summary(mut self, summary: &'static str) -> Self {
        self.summary = summary;
        self
    }
}

/// Registry for all commands, inspectable at runtime.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command or replaces the one registered under the same name.
    pub fn register(&mut self, command: Command) -> Option<Command> {
        if !self.order.contains(&command.name) {
            self.order.push(command.name);
        }
        self.commands.insert(command.name.to_string(), command)
    }

    pub fn handler(&self, name: &str) -> Option<CommandFn> {
        self.commands.get(name).map(|command| command.handler)
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> + '_ {
        self.order.iter().filter_map(|name| self.commands.get(*name))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

// ============================================================================
// UNIFIED REGISTRATION
// ============================================================================

/// Registers every built-in command, in the order `help` lists them.
pub fn register_all_commands(registry: &mut CommandRegistry) {
    control::register_help(registry);
    edit::register_add(registry);
    collection::register_collection_commands(registry);
    edit::register_edit_commands(registry);
    persist::register_persist_commands(registry);
    query::register_query_commands(registry);
    script::register_script_commands(registry);
    control::register_exit(registry);
}

pub fn builtin_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_all_commands(&mut registry);
    registry
}
