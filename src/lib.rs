pub use crate::errors::{CommandError, CommandResult};
pub use crate::session::{OutputSink, Session};

pub mod cli;
pub mod commands;
pub mod errors;
pub mod input;
pub mod model;
pub mod repl;
pub mod session;
pub mod settings;
pub mod store;
pub mod xml;
