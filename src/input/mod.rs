//! # Input
//!
//! - **`source`**: line sources and the stack that suspends them while scripts run
//! - **`reader`**: the validated field reader and its typed field constructors

pub mod reader;
pub mod source;

pub use reader::{Field, Prompter};
pub use source::{InputStack, LineSource};
