//! Validated field reading.
//!
//! A [`Field`] describes one value to ask for: its label, how to parse it, what to say when
//! parsing fails, an optional predicate, an optional current value and whether empty input is
//! allowed. [`Prompter::read`] runs the same retry loop for every field type:
//!
//! 1. print the prompt, unless a script is supplying the input;
//! 2. empty line: optional fields return `None`, required ones complain and ask again;
//! 3. unparseable line: report the type's format error and ask again;
//! 4. parsed but rejected by the predicate: report "invalid value" and ask again;
//! 5. otherwise return the value.

use std::{borrow::Cow, fmt::Display};

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::errors::InputError;
use crate::model::{time, Choice};
use crate::session::OutputSink;

use super::InputStack;

type Parser<T> = fn(&str) -> Option<T>;
type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// Description of a single value to read.
pub struct Field<'a, T> {
    label: Cow<'a, str>,
    parse: Parser<T>,
    format_error: Cow<'static, str>,
    predicate: Option<Predicate<'a, T>>,
    current: Option<String>,
    required: bool,
}

impl<'a, T> Field<'a, T> {
    pub fn new(
        label: impl Into<Cow<'a, str>>,
        parse: Parser<T>,
        format_error: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            label: label.into(),
            parse,
            format_error: format_error.into(),
            predicate: None,
            current: None,
            required: true,
        }
    }

    /// Only accept values for which `predicate` holds.
    pub fn check(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Empty input yields `None` instead of a retry.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Shows `value` in the prompt and switches the field to keep-current mode.
    pub fn current(mut self, value: Option<impl Display>) -> Self {
        self.current = value.map(|v| v.to_string());
        self.required = false;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn prompt(&self) -> String {
        let mut prompt = format!("Enter {}", self.label);
        if let Some(current) = &self.current {
            prompt.push_str(&format!(" (current: {current})"));
        }
        if !self.required {
            prompt.push_str(" (optional)");
        }
        prompt.push_str(": ");
        prompt
    }

    fn accepts(&self, value: &T) -> bool {
        self.predicate.as_ref().map_or(true, |predicate| predicate(value))
    }
}

// ============================================================================
// FIELD CONSTRUCTORS
// ============================================================================

pub fn text<'a>(label: impl Into<Cow<'a, str>>) -> Field<'a, String> {
    Field::new(label, |input| Some(input.to_string()), "enter some text")
}

pub fn integer<'a>(label: impl Into<Cow<'a, str>>) -> Field<'a, i64> {
    Field::new(label, |input| input.parse().ok(), "enter a whole number")
}

pub fn real<'a>(label: impl Into<Cow<'a, str>>) -> Field<'a, f64> {
    Field::new(
        label,
        |input| input.parse::<f64>().ok().filter(|value| value.is_finite()),
        "enter a number",
    )
}

/// One of the variants of `E`, matched case-insensitively.
pub fn choice<'a, E: Choice>(label: impl Into<Cow<'a, str>>) -> Field<'a, E> {
    let label = format!("{} ({})", label.into(), E::listing());
    Field::new(label, E::lookup, format!("allowed values: {}", E::listing()))
}

pub fn date_time<'a>(label: impl Into<Cow<'a, str>>) -> Field<'a, NaiveDateTime> {
    let label = format!("{} (YYYY-MM-DDTHH:MM:SS)", label.into());
    Field::new(
        label,
        time::parse_local,
        "enter a date and time as YYYY-MM-DDTHH:MM:SS",
    )
}

pub fn zoned_date_time<'a>(label: impl Into<Cow<'a, str>>) -> Field<'a, DateTime<FixedOffset>> {
    let label = format!("{} (YYYY-MM-DDTHH:MM:SS+HH:MM)", label.into());
    Field::new(
        label,
        time::parse_zoned,
        "enter a date and time with offset as YYYY-MM-DDTHH:MM:SS+HH:MM",
    )
}

// ============================================================================
// PROMPTER
// ============================================================================

/// Reads fields from the active input source, reporting problems to the output sink.
pub struct Prompter<'s> {
    input: &'s mut InputStack,
    output: &'s mut dyn OutputSink,
}

impl<'s> Prompter<'s> {
    pub fn new(input: &'s mut InputStack, output: &'s mut dyn OutputSink) -> Self {
        Self { input, output }
    }

    /// Reads `field`, retrying until a valid value or an accepted empty answer arrives.
    pub fn read<T>(&mut self, field: Field<'_, T>) -> Result<Option<T>, InputError> {
        loop {
            let line = self.next_line(&field.prompt(), field.label())?;
            let line = line.trim();

            if line.is_empty() {
                if !field.required {
                    return Ok(None);
                }
                self.output
                    .error(&format!("{}: field cannot be empty", field.label));
                continue;
            }

            let Some(value) = (field.parse)(line) else {
                self.output
                    .error(&format!("{}: {}", field.label, field.format_error));
                continue;
            };

            if !field.accepts(&value) {
                self.output
                    .error(&format!("{}: invalid value '{line}'", field.label));
                continue;
            }

            return Ok(Some(value));
        }
    }

    /// Reads a field that must produce a value.
    pub fn require<T>(&mut self, field: Field<'_, T>) -> Result<T, InputError> {
        let label = field.label().to_string();
        match self.read(field.required(true))? {
            Some(value) => Ok(value),
            None => Err(InputError::Exhausted { field: label }),
        }
    }

    /// Asks a yes/no question until it gets one of the accepted answers.
    pub fn confirm(&mut self, question: &str) -> Result<bool, InputError> {
        let prompt = format!("{question} (yes/no): ");
        loop {
            let answer = self.next_line(&prompt, "confirmation")?;
            match answer.trim().to_lowercase().as_str() {
                "yes" | "y" | "да" | "д" => return Ok(true),
                "no" | "n" | "нет" | "н" => return Ok(false),
                _ => self.output.error("answer 'yes' or 'no'"),
            }
        }
    }

    /// Prints a section heading for interactive users; scripts stay quiet.
    pub fn heading(&mut self, text: &str) {
        if !self.input.script_mode() {
            self.output.emit(text);
        }
    }

    fn next_line(&mut self, prompt: &str, what: &str) -> Result<String, InputError> {
        if !self.input.script_mode() {
            self.output.prompt(prompt);
        }
        self.input
            .read_line()?
            .ok_or_else(|| InputError::Exhausted {
                field: what.to_string(),
            })
    }
}
