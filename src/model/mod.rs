//! # Worker records
//!
//! The managed entity and the value types embedded in it.
//!
//! ## Module Structure
//!
//! - **`choice`**: closed enumerations (`Position`, `Color`, `Country`)
//! - **`ids`**: the monotonic identifier generator
//! - **`time`**: text forms of the stored timestamps
//! - **`rules`**: field predicates shared by interactive input and file loading

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

pub mod choice;
pub mod ids;
pub mod time;

pub use choice::{Choice, Color, Country, Position};
pub use ids::IdGenerator;

pub type WorkerId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub birthday: NaiveDateTime,
    pub eye_color: Option<Color>,
    pub hair_color: Color,
    pub nationality: Country,
}

/// A worker record. Owned by the collection store; `id` and `creation_date` are never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: NaiveDate,
    pub salary: i64,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub end_date: Option<NaiveDateTime>,
    pub position: Option<Position>,
    pub person: Person,
}

// ============================================================================
// FIELD RULES
// ============================================================================

/// Predicates every stored worker satisfies.
pub mod rules {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[\p{L} ]+$").expect("name pattern is a valid regex")
    });

    pub const MAX_X: f64 = 42.0;
    pub const MAX_Y: i64 = 431;

    /// Letters and spaces only, with at least one letter.
    pub fn name(value: &str) -> bool {
        !value.trim().is_empty() && NAME_PATTERN.is_match(value)
    }

    pub fn x(value: f64) -> bool {
        value <= MAX_X
    }

    pub fn y(value: i64) -> bool {
        value <= MAX_Y
    }

    pub fn salary(value: i64) -> bool {
        value > 0
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

fn or_unset<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "not set".to_string(), |v| v.to_string())
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(
            f,
            "Coordinates: (x={}, y={})",
            self.coordinates.x, self.coordinates.y
        )?;
        writeln!(f, "Created: {}", self.creation_date)?;
        writeln!(f, "Salary: {}", self.salary)?;
        writeln!(
            f,
            "Start date: {}",
            or_unset(self.start_date.as_ref().map(time::format_zoned))
        )?;
        writeln!(
            f,
            "End date: {}",
            or_unset(self.end_date.as_ref().map(time::format_local))
        )?;
        writeln!(f, "Position: {}", or_unset(self.position))?;
        writeln!(f, "Person:")?;
        writeln!(f, "  Birthday: {}", time::format_local(&self.person.birthday))?;
        writeln!(f, "  Eye color: {}", or_unset(self.person.eye_color))?;
        writeln!(f, "  Hair color: {}", self.person.hair_color)?;
        write!(f, "  Nationality: {}", self.person.nationality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rule_accepts_letters_and_spaces_in_any_script() {
        assert!(rules::name("Anna Maria"));
        assert!(rules::name("Иван"));
        assert!(!rules::name("R2D2"));
        assert!(!rules::name("   "));
        assert!(!rules::name(""));
    }

    #[test]
    fn numeric_rules_match_field_bounds() {
        assert!(rules::x(42.0));
        assert!(!rules::x(42.5));
        assert!(rules::y(431));
        assert!(!rules::y(432));
        assert!(!rules::salary(0));
        assert!(rules::salary(1));
    }
}
