//! Closed enumerations used by worker fields.
//!
//! Every enumeration is a finite, ordered set of named variants. Lookup by name is
//! case-insensitive and returns `None` for unknown names instead of failing.

use std::fmt;

/// A closed set of named values that can be read from user input or a data file.
pub trait Choice: Copy + Eq + fmt::Display + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Canonical (upper-case) name of the variant.
    fn name(self) -> &'static str;

    /// Case-insensitive lookup by variant name.
    fn lookup(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.name().eq_ignore_ascii_case(input))
    }

    /// Comma-separated list of all variant names, for prompts and error messages.
    fn listing() -> String {
        Self::ALL
            .iter()
            .map(|variant| variant.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Declares a `Choice` enumeration together with its `Display` impl.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

choice_enum! {
    /// Job position. Declaration order defines the ordering used by position filters.
    pub enum Position {
        Laborer => "LABORER",
        Cook => "COOK",
        HumanResources => "HUMAN_RESOURCES",
        Manager => "MANAGER",
        Engineer => "ENGINEER",
    }
}

choice_enum! {
    /// Eye and hair color.
    pub enum Color {
        Green => "GREEN",
        Red => "RED",
        Black => "BLACK",
        White => "WHITE",
        Blue => "BLUE",
        Orange => "ORANGE",
    }
}

choice_enum! {
    pub enum Country {
        Russia => "RUSSIA",
        UnitedKingdom => "UNITED_KINGDOM",
        Germany => "GERMANY",
        India => "INDIA",
        Japan => "JAPAN",
    }
}
