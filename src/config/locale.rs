use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Language used for messages shown to the user.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, ValueEnum, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    /// Pick the string matching this locale.
    pub fn pick<'a>(&self, ja: &'a str, en: &'a str) -> &'a str {
        match self {
            Self::Ja => ja,
            Self::En => en,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ja => write!(f, "ja"),
            Self::En => write!(f, "en"),
        }
    }
}
