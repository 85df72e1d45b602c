use std::ops::Range;

use clap::ValueEnum;

/// Difficulty tier of the generated practice texts
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Unknown names fall back to medium rather than failing
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    /// Half-open range of text lengths (in chars) for this tier
    pub fn length_band(&self) -> Range<usize> {
        match self {
            Difficulty::Easy => 20..40,
            Difficulty::Medium => 40..60,
            Difficulty::Hard => 60..100,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}
