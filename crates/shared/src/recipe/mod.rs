use std::hash::{Hash, Hasher};

use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Level used for comparisons; unknown difficulty counts as medium.
    pub fn level_of(difficulty: Option<Difficulty>) -> u8 {
        difficulty.map(|d| d.level()).unwrap_or(Difficulty::Medium.level())
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    #[default]
    Northern,
    Southern,
}

impl Season {
    /// Maps free text such as "Late Autumn" or "summer " onto a canonical season.
    pub fn normalize(raw: &str) -> Option<Season> {
        let raw = raw.trim().to_lowercase();

        if raw.contains("spring") {
            Some(Season::Spring)
        } else if raw.contains("summer") {
            Some(Season::Summer)
        } else if raw.contains("fall") || raw.contains("autumn") {
            Some(Season::Fall)
        } else if raw.contains("winter") {
            Some(Season::Winter)
        } else {
            None
        }
    }

    /// Season for a calendar month (1-12).
    pub fn current(month: u8, hemisphere: Hemisphere) -> Season {
        let northern = match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        };

        match hemisphere {
            Hemisphere::Northern => northern,
            Hemisphere::Southern => northern.opposite(),
        }
    }

    pub fn opposite(&self) -> Season {
        match self {
            Season::Spring => Season::Fall,
            Season::Summer => Season::Winter,
            Season::Fall => Season::Spring,
            Season::Winter => Season::Summer,
        }
    }
}

/// A recipe note loaded from the vault.
///
/// Identity is the note path: two notes may share a display name, so
/// equality and hashing never look at `name`.
#[derive(Clone, Debug, Default)]
pub struct Recipe {
    pub path: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub kid_friendly: bool,
    pub family_friendly: bool,
    pub last_used: Option<i64>,
    pub season: Vec<Season>,
    pub meal_type: Option<String>,
    pub rating: Option<u8>,
}

impl Recipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time.unwrap_or(0) + self.cook_time.unwrap_or(0)
    }

    pub fn difficulty_level(&self) -> u8 {
        Difficulty::level_of(self.difficulty)
    }

    /// Kid-friendly dishes that are not family meals; never served as the main meal.
    pub fn is_kid_only(&self) -> bool {
        self.kid_friendly && !self.family_friendly
    }

    pub fn is_in_season(&self, season: Season) -> bool {
        self.season.is_empty() || self.season.contains(&season)
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
