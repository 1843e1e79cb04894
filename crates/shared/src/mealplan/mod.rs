use std::collections::HashMap;

use serde::Deserialize;

use crate::recipe::{Difficulty, Hemisphere};

/// Which track a recipe is being considered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    Main,
    Kid,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DayConstraints {
    /// Minutes; `0` or absent means unconstrained.
    #[serde(default)]
    pub max_time: Option<u32>,
    #[serde(default)]
    pub max_difficulty: Option<Difficulty>,
    #[serde(default)]
    pub needs_kid_meal: bool,
}

/// Day constraints keyed by weekday name, case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, DayConstraints>")]
pub struct WeekConstraints(HashMap<String, DayConstraints>);

impl From<HashMap<String, DayConstraints>> for WeekConstraints {
    fn from(value: HashMap<String, DayConstraints>) -> Self {
        Self(
            value
                .into_iter()
                .map(|(day, constraints)| (day.to_lowercase(), constraints))
                .collect(),
        )
    }
}

impl WeekConstraints {
    pub fn get(&self, day: &str) -> Option<&DayConstraints> {
        self.0.get(&day.to_lowercase())
    }

    pub fn insert(&mut self, day: impl AsRef<str>, constraints: DayConstraints) {
        self.0.insert(day.as_ref().to_lowercase(), constraints);
    }

    pub fn with(mut self, day: impl AsRef<str>, constraints: DayConstraints) -> Self {
        self.insert(day, constraints);
        self
    }

    pub fn needs_kid_meal(&self, day: &str) -> bool {
        self.get(day).is_some_and(|c| c.needs_kid_meal)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlanSettings {
    #[serde(default = "default_days_of_week")]
    pub days_of_week: Vec<String>,
    #[serde(default = "default_meals_per_week")]
    pub meals_per_week: usize,
    #[serde(default = "default_weeks_to_generate")]
    pub weeks_to_generate: usize,
    #[serde(default = "default_true")]
    pub skip_kid_meal_if_family_friendly: bool,
    #[serde(default)]
    pub min_rating: Option<u8>,
    #[serde(default)]
    pub enable_seasonality: bool,
    #[serde(default)]
    pub hemisphere: Hemisphere,
    #[serde(default = "default_true")]
    pub generate_shopping_list: bool,
    #[serde(default)]
    pub day_constraints: WeekConstraints,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            days_of_week: default_days_of_week(),
            meals_per_week: default_meals_per_week(),
            weeks_to_generate: default_weeks_to_generate(),
            skip_kid_meal_if_family_friendly: true,
            min_rating: None,
            enable_seasonality: false,
            hemisphere: Hemisphere::default(),
            generate_shopping_list: true,
            day_constraints: WeekConstraints::default(),
        }
    }
}

impl PlanSettings {
    /// Total number of slots in the plan.
    pub fn horizon(&self) -> usize {
        self.meals_per_week * self.weeks_to_generate
    }

    /// Weekday whose constraints apply to a slot: the slot index cycles
    /// through the configured days across the whole horizon.
    pub fn weekday_of(&self, slot: usize) -> &str {
        if self.days_of_week.is_empty() {
            return "";
        }

        &self.days_of_week[slot % self.days_of_week.len()]
    }

    /// Day label a slot is rendered under. Each week's schedule restarts at
    /// the first configured day.
    pub fn label_of(&self, slot: usize) -> &str {
        if self.meals_per_week == 0 {
            return "";
        }

        self.weekday_of(slot % self.meals_per_week)
    }

    /// Zero-based week of a slot.
    pub fn week_of(&self, slot: usize) -> usize {
        slot.checked_div(self.meals_per_week).unwrap_or(0)
    }

    pub fn needs_kid_meal(&self, slot: usize) -> bool {
        self.day_constraints.needs_kid_meal(self.weekday_of(slot))
    }
}

fn default_days_of_week() -> Vec<String> {
    [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

fn default_meals_per_week() -> usize {
    7
}

fn default_weeks_to_generate() -> usize {
    1
}

fn default_true() -> bool {
    true
}
