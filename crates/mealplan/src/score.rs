use mealvault_shared::RandomSource;
use mealvault_shared::recipe::{Difficulty, Recipe};

/// Score of a candidate identical to a neighbouring slot.
pub const DISQUALIFIED: f64 = -9999.0;

const BASE: f64 = 100.0;
const RECENT_WINDOW: usize = 3;
const NEVER_USED_BONUS: f64 = 25.0;
const REST_BONUS_CAP: f64 = 30.0;
const OVERLAP_COST: f64 = 5.0;
const MEAL_TYPE_COST: f64 = 30.0;
const JITTER: f64 = 10.0;
const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Slot context of a candidate: its index and the plan as filled so far.
#[derive(Clone, Copy, Debug)]
pub struct Position<'a> {
    pub index: usize,
    pub slots: &'a [Option<&'a Recipe>],
}

impl<'a> Position<'a> {
    pub fn new(index: usize, slots: &'a [Option<&'a Recipe>]) -> Self {
        Self { index, slots }
    }

    fn at(&self, index: usize) -> Option<&'a Recipe> {
        self.slots.get(index).copied().flatten()
    }

    fn previous(&self) -> Option<&'a Recipe> {
        self.index.checked_sub(1).and_then(|i| self.at(i))
    }

    fn next(&self) -> Option<&'a Recipe> {
        self.at(self.index + 1)
    }
}

/// Desirability of a recipe for a slot; higher is better.
#[derive(Clone, Copy, Debug)]
pub struct Scorer {
    now: i64,
}

impl Scorer {
    /// `now` is unix time in milliseconds, used to age `last_used`.
    pub fn new(now: i64) -> Self {
        Self { now }
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn score(
        &self,
        recipe: &Recipe,
        already_selected: &[&Recipe],
        position: Option<Position<'_>>,
        rng: &mut impl RandomSource,
    ) -> f64 {
        let mut score = BASE;

        if let Some(rating) = recipe.rating {
            score += ((f64::from(rating) - 1.0) * 3.0).max(0.0);
        }

        let repeats = already_selected.iter().filter(|r| **r == recipe).count() as f64;
        score -= repeats * 75.0 * (repeats + 1.0);

        if let Some(position) = position {
            let start = position.index.saturating_sub(RECENT_WINDOW);
            for index in start..position.index {
                if position.at(index).is_some_and(|r| r == recipe) {
                    let distance = (position.index - index) as f64;
                    score -= (100.0 / distance).max(25.0);
                }
            }
        }

        score += self.history(recipe);
        score -= overlap(recipe, already_selected) as f64 * OVERLAP_COST;

        match position {
            Some(position) => {
                for neighbour in [position.previous(), position.next()].into_iter().flatten() {
                    if neighbour == recipe {
                        return DISQUALIFIED;
                    }
                    if same_meal_type(neighbour, recipe) {
                        score -= MEAL_TYPE_COST;
                    }
                }
            }
            None => {
                if let Some(last) = already_selected.last() {
                    if last.name == recipe.name {
                        return DISQUALIFIED;
                    }
                    if same_meal_type(last, recipe) {
                        score -= MEAL_TYPE_COST;
                    }
                }
            }
        }

        match recipe.difficulty {
            Some(Difficulty::Easy) => score += 10.0,
            Some(Difficulty::Hard) => score -= 5.0,
            _ => {}
        }

        score + rng.next_f64() * JITTER
    }

    fn history(&self, recipe: &Recipe) -> f64 {
        let Some(last_used) = recipe.last_used else {
            return NEVER_USED_BONUS;
        };

        let days = (self.now - last_used) as f64 / MS_PER_DAY;
        let mut adjustment = 0.0;
        if days < 7.0 {
            adjustment -= (7.0 - days) * 10.0;
        } else if days < 14.0 {
            adjustment -= (14.0 - days) * 2.0;
        }

        adjustment + days.min(REST_BONUS_CAP)
    }
}

/// Candidate ingredient lines matching any line of an already selected recipe.
fn overlap(recipe: &Recipe, already_selected: &[&Recipe]) -> usize {
    let candidate = lowercase(&recipe.ingredients);

    already_selected
        .iter()
        .map(|selected| {
            let selected = lowercase(&selected.ingredients);
            candidate
                .iter()
                .filter(|ing| {
                    selected
                        .iter()
                        .any(|other| ing.contains(other.as_str()) || other.contains(ing.as_str()))
                })
                .count()
        })
        .sum()
}

fn lowercase(lines: &[String]) -> Vec<String> {
    lines.iter().map(|l| l.to_lowercase()).collect()
}

fn same_meal_type(a: &Recipe, b: &Recipe) -> bool {
    matches!((&a.meal_type, &b.meal_type), (Some(a), Some(b)) if a == b)
}
