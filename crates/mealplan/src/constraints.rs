use mealvault_shared::mealplan::{Track, WeekConstraints};
use mealvault_shared::recipe::Recipe;

/// Whether `recipe` may be served on `day` for the given track.
///
/// The kid track only accepts kid-only recipes. On kid-meal days the main
/// track refuses kid-only recipes. Time and difficulty limits apply to the
/// main track only.
pub fn meets_constraints(
    recipe: &Recipe,
    day: &str,
    constraints: &WeekConstraints,
    track: Track,
) -> bool {
    let Some(day) = constraints.get(day) else {
        return true;
    };

    if track == Track::Kid {
        return recipe.is_kid_only();
    }

    if day.needs_kid_meal && recipe.is_kid_only() {
        return false;
    }

    if let Some(max_time) = day.max_time.filter(|t| *t > 0) {
        let total = recipe.total_time();
        if total > 0 && total > max_time {
            return false;
        }
    }

    if let Some(max_difficulty) = day.max_difficulty
        && recipe.difficulty_level() > max_difficulty.level()
    {
        return false;
    }

    true
}
