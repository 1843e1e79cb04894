use mealvault_shared::recipe::{Recipe, Season};

/// Keeps recipes in season, or all of them when none are.
pub fn in_season(recipes: Vec<Recipe>, season: Season) -> Vec<Recipe> {
    let (fresh, out_of_season): (Vec<_>, Vec<_>) =
        recipes.into_iter().partition(|r| r.is_in_season(season));

    if fresh.is_empty() && !out_of_season.is_empty() {
        tracing::warn!(%season, "no recipes in season, ignoring seasonality");
        return out_of_season;
    }

    tracing::debug!(%season, kept = fresh.len(), dropped = out_of_season.len(), "seasonal filter");
    fresh
}
