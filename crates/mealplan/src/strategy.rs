use mealvault_shared::RandomSource;
use mealvault_shared::mealplan::{PlanSettings, Track};
use mealvault_shared::recipe::Recipe;
use strum::{Display, VariantArray};

use crate::constraints::meets_constraints;
use crate::score::Scorer;
use crate::select::select_best;

/// Pool-building policies for the main track, tried in declaration order.
#[derive(Display, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum MainStrategy {
    /// Family-friendly recipes on kid-meal days, so the kid meal can be skipped.
    FamilyFriendlyFirst,
    /// Recipes meeting the day's constraints, kid-only excluded.
    Regular,
    /// Anything unused; kid-only recipes only when nothing else is left.
    LastResort,
}

impl MainStrategy {
    pub fn pool<'r>(
        self,
        recipes: &'r [Recipe],
        day: &str,
        settings: &PlanSettings,
        selected: &[&Recipe],
    ) -> Vec<&'r Recipe> {
        let constraints = &settings.day_constraints;
        let unused = recipes.iter().filter(|r| !selected.contains(r));

        match self {
            MainStrategy::FamilyFriendlyFirst => {
                if !constraints.needs_kid_meal(day) || !settings.skip_kid_meal_if_family_friendly
                {
                    return vec![];
                }

                unused
                    .filter(|r| r.family_friendly)
                    .filter(|r| meets_constraints(r, day, constraints, Track::Main))
                    .collect()
            }
            MainStrategy::Regular => unused
                .filter(|r| !r.is_kid_only())
                .filter(|r| meets_constraints(r, day, constraints, Track::Main))
                .collect(),
            MainStrategy::LastResort => {
                let remaining = unused.collect::<Vec<_>>();
                let preferred = remaining
                    .iter()
                    .copied()
                    .filter(|r| !r.is_kid_only())
                    .collect::<Vec<_>>();

                if preferred.is_empty() {
                    remaining
                } else {
                    preferred
                }
            }
        }
    }
}

/// First non-empty pool of the strategy chain.
pub fn eligible_pool<'r>(
    recipes: &'r [Recipe],
    day: &str,
    settings: &PlanSettings,
    selected: &[&Recipe],
) -> Option<(MainStrategy, Vec<&'r Recipe>)> {
    MainStrategy::VARIANTS.iter().find_map(|strategy| {
        let pool = strategy.pool(recipes, day, settings, selected);
        if pool.is_empty() {
            return None;
        }

        if *strategy != MainStrategy::VARIANTS[0] {
            tracing::debug!(day, strategy = %strategy, "relaxed main meal pool");
        }

        Some((*strategy, pool))
    })
}

/// Picks a main meal for `day` through the strategy chain, scored against `selected`.
pub fn select_main<'r>(
    recipes: &'r [Recipe],
    day: &str,
    settings: &PlanSettings,
    selected: &[&Recipe],
    scorer: &Scorer,
    rng: &mut impl RandomSource,
) -> Option<&'r Recipe> {
    let (_, pool) = eligible_pool(recipes, day, settings, selected)?;

    select_best(pool, selected, None, scorer, rng)
}
