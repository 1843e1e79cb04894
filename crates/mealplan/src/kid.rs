use mealvault_shared::RandomSource;
use mealvault_shared::mealplan::{PlanSettings, Track};
use mealvault_shared::recipe::Recipe;

use crate::constraints::meets_constraints;
use crate::score::Scorer;
use crate::select::select_best;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KidStage {
    Strict,
    RepeatInWeek,
    Unconstrained,
}

impl KidStage {
    const ALL: [KidStage; 3] = [
        KidStage::Strict,
        KidStage::RepeatInWeek,
        KidStage::Unconstrained,
    ];

    fn accepts(
        self,
        recipe: &Recipe,
        day: &str,
        settings: &PlanSettings,
        all_selected: &[&Recipe],
        week_kid_meals: &[&Recipe],
    ) -> bool {
        if all_selected.contains(&recipe) {
            return false;
        }

        let fits = || meets_constraints(recipe, day, &settings.day_constraints, Track::Kid);

        match self {
            KidStage::Strict => fits() && !week_kid_meals.contains(&recipe),
            KidStage::RepeatInWeek => fits(),
            KidStage::Unconstrained => recipe.is_kid_only(),
        }
    }
}

/// Picks a kid meal for `day`, relaxing the filters stage by stage.
///
/// `kid_friendly` is the kid-friendly subset of the recipes. Candidates are
/// scored against `week_kid_meals` only, so variety is favoured within the
/// week rather than over the whole plan.
pub fn select_kid_meal<'r>(
    kid_friendly: &[&'r Recipe],
    day: &str,
    settings: &PlanSettings,
    all_selected: &[&Recipe],
    week_kid_meals: &[&Recipe],
    scorer: &Scorer,
    rng: &mut impl RandomSource,
) -> Option<&'r Recipe> {
    let mut pool = vec![];
    for stage in KidStage::ALL {
        pool = kid_friendly
            .iter()
            .copied()
            .filter(|r| stage.accepts(r, day, settings, all_selected, week_kid_meals))
            .collect();

        if !pool.is_empty() {
            if stage != KidStage::Strict {
                tracing::debug!(day, stage = ?stage, "relaxed kid meal pool");
            }
            break;
        }
    }

    if pool.is_empty() {
        tracing::debug!(day, stage = "any", "relaxed kid meal pool");
        pool = kid_friendly.to_vec();
    }

    select_best(pool, week_kid_meals, None, scorer, rng)
}

#[cfg(test)]
mod tests {
    use mealvault_shared::SequenceRandom;
    use mealvault_shared::mealplan::{DayConstraints, WeekConstraints};

    use super::*;

    fn recipe(name: &str, family: bool) -> Recipe {
        Recipe {
            path: format!("Recipes/{name}.md"),
            name: name.to_owned(),
            kid_friendly: true,
            family_friendly: family,
            ..Default::default()
        }
    }

    fn settings() -> PlanSettings {
        PlanSettings {
            day_constraints: WeekConstraints::default().with(
                "Monday",
                DayConstraints {
                    needs_kid_meal: true,
                    ..Default::default()
                },
            ),
            ..Default::default()
        }
    }

    fn pick<'r>(
        pool: &[&'r Recipe],
        day: &str,
        all_selected: &[&Recipe],
        week: &[&Recipe],
    ) -> Option<&'r str> {
        select_kid_meal(
            pool,
            day,
            &settings(),
            all_selected,
            week,
            &Scorer::new(0),
            &mut SequenceRandom::constant(0.0),
        )
        .map(|r| r.name.as_str())
    }

    #[test]
    fn prefers_unused_kid_only() {
        let nuggets = recipe("Nuggets", false);
        let pizza = recipe("Pizza", false);
        let pasta = recipe("Pasta", true);

        assert_eq!(pick(&[&nuggets, &pizza, &pasta], "Monday", &[&nuggets], &[&nuggets]), Some("Pizza"));
    }

    #[test]
    fn week_repeat_allowed_before_global_repeat() {
        let nuggets = recipe("Nuggets", false);
        let pizza = recipe("Pizza", false);

        // stage 1 is empty: Nuggets was this week's kid meal, Pizza is a main pick
        assert_eq!(pick(&[&nuggets, &pizza], "Monday", &[&pizza], &[&nuggets]), Some("Nuggets"));
    }

    #[test]
    fn family_meals_fail_kid_constraints() {
        let nuggets = recipe("Nuggets", false);
        let pasta = recipe("Pasta", true);

        assert_eq!(pick(&[&pasta, &nuggets], "Monday", &[], &[]), Some("Nuggets"));
    }

    #[test]
    fn any_kid_friendly_as_last_stage() {
        let nuggets = recipe("Nuggets", false);
        let pasta = recipe("Pasta", true);

        assert_eq!(pick(&[&pasta], "Monday", &[&pasta], &[]), Some("Pasta"));
        assert_eq!(pick(&[&nuggets], "Monday", &[&nuggets], &[&nuggets]), Some("Nuggets"));
        assert_eq!(pick(&[], "Monday", &[], &[]), None);
    }
}
