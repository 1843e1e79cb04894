use std::collections::{BTreeMap, HashSet};

use mealvault_shared::RandomSource;
use mealvault_shared::mealplan::{PlanSettings, Track};
use mealvault_shared::recipe::Recipe;

use crate::constraints::meets_constraints;
use crate::kid::select_kid_meal;
use crate::score::{Position, Scorer};
use crate::select::select_best;
use crate::strategy::eligible_pool;

/// Main and kid picks for every slot of the horizon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment<'r> {
    pub slots: Vec<Option<&'r Recipe>>,
    /// Keyed by slot index.
    pub kid_meals: BTreeMap<usize, &'r Recipe>,
}

impl<'r> Assignment<'r> {
    /// Requested number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Filled main picks in slot order.
    pub fn regular_meals(&self) -> Vec<&'r Recipe> {
        self.slots.iter().flatten().copied().collect()
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn main(&self, slot: usize) -> Option<&'r Recipe> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn kid_meal(&self, slot: usize) -> Option<&'r Recipe> {
        self.kid_meals.get(&slot).copied()
    }

    /// Distinct recipes of both tracks, main picks first.
    pub fn selected_recipes(&self) -> Vec<&'r Recipe> {
        let mut seen = HashSet::new();

        self.regular_meals()
            .into_iter()
            .chain(self.kid_meals.values().copied())
            .filter(|r| seen.insert(*r))
            .collect()
    }
}

/// Greedy multi-pass assignment of recipes to the plan's slots.
///
/// Slots that cannot be filled stay `None`; the shortfall is logged and left
/// to the caller to report.
pub fn assemble<'r>(
    recipes: &'r [Recipe],
    settings: &PlanSettings,
    scorer: &Scorer,
    rng: &mut impl RandomSource,
) -> Assignment<'r> {
    let count = settings.horizon();
    let mut assignment = Assignment {
        slots: vec![None; count],
        kid_meals: BTreeMap::new(),
    };

    if recipes.is_empty() {
        tracing::warn!(requested = count, "no recipes available");
        return assignment;
    }

    let eligible = (0..count)
        .map(|slot| {
            eligible_pool(recipes, settings.weekday_of(slot), settings, &[])
                .map(|(_, pool)| pool)
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();

    let slots = &mut assignment.slots;
    let mut used = HashSet::new();

    for (slot, pool) in eligible.into_iter().enumerate() {
        let pool = pool
            .into_iter()
            .filter(|r| !used.contains(r))
            .collect::<Vec<_>>();
        let pool = spaced(pool, slots, slot);
        let reference = slots.iter().flatten().copied().collect::<Vec<_>>();

        if let Some(recipe) = select_best(
            pool,
            &reference,
            Some(Position::new(slot, slots)),
            scorer,
            rng,
        ) {
            slots[slot] = Some(recipe);
            used.insert(recipe);
        }
    }

    for slot in 0..count {
        if slots[slot].is_some() {
            continue;
        }

        let day = settings.weekday_of(slot);
        let pool = recipes
            .iter()
            .filter(|r| !r.is_kid_only())
            .filter(|r| meets_constraints(r, day, &settings.day_constraints, Track::Main))
            .collect::<Vec<_>>();
        let pool = spaced(pool, slots, slot);
        let reference = slots.iter().flatten().copied().collect::<Vec<_>>();

        if let Some(recipe) = select_best(
            pool,
            &reference,
            Some(Position::new(slot, slots)),
            scorer,
            rng,
        ) {
            tracing::debug!(slot, day, recipe = %recipe.name, "slot filled with a repeat");
            slots[slot] = Some(recipe);
        }
    }

    assign_kid_meals(&mut assignment, recipes, settings, scorer, rng);

    let filled = assignment.filled_count();
    if filled < count {
        tracing::warn!(filled, requested = count, "could not fill every meal slot");
    }

    assignment
}

fn assign_kid_meals<'r>(
    assignment: &mut Assignment<'r>,
    recipes: &'r [Recipe],
    settings: &PlanSettings,
    scorer: &Scorer,
    rng: &mut impl RandomSource,
) {
    let kid_friendly = recipes.iter().filter(|r| r.kid_friendly).collect::<Vec<_>>();
    if kid_friendly.is_empty() {
        return;
    }

    let mains = assignment.regular_meals();

    for slot in 0..assignment.len() {
        if !settings.needs_kid_meal(slot) {
            continue;
        }

        let Some(main) = assignment.main(slot) else {
            continue;
        };

        if settings.skip_kid_meal_if_family_friendly && (main.family_friendly || main.is_kid_only())
        {
            continue;
        }

        let week = settings.week_of(slot);
        let week_slots = week * settings.meals_per_week..(week + 1) * settings.meals_per_week;
        let week_kid_meals = assignment
            .kid_meals
            .range(week_slots)
            .map(|(_, r)| *r)
            .collect::<Vec<_>>();
        let all_selected = mains
            .iter()
            .chain(week_kid_meals.iter())
            .copied()
            .collect::<Vec<_>>();

        if let Some(kid) = select_kid_meal(
            &kid_friendly,
            settings.weekday_of(slot),
            settings,
            &all_selected,
            &week_kid_meals,
            scorer,
            rng,
        ) {
            assignment.kid_meals.insert(slot, kid);
        }
    }
}

/// Drops the neighbours' picks from the pool unless nothing would remain.
fn spaced<'r>(pool: Vec<&'r Recipe>, slots: &[Option<&Recipe>], slot: usize) -> Vec<&'r Recipe> {
    let previous = slot.checked_sub(1).and_then(|i| slots.get(i).copied().flatten());
    let next = slots.get(slot + 1).copied().flatten();

    let filtered = pool
        .iter()
        .copied()
        .filter(|r| Some(*r) != previous && Some(*r) != next)
        .collect::<Vec<_>>();

    if filtered.is_empty() { pool } else { filtered }
}

#[cfg(test)]
mod tests {
    use mealvault_shared::mealplan::{DayConstraints, WeekConstraints};
    use mealvault_shared::recipe::Difficulty;
    use mealvault_shared::{SeededRandom, SequenceRandom};

    use super::*;

    const NOW: i64 = 1_750_000_000_000;

    fn recipe(name: &str) -> Recipe {
        Recipe {
            path: format!("Recipes/{name}.md"),
            name: name.to_owned(),
            ..Default::default()
        }
    }

    fn kid_only(name: &str) -> Recipe {
        Recipe {
            kid_friendly: true,
            ..recipe(name)
        }
    }

    fn family(name: &str) -> Recipe {
        Recipe {
            kid_friendly: true,
            family_friendly: true,
            ..recipe(name)
        }
    }

    fn settings(meals_per_week: usize, weeks: usize) -> PlanSettings {
        PlanSettings {
            meals_per_week,
            weeks_to_generate: weeks,
            ..Default::default()
        }
    }

    fn kid_monday(skip: bool) -> PlanSettings {
        PlanSettings {
            skip_kid_meal_if_family_friendly: skip,
            day_constraints: WeekConstraints::default().with(
                "Monday",
                DayConstraints {
                    needs_kid_meal: true,
                    ..Default::default()
                },
            ),
            ..settings(7, 2)
        }
    }

    #[test]
    fn single_recipe_fills_every_slot() {
        let recipes = vec![recipe("Soup")];
        let assignment = assemble(
            &recipes,
            &settings(3, 1),
            &Scorer::new(NOW),
            &mut SequenceRandom::constant(0.0),
        );

        assert_eq!(assignment.regular_meals(), vec![&recipes[0]; 3]);
        assert!(assignment.kid_meals.is_empty());
    }

    #[test]
    fn no_recipes() {
        let assignment = assemble(
            &[],
            &settings(7, 1),
            &Scorer::new(NOW),
            &mut SequenceRandom::constant(0.0),
        );

        assert_eq!(assignment.len(), 7);
        assert_eq!(assignment.filled_count(), 0);
    }

    #[test]
    fn unique_while_recipes_last() {
        let recipes = (0..10).map(|i| recipe(&format!("r{i}"))).collect::<Vec<_>>();

        for seed in 0..20 {
            let assignment = assemble(
                &recipes,
                &settings(7, 1),
                &Scorer::new(NOW),
                &mut SeededRandom::new(seed),
            );

            let meals = assignment.regular_meals();
            assert_eq!(meals.len(), 7);
            assert_eq!(meals.iter().collect::<HashSet<_>>().len(), 7);
        }
    }

    #[test]
    fn no_identical_neighbours() {
        let recipes = vec![recipe("a"), recipe("b"), recipe("c")];

        for seed in 0..50 {
            let assignment = assemble(
                &recipes,
                &settings(7, 2),
                &Scorer::new(NOW),
                &mut SeededRandom::new(seed),
            );

            let meals = assignment.regular_meals();
            assert_eq!(meals.len(), 14);
            for pair in meals.windows(2) {
                assert_ne!(pair[0], pair[1], "seed {seed}");
            }
        }
    }

    #[test]
    fn day_constraints_respected() {
        let settings = PlanSettings {
            day_constraints: WeekConstraints::default().with(
                "Friday",
                DayConstraints {
                    max_time: Some(30),
                    max_difficulty: Some(Difficulty::Easy),
                    needs_kid_meal: false,
                },
            ),
            ..settings(7, 1)
        };
        let mut recipes = (0..8)
            .map(|i| Recipe {
                prep_time: Some(60),
                difficulty: Some(Difficulty::Hard),
                ..recipe(&format!("slow{i}"))
            })
            .collect::<Vec<_>>();
        recipes.push(Recipe {
            prep_time: Some(20),
            difficulty: Some(Difficulty::Easy),
            ..recipe("quick")
        });

        for seed in 0..20 {
            let assignment = assemble(&recipes, &settings, &Scorer::new(NOW), &mut SeededRandom::new(seed));

            assert_eq!(assignment.main(4).map(|r| r.name.as_str()), Some("quick"));
        }
    }

    #[test]
    fn unfillable_slot_stays_empty() {
        let settings = PlanSettings {
            days_of_week: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            day_constraints: WeekConstraints::default().with(
                "Friday",
                DayConstraints {
                    max_time: Some(30),
                    ..Default::default()
                },
            ),
            ..settings(5, 1)
        };
        let recipes = vec![Recipe {
            prep_time: Some(60),
            ..recipe("Roast")
        }];

        let assignment = assemble(&recipes, &settings, &Scorer::new(NOW), &mut SeededRandom::new(1));

        assert_eq!(assignment.filled_count(), 4);
        assert!(assignment.main(4).is_none());
    }

    #[test]
    fn day_constraints_follow_the_weekday_cycle() {
        let settings = PlanSettings {
            day_constraints: WeekConstraints::default().with(
                "Saturday",
                DayConstraints {
                    max_time: Some(30),
                    ..Default::default()
                },
            ),
            ..settings(5, 2)
        };
        let mut recipes = (0..12)
            .map(|i| Recipe {
                prep_time: Some(90),
                ..recipe(&format!("Roast {i}"))
            })
            .collect::<Vec<_>>();
        recipes.push(Recipe {
            prep_time: Some(10),
            ..recipe("Salad")
        });

        for seed in 0..20 {
            let assignment = assemble(&recipes, &settings, &Scorer::new(NOW), &mut SeededRandom::new(seed));

            assert_eq!(settings.weekday_of(5), "Saturday");
            assert_eq!(assignment.main(5).map(|r| r.name.as_str()), Some("Salad"));
            assert_eq!(assignment.filled_count(), 10);
        }
    }

    #[test]
    fn kid_meals_on_kid_days() {
        let recipes = vec![
            recipe("Steak"),
            recipe("Curry"),
            recipe("Fish"),
            recipe("Stew"),
            recipe("Tacos"),
            recipe("Ramen"),
            recipe("Salad"),
            recipe("Chili"),
            kid_only("Nuggets"),
            kid_only("Fish Fingers"),
        ];

        for seed in 0..20 {
            let assignment = assemble(&recipes, &kid_monday(true), &Scorer::new(NOW), &mut SeededRandom::new(seed));

            assert_eq!(
                assignment.kid_meals.keys().copied().collect::<Vec<_>>(),
                vec![0, 7]
            );
            for (slot, kid) in &assignment.kid_meals {
                assert!(kid.is_kid_only());
                assert!(!assignment.main(*slot).is_some_and(|m| m.kid_friendly));
            }
        }
    }

    #[test]
    fn family_friendly_main_skips_kid_meal() {
        let recipes = vec![
            recipe("Steak"),
            family("Pasta"),
            family("Pizza"),
            kid_only("Nuggets"),
        ];

        for seed in 0..20 {
            let assignment = assemble(&recipes, &kid_monday(true), &Scorer::new(NOW), &mut SeededRandom::new(seed));

            assert!(assignment.main(0).is_some_and(|m| m.family_friendly));
            assert!(assignment.kid_meal(0).is_none());
        }
    }

    #[test]
    fn family_friendly_main_keeps_kid_meal_without_skip() {
        let recipes = vec![family("Pasta"), recipe("Steak"), kid_only("Nuggets")];

        let assignment = assemble(&recipes, &kid_monday(false), &Scorer::new(NOW), &mut SeededRandom::new(3));

        assert_eq!(assignment.kid_meal(0).map(|r| r.name.as_str()), Some("Nuggets"));
        assert_eq!(assignment.kid_meal(7).map(|r| r.name.as_str()), Some("Nuggets"));
    }

    #[test]
    fn selected_recipes_are_distinct() {
        let recipes = vec![recipe("Steak"), recipe("Curry"), kid_only("Nuggets")];
        let assignment = assemble(&recipes, &kid_monday(false), &Scorer::new(NOW), &mut SeededRandom::new(7));

        let selected = assignment.selected_recipes();
        assert_eq!(selected.len(), 3);
        assert_eq!(selected.last().map(|r| r.name.as_str()), Some("Nuggets"));
    }
}
