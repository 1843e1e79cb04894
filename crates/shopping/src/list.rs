use std::fmt::Write;

use mealvault_shared::document::WEEK_ICON;
use mealvault_shared::recipe::Recipe;

use crate::aggregation::aggregate;

/// Recipes cooked on one day of one week.
#[derive(Clone, Debug)]
pub struct ShoppingDay<'a> {
    /// One-based.
    pub week: usize,
    pub day: String,
    pub day_emoji: String,
    pub recipes: Vec<&'a Recipe>,
}

/// The shopping-list section of a plan document, without its heading.
#[derive(Clone, Debug)]
pub struct ShoppingList<'a> {
    days: Vec<ShoppingDay<'a>>,
    consolidate: bool,
}

impl<'a> ShoppingList<'a> {
    pub fn new(days: Vec<ShoppingDay<'a>>) -> Self {
        Self {
            days,
            consolidate: false,
        }
    }

    /// Renders one summed list per week instead of per-recipe lists.
    pub fn consolidated(mut self, consolidate: bool) -> Self {
        self.consolidate = consolidate;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for (week, days) in self.weeks() {
            let _ = writeln!(out, "\n## {WEEK_ICON} Week {week}");

            if self.consolidate {
                out.push('\n');
                let recipes = days.iter().flat_map(|d| d.recipes.iter().copied());
                for item in aggregate(recipes) {
                    let _ = writeln!(out, "- [ ] {}", item.label());
                }
                continue;
            }

            for day in days {
                let _ = writeln!(out, "\n### {} {}", day.day_emoji, day.day);

                for recipe in &day.recipes {
                    let _ = write!(out, "\n#### [[{}]]", recipe.name);
                    if recipe.family_friendly {
                        out.push_str(" (Family Friendly)");
                    } else if recipe.kid_friendly {
                        out.push_str(" (Kid Friendly)");
                    }
                    out.push('\n');

                    for ingredient in &recipe.ingredients {
                        let _ = writeln!(out, "- [ ] {ingredient}");
                    }
                }
            }
        }

        out.push('\n');
        out
    }

    /// Consecutive days grouped by week number, in input order.
    fn weeks(&self) -> Vec<(usize, Vec<&ShoppingDay<'a>>)> {
        let mut weeks: Vec<(usize, Vec<&ShoppingDay<'a>>)> = vec![];

        for day in &self.days {
            match weeks.last_mut() {
                Some((week, days)) if *week == day.week => days.push(day),
                _ => weeks.push((day.week, vec![day])),
            }
        }

        weeks
    }
}
