use std::collections::HashMap;
use std::fmt::Write;

use mealvault_shared::document::{
    ChecklistEntry, SHOPPING_LIST_SEPARATOR, ScheduleDetails, ScheduleLine, WEEK_ICON,
};
use mealvault_shared::mealplan::PlanSettings;
use mealvault_shared::recipe::Recipe;
use mealvault_shopping::{ShoppingDay, ShoppingList};
use serde::Deserialize;

use crate::assemble::Assignment;

const DEFAULT_KEY: &str = "default";
const FALLBACK_DAY_EMOJI: &str = "📅";
const FALLBACK_DIFFICULTY_EMOJI: &str = "⚪";

/// Presentation options of generated plan documents.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub tags: Vec<String>,
    /// Lowercase day name to emoji, with a `default` entry.
    pub day_emojis: HashMap<String, String>,
    /// Lowercase difficulty to emoji, with a `default` entry.
    pub difficulty_emojis: HashMap<String, String>,
    /// One summed ingredient list per week instead of per recipe.
    pub consolidate_shopping: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let map = |entries: &[(&str, &str)]| -> HashMap<String, String> {
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        Self {
            tags: vec!["meal_plan".to_owned()],
            day_emojis: map(&[
                ("monday", "🌙"),
                ("tuesday", "🔥"),
                ("wednesday", "🍪"),
                ("thursday", "⚡"),
                ("friday", "🎉"),
                ("saturday", "🌟"),
                ("sunday", "☀️"),
                (DEFAULT_KEY, FALLBACK_DAY_EMOJI),
            ]),
            difficulty_emojis: map(&[
                ("easy", "🟢"),
                ("medium", "🟡"),
                ("hard", "🔴"),
                (DEFAULT_KEY, FALLBACK_DIFFICULTY_EMOJI),
            ]),
            consolidate_shopping: false,
        }
    }
}

impl RenderSettings {
    pub fn day_emoji(&self, day: &str) -> &str {
        lookup(&self.day_emojis, day).unwrap_or(FALLBACK_DAY_EMOJI)
    }

    pub fn difficulty_emoji(&self, difficulty: &str) -> &str {
        lookup(&self.difficulty_emojis, difficulty).unwrap_or(FALLBACK_DIFFICULTY_EMOJI)
    }

    /// Details of a schedule line: combined time, and the main's difficulty
    /// falling back to the kid meal's.
    pub fn schedule_details(&self, main: &Recipe, kid: Option<&Recipe>) -> ScheduleDetails {
        let difficulty = main
            .difficulty
            .or_else(|| kid.and_then(|k| k.difficulty))
            .map(|d| d.to_string())
            .unwrap_or_else(|| DEFAULT_KEY.to_owned());

        ScheduleDetails {
            main: main.name.to_owned(),
            kid: kid.map(|k| k.name.to_owned()),
            total_time: main.total_time() + kid.map(|k| k.total_time()).unwrap_or(0),
            difficulty_emoji: self.difficulty_emoji(&difficulty).to_owned(),
            difficulty,
        }
    }

    fn tags_line(&self) -> String {
        let tags = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();

        if tags.is_empty() {
            "meal_plan".to_owned()
        } else {
            tags.join(", ")
        }
    }
}

fn lookup<'a>(map: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    map.get(&key.to_lowercase())
        .filter(|v| !v.is_empty())
        .or_else(|| map.get(DEFAULT_KEY).filter(|v| !v.is_empty()))
        .map(|v| v.as_str())
}

/// Full plan document: front matter, schedule and, when enabled, the shopping list.
pub fn render_plan(
    assignment: &Assignment<'_>,
    settings: &PlanSettings,
    render: &RenderSettings,
    date: &str,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "---");
    let _ = writeln!(out, "date_generated: {date}");
    let _ = writeln!(out, "tags: [{}]", render.tags_line());
    let _ = writeln!(out, "---");
    let _ = writeln!(out, "# Weekly Meal Plan ({} Weeks)\n", settings.weeks_to_generate);
    let _ = writeln!(out, "## Meal Schedule");

    for week in 0..settings.weeks_to_generate {
        let _ = writeln!(out, "\n### {WEEK_ICON} Week {}\n", week + 1);

        for slot in week_slots(settings, week) {
            let Some(main) = assignment.main(slot) else {
                continue;
            };

            let day = settings.label_of(slot);
            let details = render.schedule_details(main, assignment.kid_meal(slot));
            let line = ScheduleLine::new(render.day_emoji(day), day, details.to_string());
            let _ = writeln!(out, "{line}");
        }
    }

    if settings.generate_shopping_list {
        out.push_str(&shopping_section(assignment_days(assignment, settings, render), render));
    }

    out
}

/// Shopping list of a fresh assignment, every day of every week in order.
pub fn assignment_days<'r>(
    assignment: &Assignment<'r>,
    settings: &PlanSettings,
    render: &RenderSettings,
) -> Vec<ShoppingDay<'r>> {
    (0..settings.weeks_to_generate)
        .flat_map(|week| week_slots(settings, week).map(move |slot| (week, slot)))
        .map(|(week, slot)| {
            let day = settings.label_of(slot);

            ShoppingDay {
                week: week + 1,
                day: day.to_owned(),
                day_emoji: render.day_emoji(day).to_owned(),
                recipes: assignment
                    .main(slot)
                    .into_iter()
                    .chain(assignment.kid_meal(slot))
                    .collect(),
            }
        })
        .collect()
}

/// Shopping list rebuilt from the schedule lines of a document.
///
/// Recipe links that no longer resolve are left out.
pub fn entry_days<'r>(entries: &[ChecklistEntry], recipes: &'r [Recipe]) -> Vec<ShoppingDay<'r>> {
    entries
        .iter()
        .map(|entry| ShoppingDay {
            week: entry.week,
            day: entry.day.to_owned(),
            day_emoji: entry.day_emoji.to_owned(),
            recipes: entry
                .recipes
                .iter()
                .filter_map(|name| {
                    let recipe = recipes.iter().find(|r| &r.name == name);
                    if recipe.is_none() {
                        tracing::warn!(recipe = %name, week = entry.week, day = %entry.day, "linked recipe not found");
                    }
                    recipe
                })
                .collect(),
        })
        .collect()
}

/// Separator, heading and body of the shopping list.
pub fn shopping_section(days: Vec<ShoppingDay<'_>>, render: &RenderSettings) -> String {
    let list = ShoppingList::new(days).consolidated(render.consolidate_shopping);

    format!("{SHOPPING_LIST_SEPARATOR}{}", list.render())
}

fn week_slots(settings: &PlanSettings, week: usize) -> std::ops::Range<usize> {
    week * settings.meals_per_week..(week + 1) * settings.meals_per_week
}
