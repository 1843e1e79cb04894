//! Edits applied to a rendered plan document.
//!
//! The document text is the source of truth: edits locate schedule lines,
//! rewrite them through [`ScheduleLine`] and rebuild the shopping list from
//! whatever the schedule says afterwards.

use mealvault_shared::document::{
    ChecklistEntry, SHOPPING_LIST_SEPARATOR, ScheduleLine, extract_entries,
};
use mealvault_shared::mealplan::PlanSettings;
use mealvault_shared::recipe::Recipe;
use mealvault_shared::{Error, Result};

use crate::document::{RenderSettings, entry_days, shopping_section};

/// Replaces the meal of one schedule line.
///
/// The day emoji and label are kept, the checkbox is reset and the time and
/// difficulty fields are recomputed from the new recipes.
pub fn change_day_meal(
    content: &str,
    entry: &ChecklistEntry,
    main: &Recipe,
    kid: Option<&Recipe>,
    render: &RenderSettings,
) -> Result<String> {
    let original = ScheduleLine::parse(&entry.line)?;
    let details = render.schedule_details(main, kid);
    let replaced = original.replaced(details.to_string());

    let mut lines = content.split('\n').collect::<Vec<_>>();
    let index = locate(&lines, entry)?;
    let replaced = with_line_ending(lines[index], replaced.to_string());
    lines[index] = &replaced;

    Ok(lines.join("\n"))
}

/// Kid meal added automatically when a day needing one gets a main that is
/// neither family nor kid friendly: the first kid-only recipe by name.
pub fn default_kid_meal<'r>(
    main: &Recipe,
    day: &str,
    settings: &PlanSettings,
    recipes: &'r [Recipe],
) -> Option<&'r Recipe> {
    if !settings.day_constraints.needs_kid_meal(day) || main.kid_friendly || main.family_friendly {
        return None;
    }

    recipes
        .iter()
        .filter(|r| r.is_kid_only())
        .min_by(|a, b| a.name.cmp(&b.name))
}

/// Exchanges the meals of two schedule lines; each keeps its own day label.
pub fn swap_days(content: &str, first: &ChecklistEntry, second: &ChecklistEntry) -> Result<String> {
    let mut lines = content.split('\n').collect::<Vec<_>>();
    let first_index = locate(&lines, first)?;
    let second_index = locate(&lines, second)?;

    let first_line = ScheduleLine::parse(lines[first_index])?;
    let second_line = ScheduleLine::parse(lines[second_index])?;

    let new_first = with_line_ending(
        lines[first_index],
        first_line.with_details(second_line.details.as_str()).to_string(),
    );
    let new_second = with_line_ending(
        lines[second_index],
        second_line.with_details(first_line.details.as_str()).to_string(),
    );

    lines[first_index] = &new_first;
    lines[second_index] = &new_second;

    Ok(lines.join("\n"))
}

/// Rebuilds the shopping list from the schedule, replacing everything from
/// the shopping-list separator onwards, or appending one.
pub fn regenerate_shopping_list(
    content: &str,
    recipes: &[Recipe],
    render: &RenderSettings,
) -> String {
    let schedule = match content.find(SHOPPING_LIST_SEPARATOR) {
        Some(position) => &content[..position],
        None => content,
    };

    let entries = extract_entries(schedule);
    let section = shopping_section(entry_days(&entries, recipes), render);

    let mut out = schedule.to_owned();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&section);
    out
}

/// Line index of an entry, checking its recorded position first.
fn locate(lines: &[&str], entry: &ChecklistEntry) -> Result<usize> {
    let matches = |line: &&str| line.trim_end_matches('\r') == entry.line;

    if lines.get(entry.line_index).is_some_and(matches) {
        return Ok(entry.line_index);
    }

    lines
        .iter()
        .position(matches)
        .ok_or_else(|| Error::LineNotFound(entry.line.to_owned()))
}

fn with_line_ending(original: &str, line: String) -> String {
    if original.ends_with('\r') {
        format!("{line}\r")
    } else {
        line
    }
}
