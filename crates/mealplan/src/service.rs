use std::str::FromStr;

use mealvault_shared::document::{ChecklistEntry, extract_entries};
use mealvault_shared::mealplan::PlanSettings;
use mealvault_shared::recipe::{Recipe, Season};
use mealvault_shared::store::{PlanStore, RecipeStore};
use mealvault_shared::{Error, RandomSource, Result};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::assemble::assemble;
use crate::document::{RenderSettings, render_plan};
use crate::editor::{change_day_meal, default_kid_meal, regenerate_shopping_list, swap_days};
use crate::score::Scorer;
use crate::season::in_season;
use crate::strategy::select_main;

pub const DEFAULT_PLAN_FOLDER: &str = "Meals";

#[derive(Clone, Debug, Default)]
pub struct Generate {
    /// Overrides the configured number of weeks.
    pub weeks: Option<usize>,
    /// Keep an existing plan of the same date and write a new file next to it.
    pub new_file: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
    pub path: String,
    pub filled: usize,
    pub requested: usize,
}

impl Generated {
    /// Number of slots left empty.
    pub fn shortfall(&self) -> usize {
        self.requested - self.filled
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChangeDay {
    pub week: usize,
    pub day: String,
    /// Chosen automatically when absent.
    pub recipe: Option<String>,
    pub kid: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Changed {
    pub week: usize,
    pub day: String,
    pub main: String,
    pub kid: Option<String>,
}

/// A schedule line addressed as `<week>:<day>`, e.g. `2:Friday`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayRef {
    pub week: usize,
    pub day: String,
}

impl FromStr for DayRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((week, day)) = s.split_once(':') else {
            mealvault_shared::bail!("expected <week>:<day>, got '{s}'");
        };

        let Ok(week) = week.trim().parse::<usize>() else {
            mealvault_shared::bail!("invalid week number '{week}'");
        };

        let day = day.trim();
        if week == 0 || day.is_empty() {
            mealvault_shared::bail!("expected <week>:<day>, got '{s}'");
        }

        Ok(Self {
            week,
            day: day.to_owned(),
        })
    }
}

/// Plan operations over a recipe and plan store.
#[derive(Clone)]
pub struct Command<S> {
    store: S,
    settings: PlanSettings,
    render: RenderSettings,
    plan_folder: String,
    now: Option<OffsetDateTime>,
}

impl<S: RecipeStore + PlanStore> Command<S> {
    pub fn new(store: S, settings: PlanSettings, render: RenderSettings) -> Self {
        Self {
            store,
            settings,
            render,
            plan_folder: DEFAULT_PLAN_FOLDER.to_owned(),
            now: None,
        }
    }

    pub fn plan_folder(mut self, folder: impl AsRef<str>) -> Self {
        let folder = folder.as_ref().trim().trim_matches('/');
        if !folder.is_empty() {
            self.plan_folder = folder.to_owned();
        }
        self
    }

    /// Pins the clock used for file names, seasons and `lastUsed` stamps.
    pub fn at(mut self, now: OffsetDateTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn settings(&self) -> &PlanSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn now(&self) -> OffsetDateTime {
        self.now.unwrap_or_else(OffsetDateTime::now_utc)
    }

    pub async fn recipes(&self) -> Result<Vec<Recipe>> {
        self.store.load_recipes().await
    }

    pub async fn generate(
        &self,
        input: Generate,
        rng: &mut impl RandomSource,
    ) -> Result<Generated> {
        let mut settings = self.settings.clone();
        if let Some(weeks) = input.weeks {
            settings.weeks_to_generate = weeks;
        }

        if settings.horizon() == 0 || settings.days_of_week.is_empty() {
            mealvault_shared::bail!("Nothing to plan: check meals per week, weeks and days of week");
        }

        let now = self.now();
        let mut recipes = self.store.load_recipes().await?;
        if settings.enable_seasonality {
            let season = Season::current(u8::from(now.month()), settings.hemisphere);
            recipes = in_season(recipes, season);
        }

        let scorer = Scorer::new(millis(now));
        let assignment = assemble(&recipes, &settings, &scorer, rng);

        let date = format_date(now)?;
        let content = render_plan(&assignment, &settings, &self.render, &date);

        let mut path = format!("{}/Meal Plan - {date}.md", self.plan_folder);
        if input.new_file && self.store.plan_exists(&path).await? {
            let postfix = now
                .format(format_description!("[hour]-[minute]-[second]"))
                .map_err(|e| Error::Unknown(e.into()))?;
            path = format!("{}/Meal Plan - {date}_{postfix}.md", self.plan_folder);
        }

        self.store.write_plan(&path, &content).await?;
        self.store.set_current_plan(&path).await?;

        for recipe in assignment.selected_recipes() {
            self.store.mark_used(recipe, scorer.now()).await?;
        }

        let generated = Generated {
            path,
            filled: assignment.filled_count(),
            requested: assignment.len(),
        };

        tracing::info!(
            path = %generated.path,
            filled = generated.filled,
            requested = generated.requested,
            kid_meals = assignment.kid_meals.len(),
            "meal plan generated"
        );

        Ok(generated)
    }

    /// Schedule lines of the active plan.
    pub async fn entries(&self) -> Result<Vec<ChecklistEntry>> {
        let (_, content) = self.active_plan().await?;

        Ok(extract_entries(&content))
    }

    pub async fn change_day(
        &self,
        input: ChangeDay,
        rng: &mut impl RandomSource,
    ) -> Result<Changed> {
        let (path, content) = self.active_plan().await?;
        let entries = extract_entries(&content);
        let entry = find_entry(&entries, input.week, &input.day)?;
        let recipes = self.store.load_recipes().await?;

        let main = match input.recipe.as_deref() {
            Some(name) => find_recipe(&recipes, name)?,
            None => {
                let others = entries
                    .iter()
                    .filter(|e| e.line_index != entry.line_index)
                    .flat_map(|e| e.recipes.iter())
                    .filter_map(|name| recipes.iter().find(|r| &r.name == name))
                    .collect::<Vec<_>>();
                let scorer = Scorer::new(millis(self.now()));

                match select_main(&recipes, &entry.day, &self.settings, &others, &scorer, rng) {
                    Some(recipe) => recipe,
                    None => mealvault_shared::bail!(
                        "No recipe available for week {}, {}",
                        entry.week,
                        entry.day
                    ),
                }
            }
        };

        let kid = match input.kid.as_deref() {
            Some(name) => Some(find_recipe(&recipes, name)?),
            None => default_kid_meal(main, &entry.day, &self.settings, &recipes),
        };

        let mut updated = change_day_meal(&content, entry, main, kid, &self.render)?;
        if self.settings.generate_shopping_list {
            updated = regenerate_shopping_list(&updated, &recipes, &self.render);
        }

        self.store.write_plan(&path, &updated).await?;

        let at = millis(self.now());
        self.store.mark_used(main, at).await?;
        if let Some(kid) = kid {
            self.store.mark_used(kid, at).await?;
        }

        tracing::info!(
            week = entry.week,
            day = %entry.day,
            recipe = %main.name,
            kid = kid.map(|k| k.name.as_str()),
            "meal changed"
        );

        Ok(Changed {
            week: entry.week,
            day: entry.day.to_owned(),
            main: main.name.to_owned(),
            kid: kid.map(|k| k.name.to_owned()),
        })
    }

    pub async fn swap(&self, first: &DayRef, second: &DayRef) -> Result<()> {
        let (path, content) = self.active_plan().await?;
        let entries = extract_entries(&content);
        let first_entry = find_entry(&entries, first.week, &first.day)?;
        let second_entry = find_entry(&entries, second.week, &second.day)?;

        let mut updated = swap_days(&content, first_entry, second_entry)?;
        if self.settings.generate_shopping_list {
            let recipes = self.store.load_recipes().await?;
            updated = regenerate_shopping_list(&updated, &recipes, &self.render);
        }

        self.store.write_plan(&path, &updated).await?;

        tracing::info!(
            first = %format!("{} (Week {})", first_entry.day, first_entry.week),
            second = %format!("{} (Week {})", second_entry.day, second_entry.week),
            "meals swapped"
        );

        Ok(())
    }

    /// Rebuilds the shopping list of the active plan from its schedule.
    pub async fn regenerate_shopping(&self) -> Result<String> {
        let (path, content) = self.active_plan().await?;
        let recipes = self.store.load_recipes().await?;

        let updated = regenerate_shopping_list(&content, &recipes, &self.render);
        self.store.write_plan(&path, &updated).await?;

        tracing::info!(path = %path, "shopping list regenerated");

        Ok(path)
    }

    async fn active_plan(&self) -> Result<(String, String)> {
        let path = self.store.current_plan().await?.ok_or(Error::NoActivePlan)?;
        let content = self
            .store
            .read_plan(&path)
            .await?
            .ok_or_else(|| Error::PlanNotFound(path.to_owned()))?;

        Ok((path, content))
    }
}

fn find_entry<'a>(entries: &'a [ChecklistEntry], week: usize, day: &str) -> Result<&'a ChecklistEntry> {
    entries
        .iter()
        .find(|e| e.week == week && e.day.eq_ignore_ascii_case(day.trim()))
        .ok_or_else(|| Error::EntryNotFound {
            week,
            day: day.trim().to_owned(),
        })
}

fn find_recipe<'r>(recipes: &'r [Recipe], name: &str) -> Result<&'r Recipe> {
    let name = name.trim();

    recipes
        .iter()
        .find(|r| r.name == name)
        .or_else(|| recipes.iter().find(|r| r.name.eq_ignore_ascii_case(name)))
        .ok_or_else(|| Error::RecipeNotFound(name.to_owned()))
}

fn millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

fn format_date(at: OffsetDateTime) -> Result<String> {
    at.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| Error::Unknown(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_day_ref() {
        assert_eq!(
            "2:Friday".parse::<DayRef>().unwrap(),
            DayRef {
                week: 2,
                day: "Friday".to_owned()
            }
        );
        assert_eq!(" 1 : monday ".parse::<DayRef>().unwrap().day, "monday");
        assert!("Friday".parse::<DayRef>().is_err());
        assert!("x:Friday".parse::<DayRef>().is_err());
        assert!("0:Friday".parse::<DayRef>().is_err());
        assert!("1:".parse::<DayRef>().is_err());
    }

    #[test]
    fn find_recipe_prefers_exact_name() {
        let recipes = vec![
            Recipe {
                path: "a.md".to_owned(),
                name: "soup".to_owned(),
                ..Default::default()
            },
            Recipe {
                path: "b.md".to_owned(),
                name: "Soup".to_owned(),
                ..Default::default()
            },
        ];

        assert_eq!(find_recipe(&recipes, "Soup").unwrap().path, "b.md");
        assert_eq!(find_recipe(&recipes, "SOUP").unwrap().path, "a.md");
        assert!(matches!(
            find_recipe(&recipes, "Stew"),
            Err(Error::RecipeNotFound(name)) if name == "Stew"
        ));
    }

    #[test]
    fn date_format() {
        let at = time::macros::datetime!(2025-03-09 14:05:07 UTC);

        assert_eq!(format_date(at).unwrap(), "2025-03-09");
        assert_eq!(millis(at), 1_741_529_107_000);
    }
}
