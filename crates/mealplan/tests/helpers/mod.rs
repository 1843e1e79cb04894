#![allow(dead_code)]

use std::path::Path;

use mealvault_mealplan::{Command, RenderSettings};
use mealvault_recipe::Vault;
use mealvault_shared::mealplan::PlanSettings;
use temp_dir::TempDir;
use time::OffsetDateTime;

pub const NOW: OffsetDateTime = time::macros::datetime!(2025-01-06 12:00:00 UTC);
pub const NOW_MS: i64 = 1_736_164_800_000;

pub fn setup_command(dir: &TempDir, settings: PlanSettings) -> Command<Vault> {
    Command::new(
        Vault::new(dir.path(), "Recipes"),
        settings,
        RenderSettings::default(),
    )
    .at(NOW)
}

pub struct Note<'a> {
    pub name: &'a str,
    pub front_matter: &'a str,
    pub ingredients: &'a [&'a str],
}

impl<'a> Note<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            front_matter: "",
            ingredients: &[],
        }
    }

    pub fn front_matter(mut self, front_matter: &'a str) -> Self {
        self.front_matter = front_matter;
        self
    }

    pub fn ingredients(mut self, ingredients: &'a [&'a str]) -> Self {
        self.ingredients = ingredients;
        self
    }
}

pub async fn write_recipes(root: &Path, notes: &[Note<'_>]) -> anyhow::Result<()> {
    let folder = root.join("Recipes");
    tokio::fs::create_dir_all(&folder).await?;

    for note in notes {
        let mut content = format!("---\n{}\n---\n# {}\n\n## Ingredients\n", note.front_matter, note.name);
        for ingredient in note.ingredients {
            content.push_str(&format!("- {ingredient}\n"));
        }

        tokio::fs::write(folder.join(format!("{}.md", note.name)), content).await?;
    }

    Ok(())
}

pub async fn read_note(root: &Path, name: &str) -> anyhow::Result<String> {
    Ok(tokio::fs::read_to_string(root.join("Recipes").join(format!("{name}.md"))).await?)
}
