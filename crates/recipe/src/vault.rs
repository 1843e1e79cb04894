use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mealvault_shared::Result;
use mealvault_shared::recipe::Recipe;
use mealvault_shared::store::{PlanStore, RecipeStore};
use serde::{Deserialize, Serialize};

use crate::note::{parse_note, set_last_used};

const STATE_FILE: &str = ".mealvault/state.json";

#[derive(Serialize, Deserialize, Default)]
struct State {
    current_plan: Option<String>,
}

/// A directory of markdown notes: recipes live under `recipe_folder`,
/// generated plans anywhere else. All paths handed out are relative to the
/// vault root and use `/` separators.
#[derive(Clone, Debug)]
pub struct Vault {
    root: PathBuf,
    recipe_folder: String,
    min_rating: Option<u8>,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>, recipe_folder: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            recipe_folder: normalize(&recipe_folder.into()),
            min_rating: None,
        }
    }

    /// Drops rated recipes below `min_rating`; unrated recipes always load.
    pub fn min_rating(mut self, min_rating: Option<u8>) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(normalize(relative))
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    async fn read_state(&self) -> Result<State> {
        match tokio::fs::read_to_string(self.resolve(STATE_FILE)).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(State::default()),
            Err(e) => Err(e.into()),
        }
    }
}

fn normalize(path: &str) -> String {
    path.trim().trim_matches('/').to_owned()
}

#[async_trait]
impl RecipeStore for Vault {
    async fn load_recipes(&self) -> Result<Vec<Recipe>> {
        let folder = self.resolve(&self.recipe_folder);
        if !tokio::fs::try_exists(&folder).await? {
            tracing::warn!(folder = %folder.display(), "recipe folder not found");
            return Ok(vec![]);
        }

        let mut recipes = vec![];
        let mut pending = vec![folder];

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                    continue;
                }

                if path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }

                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let content = tokio::fs::read_to_string(&path).await?;
                let recipe = parse_note(self.relative(&path), name, &content);

                if let (Some(min), Some(rating)) = (self.min_rating, recipe.rating)
                    && rating < min
                {
                    tracing::debug!(recipe = %recipe.name, rating, min, "skipping low rated recipe");
                    continue;
                }

                recipes.push(recipe);
            }
        }

        recipes.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!(count = recipes.len(), "recipes loaded");

        Ok(recipes)
    }

    async fn mark_used(&self, recipe: &Recipe, at: i64) -> Result<()> {
        let path = self.resolve(&recipe.path);
        let content = tokio::fs::read_to_string(&path).await?;
        tokio::fs::write(&path, set_last_used(&content, at)).await?;

        Ok(())
    }
}

#[async_trait]
impl PlanStore for Vault {
    async fn read_plan(&self, path: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.resolve(path)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_plan(&self, path: &str, content: &str) -> Result<()> {
        let path = self.resolve(path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(path, content).await?;

        Ok(())
    }

    async fn plan_exists(&self, path: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.resolve(path)).await?)
    }

    async fn current_plan(&self) -> Result<Option<String>> {
        Ok(self.read_state().await?.current_plan)
    }

    async fn set_current_plan(&self, path: &str) -> Result<()> {
        let mut state = self.read_state().await?;
        state.current_plan = Some(normalize(path));

        let raw = serde_json::to_string_pretty(&state)?;
        self.write_plan(STATE_FILE, &raw).await
    }
}
