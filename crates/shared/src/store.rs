use async_trait::async_trait;

use crate::Result;
use crate::recipe::Recipe;

/// Read access to recipe notes plus the "last used" write-back.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Snapshot of every recipe, already filtered by the store's minimum rating.
    async fn load_recipes(&self) -> Result<Vec<Recipe>>;

    /// Records `at` (unix milliseconds) as the recipe's last use.
    async fn mark_used(&self, recipe: &Recipe, at: i64) -> Result<()>;
}

/// Persistence of rendered plan documents and of the active plan reference.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn read_plan(&self, path: &str) -> Result<Option<String>>;

    async fn write_plan(&self, path: &str, content: &str) -> Result<()>;

    async fn plan_exists(&self, path: &str) -> Result<bool>;

    async fn current_plan(&self) -> Result<Option<String>>;

    async fn set_current_plan(&self, path: &str) -> Result<()>;
}
