pub mod config;
pub mod observability;

pub use config::Config;

use mealvault_mealplan::Command;
use mealvault_recipe::Vault;

/// Plan service over the configured vault.
pub fn create_command(config: &Config) -> Command<Vault> {
    let vault = Vault::new(&config.vault.path, &config.vault.recipe_folder)
        .min_rating(config.planner.min_rating);

    Command::new(vault, config.planner.clone(), config.render.clone())
        .plan_folder(&config.vault.plan_folder)
}
