use std::env;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealvault_mealplan::{DEFAULT_PLAN_FOLDER, RenderSettings};
use mealvault_shared::mealplan::PlanSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub vault: VaultConfig,
    #[serde(default)]
    pub planner: PlanSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VaultConfig {
    /// Vault root directory.
    pub path: String,
    /// Folder holding recipe notes, relative to the vault root.
    pub recipe_folder: String,
    /// Folder generated plans are written to, relative to the vault root.
    pub plan_folder: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShoppingConfig {
    /// Sum ingredient quantities per week instead of listing them per recipe.
    #[serde(default)]
    pub consolidate: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALVAULT__VAULT__PATH, MEALVAULT__PLANNER__MEALS_PER_WEEK, etc.)
    /// 2. Config file specified by path, `CONFIG_PATH`, or `config/default.toml`
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("vault.path", ".")?
            .set_default("vault.recipe_folder", "Recipes")?
            .set_default("vault.plan_folder", DEFAULT_PLAN_FOLDER)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALVAULT")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.render.consolidate_shopping = config.shopping.consolidate;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.vault.path.trim().is_empty() {
            return Err("Vault path must not be empty".to_string());
        }
        if self.vault.recipe_folder.trim().trim_matches('/').is_empty() {
            return Err("Recipe folder must not be empty".to_string());
        }
        if self.planner.meals_per_week == 0 {
            return Err("Meals per week must be at least 1".to_string());
        }
        if self.planner.weeks_to_generate == 0 {
            return Err("Weeks to generate must be at least 1".to_string());
        }
        if self.planner.days_of_week.iter().all(|d| d.trim().is_empty()) {
            return Err("Days of week must name at least one day".to_string());
        }
        if let Some(rating) = self.planner.min_rating
            && !(1..=5).contains(&rating)
        {
            return Err(format!("Minimum rating must be between 1 and 5, got {rating}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            vault: VaultConfig {
                path: "vault".to_string(),
                recipe_folder: "Recipes".to_string(),
                plan_folder: "Meals".to_string(),
            },
            planner: PlanSettings::default(),
            render: RenderSettings::default(),
            shopping: ShoppingConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_meals() {
        let mut config = config();
        config.planner.meals_per_week = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_weeks() {
        let mut config = config();
        config.planner.weeks_to_generate = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_days() {
        let mut config = config();
        config.planner.days_of_week = vec![" ".to_string()];

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_min_rating_range() {
        let mut config = config();
        config.planner.min_rating = Some(6);
        assert!(config.validate().is_err());

        config.planner.min_rating = Some(0);
        assert!(config.validate().is_err());

        config.planner.min_rating = Some(5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_recipe_folder() {
        let mut config = config();
        config.vault.recipe_folder = "/".to_string();

        assert!(config.validate().is_err());
    }
}
