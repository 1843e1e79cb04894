use anyhow::Result;
use mealvault_mealplan::Generate;

use super::random_source;

pub async fn generate(
    config: mealvault::Config,
    weeks: Option<usize>,
    new_file: bool,
    seed: Option<u64>,
) -> Result<()> {
    let command = mealvault::create_command(&config);
    let mut rng = random_source(seed);

    let generated = command
        .generate(Generate { weeks, new_file }, &mut rng.as_mut())
        .await?;

    println!("Meal plan created: {}", generated.path);
    if generated.shortfall() > 0 {
        println!(
            "Only {} of {} meals could be planned, check your recipes and day constraints",
            generated.filled, generated.requested
        );
    }

    Ok(())
}

pub async fn schedule(config: mealvault::Config) -> Result<()> {
    let command = mealvault::create_command(&config);

    let mut week = 0;
    for entry in command.entries().await? {
        if entry.week != week {
            week = entry.week;
            println!("Week {week}");
        }

        println!("  {:<10} {}", entry.day, entry.recipes.join(" & "));
    }

    Ok(())
}

pub async fn recipes(config: mealvault::Config) -> Result<()> {
    let command = mealvault::create_command(&config);
    let recipes = command.recipes().await?;

    for recipe in &recipes {
        let mut flags = vec![];
        if recipe.family_friendly {
            flags.push("family");
        } else if recipe.kid_friendly {
            flags.push("kid");
        }

        let difficulty = recipe
            .difficulty
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_owned());

        println!(
            "{:<32} {:>4} min  {:<6} {}",
            recipe.name,
            recipe.total_time(),
            difficulty,
            flags.join(",")
        );
    }

    tracing::info!(count = recipes.len(), "recipes listed");

    Ok(())
}
