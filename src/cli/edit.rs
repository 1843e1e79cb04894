use anyhow::Result;
use mealvault_mealplan::{ChangeDay, DayRef};

use super::random_source;

pub async fn change(
    config: mealvault::Config,
    week: usize,
    day: String,
    recipe: Option<String>,
    kid: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let command = mealvault::create_command(&config);
    let mut rng = random_source(seed);

    let changed = command
        .change_day(
            ChangeDay {
                week,
                day,
                recipe,
                kid,
            },
            &mut rng.as_mut(),
        )
        .await?;

    match changed.kid {
        Some(kid) => println!(
            "Updated {} (Week {}) to {} with {}",
            changed.day, changed.week, changed.main, kid
        ),
        None => println!(
            "Updated {} (Week {}) to {}",
            changed.day, changed.week, changed.main
        ),
    }

    Ok(())
}

pub async fn swap(config: mealvault::Config, first: DayRef, second: DayRef) -> Result<()> {
    let command = mealvault::create_command(&config);
    command.swap(&first, &second).await?;

    println!(
        "Swapped {} (Week {}) with {} (Week {})",
        first.day, first.week, second.day, second.week
    );

    Ok(())
}

pub async fn shopping(config: mealvault::Config) -> Result<()> {
    let command = mealvault::create_command(&config);
    let path = command.regenerate_shopping().await?;

    println!("Shopping list regenerated: {path}");

    Ok(())
}
