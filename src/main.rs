use anyhow::Result;
use clap::{Parser, Subcommand};
use mealvault_mealplan::DayRef;

mod cli;

/// mealvault - weekly meal plans from a markdown recipe vault
#[derive(Parser)]
#[command(name = "mealvault")]
#[command(about = "Weekly meal planning over a markdown recipe vault", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new meal plan and make it the active one
    Generate {
        /// Number of weeks (overrides config file)
        #[arg(long)]
        weeks: Option<usize>,

        /// Keep an existing plan of the same date and write a new file
        #[arg(long)]
        new_file: bool,

        /// Seed for reproducible plans
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Replace the meal of one day in the active plan
    Change {
        #[arg(long)]
        week: usize,

        #[arg(long)]
        day: String,

        /// Recipe name; picked automatically when omitted
        #[arg(long)]
        recipe: Option<String>,

        /// Kid meal served alongside
        #[arg(long)]
        kid: Option<String>,

        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Exchange the meals of two days, e.g. `--first 1:Monday --second 2:Friday`
    Swap {
        #[arg(long)]
        first: DayRef,

        #[arg(long)]
        second: DayRef,
    },
    /// Rebuild the shopping list of the active plan
    Shopping,
    /// List the schedule of the active plan
    Schedule,
    /// List the recipes available for planning
    Recipes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealvault::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealvault::observability::init_observability(
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Generate {
            weeks,
            new_file,
            seed,
        } => cli::plan::generate(config, weeks, new_file, seed).await,
        Commands::Change {
            week,
            day,
            recipe,
            kid,
            seed,
        } => cli::edit::change(config, week, day, recipe, kid, seed).await,
        Commands::Swap { first, second } => cli::edit::swap(config, first, second).await,
        Commands::Shopping => cli::edit::shopping(config).await,
        Commands::Schedule => cli::plan::schedule(config).await,
        Commands::Recipes => cli::plan::recipes(config).await,
    }
}
