use mealvault_shared::{RandomSource, SeededRandom, ThreadRandom};

pub mod edit;
pub mod plan;

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => {
            tracing::debug!(seed, "using seeded random source");
            Box::new(SeededRandom::new(seed))
        }
        None => Box::new(ThreadRandom),
    }
}
