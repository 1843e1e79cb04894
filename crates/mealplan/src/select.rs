use mealvault_shared::recipe::Recipe;
use mealvault_shared::{RandomSource, shuffle};

use crate::score::{Position, Scorer};

/// Shuffles the pool, scores every candidate against `reference` and picks
/// uniformly among those tied at the top score.
pub fn select_best<'r>(
    mut pool: Vec<&'r Recipe>,
    reference: &[&Recipe],
    position: Option<Position<'_>>,
    scorer: &Scorer,
    rng: &mut impl RandomSource,
) -> Option<&'r Recipe> {
    if pool.is_empty() {
        return None;
    }

    shuffle(&mut pool, rng);

    let scored = pool
        .into_iter()
        .map(|recipe| (recipe, scorer.score(recipe, reference, position, rng)))
        .collect::<Vec<_>>();

    let top = scored
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);

    let tied = scored
        .into_iter()
        .filter(|(_, score)| *score == top)
        .map(|(recipe, _)| recipe)
        .collect::<Vec<_>>();

    tied.get(rng.index(tied.len())).copied()
}
