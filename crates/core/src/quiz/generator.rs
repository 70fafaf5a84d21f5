use rand::seq::SliceRandom;
use rand::Rng;

use chromalab_palette::{CatalogColor, ColorRegistry, Rgb};

use crate::mixer::{mix, Mix};

use super::question::{ColorPair, MixQuestion, RelationKind, RelationQuestion};

/// Upper bound on rejection-sampling attempts when drawing distractors.
/// The fixed catalog never comes close; the bound keeps generation total
/// if the pool ever shrinks.
const MAX_SAMPLE_ATTEMPTS: usize = 1_000;

const WRONG_OPTION_COUNT: usize = 3;

/// Build a mixture question from every unordered pair of mixing colors.
///
/// Returns `None` when no pair produces a blend, which cannot happen with
/// the built-in catalog.
pub fn mix_question<R: Rng + ?Sized>(registry: &ColorRegistry, rng: &mut R) -> Option<MixQuestion> {
    let sources = registry.mixing_colors();

    let mut pool = Vec::new();
    for (i, &first) in sources.iter().enumerate() {
        for &second in sources.iter().skip(i + 1) {
            if let Mix::Blended(result) = mix(registry, first, second, 0.5) {
                pool.push((ColorPair::new(first.clone(), second.clone()), result));
            }
        }
    }
    if pool.is_empty() {
        return None;
    }

    let (correct, target) = pool[rng.random_range(0..pool.len())].clone();

    let mut wrong: Vec<ColorPair> = Vec::new();
    let mut attempts = 0;
    while wrong.len() < WRONG_OPTION_COUNT && attempts < MAX_SAMPLE_ATTEMPTS {
        attempts += 1;
        let first = sources[rng.random_range(0..sources.len())];
        let second = sources[rng.random_range(0..sources.len())];
        if first.rgb == second.rgb {
            continue;
        }
        let candidate = ColorPair::new(first.clone(), second.clone());
        if candidate == correct || wrong.contains(&candidate) {
            continue;
        }
        wrong.push(candidate);
    }
    // Sampling ran out of attempts; fill from the pool deterministically.
    if wrong.len() < WRONG_OPTION_COUNT {
        for (pair, _) in &pool {
            if wrong.len() == WRONG_OPTION_COUNT {
                break;
            }
            if *pair != correct && !wrong.contains(pair) {
                wrong.push(pair.clone());
            }
        }
    }

    let mut options = wrong;
    options.push(correct.clone());
    options.shuffle(rng);

    Some(MixQuestion {
        target,
        options,
        correct,
    })
}

/// Build a relation question about a random wheel color, asking for either
/// its two neighbours or its single opposite.
pub fn relation_question<R: Rng + ?Sized>(
    registry: &ColorRegistry,
    rng: &mut R,
) -> RelationQuestion {
    let wheel = registry.wheel();
    let len = wheel.len();

    let kind = if rng.random_bool(0.5) {
        RelationKind::Similar
    } else {
        RelationKind::Opposite
    };
    let target_index = rng.random_range(0..len);
    let target = wheel[target_index].clone();

    let correct: Vec<CatalogColor> = match kind {
        RelationKind::Similar => vec![
            wheel[(target_index + len - 1) % len].clone(),
            wheel[(target_index + 1) % len].clone(),
        ],
        RelationKind::Opposite => vec![wheel[(target_index + len / 2) % len].clone()],
    };

    let taken = |candidate: &CatalogColor, wrong: &[CatalogColor]| {
        candidate.rgb == target.rgb
            || correct.iter().any(|c| c.rgb == candidate.rgb)
            || wrong.iter().any(|c| c.rgb == candidate.rgb)
    };

    let mut wrong: Vec<CatalogColor> = Vec::new();
    let mut attempts = 0;
    while wrong.len() < WRONG_OPTION_COUNT && attempts < MAX_SAMPLE_ATTEMPTS {
        attempts += 1;
        let candidate = &wheel[rng.random_range(0..len)];
        if !taken(candidate, &wrong) {
            wrong.push(candidate.clone());
        }
    }
    if wrong.len() < WRONG_OPTION_COUNT {
        for candidate in wheel {
            if wrong.len() == WRONG_OPTION_COUNT {
                break;
            }
            if !taken(candidate, &wrong) {
                wrong.push(candidate.clone());
            }
        }
    }

    let correct_rgbs: Vec<Rgb> = correct.iter().map(|c| c.rgb).collect();
    let mut options = wrong;
    options.extend(correct);
    options.shuffle(rng);

    RelationQuestion {
        kind,
        target,
        options,
        correct: correct_rgbs,
    }
}
