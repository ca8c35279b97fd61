//! Random generators: thresholds, colors, identifiers, names, and pills.
//!
//! Pure functions of a [`RandomSource`]. Anything that touches session state
//! (unlocks, announcements) lives in `logic`.

use crate::rng::RandomSource;

use super::state::{Collectible, PillColor, RareKind};

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const IDENTIFIER_DIGITS: usize = 25;
pub const NAME_PREFIX: &str = "PILL-";

/// Clicks needed for the next pill, uniform in `[min, max]`.
pub fn roll_threshold(rng: &mut dyn RandomSource, min: u32, max: u32) -> u32 {
    rng.range_inclusive(min, max).max(1)
}

pub fn random_color(rng: &mut dyn RandomSource) -> PillColor {
    PillColor::new(rng.range_inclusive(0, PillColor::MAX))
}

/// 25 uniformly random decimal digits.
pub fn random_identifier(rng: &mut dyn RandomSource) -> String {
    (0..IDENTIFIER_DIGITS)
        .map(|_| char::from(b'0' + rng.range_inclusive(0, 9) as u8))
        .collect()
}

/// `PILL-` followed by three uniformly random uppercase letters.
pub fn random_name(rng: &mut dyn RandomSource) -> String {
    let mut name = String::from(NAME_PREFIX);
    for _ in 0..3 {
        let idx = rng.range_inclusive(0, LETTERS.len() as u32 - 1) as usize;
        name.push(char::from(LETTERS[idx]));
    }
    name
}

pub fn rare_collectible(kind: RareKind, rng: &mut dyn RandomSource) -> Collectible {
    Collectible {
        color: kind.color(),
        identifier: format!("SPECIAL-{}-{}", kind.name(), random_identifier(rng)),
        name: format!("{}{}", NAME_PREFIX, kind.name()),
        rarity: Some(kind),
    }
}

pub fn normal_collectible(rng: &mut dyn RandomSource) -> Collectible {
    let color = random_color(rng);
    let identifier = random_identifier(rng);
    let name = random_name(rng);
    Collectible {
        color,
        identifier,
        name,
        rarity: None,
    }
}

/// Roll one pill: rare with probability `rare_chance`, normal otherwise.
pub fn roll_collectible(rng: &mut dyn RandomSource, rare_chance: f64) -> Collectible {
    if rng.unit() < rare_chance {
        let kinds = RareKind::all();
        let idx = rng.range_inclusive(0, kinds.len() as u32 - 1) as usize;
        rare_collectible(kinds[idx], rng)
    } else {
        normal_collectible(rng)
    }
}
