//! Score rules

use super::asteroid::AsteroidSize;
use super::state::Temperature;

/// Score for destroying an asteroid at the normal temperature
pub fn base_score(size: AsteroidSize) -> u64 {
    match size {
        AsteroidSize::Large => 200,
        AsteroidSize::Medium => 100,
        AsteroidSize::Small => 50,
    }
}

/// Score credited for a bullet destroying an asteroid of `size`.
///
/// High temperature doubles the base score. Low temperature shatters the rock
/// outright, so the hit pays for its whole fragment tree at once.
pub fn bullet_hit_score(size: AsteroidSize, temperature: Temperature) -> u64 {
    match temperature {
        Temperature::Normal => base_score(size),
        Temperature::High => base_score(size) * 2,
        Temperature::Low => match size {
            AsteroidSize::Large => 700,
            AsteroidSize::Medium => base_score(AsteroidSize::Medium) + 2 * base_score(AsteroidSize::Small),
            AsteroidSize::Small => base_score(AsteroidSize::Small),
        },
    }
}
