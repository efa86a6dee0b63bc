//! Experience and leveling
//!
//! Thresholds are per level and experience is spent when a level is gained.

/// XP needed to advance from `level` to `level + 1`
pub fn xp_for_level(level: u32) -> u32 {
    level.max(1).saturating_mul(level.max(1)).saturating_mul(50)
}

/// Spend experience on as many levels as it covers.
///
/// Returns the new level, the leftover experience and how many levels were
/// gained.
pub fn apply_experience(level: u32, experience: u32) -> (u32, u32, u32) {
    let mut level = level.max(1);
    let mut experience = experience;
    let mut gained = 0;

    while experience >= xp_for_level(level) {
        experience -= xp_for_level(level);
        level += 1;
        gained += 1;
    }

    (level, experience, gained)
}

/// Score recorded on game over
pub fn score(level: u32, experience: u32) -> u32 {
    level.saturating_mul(100).saturating_add(experience)
}
