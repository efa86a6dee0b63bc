//! Damage calculation
//!
//! Handles all combat math: damage, crits, dodges, armor.

use rand::Rng;

use crate::entities::DODGE_CAP;

/// Highest share of enemy damage that defense can absorb
pub const MAX_DAMAGE_REDUCTION: f64 = 0.75;
/// Defense at which half of incoming damage is absorbed
const REDUCTION_SCALE: f64 = 20.0;

/// Result of a combat attack
#[derive(Debug, Clone, PartialEq)]
pub struct AttackResult {
    /// Damage before the crit multiplier
    pub base_damage: i32,
    /// Final damage dealt
    pub final_damage: i32,
    /// Whether the attack was a critical hit
    pub is_crit: bool,
    /// Whether the attack was dodged
    pub is_dodge: bool,
    /// Descriptive message
    pub message: String,
}

impl AttackResult {
    pub fn dodged() -> Self {
        Self {
            base_damage: 0,
            final_damage: 0,
            is_crit: false,
            is_dodge: true,
            message: "dodged".to_string(),
        }
    }
}

/// Roll a percentage check: succeeds when `rand[0,100) < chance`
pub fn roll_percent(chance: i32, rng: &mut impl Rng) -> bool {
    rng.gen_range(0.0..100.0) < chance as f64
}

/// Player weapon damage before any crit: half of defense is ignored
pub fn base_physical_damage(attack: i32, defense: i32) -> i32 {
    (attack - defense.max(0) / 2).max(1)
}

/// Spell damage: half of magic is added, rounded down
pub fn spell_damage(damage: i32, magic: i32) -> i32 {
    damage + (magic as f64 * 0.5).floor() as i32
}

/// Share of damage absorbed by defense.
///
/// Diminishing returns: `def / (def + 20)`, so 20 defense halves damage,
/// capped at 75%.
pub fn damage_reduction_percent(defense: i32) -> f64 {
    let defense = defense.max(0) as f64;
    (defense / (defense + REDUCTION_SCALE)).min(MAX_DAMAGE_REDUCTION)
}

/// Chance to dodge, in percent
pub fn dodge_chance(dodge: i32) -> i32 {
    dodge.clamp(0, DODGE_CAP)
}

/// Calculate a player's weapon attack
pub fn calculate_player_attack(
    attack: i32,
    critical_hit: i32,
    enemy_defense: i32,
    rng: &mut impl Rng,
) -> AttackResult {
    let is_crit = roll_percent(critical_hit, rng);
    let base_damage = base_physical_damage(attack, enemy_defense);
    let final_damage = if is_crit { base_damage * 2 } else { base_damage };

    let message = if is_crit {
        format!("CRIT! {} damage", final_damage)
    } else {
        format!("{} damage", final_damage)
    };

    AttackResult {
        base_damage,
        final_damage,
        is_crit,
        is_dodge: false,
        message,
    }
}

/// Calculate an enemy's attack against the player
pub fn calculate_enemy_attack(
    enemy_attack: i32,
    player_defense: i32,
    player_dodge: i32,
    rng: &mut impl Rng,
) -> AttackResult {
    if roll_percent(dodge_chance(player_dodge), rng) {
        return AttackResult::dodged();
    }

    let reduction = damage_reduction_percent(player_defense);
    let final_damage = ((enemy_attack as f64 * (1.0 - reduction)).floor() as i32).max(1);

    AttackResult {
        base_damage: enemy_attack,
        final_damage,
        is_crit: false,
        is_dodge: false,
        message: format!("{} damage", final_damage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_damage_reduction_diminishing() {
        assert_eq!(damage_reduction_percent(0), 0.0);
        assert!((damage_reduction_percent(20) - 0.5).abs() < 1e-9);
        assert!((damage_reduction_percent(40) - 2.0 / 3.0).abs() < 1e-9);
        // 60 defense would be exactly 75%, more stays capped
        assert_eq!(damage_reduction_percent(60), MAX_DAMAGE_REDUCTION);
        assert_eq!(damage_reduction_percent(500), MAX_DAMAGE_REDUCTION);
        assert_eq!(damage_reduction_percent(-5), 0.0);
    }

    #[test]
    fn test_physical_damage_floor() {
        assert_eq!(base_physical_damage(7, 4), 5);
        assert_eq!(base_physical_damage(7, 5), 5);
        assert_eq!(base_physical_damage(2, 30), 1);
    }

    #[test]
    fn test_spell_damage_adds_half_magic() {
        assert_eq!(spell_damage(15, 6), 18);
        assert_eq!(spell_damage(15, 7), 18);
        assert_eq!(spell_damage(0, 1), 0);
    }

    #[test]
    fn test_crit_doubles() {
        let mut rng = StdRng::seed_from_u64(1);
        let always = calculate_player_attack(10, 100, 4, &mut rng);
        assert!(always.is_crit);
        assert_eq!(always.final_damage, 16);

        let never = calculate_player_attack(10, 0, 4, &mut rng);
        assert!(!never.is_crit);
        assert_eq!(never.final_damage, 8);
    }

    #[test]
    fn test_enemy_attack_never_below_one() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let result = calculate_enemy_attack(1, 1000, 0, &mut rng);
            assert!(!result.is_dodge);
            assert_eq!(result.final_damage, 1);
        }
        let result = calculate_enemy_attack(20, 20, 0, &mut rng);
        assert_eq!(result.final_damage, 10);
    }

    #[test]
    fn test_dodge_is_capped() {
        assert_eq!(dodge_chance(200), DODGE_CAP);
        assert_eq!(dodge_chance(-3), 0);

        let mut rng = StdRng::seed_from_u64(11);
        let hits = (0..2000)
            .filter(|_| !calculate_enemy_attack(10, 0, 1000, &mut rng).is_dodge)
            .count();
        // Roughly 20% of attacks land even at absurd dodge
        assert!(hits > 250 && hits < 550, "hits = {}", hits);
    }
}
