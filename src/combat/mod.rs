//! Combat system

pub mod damage;
pub mod resolver;
pub mod status;

pub use damage::{calculate_enemy_attack, calculate_player_attack, damage_reduction_percent, dodge_chance, spell_damage, AttackResult};
pub use resolver::{reward_gold, Combat, CombatAction, CombatError, CombatEvent, CombatOutcome, CombatPhase};
pub use status::{parse_boost_effect, StatusEffects, StatusTickResult, TimedBoost};
