//! Turn-based combat resolution
//!
//! One [`Combat`] per encounter. The player acts, the enemy answers, and
//! the encounter ends when either side drops or the player gets away.
//! Every action reports what happened as [`CombatEvent`]s so the caller can
//! turn them into messages and sound cues.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::damage::{calculate_enemy_attack, calculate_player_attack, spell_damage};
use crate::entities::{Enemy, Player, PotionUse};
use crate::items::ItemId;

/// Probability that running away works
pub const FLEE_CHANCE: f64 = 0.5;

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    EnemyDefeated,
    PlayerDefeated,
    Fled,
}

/// Whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    PlayerTurn,
    EnemyTurn,
    Ended(CombatOutcome),
}

/// Something the player can do on their turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    CastSpell(String),
    UseItem(ItemId),
    Flee,
}

/// Why an action was refused; nothing changes when one is returned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("it is not your turn")]
    NotPlayerTurn,
    #[error("you do not know that spell")]
    UnknownSpell,
    #[error("not enough mana to cast {0}")]
    NotEnoughMana(String),
    #[error("you are not carrying that item")]
    NoSuchItem,
    #[error("{0} cannot be used in combat")]
    NotUsable(String),
}

/// A single thing that happened during a round
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    PlayerHit {
        damage: i32,
        crit: bool,
    },
    SpellCast {
        name: String,
        damage: Option<i32>,
        healed: i32,
        stunned: bool,
    },
    PotionUsed(PotionUse),
    FleeFailed,
    Fled,
    EnemyStunned,
    PlayerDodged,
    EnemyHit {
        damage: i32,
    },
    BoostsExpired(Vec<String>),
    EnemyDefeated,
    PlayerDefeated,
}

/// State of one encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combat {
    /// Id of the enemy being fought
    pub enemy_id: u64,
    pub phase: CombatPhase,
    /// Enemy skips its next turn
    pub enemy_stunned: bool,
    /// Completed rounds
    pub round: u32,
}

impl Combat {
    pub fn new(enemy_id: u64) -> Self {
        Self {
            enemy_id,
            phase: CombatPhase::PlayerTurn,
            enemy_stunned: false,
            round: 0,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, CombatPhase::Ended(_))
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            CombatPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Resolve one player action, followed by the enemy's answer when the
    /// fight goes on
    pub fn act(
        &mut self,
        action: &CombatAction,
        player: &mut Player,
        enemy: &mut Enemy,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>, CombatError> {
        if self.phase != CombatPhase::PlayerTurn {
            return Err(CombatError::NotPlayerTurn);
        }

        let mut events = Vec::new();
        match action {
            CombatAction::Attack => {
                let result = calculate_player_attack(
                    player.total.attack,
                    player.total.critical_hit,
                    enemy.defense,
                    rng,
                );
                enemy.take_damage(result.final_damage);
                events.push(CombatEvent::PlayerHit {
                    damage: result.final_damage,
                    crit: result.is_crit,
                });
            }
            CombatAction::CastSpell(id) => {
                let spell = player.spell(id).cloned().ok_or(CombatError::UnknownSpell)?;
                if player.mana < spell.mana_cost {
                    return Err(CombatError::NotEnoughMana(spell.name));
                }
                player.mana -= spell.mana_cost;

                let damage = spell.damage.map(|base| {
                    let amount = spell_damage(base, player.total.magic);
                    enemy.take_damage(amount);
                    amount
                });
                let stunned = spell.stuns();
                if stunned {
                    self.enemy_stunned = true;
                }
                let healed = spell.healing.map_or(0, |amount| player.heal(amount));

                events.push(CombatEvent::SpellCast {
                    name: spell.name,
                    damage,
                    healed,
                    stunned,
                });
            }
            CombatAction::UseItem(id) => {
                let item = player.inventory.get_by_id(*id).ok_or(CombatError::NoSuchItem)?;
                let name = item.name.clone();
                let used = player.use_item(*id).ok_or(CombatError::NotUsable(name))?;
                events.push(CombatEvent::PotionUsed(used));
            }
            CombatAction::Flee => {
                if rng.gen_bool(FLEE_CHANCE) {
                    enemy.reset_health();
                    self.phase = CombatPhase::Ended(CombatOutcome::Fled);
                    events.push(CombatEvent::Fled);
                    return Ok(events);
                }
                events.push(CombatEvent::FleeFailed);
            }
        }

        if !enemy.is_alive() {
            self.phase = CombatPhase::Ended(CombatOutcome::EnemyDefeated);
            events.push(CombatEvent::EnemyDefeated);
            return Ok(events);
        }

        self.phase = CombatPhase::EnemyTurn;
        self.enemy_turn(player, enemy, rng, &mut events);
        Ok(events)
    }

    /// The enemy's half of a round
    fn enemy_turn(
        &mut self,
        player: &mut Player,
        enemy: &Enemy,
        rng: &mut impl Rng,
        events: &mut Vec<CombatEvent>,
    ) {
        if self.enemy_stunned {
            self.enemy_stunned = false;
            events.push(CombatEvent::EnemyStunned);
        } else {
            let result = calculate_enemy_attack(enemy.attack, player.total.defense, player.total.dodge, rng);
            if result.is_dodge {
                events.push(CombatEvent::PlayerDodged);
            } else {
                let taken = player.take_damage(result.final_damage);
                events.push(CombatEvent::EnemyHit { damage: taken });
            }
        }

        if player.is_dead() {
            self.phase = CombatPhase::Ended(CombatOutcome::PlayerDefeated);
            events.push(CombatEvent::PlayerDefeated);
            return;
        }

        self.round += 1;
        let tick = player.boosts.tick();
        if tick.effects_expired() {
            player.recompute();
            events.push(CombatEvent::BoostsExpired(tick.messages));
        }
        self.phase = CombatPhase::PlayerTurn;
    }
}

/// Gold paid for a kill, scaled by luck
pub fn reward_gold(gold_value: u32, luck: i32) -> u32 {
    let scaled = gold_value as f64 * (1.0 + luck as f64 / 100.0);
    scaled.floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CharacterClass, Race, Spell, Stat};
    use crate::items::{Item, ItemKind, Rarity};
    use crate::world::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rat(health: i32, attack: i32) -> Enemy {
        let mut enemy = Enemy::new(1, "Sewer Rat", Race::Rat, 'r', 1, Position::new(2, 2)).with_health(health);
        enemy.attack = attack;
        enemy.defense = 2;
        enemy
    }

    #[test]
    fn test_attack_kills_weak_enemy() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut player = Player::new(CharacterClass::Warrior);
        let mut enemy = rat(1, 5);
        let mut combat = Combat::new(enemy.id);

        let events = combat.act(&CombatAction::Attack, &mut player, &mut enemy, &mut rng).unwrap();
        assert_eq!(combat.outcome(), Some(CombatOutcome::EnemyDefeated));
        assert_eq!(events.last(), Some(&CombatEvent::EnemyDefeated));
        // The enemy never got to swing
        assert_eq!(player.health, player.max_health);
        assert!(combat.act(&CombatAction::Attack, &mut player, &mut enemy, &mut rng).is_err());
    }

    #[test]
    fn test_enemy_answers_and_round_counts() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut player = Player::new(CharacterClass::Warrior);
        player.base.dodge = 0;
        player.recompute();
        let mut enemy = rat(500, 6);
        let mut combat = Combat::new(enemy.id);

        combat.act(&CombatAction::Attack, &mut player, &mut enemy, &mut rng).unwrap();
        assert_eq!(combat.phase, CombatPhase::PlayerTurn);
        assert_eq!(combat.round, 1);
        // def 3 -> 13% absorbed, floor(6 * 0.87) = 5
        assert_eq!(player.health, player.max_health - 5);
    }

    #[test]
    fn test_spell_rules() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut player = Player::new(CharacterClass::Mage);
        let mut enemy = rat(500, 1);
        let mut combat = Combat::new(enemy.id);

        let not_known = CombatAction::CastSpell("meteor".to_string());
        assert_eq!(
            combat.act(&not_known, &mut player, &mut enemy, &mut rng),
            Err(CombatError::UnknownSpell)
        );

        player.learn_spell(Spell::new("zap", "Zap", 10).damage(10).effect("Stuns enemy for 1 turn"));
        player.mana = 5;
        let zap = CombatAction::CastSpell("zap".to_string());
        assert!(matches!(
            combat.act(&zap, &mut player, &mut enemy, &mut rng),
            Err(CombatError::NotEnoughMana(_))
        ));
        assert_eq!(player.mana, 5);
        assert_eq!(enemy.health, 500);

        player.mana = 10;
        let events = combat.act(&zap, &mut player, &mut enemy, &mut rng).unwrap();
        assert_eq!(player.mana, 0);
        // 10 + floor(6 / 2)
        assert_eq!(enemy.health, 487);
        assert!(events.contains(&CombatEvent::EnemyStunned));
        assert!(!combat.enemy_stunned);
        assert_eq!(player.health, player.max_health);
    }

    #[test]
    fn test_healing_spell_caps() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut player = Player::new(CharacterClass::Mage);
        player.learn_spell(Spell::new("mend", "Mend", 5).healing(100));
        player.health = 10;
        let mut enemy = rat(500, 0);
        let mut combat = Combat::new(enemy.id);

        combat
            .act(&CombatAction::CastSpell("mend".to_string()), &mut player, &mut enemy, &mut rng)
            .unwrap();
        // Healed to full, then hit for at least one
        assert!(player.health >= player.max_health - 1);
    }

    #[test]
    fn test_only_potions_work_in_combat() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut player = Player::new(CharacterClass::Warrior);
        let sword = Item::new("Iron Sword", ItemKind::Weapon, 25, Rarity::Common).attack(3).with_id(10);
        let potion = Item::new("Health Potion", ItemKind::Potion, 10, Rarity::Common).health(30).with_id(11);
        player.add_to_inventory(sword);
        player.add_to_inventory(potion);
        player.health = 20;
        let mut enemy = rat(500, 1);
        let mut combat = Combat::new(enemy.id);

        assert!(matches!(
            combat.act(&CombatAction::UseItem(10), &mut player, &mut enemy, &mut rng),
            Err(CombatError::NotUsable(_))
        ));
        assert_eq!(
            combat.act(&CombatAction::UseItem(99), &mut player, &mut enemy, &mut rng),
            Err(CombatError::NoSuchItem)
        );

        let events = combat.act(&CombatAction::UseItem(11), &mut player, &mut enemy, &mut rng).unwrap();
        assert!(matches!(events[0], CombatEvent::PotionUsed(ref used) if used.healed == 30));
        assert!(!player.inventory.contains(11));
        assert_eq!(combat.round, 1);
    }

    #[test]
    fn test_flee_restores_enemy() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut player = Player::new(CharacterClass::Tank);
        player.health = 10_000;
        player.max_health = 10_000;
        let mut enemy = rat(100, 1);
        let mut combat = Combat::new(enemy.id);
        enemy.take_damage(40);

        for _ in 0..64 {
            combat.act(&CombatAction::Flee, &mut player, &mut enemy, &mut rng).unwrap();
            if combat.is_over() {
                break;
            }
        }
        assert_eq!(combat.outcome(), Some(CombatOutcome::Fled));
        assert_eq!(enemy.health, enemy.max_health);
    }

    #[test]
    fn test_player_defeat() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut player = Player::new(CharacterClass::Mage);
        player.base.dodge = 0;
        player.recompute();
        player.health = 1;
        let mut enemy = rat(500, 50);
        let mut combat = Combat::new(enemy.id);

        let events = combat.act(&CombatAction::Attack, &mut player, &mut enemy, &mut rng).unwrap();
        assert_eq!(combat.outcome(), Some(CombatOutcome::PlayerDefeated));
        assert_eq!(events.last(), Some(&CombatEvent::PlayerDefeated));
        assert_eq!(player.health, 0);
    }

    #[test]
    fn test_boosts_tick_each_round() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut player = Player::new(CharacterClass::Warrior);
        let tonic = Item::new("Strength Tonic", ItemKind::Potion, 40, Rarity::Uncommon)
            .effect("Increases attack by 5 for 1 turns")
            .with_id(3);
        player.add_to_inventory(tonic);
        let mut enemy = rat(500, 1);
        let mut combat = Combat::new(enemy.id);

        let before = player.total.get(Stat::Attack);
        let events = combat.act(&CombatAction::UseItem(3), &mut player, &mut enemy, &mut rng).unwrap();
        assert!(events.iter().any(|e| matches!(e, CombatEvent::BoostsExpired(_))));
        assert_eq!(player.total.get(Stat::Attack), before);
    }

    #[test]
    fn test_reward_gold_luck() {
        assert_eq!(reward_gold(10, 5), 10);
        assert_eq!(reward_gold(20, 5), 21);
        assert_eq!(reward_gold(100, 0), 100);
        assert_eq!(reward_gold(100, -200), 0);
    }
}
