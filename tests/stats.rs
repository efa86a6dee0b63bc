//! Stat aggregation and combat math properties

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vlkava::combat::{calculate_enemy_attack, dodge_chance, StatusEffects, TimedBoost};
use vlkava::entities::{compute_totals, CharacterClass, CombatStats, Player, Stat, DODGE_CAP};
use vlkava::items::{Equipment, Item, ItemKind, Rarity};

fn stats() -> impl Strategy<Value = CombatStats> {
    (0i32..50, 0i32..50, 0i32..50, -20i32..120, 0i32..50, 0i32..50).prop_map(
        |(attack, defense, magic, dodge, critical_hit, luck)| CombatStats {
            attack,
            defense,
            magic,
            dodge,
            critical_hit,
            luck,
        },
    )
}

fn gear(attack: i32, defense: i32, dodge: i32) -> Equipment {
    let mut equipment = Equipment::new();
    let weapon = Item::new("Test Blade", ItemKind::Weapon, 10, Rarity::Common)
        .attack(attack)
        .with_id(1);
    let armor = Item::new("Test Mail", ItemKind::Armor, 10, Rarity::Common)
        .defense(defense)
        .dodge(dodge)
        .with_id(2);
    let _ = equipment.equip(weapon);
    let _ = equipment.equip(armor);
    equipment
}

proptest! {
    #[test]
    fn totals_add_gear_and_clamp_dodge(
        base in stats(),
        attack in 0i32..30,
        defense in 0i32..30,
        dodge in -30i32..60,
        boost in 0i32..20,
    ) {
        let equipment = gear(attack, defense, dodge);
        let mut boosts = StatusEffects::new();
        boosts.add(TimedBoost::new(Stat::Dodge, boost, 3));

        let totals = compute_totals(&base, &equipment, &boosts);
        prop_assert_eq!(totals.attack, base.attack + attack);
        prop_assert_eq!(totals.defense, base.defense + defense);
        prop_assert_eq!(totals.magic, base.magic);
        prop_assert_eq!(totals.dodge, (base.dodge + dodge + boost).clamp(0, DODGE_CAP));

        // Idempotent
        prop_assert_eq!(compute_totals(&base, &equipment, &boosts), totals);
    }

    #[test]
    fn enemy_damage_is_at_least_one(attack in 0i32..500, defense in 0i32..500, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = calculate_enemy_attack(attack, defense, 0, &mut rng);
        prop_assert!(!result.is_dodge);
        prop_assert!(result.final_damage >= 1);
        prop_assert!(result.final_damage <= attack.max(1));
    }

    #[test]
    fn dodge_chance_is_capped(dodge in -100i32..400) {
        let chance = dodge_chance(dodge);
        prop_assert!((0..=DODGE_CAP).contains(&chance));
    }
}

#[test]
fn removing_equipped_item_clears_the_slot() {
    let mut player = Player::new(CharacterClass::Warrior);
    let blade = Item::new("Test Blade", ItemKind::Weapon, 10, Rarity::Common)
        .attack(4)
        .with_id(42);
    let attack = player.total.attack;
    player.add_to_inventory(blade);
    assert!(player.equip_item(42));
    assert_eq!(player.total.attack, attack + 4);

    assert!(player.remove_from_inventory(42).is_some());
    assert!(player.equipment.weapon.is_none());
    assert_eq!(player.total.attack, attack);
}

#[test]
fn potion_boost_wears_off() {
    let mut player = Player::new(CharacterClass::Tank);
    let elixir = Item::new("Elixir of Might", ItemKind::Potion, 50, Rarity::Rare)
        .effect("Increases attack by 5 for 2 turns")
        .with_id(7);
    let attack = player.total.attack;
    player.add_to_inventory(elixir);

    let used = player.use_item(7).expect("potion should be usable");
    assert_eq!(used.boosts.len(), 1);
    assert_eq!(player.total.attack, attack + 5);

    for _ in 0..2 {
        player.boosts.tick();
    }
    player.recompute();
    assert_eq!(player.total.attack, attack);
}
