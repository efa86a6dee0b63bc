//! Loot generation system
//!
//! Chest contents, boss drops and per-level shop stock.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::item::{IdCounter, Item, ItemKind, Rarity};
use crate::data::ItemCatalog;
use crate::entities::BossType;

/// How many entries of each chest pool category are eligible
const CHEST_POOL_PER_KIND: usize = 5;
/// Share of an item's value paid back when selling
pub const SELL_RATE: f64 = 0.7;

/// What is left inside one chest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChestContents {
    pub gold: u32,
    pub items: Vec<Item>,
}

impl ChestContents {
    pub fn is_empty(&self) -> bool {
        self.gold == 0 && self.items.is_empty()
    }

    /// Remove all gold, returning the amount
    pub fn take_gold(&mut self) -> u32 {
        std::mem::take(&mut self.gold)
    }

    pub fn take_item(&mut self, id: u64) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }
}

fn first_eligible(items: &[Item], max_level: u32) -> impl Iterator<Item = &Item> {
    items
        .iter()
        .filter(move |item| item.required_level() <= max_level)
        .take(CHEST_POOL_PER_KIND)
}

/// Templates a chest on `level` may hold
pub fn chest_item_pool(catalog: &ItemCatalog, level: u32) -> Vec<Item> {
    let cap = level + 2;
    let mut pool: Vec<Item> = catalog
        .potions
        .iter()
        .take(CHEST_POOL_PER_KIND)
        .cloned()
        .collect();
    pool.extend(first_eligible(&catalog.weapons, cap).cloned());
    pool.extend(first_eligible(&catalog.armor, cap).cloned());
    if level >= 2 {
        pool.extend(first_eligible(&catalog.accessories, cap).cloned());
    }
    pool
}

/// Roll fresh chest contents: usually gold, sometimes one to three items
pub fn roll_chest_contents(
    catalog: &ItemCatalog,
    level: u32,
    ids: &mut IdCounter,
    rng: &mut impl Rng,
) -> ChestContents {
    let level = level.max(1);
    // Two of the three outcomes are gold
    if rng.gen_range(0..3) != 1 {
        return ChestContents {
            gold: 10 + rng.gen_range(0..20) * level,
            items: Vec::new(),
        };
    }

    let count = rng.gen_range(1..=3);
    let pool = chest_item_pool(catalog, level);
    let items = pool
        .choose_multiple(rng, count)
        .map(|template| template.with_id(ids.next()))
        .collect();
    ChestContents { gold: 0, items }
}

/// Draw between eight and twelve distinct shop items for a level
pub fn roll_shop_stock(shop: &[Item], level: u32, ids: &mut IdCounter, rng: &mut impl Rng) -> Vec<Item> {
    let available: Vec<&Item> = shop
        .iter()
        .filter(|item| item.required_level() <= level.max(1))
        .collect();
    let count = rng.gen_range(8..=12);
    available
        .choose_multiple(rng, count)
        .map(|template| template.with_id(ids.next()))
        .collect()
}

/// Gold received for selling an item
pub fn sell_price(item: &Item) -> u32 {
    (item.value as f64 * SELL_RATE).floor() as u32
}

/// Drops for defeating the boss of `level`
pub fn boss_loot(level: u32, boss_name: &str, ids: &mut IdCounter, rng: &mut impl Rng) -> Vec<Item> {
    let level = level.max(1);
    let pm = 1.0 + level as f64 * 0.2;
    let p = |base: f64| (base * pm).floor() as i32;
    let named_req = level.saturating_sub(1).max(1);

    let common = [
        Item::new("Boss Essence", ItemKind::Potion, 100 * level, Rarity::Rare)
            .health(p(50.0))
            .mana(p(50.0))
            .describe("A powerful essence that restores health and mana"),
        Item::new("Soul Crystal", ItemKind::Accessory, 200 * level, Rarity::Epic)
            .magic(p(3.0))
            .mana(p(20.0))
            .describe("A crystal containing the essence of a powerful foe"),
    ];

    let named = match BossType::from_name(boss_name) {
        Some(BossType::DarkKnight) => Item::new("Corrupted Blade", ItemKind::Weapon, 300 * level, Rarity::Epic)
            .attack(p(8.0))
            .describe("A blade corrupted by dark energy"),
        Some(BossType::AncientLich) => Item::new("Phylactery Shard", ItemKind::Accessory, 350 * level, Rarity::Epic)
            .magic(p(6.0))
            .mana(p(30.0))
            .describe("A shard from a lich's phylactery, pulsing with arcane energy"),
        Some(BossType::DragonLord) => Item::new("Dragonscale Armor", ItemKind::Armor, 400 * level, Rarity::Epic)
            .defense(p(10.0))
            .describe("Armor forged from the scales of a mighty dragon"),
        Some(BossType::DemonPrince) => Item::new("Infernal Crown", ItemKind::Accessory, 450 * level, Rarity::Legendary)
            .attack(p(4.0))
            .magic(p(4.0))
            .crit(p(10.0))
            .describe("A crown that burns with hellfire, increasing combat prowess"),
        Some(BossType::ElderGod) => Item::new("Cosmic Artifact", ItemKind::Accessory, 500 * level, Rarity::Legendary)
            .attack(p(5.0))
            .defense(p(5.0))
            .magic(p(5.0))
            .dodge(p(5.0))
            .crit(p(5.0))
            .luck(p(5.0))
            .describe("An artifact of immense power from beyond the stars"),
        None => Item::new("Champion's Trophy", ItemKind::Accessory, 250 * level, Rarity::Rare)
            .attack(p(3.0))
            .defense(p(3.0))
            .describe("A trophy proving your victory over a powerful foe"),
    }
    .level(named_req);

    let mut loot = Vec::with_capacity(3);
    if let Some(pick) = common.choose(rng) {
        loot.push(pick.with_id(ids.next()));
    }
    loot.push(named.with_id(ids.next()));

    if level >= 5 {
        let high = [
            Item::new("Void Shard", ItemKind::Accessory, 600 * level, Rarity::Legendary)
                .magic(p(8.0))
                .crit(p(15.0))
                .describe("A shard of the void that increases magical potency"),
            Item::new("Ancient Hero's Blade", ItemKind::Weapon, 650 * level, Rarity::Legendary)
                .attack(p(12.0))
                .crit(p(10.0))
                .describe("A legendary blade wielded by heroes of old"),
            Item::new("Immortal's Cuirass", ItemKind::Armor, 700 * level, Rarity::Legendary)
                .defense(p(15.0))
                .health(p(50.0))
                .describe("Armor said to grant its wearer immortality"),
        ];
        if let Some(pick) = high.choose(rng) {
            loot.push(pick.clone().level(level).with_id(ids.next()));
        }
    }

    loot
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_chest_pool_level_one() {
        let catalog = ItemCatalog::default();
        let pool = chest_item_pool(&catalog, 1);
        // 5 potions, 5 weapons, only 3 armors at or below level 3, no accessories yet
        assert_eq!(pool.len(), 13);
        assert!(pool.iter().all(|i| i.kind != ItemKind::Accessory));
        assert!(pool.iter().all(|i| i.required_level() <= 3));

        let deeper = chest_item_pool(&catalog, 2);
        assert_eq!(deeper.iter().filter(|i| i.kind == ItemKind::Accessory).count(), 5);
    }

    #[test]
    fn test_chest_contents_shape() {
        let catalog = ItemCatalog::default();
        let mut ids = IdCounter::new();
        let mut rng = StdRng::seed_from_u64(17);
        let (mut saw_gold, mut saw_items) = (false, false);

        for _ in 0..200 {
            let chest = roll_chest_contents(&catalog, 3, &mut ids, &mut rng);
            if chest.items.is_empty() {
                saw_gold = true;
                assert!(chest.gold >= 10 && chest.gold <= 10 + 19 * 3);
            } else {
                saw_items = true;
                assert_eq!(chest.gold, 0);
                assert!((1..=3).contains(&chest.items.len()));
                let keys: HashSet<_> = chest.items.iter().map(|i| &i.key).collect();
                assert_eq!(keys.len(), chest.items.len());
            }
        }
        assert!(saw_gold && saw_items);
    }

    #[test]
    fn test_chest_take() {
        let mut chest = ChestContents {
            gold: 25,
            items: vec![Item::new("Health Potion", ItemKind::Potion, 10, Rarity::Common).with_id(4)],
        };
        assert_eq!(chest.take_gold(), 25);
        assert_eq!(chest.take_gold(), 0);
        assert!(chest.take_item(5).is_none());
        assert!(chest.take_item(4).is_some());
        assert!(chest.is_empty());
    }

    #[test]
    fn test_shop_stock_is_distinct_and_level_gated() {
        let catalog = ItemCatalog::default();
        let mut ids = IdCounter::new();
        let mut rng = StdRng::seed_from_u64(3);
        let stock = roll_shop_stock(&catalog.shop, 4, &mut ids, &mut rng);

        assert!(stock.len() >= 8 && stock.len() <= 12);
        let keys: HashSet<_> = stock.iter().map(|i| &i.key).collect();
        assert_eq!(keys.len(), stock.len());
        assert!(stock.iter().all(|i| i.required_level() <= 4));
    }

    #[test]
    fn test_sell_price() {
        let item = Item::new("Iron Sword", ItemKind::Weapon, 25, Rarity::Common);
        assert_eq!(sell_price(&item), 17);
    }

    #[test]
    fn test_boss_loot_tables() {
        let mut ids = IdCounter::new();
        let mut rng = StdRng::seed_from_u64(8);

        let loot = boss_loot(1, "Dark Knight", &mut ids, &mut rng);
        assert_eq!(loot.len(), 2);
        let blade = &loot[1];
        assert_eq!(blade.name, "Corrupted Blade");
        // pm = 1.2
        assert_eq!(blade.attack, Some(9));
        assert_eq!(blade.level_requirement, Some(1));

        let loot = boss_loot(5, "Elder God", &mut ids, &mut rng);
        assert_eq!(loot.len(), 3);
        assert_eq!(loot[1].name, "Cosmic Artifact");
        // pm = 2.0
        assert_eq!(loot[1].luck, Some(10));
        assert_eq!(loot[1].level_requirement, Some(4));
        assert_eq!(loot[2].level_requirement, Some(5));

        let loot = boss_loot(2, "Someone Else", &mut ids, &mut rng);
        assert_eq!(loot[1].name, "Champion's Trophy");
    }
}
