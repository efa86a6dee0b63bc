//! Game state machine
//!
//! [`Game`] owns the whole run: the current level, the player, every cache
//! and the persistent stores. The front-end drives it through command
//! methods; each one mutates synchronously and reports whether it did
//! anything.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::camera::{camera_for, render_viewport};
use super::config::GameConfig;
use super::events::{EventBus, GameEvent, GameObserver};
use super::messages::{MessageCategory, MessageLog};
use crate::audio::{AudioSink, LogSink, MusicTrack, SoundId};
use crate::combat::{reward_gold, Combat, CombatAction, CombatEvent, CombatOutcome};
use crate::data::{starting_kit, starting_spells, ContentTables};
use crate::entities::{
    generate_archmage, generate_shopkeeper, Attribute, CharacterClass, Enemy, Player, PotionUse, Spell,
};
use crate::items::{
    boss_loot, roll_chest_contents, roll_shop_stock, sell_price, ChestContents, EquipSlot, IdCounter, Item,
    ItemId,
};
use crate::progression::score;
use crate::save::{Codex, MetaStore};
use crate::world::generation;
use crate::world::{compute_fov, reveal, Map, Position, TileType, VIEW_RADIUS};

/// Bonus gold per dungeon level for killing the level boss
const BOSS_BONUS_GOLD: u32 = 50;
/// Bonus experience per dungeon level for killing the level boss
const BOSS_BONUS_EXP: u32 = 75;

/// What the player is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Waiting for a class to be picked
    ClassSelection,
    /// Walking the dungeon
    Exploring,
    /// Turn-based fight
    Combat,
    /// Browsing the level's shop
    Shop,
    /// Browsing the archmage's spells
    WizardShop,
    /// Looking into the chest at this position
    ChestOpen(Position),
    /// The run is over
    GameOver,
}

impl GameMode {
    /// A modal screen is open over the map
    pub fn is_modal(&self) -> bool {
        matches!(
            self,
            GameMode::Shop | GameMode::WizardShop | GameMode::ChestOpen(_)
        )
    }
}

/// The main game struct that holds all game data
pub struct Game {
    mode: GameMode,
    config: GameConfig,
    /// Seed the run was started with; shop stock derives from it
    run_seed: u64,
    rng: StdRng,
    ids: IdCounter,
    content: ContentTables,
    map: Map,
    player: Player,
    enemies: Vec<Enemy>,
    dungeon_level: u32,
    camera: Position,
    visible: HashSet<Position>,
    combat: Option<Combat>,
    /// Contents of chests opened on this level
    chests: HashMap<Position, ChestContents>,
    /// Shop stock per dungeon level
    shop_stock: HashMap<u32, Vec<Item>>,
    /// Levels whose archmage has been beaten
    wizards_defeated: HashSet<u32>,
    messages: MessageLog,
    events: EventBus,
    audio: Box<dyn AudioSink>,
    meta: MetaStore,
    codex: Codex,
}

impl Game {
    /// Start a game with the sink the configuration asks for
    pub fn new(config: GameConfig) -> Self {
        let audio = default_sink(&config);
        Self::with_audio(config, audio)
    }

    /// Start a game that sends its audio cues to `audio`
    pub fn with_audio(config: GameConfig, audio: Box<dyn AudioSink>) -> Self {
        let content = ContentTables::load(&config.data_dir);
        let (meta, codex) = if config.persist {
            let dir = config.resolve_storage_dir();
            (MetaStore::open(&dir), Codex::open(&dir, &content))
        } else {
            (MetaStore::in_memory(), Codex::in_memory(&content))
        };
        let run_seed = config.resolve_seed();
        log::info!("Starting run with seed {}", run_seed);

        let (width, height) = Map::size_for_level(1);
        let mut game = Self {
            mode: GameMode::ClassSelection,
            config,
            run_seed,
            rng: StdRng::seed_from_u64(run_seed),
            ids: IdCounter::new(),
            content,
            map: Map::new(width, height, 1),
            player: Player::new(CharacterClass::Warrior),
            enemies: Vec::new(),
            dungeon_level: 1,
            camera: Position::default(),
            visible: HashSet::new(),
            combat: None,
            chests: HashMap::new(),
            shop_stock: HashMap::new(),
            wizards_defeated: HashSet::new(),
            messages: MessageLog::new(),
            events: EventBus::new(),
            audio,
            meta,
            codex,
        };
        game.generate_level();
        game
    }

    // --- accessors ---

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn content(&self) -> &ContentTables {
        &self.content
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn dungeon_level(&self) -> u32 {
        self.dungeon_level
    }

    /// Top-left corner of the viewport
    pub fn camera(&self) -> Position {
        self.camera
    }

    /// Cells inside the player's field of view
    pub fn visible(&self) -> &HashSet<Position> {
        &self.visible
    }

    pub fn combat(&self) -> Option<&Combat> {
        self.combat.as_ref()
    }

    /// The enemy being fought, if any
    pub fn current_enemy(&self) -> Option<&Enemy> {
        let combat = self.combat.as_ref()?;
        self.enemies.iter().find(|e| e.id == combat.enemy_id)
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn meta(&self) -> &MetaStore {
        &self.meta
    }

    pub fn codex(&self) -> &Codex {
        &self.codex
    }

    /// Contents of the open chest
    pub fn chest_contents(&self) -> Option<&ChestContents> {
        match self.mode {
            GameMode::ChestOpen(pos) => self.chests.get(&pos),
            _ => None,
        }
    }

    /// Stock of the current level's shop; empty until the shop is visited
    pub fn shop_stock(&self) -> &[Item] {
        self.shop_stock
            .get(&self.dungeon_level)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Spells the archmage sells
    pub fn wizard_spells(&self) -> impl Iterator<Item = &Spell> {
        self.content.spells.iter().filter(|s| s.is_for_sale())
    }

    pub fn is_wizard_defeated(&self) -> bool {
        self.wizards_defeated.contains(&self.dungeon_level)
    }

    /// Register an observer for level-up and game-over events
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.events.subscribe(Box::new(observer));
    }

    /// Add a message to the log
    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(text, category);
    }

    /// ASCII picture of the camera window
    pub fn render_view(&self) -> Vec<String> {
        render_viewport(
            &self.map,
            self.camera,
            self.player.position,
            &self.enemies,
            &self.visible,
        )
    }

    // --- run lifecycle ---

    /// Pick a class and enter the dungeon
    pub fn select_class(&mut self, class: CharacterClass) -> bool {
        if self.mode != GameMode::ClassSelection {
            log::debug!("Class selection ignored in {:?}", self.mode);
            return false;
        }

        let mut player = Player::new(class);
        player.position = self.player.position;

        for name in starting_kit(class) {
            let Some(template) = self.content.items.find(name) else {
                log::warn!("Starting item {} missing from the item catalog", name);
                continue;
            };
            let item = template.with_id(self.ids.next());
            self.codex.discover_item(&item);
            player.add_to_inventory(item);
        }
        for spell in starting_spells(&self.content.spells, class) {
            self.codex.discover_spell(&spell);
            player.learn_spell(spell);
        }
        player.apply_upgrades(self.meta.upgrades());

        self.player = player;
        self.mode = GameMode::Exploring;
        self.audio.music(MusicTrack::Background);
        self.update_visibility();
        self.add_message(
            format!("You enter the dungeon as a {}.", class.name()),
            MessageCategory::System,
        );
        log::info!("Run started as {}", class.name());
        true
    }

    /// Back to class selection with a fresh level 1
    pub fn restart(&mut self) {
        self.run_seed = self.config.resolve_seed();
        self.rng = StdRng::seed_from_u64(self.run_seed);
        self.ids = IdCounter::new();
        self.dungeon_level = 1;
        self.player = Player::new(self.player.class);
        self.shop_stock.clear();
        self.wizards_defeated.clear();
        self.messages.clear();
        self.generate_level();
        self.mode = GameMode::ClassSelection;
        log::info!("Run restarted with seed {}", self.run_seed);
    }

    /// Spend one meta skill point on a permanent upgrade
    pub fn purchase_upgrade(&mut self, attribute: Attribute) -> bool {
        let bought = self.meta.purchase_upgrade(attribute);
        if bought {
            self.audio.play(SoundId::ButtonClick);
        }
        bought
    }

    /// Advance to the next dungeon level
    pub fn go_to_next_level(&mut self) -> bool {
        if matches!(
            self.mode,
            GameMode::ClassSelection | GameMode::Combat | GameMode::GameOver
        ) {
            log::debug!("Cannot change level in {:?}", self.mode);
            return false;
        }

        self.dungeon_level += 1;
        self.generate_level();
        self.player.clear_boosts();
        self.mode = GameMode::Exploring;
        self.add_message(
            format!("You descend to dungeon level {}.", self.dungeon_level),
            MessageCategory::System,
        );
        true
    }

    fn generate_level(&mut self) {
        let (width, height) = Map::size_for_level(self.dungeon_level);
        let dungeon = generation::generate(
            width,
            height,
            self.dungeon_level,
            &self.content,
            &mut self.ids,
            &mut self.rng,
        );

        self.map = dungeon.map;
        self.enemies = dungeon.enemies;
        self.player.position = dungeon.player_start;
        self.chests.clear();
        self.combat = None;
        self.visible.clear();
        self.update_visibility();
    }

    /// Recompute the field of view, explored cells and camera
    pub fn update_visibility(&mut self) {
        let pos = self.player.position;
        self.visible = compute_fov(&self.map, pos, VIEW_RADIUS);
        reveal(&mut self.map, &self.visible);
        self.camera = camera_for(pos, self.map.width, self.map.height);
    }

    // --- exploration ---

    /// Step the player; walking into a living enemy starts a fight
    pub fn move_player(&mut self, dx: i32, dy: i32) -> bool {
        if self.mode != GameMode::Exploring {
            return false;
        }

        let target = self.player.position.offset(dx, dy);
        if !self.map.is_traversable(target.x, target.y) {
            return false;
        }
        if let Some(enemy) = self.enemies.iter().find(|e| e.position == target && e.is_alive()) {
            let id = enemy.id;
            self.start_combat(id);
            return true;
        }

        self.player.position = target;
        self.update_visibility();
        self.enter_tile(target);
        true
    }

    fn enter_tile(&mut self, pos: Position) {
        let tile_type = self.map.tile_type(pos.x, pos.y);
        self.codex.discover_location(tile_type);

        match tile_type {
            TileType::Chest => self.open_chest(pos),
            TileType::Shop => self.open_shop(),
            TileType::Wizard => self.open_wizard_shop(),
            TileType::Shrine => self.use_shrine(pos),
            TileType::Boss => self.challenge_boss(pos),
            TileType::Portal => {
                self.go_to_next_level();
            }
            TileType::Wall | TileType::Floor | TileType::Door => {}
        }
    }

    fn use_shrine(&mut self, pos: Position) {
        self.player.restore_full();
        self.map.set_tile(pos.x, pos.y, TileType::Floor);
        self.add_message(
            "The shrine glows. Your health and mana are restored.",
            MessageCategory::System,
        );
    }

    fn challenge_boss(&mut self, pos: Position) {
        let boss = self
            .enemies
            .iter()
            .find(|e| e.position == pos && e.is_level_boss() && e.is_alive())
            .or_else(|| self.enemies.iter().find(|e| e.is_level_boss() && e.is_alive()));
        if let Some(boss) = boss {
            let id = boss.id;
            self.start_combat(id);
        }
    }

    // --- chests ---

    fn open_chest(&mut self, pos: Position) {
        let level = self.dungeon_level;
        let catalog = &self.content.items;
        let ids = &mut self.ids;
        let rng = &mut self.rng;
        self.chests
            .entry(pos)
            .or_insert_with(|| roll_chest_contents(catalog, level, ids, rng));

        self.mode = GameMode::ChestOpen(pos);
        self.audio.play(SoundId::OpenChest);
        self.add_message("You open a chest.", MessageCategory::Item);
    }

    /// Take all gold from the open chest
    pub fn take_chest_gold(&mut self) -> u32 {
        let GameMode::ChestOpen(pos) = self.mode else {
            return 0;
        };
        let gold = self.chests.get_mut(&pos).map_or(0, ChestContents::take_gold);
        if gold > 0 {
            self.player.inventory.add_gold(gold);
            self.audio.play(SoundId::ItemPickup);
            self.add_message(format!("You take {} gold.", gold), MessageCategory::Item);
        }
        gold
    }

    /// Move one item from the open chest into the inventory
    pub fn take_chest_item(&mut self, id: ItemId) -> bool {
        let GameMode::ChestOpen(pos) = self.mode else {
            return false;
        };
        if !self.player.inventory.has_space() {
            self.add_message("Your inventory is full.", MessageCategory::Warning);
            return false;
        }
        let Some(item) = self.chests.get_mut(&pos).and_then(|c| c.take_item(id)) else {
            log::debug!("Chest at {} holds no item {}", pos, id);
            return false;
        };

        self.codex.discover_item(&item);
        self.add_message(format!("You take the {}.", item.name), MessageCategory::Item);
        self.player.add_to_inventory(item);
        self.audio.play(SoundId::ItemPickup);
        true
    }

    /// Close the chest modal; an emptied chest disappears
    pub fn close_chest(&mut self) -> bool {
        let GameMode::ChestOpen(pos) = self.mode else {
            return false;
        };
        if self.chests.get(&pos).map_or(true, ChestContents::is_empty) {
            self.chests.remove(&pos);
            self.map.set_tile(pos.x, pos.y, TileType::Floor);
        }
        self.mode = GameMode::Exploring;
        true
    }

    // --- shop ---

    fn ensure_shop_stock(&mut self) {
        let level = self.dungeon_level;
        if self.shop_stock.contains_key(&level) {
            return;
        }
        let mut rng = StdRng::seed_from_u64(self.run_seed ^ (u64::from(level) * 1000));
        let stock = roll_shop_stock(&self.content.items.shop, level, &mut self.ids, &mut rng);
        log::debug!("Stocked level {} shop with {} items", level, stock.len());
        self.shop_stock.insert(level, stock);
    }

    fn open_shop(&mut self) {
        self.ensure_shop_stock();
        self.mode = GameMode::Shop;
        let text = if self.shop_stock().is_empty() {
            "The shop stands empty."
        } else {
            "You enter the shop."
        };
        self.add_message(text, MessageCategory::System);
    }

    /// Buy a copy of a shop item
    pub fn buy_item(&mut self, id: ItemId) -> bool {
        if self.mode != GameMode::Shop {
            return false;
        }
        let Some(item) = self.shop_stock().iter().find(|i| i.id == id).cloned() else {
            log::debug!("Shop has no item {}", id);
            return false;
        };
        if self.player.gold() < item.value {
            self.add_message(
                format!("You cannot afford the {}.", item.name),
                MessageCategory::Warning,
            );
            return false;
        }
        if !self.player.inventory.has_space() {
            self.add_message("Your inventory is full.", MessageCategory::Warning);
            return false;
        }

        self.player.inventory.spend_gold(item.value);
        let bought = item.with_id(self.ids.next());
        self.codex.discover_item(&bought);
        self.add_message(
            format!("You buy the {} for {} gold.", bought.name, bought.value),
            MessageCategory::Item,
        );
        self.player.add_to_inventory(bought);
        self.audio.play(SoundId::ItemPickup);
        true
    }

    /// Sell a carried item for part of its value
    pub fn sell_item(&mut self, id: ItemId) -> bool {
        if self.mode != GameMode::Shop {
            return false;
        }
        let Some(item) = self.player.remove_from_inventory(id) else {
            log::debug!("Cannot sell item {}: not carried", id);
            return false;
        };
        let price = sell_price(&item);
        self.player.inventory.add_gold(price);
        self.add_message(
            format!("You sell the {} for {} gold.", item.name, price),
            MessageCategory::Item,
        );
        true
    }

    pub fn close_shop(&mut self) -> bool {
        if self.mode != GameMode::Shop {
            return false;
        }
        self.mode = GameMode::Exploring;
        self.audio.play(SoundId::ButtonClick);
        true
    }

    /// Pick a fight with the shopkeeper, who drops the whole stock
    pub fn fight_shopkeeper(&mut self) -> bool {
        if self.mode != GameMode::Shop {
            return false;
        }
        self.ensure_shop_stock();
        let stock = self.shop_stock.get(&self.dungeon_level).cloned().unwrap_or_default();
        let keeper = generate_shopkeeper(self.player.level, self.player.position, &stock, &mut self.ids);
        self.add_message("The shopkeeper draws a blade!", MessageCategory::Combat);
        let id = keeper.id;
        self.enemies.push(keeper);
        self.start_combat(id);
        true
    }

    // --- spell shop ---

    fn open_wizard_shop(&mut self) {
        if self.is_wizard_defeated() {
            self.add_message("The archmage's tower is silent.", MessageCategory::System);
            return;
        }
        self.mode = GameMode::WizardShop;
        self.add_message("The archmage offers to teach you.", MessageCategory::System);
    }

    /// Learn a spell from the archmage
    pub fn buy_spell(&mut self, spell_id: &str) -> bool {
        if self.mode != GameMode::WizardShop {
            return false;
        }
        let Some(spell) = self.content.spell(spell_id).cloned() else {
            log::debug!("Unknown spell {}", spell_id);
            return false;
        };
        let Some(price) = spell.price else {
            log::debug!("{} is not for sale", spell.name);
            return false;
        };
        if !spell.allows_class(self.player.class) {
            self.add_message(
                format!("A {} cannot learn {}.", self.player.class.name(), spell.name),
                MessageCategory::Warning,
            );
            return false;
        }
        if self.player.level < spell.required_level() {
            self.add_message(
                format!("{} requires level {}.", spell.name, spell.required_level()),
                MessageCategory::Warning,
            );
            return false;
        }
        if self.player.gold() < price {
            self.add_message(
                format!("You cannot afford {}.", spell.name),
                MessageCategory::Warning,
            );
            return false;
        }
        if self.player.knows_spell(&spell.id) {
            self.add_message(
                format!("You already know {}.", spell.name),
                MessageCategory::Warning,
            );
            return false;
        }

        self.codex.discover_spell(&spell);
        let name = spell.name.clone();
        self.player.learn_spell(spell);
        self.player.inventory.spend_gold(price);
        self.audio.play(SoundId::Spell);
        self.add_message(
            format!("You learn {} for {} gold.", name, price),
            MessageCategory::Item,
        );
        true
    }

    pub fn close_wizard_shop(&mut self) -> bool {
        if self.mode != GameMode::WizardShop {
            return false;
        }
        self.mode = GameMode::Exploring;
        self.audio.play(SoundId::ButtonClick);
        true
    }

    /// Challenge the archmage, who teaches every priced spell on defeat
    pub fn fight_wizard(&mut self) -> bool {
        if self.mode != GameMode::WizardShop {
            return false;
        }
        let wizard = generate_archmage(
            self.player.level,
            self.player.position,
            &self.content.spells,
            &mut self.ids,
        );
        self.add_message("The archmage summons powerful magic!", MessageCategory::Combat);
        let id = wizard.id;
        self.enemies.push(wizard);
        self.start_combat(id);
        true
    }

    // --- player commands ---

    pub fn add_to_inventory(&mut self, item: Item) -> bool {
        let name = item.name.clone();
        if self.player.add_to_inventory(item) {
            true
        } else {
            self.add_message(
                format!("Your inventory is full. The {} is lost.", name),
                MessageCategory::Warning,
            );
            false
        }
    }

    pub fn remove_from_inventory(&mut self, id: ItemId) -> Option<Item> {
        self.player.remove_from_inventory(id)
    }

    pub fn equip_item(&mut self, id: ItemId) -> bool {
        let Some(item) = self.player.inventory.get_by_id(id) else {
            return false;
        };
        if let Some(reason) = self.player.equip_block_reason(item) {
            self.add_message(reason, MessageCategory::Warning);
            return false;
        }
        let name = item.name.clone();
        let equipped = self.player.equip_item(id);
        if equipped {
            self.add_message(format!("You equip the {}.", name), MessageCategory::Item);
        }
        equipped
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        let item = self.player.unequip(slot)?;
        self.add_message(format!("You unequip the {}.", item.name), MessageCategory::Item);
        Some(item)
    }

    /// Drink a potion; in combat this uses up the player's turn
    pub fn use_item(&mut self, id: ItemId) -> bool {
        match self.mode {
            GameMode::Combat => self.resolve_combat(CombatAction::UseItem(id)),
            GameMode::Exploring => match self.player.use_item(id) {
                Some(used) => {
                    self.add_message(describe_potion(&used), MessageCategory::Item);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    pub fn increase_attribute(&mut self, attribute: Attribute) -> bool {
        let raised = self.player.increase_attribute(attribute);
        if raised {
            self.add_message(
                format!("You improve your {}.", attribute.name()),
                MessageCategory::System,
            );
        }
        raised
    }

    pub fn learn_spell(&mut self, spell: Spell) -> bool {
        self.codex.discover_spell(&spell);
        let name = spell.name.clone();
        let learned = self.player.learn_spell(spell);
        if learned {
            self.add_message(format!("You learn {}.", name), MessageCategory::Item);
        }
        learned
    }

    // --- combat ---

    fn start_combat(&mut self, enemy_id: u64) {
        let Some(enemy) = self.enemies.iter().find(|e| e.id == enemy_id) else {
            return;
        };
        let (race, name) = (enemy.race, enemy.name.clone());

        self.codex.discover_enemy(race);
        self.combat = Some(Combat::new(enemy_id));
        self.mode = GameMode::Combat;
        self.audio.music(MusicTrack::Battle);
        self.add_message(format!("You engage the {}!", name), MessageCategory::Combat);
        log::debug!("Combat started against {} ({})", name, enemy_id);
    }

    pub fn attack(&mut self) -> bool {
        self.resolve_combat(CombatAction::Attack)
    }

    pub fn cast_spell(&mut self, spell_id: &str) -> bool {
        self.resolve_combat(CombatAction::CastSpell(spell_id.to_string()))
    }

    pub fn flee(&mut self) -> bool {
        self.resolve_combat(CombatAction::Flee)
    }

    /// Run one combat round and settle the outcome
    fn resolve_combat(&mut self, action: CombatAction) -> bool {
        if self.mode != GameMode::Combat {
            log::debug!("{:?} ignored outside combat", action);
            return false;
        }
        let Some(mut combat) = self.combat.take() else {
            return false;
        };
        let Some(index) = self.enemies.iter().position(|e| e.id == combat.enemy_id) else {
            log::warn!("Combat enemy {} vanished", combat.enemy_id);
            self.mode = GameMode::Exploring;
            return false;
        };

        let events = match combat.act(&action, &mut self.player, &mut self.enemies[index], &mut self.rng) {
            Ok(events) => events,
            Err(e) => {
                log::debug!("Combat action rejected: {}", e);
                self.add_message(capitalize_first(&e.to_string()), MessageCategory::Warning);
                self.combat = Some(combat);
                return false;
            }
        };

        let enemy = &self.enemies[index];
        let (name, taunt) = (enemy.name.clone(), owner_taunt(enemy));
        for event in &events {
            self.narrate(event, &name, taunt);
        }

        match combat.outcome() {
            Some(CombatOutcome::EnemyDefeated) => self.finish_victory(index),
            Some(CombatOutcome::PlayerDefeated) => self.game_over(),
            Some(CombatOutcome::Fled) => self.finish_flight(index),
            None => self.combat = Some(combat),
        }
        true
    }

    fn narrate(&mut self, event: &CombatEvent, enemy: &str, taunt: Option<&'static str>) {
        match event {
            CombatEvent::PlayerHit { damage, crit } => {
                self.audio.play(SoundId::Attack);
                let text = if *crit {
                    format!("CRITICAL HIT! You attack the {} for {} damage!", enemy, damage)
                } else {
                    format!("You attack the {} for {} damage!", enemy, damage)
                };
                self.add_message(text, MessageCategory::Combat);
                if let Some(taunt) = taunt {
                    self.add_message(taunt, MessageCategory::Combat);
                }
            }
            CombatEvent::SpellCast {
                name,
                damage,
                healed,
                stunned,
            } => {
                self.audio.play(SoundId::Spell);
                let mut text = format!("You cast {}", name);
                if let Some(damage) = damage {
                    text.push_str(&format!(", dealing {} damage", damage));
                }
                if *healed > 0 {
                    text.push_str(&format!(", healing {} health", healed));
                }
                text.push('!');
                self.add_message(text, MessageCategory::Combat);
                if *stunned {
                    self.add_message(format!("The {} is stunned!", enemy), MessageCategory::Combat);
                }
            }
            CombatEvent::PotionUsed(used) => {
                self.add_message(describe_potion(used), MessageCategory::Item);
            }
            CombatEvent::FleeFailed => {
                self.add_message("You failed to escape!", MessageCategory::Combat);
            }
            CombatEvent::Fled => {
                self.audio.play(SoundId::Flee);
                self.add_message(format!("You escaped from the {}!", enemy), MessageCategory::Combat);
            }
            CombatEvent::EnemyStunned => {
                self.add_message(
                    format!("The {} is stunned and cannot attack!", enemy),
                    MessageCategory::Combat,
                );
            }
            CombatEvent::PlayerDodged => {
                self.audio.play(SoundId::Flee);
                self.add_message(format!("You dodged the {}'s attack!", enemy), MessageCategory::Combat);
            }
            CombatEvent::EnemyHit { damage } => {
                self.audio.play(SoundId::Damage);
                self.add_message(
                    format!("The {} attacks you for {} damage!", enemy, damage),
                    MessageCategory::Combat,
                );
            }
            CombatEvent::BoostsExpired(texts) => {
                for text in texts {
                    self.add_message(text.clone(), MessageCategory::System);
                }
            }
            CombatEvent::EnemyDefeated => {
                self.audio.play(SoundId::EnemyDefeat);
                self.add_message(format!("You defeated the {}!", enemy), MessageCategory::Combat);
            }
            CombatEvent::PlayerDefeated => {
                self.add_message(
                    format!("You have been slain by the {}.", enemy),
                    MessageCategory::Combat,
                );
            }
        }
    }

    fn end_combat(&mut self) {
        self.combat = None;
        self.mode = GameMode::Exploring;
        self.audio.music(MusicTrack::Background);
    }

    fn finish_victory(&mut self, index: usize) {
        let enemy = self.enemies.remove(index);
        let level_boss = enemy.is_level_boss();
        self.end_combat();

        let gold = reward_gold(enemy.gold_value, self.player.total.luck);
        self.player.inventory.add_gold(gold);
        let mut experience = enemy.exp_value;
        self.add_message(
            format!("You gain {} gold and {} experience.", gold, experience),
            MessageCategory::Item,
        );

        for item in enemy.loot {
            self.give_item(item);
        }
        // Only spells the player's class can use are taught
        for spell in enemy.spell_loot {
            if !spell.allows_class(self.player.class) || self.player.knows_spell(&spell.id) {
                continue;
            }
            self.learn_spell(spell);
        }

        if enemy.is_shopkeeper {
            self.shop_stock.insert(self.dungeon_level, Vec::new());
        }
        if enemy.is_wizard {
            self.wizards_defeated.insert(self.dungeon_level);
        }

        if level_boss {
            let level = self.dungeon_level;
            let pos = enemy.position;
            self.map.set_tile(pos.x, pos.y, TileType::Portal);

            let bonus_gold = BOSS_BONUS_GOLD * level;
            self.player.inventory.add_gold(bonus_gold);
            experience += BOSS_BONUS_EXP * level;
            self.add_message(
                format!(
                    "The {} falls! A portal opens. Bonus: {} gold, {} experience.",
                    enemy.name,
                    bonus_gold,
                    BOSS_BONUS_EXP * level
                ),
                MessageCategory::System,
            );
            for item in boss_loot(level, &enemy.name, &mut self.ids, &mut self.rng) {
                self.give_item(item);
            }
            log::info!("Level {} boss {} defeated", level, enemy.name);
        }

        self.award_experience(experience);
    }

    fn finish_flight(&mut self, index: usize) {
        let owner = {
            let enemy = &self.enemies[index];
            enemy.is_shopkeeper || enemy.is_wizard
        };
        if owner {
            self.enemies.remove(index);
        }
        self.end_combat();
    }

    fn give_item(&mut self, item: Item) {
        self.codex.discover_item(&item);
        let name = item.name.clone();
        if self.add_to_inventory(item) {
            self.add_message(format!("You found the {}.", name), MessageCategory::Item);
        }
    }

    fn award_experience(&mut self, amount: u32) {
        let gained = self.player.gain_experience(amount);
        if gained == 0 {
            return;
        }
        self.audio.play(SoundId::LevelUp);
        let (level, points) = (self.player.level, self.player.skill_points);
        self.add_message(
            format!("Level up! You are now level {} with {} skill points.", level, points),
            MessageCategory::System,
        );
        log::debug!("Player reached level {}", level);
        self.events.emit(GameEvent::LevelUp {
            new_level: level,
            skill_points: points,
        });
    }

    fn game_over(&mut self) {
        self.combat = None;
        self.mode = GameMode::GameOver;
        self.audio.music(MusicTrack::Background);

        let final_score = score(self.player.level, self.player.experience);
        let credited = self.meta.record_game_over(final_score);
        self.add_message(
            format!(
                "Game over. Score {} earns {} upgrade points.",
                final_score, credited
            ),
            MessageCategory::System,
        );
        log::info!(
            "Game over on dungeon level {} with score {}",
            self.dungeon_level,
            final_score
        );
        self.events.emit(GameEvent::GameOver { score: final_score });
    }
}

fn default_sink(config: &GameConfig) -> Box<dyn AudioSink> {
    #[cfg(feature = "audio")]
    if config.audio_enabled {
        return Box::new(crate::audio::AudioManager::new());
    }
    #[cfg(not(feature = "audio"))]
    if config.audio_enabled {
        log::debug!("Built without the audio feature; cues are only logged");
    }
    Box::new(LogSink)
}

fn owner_taunt(enemy: &Enemy) -> Option<&'static str> {
    if enemy.is_shopkeeper {
        Some("The shopkeeper is enraged by your attack!")
    } else if enemy.is_wizard {
        Some("The archmage summons powerful magic against you!")
    } else {
        None
    }
}

fn describe_potion(used: &PotionUse) -> String {
    let mut parts = Vec::new();
    if used.healed > 0 {
        parts.push(format!("restore {} health", used.healed));
    }
    if used.mana_restored > 0 {
        parts.push(format!("restore {} mana", used.mana_restored));
    }
    for boost in &used.boosts {
        parts.push(format!(
            "gain {} {} for {} turns",
            boost.amount,
            boost.stat.name(),
            boost.turns_left
        ));
    }
    if parts.is_empty() {
        format!("You drink the {}.", used.name)
    } else {
        format!("You drink the {} and {}.", used.name, parts.join(", "))
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
