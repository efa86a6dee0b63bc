//! Item system

pub mod item;
pub mod inventory;
pub mod equipment;
pub mod loot;

pub use item::{slug, EquipSlot, IdCounter, Item, ItemId, ItemKind, Rarity, UNASSIGNED_ID};
pub use inventory::{Inventory, MAX_INVENTORY};
pub use equipment::Equipment;
pub use loot::{boss_loot, chest_item_pool, roll_chest_contents, roll_shop_stock, sell_price, ChestContents};
