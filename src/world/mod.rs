//! World module
//!
//! Contains map data structures, tiles, sight and procedural generation.

pub mod position;
pub mod map;
pub mod tile;
pub mod fov;
pub mod generation;

pub use position::Position;
pub use map::{Map, BASE_HEIGHT, BASE_WIDTH};
pub use tile::{Tile, TileType};
pub use fov::{compute_fov, reveal, VIEW_RADIUS};
pub use generation::{generate, Dungeon, Room};
