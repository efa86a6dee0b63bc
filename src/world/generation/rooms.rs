//! Room and corridor carving
//!
//! Rectangular rooms placed by rejection sampling, chained together with
//! L-shaped corridors, with doors punched where a room wall meets a passage.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::world::{Map, Position, TileType};

/// Smallest room side
pub const MIN_ROOM_SIZE: i32 = 4;
/// Largest room side
pub const MAX_ROOM_SIZE: i32 = 9;
/// Placement attempts per requested room before giving up on it
const PLACEMENT_ATTEMPTS: usize = 30;

/// A rectangular room; `x`/`y` is the top-left floor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Overlap test with one tile of padding, so rooms never share a wall
    pub fn intersects(&self, other: &Room) -> bool {
        self.x <= other.x + other.width + 1
            && self.x + self.width + 1 >= other.x
            && self.y <= other.y + other.height + 1
            && self.y + self.height + 1 >= other.y
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    /// Random cell one tile in from the room edge
    pub fn random_inner(&self, rng: &mut StdRng) -> Position {
        let x = self.x + 1 + rng.gen_range(0..(self.width - 2).max(1));
        let y = self.y + 1 + rng.gen_range(0..(self.height - 2).max(1));
        Position::new(x, y)
    }

    /// Every cell of the room in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Position::new(x, y)))
    }
}

/// Place up to `count` rooms, carving each accepted one to floor
pub fn place_rooms(rng: &mut StdRng, map: &mut Map, count: usize) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::with_capacity(count);

    for _ in 0..count {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let w = rng.gen_range(MIN_ROOM_SIZE..=MAX_ROOM_SIZE);
            let h = rng.gen_range(MIN_ROOM_SIZE..=MAX_ROOM_SIZE);
            // Room must fit with a wall border on every side
            if map.width - w - 2 < 1 || map.height - h - 2 < 1 {
                continue;
            }
            let x = rng.gen_range(1..=map.width - w - 2);
            let y = rng.gen_range(1..=map.height - h - 2);
            let candidate = Room::new(x, y, w, h);

            if rooms.iter().any(|r| candidate.intersects(r)) {
                continue;
            }

            carve_room(map, &candidate);
            rooms.push(candidate);
            break;
        }
    }

    if rooms.len() < count {
        log::debug!("Placed {} of {} requested rooms", rooms.len(), count);
    }

    rooms
}

/// Connect consecutive rooms center to center
pub fn connect_rooms(rng: &mut StdRng, map: &mut Map, rooms: &[Room]) {
    for pair in rooms.windows(2) {
        let a = pair[0].center();
        let b = pair[1].center();

        if rng.gen_bool(0.5) {
            carve_h_corridor(map, a.x, b.x, a.y);
            carve_v_corridor(map, a.y, b.y, b.x);
        } else {
            carve_v_corridor(map, a.y, b.y, a.x);
            carve_h_corridor(map, a.x, b.x, b.y);
        }
    }
}

/// Put a door on each side midpoint that sits between two floor cells
pub fn add_doors(map: &mut Map, rooms: &[Room]) {
    for room in rooms {
        let mid_x = room.x + room.width / 2;
        let mid_y = room.y + room.height / 2;
        let sides = [
            Position::new(mid_x, room.y - 1),
            Position::new(mid_x, room.y + room.height),
            Position::new(room.x - 1, mid_y),
            Position::new(room.x + room.width, mid_y),
        ];

        for side in sides {
            if is_door_site(map, side) {
                map.set_tile(side.x, side.y, TileType::Door);
            }
        }
    }
}

fn is_door_site(map: &Map, pos: Position) -> bool {
    let inside = pos.x > 0 && pos.x < map.width - 1 && pos.y > 0 && pos.y < map.height - 1;
    if !inside || map.tile_type(pos.x, pos.y) != TileType::Wall {
        return false;
    }

    let vertical = map.is_floor(pos.x, pos.y - 1) && map.is_floor(pos.x, pos.y + 1);
    let horizontal = map.is_floor(pos.x - 1, pos.y) && map.is_floor(pos.x + 1, pos.y);
    vertical || horizontal
}

/// Carve out a room
fn carve_room(map: &mut Map, room: &Room) {
    for y in room.y..room.y + room.height {
        for x in room.x..room.x + room.width {
            map.set_tile(x, y, TileType::Floor);
        }
    }
}

fn carve_h_corridor(map: &mut Map, x1: i32, x2: i32, y: i32) {
    for x in x1.min(x2)..=x1.max(x2) {
        map.set_tile(x, y, TileType::Floor);
    }
}

fn carve_v_corridor(map: &mut Map, y1: i32, y2: i32, x: i32) {
    for y in y1.min(y2)..=y1.max(y2) {
        map.set_tile(x, y, TileType::Floor);
    }
}
