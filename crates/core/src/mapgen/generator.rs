use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::rng::GameRng;
use crate::state::Map;
use crate::types::{Pos, TileKind};

use super::layout::{RectangularRoom, carve_room, carve_tunnel, tunnel_between};
use super::model::GeneratedLevel;
use super::spawns::{SpawnLimits, populate_room};

pub struct MapGenerator<'a> {
    config: &'a GameConfig,
}

impl<'a> MapGenerator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Places up to `max_rooms` non-overlapping rooms; a rejected candidate still uses up its
    /// attempt. Each accepted room after the first is tunnelled to its predecessor, so every
    /// floor cell is reachable from the player start.
    pub fn generate(&self, rng: &mut GameRng) -> GeneratedLevel {
        let config = self.config;
        let width = config.map_width;
        let height = config.map_height;
        let mut map = Map::filled(width as usize, height as usize, TileKind::Wall);
        let limits = SpawnLimits {
            max_monsters: config.max_monsters_per_room,
            max_items: config.max_items_per_room,
        };

        let mut rooms: Vec<RectangularRoom> = Vec::new();
        let mut player_start = None;
        let mut occupied = BTreeSet::new();
        let mut monsters = Vec::new();
        let mut items = Vec::new();

        for attempt in 0..config.max_rooms {
            let room_width = rng.range_inclusive(config.room_min_size, config.room_max_size);
            let room_height = rng.range_inclusive(config.room_min_size, config.room_max_size);
            let x = rng.range_inclusive(0, width - room_width - 1);
            let y = rng.range_inclusive(0, height - room_height - 1);
            let room = RectangularRoom::new(x, y, room_width, room_height);

            if rooms.iter().any(|other| room.intersects(other)) {
                log::trace!("room attempt {attempt} at ({x}, {y}) overlaps; discarded");
                continue;
            }
            carve_room(&mut map, &room);

            match rooms.last() {
                None => {
                    player_start = Some(room.center());
                    occupied.insert(room.center());
                }
                Some(previous) => {
                    let cells = tunnel_between(rng, previous.center(), room.center());
                    carve_tunnel(&mut map, &cells);
                }
            }

            populate_room(rng, &room, &limits, &mut occupied, &mut monsters, &mut items);
            rooms.push(room);
        }

        let player_start = player_start.unwrap_or_else(|| {
            let center = Pos::new(width / 2, height / 2);
            map.set_tile(center, TileKind::Floor);
            center
        });

        GeneratedLevel { map, rooms, player_start, monsters, items }
    }
}
