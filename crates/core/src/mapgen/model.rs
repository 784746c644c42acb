//! Output of level generation: carved tiles, rooms, the player start and spawn placements.

use crate::content::{ActorTemplate, ItemTemplate};
use crate::state::Map;
use crate::types::{Pos, TileKind};

use super::layout::RectangularRoom;

#[derive(Clone, Copy, Debug)]
pub struct MonsterSpawn {
    pub template: &'static ActorTemplate,
    pub pos: Pos,
}

#[derive(Clone, Copy, Debug)]
pub struct ItemSpawn {
    pub template: &'static ItemTemplate,
    pub pos: Pos,
}

#[derive(Clone, Debug)]
pub struct GeneratedLevel {
    pub map: Map,
    pub rooms: Vec<RectangularRoom>,
    pub player_start: Pos,
    pub monsters: Vec<MonsterSpawn>,
    pub items: Vec<ItemSpawn>,
}

impl GeneratedLevel {
    /// Every occupied cell, player start included.
    pub fn occupied_cells(&self) -> Vec<Pos> {
        let mut cells = vec![self.player_start];
        cells.extend(self.monsters.iter().map(|spawn| spawn.pos));
        cells.extend(self.items.iter().map(|spawn| spawn.pos));
        cells
    }

    /// Byte fingerprint of the level for reproducibility checks.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.map.width as u32).to_le_bytes());
        bytes.extend((self.map.height as u32).to_le_bytes());
        for y in 0..self.map.height {
            for x in 0..self.map.width {
                bytes.push(match self.map.tile_at(Pos::new(x as i32, y as i32)) {
                    TileKind::Wall => 0,
                    TileKind::Floor => 1,
                });
            }
        }
        bytes.extend(self.player_start.y.to_le_bytes());
        bytes.extend(self.player_start.x.to_le_bytes());

        bytes.extend((self.monsters.len() as u32).to_le_bytes());
        for spawn in &self.monsters {
            bytes.extend(spawn.template.name.as_bytes());
            bytes.extend(spawn.pos.y.to_le_bytes());
            bytes.extend(spawn.pos.x.to_le_bytes());
        }
        bytes.extend((self.items.len() as u32).to_le_bytes());
        for spawn in &self.items {
            bytes.extend(spawn.template.name.as_bytes());
            bytes.extend(spawn.pos.y.to_le_bytes());
            bytes.extend(spawn.pos.x.to_le_bytes());
        }
        bytes
    }
}
