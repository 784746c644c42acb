//! Weighted monster and item selection and their placement inside a room.

use std::collections::BTreeSet;

use crate::content::{self, SpawnEntry};
use crate::rng::GameRng;
use crate::types::Pos;

use super::layout::RectangularRoom;
use super::model::{ItemSpawn, MonsterSpawn};

pub(super) struct SpawnLimits {
    pub(super) max_monsters: u32,
    pub(super) max_items: u32,
}

/// Draws `count` templates from `table`, each independently weighted.
pub(super) fn draw_from_table<T: 'static>(
    rng: &mut GameRng,
    table: &'static [SpawnEntry<T>],
    count: u32,
) -> Vec<&'static T> {
    let weights = content::table_weights(table);
    (0..count)
        .filter_map(|_| rng.weighted_index(&weights).map(|index| table[index].template))
        .collect()
}

fn draw_count(rng: &mut GameRng, max: u32) -> u32 {
    let upper = i32::try_from(max).unwrap_or(i32::MAX);
    rng.range_inclusive(0, upper).unsigned_abs()
}

/// Populates one room. A candidate cell already holding an entity is skipped, not retried.
pub(super) fn populate_room(
    rng: &mut GameRng,
    room: &RectangularRoom,
    limits: &SpawnLimits,
    occupied: &mut BTreeSet<Pos>,
    monsters: &mut Vec<MonsterSpawn>,
    items: &mut Vec<ItemSpawn>,
) {
    let monster_count = draw_count(rng, limits.max_monsters);
    let item_count = draw_count(rng, limits.max_items);
    let monster_templates = draw_from_table(rng, content::MONSTER_TABLE, monster_count);
    let item_templates = draw_from_table(rng, content::ITEM_TABLE, item_count);

    for template in monster_templates {
        let pos = room.random_interior_cell(rng);
        if occupied.insert(pos) {
            monsters.push(MonsterSpawn { template, pos });
        }
    }
    for template in item_templates {
        let pos = room.random_interior_cell(rng);
        if occupied.insert(pos) {
            items.push(ItemSpawn { template, pos });
        }
    }
}
