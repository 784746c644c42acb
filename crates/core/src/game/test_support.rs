//! Shared fixtures for the `game` submodule test suites.

use super::Game;
use crate::config::GameConfig;
use crate::content::{self, ActorTemplate, ItemTemplate};
use crate::state::{Map, World};
use crate::types::{EntityId, Pos};

const ARENA_WIDTH: usize = 14;
const ARENA_HEIGHT: usize = 9;

/// Walled open floor with the player at `player_pos` and sight already computed.
pub(super) fn arena_game(player_pos: Pos) -> Game {
    arena_game_with_capacity(player_pos, content::PLAYER.inventory_capacity)
}

pub(super) fn arena_game_with_capacity(player_pos: Pos, capacity: usize) -> Game {
    let mut world = World::new(Map::new(ARENA_WIDTH, ARENA_HEIGHT));
    let player = world.spawn(content::PLAYER.create_with_inventory(player_pos, capacity));
    Game::with_world(world, player, GameConfig::default(), 7).expect("player was just spawned")
}

pub(super) fn add_actor(game: &mut Game, template: ActorTemplate, pos: Pos) -> EntityId {
    game.world_mut().spawn(template.create(pos))
}

pub(super) fn place_item(game: &mut Game, template: ItemTemplate, pos: Pos) -> EntityId {
    game.world_mut().spawn(template.create(pos))
}

pub(super) fn give_item(game: &mut Game, template: ItemTemplate) -> EntityId {
    let player = game.player();
    game.world_mut()
        .spawn_into_inventory(player, template.create(Pos::new(0, 0)))
        .expect("player inventory has room")
}

pub(super) fn hp(game: &Game, actor: EntityId) -> i32 {
    game.world().actor(actor).expect("actor exists").fighter.hp()
}

pub(super) fn player_pos(game: &Game) -> Pos {
    game.world().entity(game.player()).expect("player exists").pos
}

pub(super) fn inventory_contains(game: &Game, item: EntityId) -> bool {
    game.world().actor(game.player()).expect("player exists").inventory.contains(item)
}
