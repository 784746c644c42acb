//! Procedural level generation split into coherent submodules.

pub mod model;

mod generator;
mod grid;
mod layout;
mod spawns;

pub(crate) use grid::bresenham;
pub use generator::MapGenerator;
pub use layout::RectangularRoom;
pub use model::{GeneratedLevel, ItemSpawn, MonsterSpawn};

use crate::config::GameConfig;
use crate::rng::GameRng;

/// Generates the level a fresh game with `seed` starts on.
pub fn generate_level(seed: u64, config: &GameConfig) -> GeneratedLevel {
    MapGenerator::new(config).generate(&mut GameRng::seed_from_u64(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn generate_level_matches_new_game_layout() {
        let config = GameConfig::default();
        let level = generate_level(2_024, &config);
        let game = Game::new(2_024, config).expect("default config");

        let player = game.world().entity(game.player()).expect("player");
        assert_eq!(player.pos, level.player_start);
        let spawned = game.world().on_map().count();
        assert_eq!(spawned, 1 + level.monsters.len() + level.items.len());
    }
}
