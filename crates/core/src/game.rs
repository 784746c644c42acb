//! Turn engine: owns the world, the player handle, the message log and the seeded stream.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::color;
use crate::config::{ConfigError, GameConfig};
use crate::content;
use crate::entity::Targeting;
use crate::error::{ActionFailure, GameError, GameResult};
use crate::mapgen::MapGenerator;
use crate::message_log::MessageLog;
use crate::rng::GameRng;
use crate::state::World;
use crate::types::EntityId;

mod actions;
mod ai;
mod combat;
mod consumables;
mod pathfinding;
mod turns;
mod visibility;

#[cfg(test)]
mod test_support;

pub use actions::Action;
pub use pathfinding::find_path;
pub use visibility::compute_fov;

/// How a call to [`Game::play_turn`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player's action succeeded and every enemy took its turn.
    Acted,
    /// The action was impossible; nothing changed and no time passed.
    Rejected(ActionFailure),
    /// The player is dead; no further actions are accepted.
    GameOver,
}

pub struct Game {
    seed: u64,
    turn: u64,
    config: GameConfig,
    rng: GameRng,
    world: World,
    player: EntityId,
    log: MessageLog,
}

impl Game {
    /// Generates a fresh level from `seed` and places the player in the first room.
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = GameRng::seed_from_u64(seed);
        let level = MapGenerator::new(&config).generate(&mut rng);

        let mut world = World::new(level.map);
        let player = world.spawn(
            content::PLAYER.create_with_inventory(level.player_start, config.inventory_capacity),
        );
        for spawn in &level.monsters {
            world.spawn(spawn.template.create(spawn.pos));
        }
        for spawn in &level.items {
            world.spawn(spawn.template.create(spawn.pos));
        }
        log::debug!(
            "generated level for seed {seed}: {} rooms, {} monsters, {} items",
            level.rooms.len(),
            level.monsters.len(),
            level.items.len()
        );

        let mut game = Self {
            seed,
            turn: 0,
            config,
            rng,
            world,
            player,
            log: MessageLog::new(),
        };
        game.update_fov();
        game.log.add("Welcome to the dungeon!", color::WELCOME_TEXT);
        Ok(game)
    }

    /// Wraps a hand-built world. Field of view is computed immediately.
    pub fn with_world(
        world: World,
        player: EntityId,
        config: GameConfig,
        seed: u64,
    ) -> GameResult<Self> {
        world.actor(player).map_err(|_| GameError::PlayerMissing)?;
        let mut game = Self {
            seed,
            turn: 0,
            config,
            rng: GameRng::seed_from_u64(seed),
            world,
            player,
            log: MessageLog::new(),
        };
        game.update_fov();
        Ok(game)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for scenario setup and editors. Callers must keep the world consistent.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn is_game_over(&self) -> bool {
        !self.world.is_alive(self.player)
    }

    /// Runs one full turn: the player's action, then every enemy, then a field-of-view refresh.
    /// An impossible action is logged and costs no time.
    pub fn play_turn(&mut self, action: Action) -> GameResult<TurnOutcome> {
        if self.is_game_over() {
            return Ok(TurnOutcome::GameOver);
        }
        match self.perform(self.player, action) {
            Ok(()) => {}
            Err(GameError::Impossible(failure)) => {
                log::trace!("player action {action:?} rejected: {failure}");
                self.log.add(failure.to_string(), color::IMPOSSIBLE);
                return Ok(TurnOutcome::Rejected(failure));
            }
            Err(err) => {
                log::error!("player action {action:?} failed: {err}");
                return Err(self.report_fatal(err));
            }
        }
        self.handle_enemy_turns().map_err(|err| self.report_fatal(err))?;
        self.update_fov();
        self.turn += 1;
        if self.is_game_over() { Ok(TurnOutcome::GameOver) } else { Ok(TurnOutcome::Acted) }
    }

    fn report_fatal(&mut self, err: GameError) -> GameError {
        self.log.add_unstacked(err.to_string(), color::ERROR);
        err
    }

    /// Reports what the input layer must collect before `item` can be used.
    pub fn begin_targeting(&mut self, item: EntityId) -> GameResult<Targeting> {
        let targeting = self.world.item(item)?.consumable.targeting();
        if targeting != Targeting::None {
            self.log.add("Select a target location.", color::NEEDS_TARGET);
        }
        Ok(targeting)
    }

    /// Stable digest of the simulation state for determinism checks.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.turn);
        for (id, entity) in self.world.on_map() {
            hasher.write_u8(u8::from(id == self.player));
            hasher.write_i32(entity.pos.x);
            hasher.write_i32(entity.pos.y);
            hasher.write(entity.name.as_bytes());
            if let Some(actor) = entity.as_actor() {
                hasher.write_i32(actor.fighter.hp());
                hasher.write_u8(u8::from(actor.is_alive()));
                hasher.write_usize(actor.inventory.len());
            }
        }
        hasher.write_usize(self.world.map.explored_count());
        hasher.write_usize(self.log.len());
        hasher.finish()
    }
}
