//! The enemy phase that follows every successful player action.

use super::Game;
use crate::error::{GameError, GameResult};
use crate::types::EntityId;

impl Game {
    /// Gives every living non-player actor one AI turn, in id order.
    /// The roster is fixed when the phase starts; actors killed earlier in the phase are skipped.
    /// Impossible actions are dropped silently; anything else aborts the phase.
    pub fn handle_enemy_turns(&mut self) -> GameResult<()> {
        let roster: Vec<EntityId> = self
            .world
            .living_actor_ids()
            .into_iter()
            .filter(|&actor| actor != self.player)
            .collect();

        for actor in roster {
            if !self.world.is_alive(actor) {
                log::trace!("{actor:?} died earlier this phase; skipping");
                continue;
            }
            match self.run_ai(actor) {
                Ok(()) => {}
                Err(GameError::Impossible(failure)) => {
                    log::trace!("{actor:?} could not act: {failure}");
                }
                Err(err) => {
                    log::error!("enemy turn for {actor:?} failed: {err}");
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}
