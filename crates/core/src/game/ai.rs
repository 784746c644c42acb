//! Per-actor decision making for the enemy phase.

use super::Game;
use super::actions::Action;
use super::pathfinding::find_path;
use crate::color;
use crate::entity::{Ai, AiKind};
use crate::error::{GameError, GameResult};
use crate::types::{DIRECTIONS, EntityId, Pos};

impl Game {
    /// Lets `actor`'s AI choose and perform one action. Dead actors do nothing.
    pub fn run_ai(&mut self, actor: EntityId) -> GameResult<()> {
        let kind = self.world.actor(actor)?.ai.as_ref().map(Ai::kind);
        match kind {
            None | Some(AiKind::Idle) => Ok(()),
            Some(AiKind::Hostile) => self.run_hostile(actor),
            Some(AiKind::Confused) => self.run_confused(actor),
        }
    }

    fn run_hostile(&mut self, actor: EntityId) -> GameResult<()> {
        let target = self.player_pos()?;
        let pos = self.world.entity(actor)?.pos;

        if self.world.map.is_visible(pos) {
            if pos.chebyshev(target) <= 1 {
                self.replace_path(actor, Vec::new())?;
                return self.perform(
                    actor,
                    Action::Melee { dx: target.x - pos.x, dy: target.y - pos.y },
                );
            }
            let path = find_path(&self.world, pos, target);
            log::trace!("{actor:?} pursues along {} steps", path.len());
            self.replace_path(actor, path)?;
        }

        match self.next_step(actor)? {
            Some(step) => {
                self.perform(actor, Action::Move { dx: step.x - pos.x, dy: step.y - pos.y })
            }
            None => self.perform(actor, Action::Wait),
        }
    }

    fn run_confused(&mut self, actor: EntityId) -> GameResult<()> {
        let expired = match &self.world.actor(actor)?.ai {
            Some(Ai::Confused(confusion)) => confusion.turns_remaining <= 0,
            _ => return Ok(()),
        };

        if expired {
            let name = self.world.entity(actor)?.name.clone();
            let text = format!("The {name} is no longer confused.");
            self.log.add(text, color::STATUS_EFFECT_EXPIRED);
            let state = self.world.actor_mut(actor)?;
            if let Some(Ai::Confused(confusion)) = state.ai.take() {
                state.ai = Some(*confusion.previous);
            }
            return self.run_ai(actor);
        }

        let Some(&(dx, dy)) = self.rng.choose(&DIRECTIONS) else {
            return Ok(());
        };
        if let Some(Ai::Confused(confusion)) = &mut self.world.actor_mut(actor)?.ai {
            confusion.turns_remaining -= 1;
        }
        self.perform(actor, Action::Bump { dx, dy })
    }

    fn player_pos(&self) -> GameResult<Pos> {
        self.world.get(self.player).map(|player| player.pos).ok_or(GameError::PlayerMissing)
    }

    fn replace_path(&mut self, actor: EntityId, path: Vec<Pos>) -> GameResult<()> {
        if let Some(Ai::Hostile(pursuit)) = &mut self.world.actor_mut(actor)?.ai {
            pursuit.path = path.into();
        }
        Ok(())
    }

    fn next_step(&mut self, actor: EntityId) -> GameResult<Option<Pos>> {
        match &mut self.world.actor_mut(actor)?.ai {
            Some(Ai::Hostile(pursuit)) => Ok(pursuit.path.pop_front()),
            _ => Ok(None),
        }
    }
}
