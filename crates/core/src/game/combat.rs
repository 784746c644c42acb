//! Hit point changes and the death transition.

use super::Game;
use crate::color;
use crate::error::GameResult;
use crate::state::capitalize;
use crate::types::{EntityId, RenderOrder};

impl Game {
    /// Assigns hit points (clamped to `0..=max_hp`); reaching zero kills a living actor.
    pub fn set_hp(&mut self, target: EntityId, value: i32) -> GameResult<()> {
        let actor = self.world.actor_mut(target)?;
        let hp = actor.fighter.set_hp(value);
        if hp == 0 && actor.is_alive() {
            self.die(target)?;
        }
        Ok(())
    }

    pub fn take_damage(&mut self, target: EntityId, amount: i32) -> GameResult<()> {
        let hp = self.world.actor(target)?.fighter.hp();
        self.set_hp(target, hp.saturating_sub(amount))
    }

    /// Returns the hit points actually recovered.
    pub fn heal(&mut self, target: EntityId, amount: i32) -> GameResult<i32> {
        Ok(self.world.actor_mut(target)?.fighter.heal(amount))
    }

    fn die(&mut self, target: EntityId) -> GameResult<()> {
        let entity = self.world.entity_mut(target)?;
        let (message, fg) = if target == self.player {
            ("You Died!".to_string(), color::PLAYER_DEATH)
        } else {
            (format!("{} is dead!", capitalize(&entity.name)), color::ENEMY_DEATH)
        };

        entity.glyph = '%';
        entity.color = color::CORPSE;
        entity.blocks_movement = false;
        entity.render_order = RenderOrder::Corpse;
        entity.name = format!("remains of {}", entity.name);
        if let Some(actor) = entity.as_actor_mut() {
            actor.ai = None;
        }

        log::debug!("{target:?} died");
        self.log.add(message, fg);
        Ok(())
    }
}
