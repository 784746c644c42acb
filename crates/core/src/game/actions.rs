//! The closed set of intents an actor can carry out, and their validation.
//! Every handler checks its preconditions before touching the world, so an
//! `ActionFailure` always leaves the state exactly as it was.

use super::Game;
use crate::color;
use crate::error::{ActionFailure, GameError, GameResult};
use crate::state::capitalize;
use crate::types::{EntityId, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move { dx: i32, dy: i32 },
    Melee { dx: i32, dy: i32 },
    /// Melee when a living actor occupies the destination, otherwise move.
    Bump { dx: i32, dy: i32 },
    Wait,
    Pickup,
    /// `target` defaults to the user's own cell.
    UseItem { item: EntityId, target: Option<Pos> },
    Drop { item: EntityId },
}

impl Game {
    /// Carries out `action` for `actor`. Does not advance enemies or refresh sight.
    pub fn perform(&mut self, actor: EntityId, action: Action) -> GameResult<()> {
        match action {
            Action::Move { dx, dy } => self.perform_move(actor, dx, dy),
            Action::Melee { dx, dy } => self.perform_melee(actor, dx, dy),
            Action::Bump { dx, dy } => self.perform_bump(actor, dx, dy),
            Action::Wait => {
                self.world.actor(actor)?;
                Ok(())
            }
            Action::Pickup => self.perform_pickup(actor),
            Action::UseItem { item, target } => self.perform_use_item(actor, item, target),
            Action::Drop { item } => self.perform_drop(actor, item),
        }
    }

    fn destination(&self, actor: EntityId, dx: i32, dy: i32) -> GameResult<Pos> {
        self.world.actor(actor)?;
        Ok(self.world.entity(actor)?.pos.offset(dx, dy))
    }

    fn perform_move(&mut self, actor: EntityId, dx: i32, dy: i32) -> GameResult<()> {
        let dest = self.destination(actor, dx, dy)?;
        let map = &self.world.map;
        if !map.in_bounds(dest) || !map.is_walkable(dest) {
            return Err(ActionFailure::Blocked.into());
        }
        if self.world.blocking_entity_at(dest).is_some_and(|blocker| blocker != actor) {
            return Err(ActionFailure::Blocked.into());
        }
        self.world.entity_mut(actor)?.pos = dest;
        Ok(())
    }

    fn perform_melee(&mut self, actor: EntityId, dx: i32, dy: i32) -> GameResult<()> {
        let dest = self.destination(actor, dx, dy)?;
        let Some(target) = self.world.actor_at(dest) else {
            return Err(ActionFailure::NothingToAttack.into());
        };

        let attacker = self.world.entity(actor)?;
        let power = self.world.actor(actor)?.fighter.power;
        let defense = self.world.actor(target)?.fighter.defense;
        let damage = power - defense;
        let description =
            format!("{} attacks {}", capitalize(&attacker.name), self.world.entity(target)?.name);
        let fg = if actor == self.player { color::PLAYER_ATTACK } else { color::ENEMY_ATTACK };

        if damage > 0 {
            self.log.add(format!("{description} for {damage} hit points."), fg);
            self.take_damage(target, damage)
        } else {
            self.log.add(format!("{description} but does no damage."), fg);
            Ok(())
        }
    }

    fn perform_bump(&mut self, actor: EntityId, dx: i32, dy: i32) -> GameResult<()> {
        let dest = self.destination(actor, dx, dy)?;
        if self.world.actor_at(dest).is_some() {
            self.perform_melee(actor, dx, dy)
        } else {
            self.perform_move(actor, dx, dy)
        }
    }

    fn perform_pickup(&mut self, actor: EntityId) -> GameResult<()> {
        let pos = self.world.entity(actor)?.pos;
        let inventory_full = self.world.actor(actor)?.inventory.is_full();
        let Some(item) = self.world.item_at(pos) else {
            return Err(ActionFailure::NothingHere.into());
        };
        if inventory_full {
            return Err(ActionFailure::InventoryFull.into());
        }
        self.world.take_into_inventory(actor, item)?;
        let name = &self.world.entity(item)?.name;
        self.log.add(format!("You picked up the {name}."), color::WHITE);
        Ok(())
    }

    fn perform_use_item(
        &mut self,
        actor: EntityId,
        item: EntityId,
        target: Option<Pos>,
    ) -> GameResult<()> {
        let consumable = self.world.item(item)?.consumable;
        let holder = self.world.actor(actor)?;
        if !holder.inventory.contains(item) {
            return Err(GameError::ItemNotHeld { holder: actor, item });
        }
        let target = match target {
            Some(pos) => pos,
            None => self.world.entity(actor)?.pos,
        };
        self.activate(consumable, actor, item, target)
    }

    fn perform_drop(&mut self, actor: EntityId, item: EntityId) -> GameResult<()> {
        self.world.drop_from_inventory(actor, item)?;
        let name = &self.world.entity(item)?.name;
        self.log.add(format!("You dropped the {name}."), color::WHITE);
        Ok(())
    }
}
