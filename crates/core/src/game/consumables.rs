//! Single-use item effects. Each effect validates first, then applies, then consumes the item.

use super::Game;
use crate::color;
use crate::entity::{Ai, Confusion, Consumable};
use crate::error::{ActionFailure, GameResult};
use crate::types::{EntityId, Pos};

impl Game {
    pub(super) fn activate(
        &mut self,
        consumable: Consumable,
        user: EntityId,
        item: EntityId,
        target: Pos,
    ) -> GameResult<()> {
        match consumable {
            Consumable::Healing { amount } => self.drink_healing(user, item, amount),
            Consumable::Lightning { damage, max_range } => {
                self.cast_lightning(user, item, damage, max_range)
            }
            Consumable::Fireball { damage, radius } => {
                self.cast_fireball(user, item, target, damage, radius)
            }
            Consumable::Confusion { turns } => self.cast_confusion(user, item, target, turns),
        }
    }

    fn drink_healing(&mut self, user: EntityId, item: EntityId, amount: i32) -> GameResult<()> {
        let fighter = self.world.actor(user)?.fighter;
        if fighter.hp() >= fighter.max_hp {
            return Err(ActionFailure::AlreadyFull.into());
        }
        let recovered = self.heal(user, amount)?;
        let name = self.world.entity(item)?.name.clone();
        let text = format!("You consume the {name}, and recover {recovered}.");
        self.log.add(text, color::HEALTH_RECOVERED);
        self.world.consume_from_inventory(user, item)
    }

    /// Nearest visible living actor other than `user`, strictly closer than `max_range + 1`.
    /// Ties keep the earliest actor in id order.
    fn nearest_visible_enemy(
        &self,
        user: EntityId,
        max_range: i32,
    ) -> GameResult<Option<EntityId>> {
        let origin = self.world.entity(user)?.pos;
        let mut best = None;
        let mut best_distance = f64::from(max_range) + 1.0;
        for (id, entity) in self.world.on_map() {
            if id == user || !entity.is_alive() || !self.world.map.is_visible(entity.pos) {
                continue;
            }
            let distance = origin.euclidean(entity.pos);
            if distance < best_distance {
                best = Some(id);
                best_distance = distance;
            }
        }
        Ok(best)
    }

    fn cast_lightning(
        &mut self,
        user: EntityId,
        item: EntityId,
        damage: i32,
        max_range: i32,
    ) -> GameResult<()> {
        let Some(target) = self.nearest_visible_enemy(user, max_range)? else {
            return Err(ActionFailure::NoTargetInRange.into());
        };
        let name = self.world.entity(target)?.name.clone();
        self.log.add(
            format!("A lightning bolt strikes the {name} with a loud crash, for {damage} damage!"),
            color::WHITE,
        );
        self.take_damage(target, damage)?;
        self.world.consume_from_inventory(user, item)
    }

    fn cast_fireball(
        &mut self,
        user: EntityId,
        item: EntityId,
        target: Pos,
        damage: i32,
        radius: i32,
    ) -> GameResult<()> {
        if !self.world.map.is_visible(target) {
            return Err(ActionFailure::CannotTargetUnseen.into());
        }
        let victims: Vec<EntityId> = self
            .world
            .on_map()
            .filter(|&(id, entity)| {
                id != user
                    && entity.is_alive()
                    && entity.pos.euclidean(target) <= f64::from(radius)
            })
            .map(|(id, _)| id)
            .collect();
        if victims.is_empty() {
            return Err(ActionFailure::NoTargetsInRadius.into());
        }

        for victim in victims {
            let name = self.world.entity(victim)?.name.clone();
            self.log.add(
                format!("The {name} is engulfed in a fiery explosion, taking {damage} damage!"),
                color::WHITE,
            );
            self.take_damage(victim, damage)?;
        }
        self.world.consume_from_inventory(user, item)
    }

    fn cast_confusion(
        &mut self,
        user: EntityId,
        item: EntityId,
        target: Pos,
        turns: i32,
    ) -> GameResult<()> {
        if !self.world.map.is_visible(target) {
            return Err(ActionFailure::CannotTargetUnseen.into());
        }
        let Some(victim) = self.world.actor_at(target) else {
            return Err(ActionFailure::NoTargetSelected.into());
        };
        if victim == user {
            return Err(ActionFailure::CannotTargetSelf.into());
        }

        let name = self.world.entity(victim)?.name.clone();
        self.log.add(
            format!("The eyes of the {name} look vacant, as it starts to stumble around!"),
            color::STATUS_EFFECT_APPLIED,
        );
        let actor = self.world.actor_mut(victim)?;
        if let Some(previous) = actor.ai.take() {
            actor.ai = Some(Ai::Confused(Confusion {
                previous: Box::new(previous),
                turns_remaining: turns,
            }));
        }
        self.world.consume_from_inventory(user, item)
    }
}
