//! Entity records and the components they carry.
//! Components hold data only; the behaviour that mutates them lives on `Game`.

use std::collections::VecDeque;

use crate::types::{EntityId, Pos, RenderOrder, Rgb};

#[derive(Clone, Debug)]
pub struct Entity {
    pub pos: Pos,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

#[derive(Clone, Debug)]
pub enum EntityKind {
    Actor(Actor),
    Item(Item),
}

impl Entity {
    pub fn as_actor(&self) -> Option<&Actor> {
        match &self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match &self.kind {
            EntityKind::Item(item) => Some(item),
            EntityKind::Actor(_) => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.as_actor().is_some_and(Actor::is_alive)
    }
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub fighter: Fighter,
    pub inventory: Inventory,
    /// `None` once the actor has died; this is the only liveness signal.
    pub ai: Option<Ai>,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.ai.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fighter {
    hp: i32,
    pub max_hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        let max_hp = hp.max(0);
        Self { hp: max_hp, max_hp, defense, power }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Stores `value` clamped into `0..=max_hp` and returns the stored value.
    pub fn set_hp(&mut self, value: i32) -> i32 {
        self.hp = value.clamp(0, self.max_hp);
        self.hp
    }

    /// Restores up to `amount` hit points and returns how many were actually recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.hp == self.max_hp || amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.set_hp(before.saturating_add(amount));
        self.hp - before
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    capacity: usize,
    items: Vec<EntityId>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, items: Vec::new() }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn items(&self) -> &[EntityId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }

    /// Item in the given menu slot (`a` is slot 0).
    pub fn get(&self, slot: usize) -> Option<EntityId> {
        self.items.get(slot).copied()
    }

    pub(crate) fn push(&mut self, item: EntityId) {
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, item: EntityId) -> bool {
        match self.items.iter().position(|&held| held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item {
    pub consumable: Consumable,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Consumable {
    Healing { amount: i32 },
    /// Strikes the nearest visible actor other than the user.
    Lightning { damage: i32, max_range: i32 },
    /// Damages every actor around the chosen cell.
    Fireball { damage: i32, radius: i32 },
    Confusion { turns: i32 },
}

/// What the input layer has to ask for before an item can be used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Targeting {
    None,
    Single,
    Area { radius: i32 },
}

impl Consumable {
    pub fn targeting(&self) -> Targeting {
        match *self {
            Consumable::Healing { .. } | Consumable::Lightning { .. } => Targeting::None,
            Consumable::Confusion { .. } => Targeting::Single,
            Consumable::Fireball { radius, .. } => Targeting::Area { radius },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ai {
    /// Placeholder behaviour for actors driven from outside, such as the player.
    Idle,
    Hostile(HostilePursuit),
    Confused(Confusion),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AiKind {
    Idle,
    Hostile,
    Confused,
}

impl Ai {
    pub fn kind(&self) -> AiKind {
        match self {
            Ai::Idle => AiKind::Idle,
            Ai::Hostile(_) => AiKind::Hostile,
            Ai::Confused(_) => AiKind::Confused,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostilePursuit {
    /// Remaining steps towards the last place the target was seen, nearest first.
    pub path: VecDeque<Pos>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confusion {
    pub previous: Box<Ai>,
    pub turns_remaining: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fighter_starts_at_max_hp() {
        let fighter = Fighter::new(30, 2, 5);
        assert_eq!(fighter.hp(), 30);
        assert_eq!(fighter.max_hp, 30);
    }

    #[test]
    fn hp_assignment_is_clamped_into_range() {
        let mut fighter = Fighter::new(10, 0, 3);
        assert_eq!(fighter.set_hp(25), 10);
        assert_eq!(fighter.set_hp(-4), 0);
        assert_eq!(fighter.set_hp(6), 6);
    }

    #[test]
    fn heal_reports_only_missing_hp() {
        let mut fighter = Fighter::new(10, 0, 3);
        fighter.set_hp(8);
        assert_eq!(fighter.heal(4), 2);
        assert_eq!(fighter.hp(), 10);
        assert_eq!(fighter.heal(4), 0);
    }

    #[test]
    fn inventory_full_at_capacity() {
        let mut inventory = Inventory::new(1);
        assert!(!inventory.is_full());
        inventory.push(EntityId::default());
        assert!(inventory.is_full());
    }

    #[test]
    fn zero_capacity_inventory_is_always_full() {
        assert!(Inventory::new(0).is_full());
    }

    #[test]
    fn targeting_follows_consumable_variant() {
        assert_eq!(Consumable::Healing { amount: 4 }.targeting(), Targeting::None);
        assert_eq!(Consumable::Confusion { turns: 10 }.targeting(), Targeting::Single);
        assert_eq!(
            Consumable::Fireball { damage: 12, radius: 3 }.targeting(),
            Targeting::Area { radius: 3 }
        );
    }
}
