//! Static catalogue of actors and items plus the weighted tables the generator draws from.

use crate::entity::{
    Actor, Ai, Consumable, Entity, EntityKind, Fighter, HostilePursuit, Inventory, Item,
};
use crate::types::{Pos, RenderOrder, Rgb};

/// Behaviour an actor starts with. Confusion is only ever applied during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnBehavior {
    Idle,
    Hostile,
}

impl SpawnBehavior {
    fn initial_ai(self) -> Ai {
        match self {
            SpawnBehavior::Idle => Ai::Idle,
            SpawnBehavior::Hostile => Ai::Hostile(HostilePursuit::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorTemplate {
    pub glyph: char,
    pub color: Rgb,
    pub name: &'static str,
    pub ai: SpawnBehavior,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    pub inventory_capacity: usize,
}

impl ActorTemplate {
    pub fn create(&self, pos: Pos) -> Entity {
        self.create_with_inventory(pos, self.inventory_capacity)
    }

    pub fn create_with_inventory(&self, pos: Pos, capacity: usize) -> Entity {
        Entity {
            pos,
            glyph: self.glyph,
            color: self.color,
            name: self.name.to_string(),
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Actor(Actor {
                fighter: Fighter::new(self.hp, self.defense, self.power),
                inventory: Inventory::new(capacity),
                ai: Some(self.ai.initial_ai()),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTemplate {
    pub glyph: char,
    pub color: Rgb,
    pub name: &'static str,
    pub consumable: Consumable,
}

impl ItemTemplate {
    pub fn create(&self, pos: Pos) -> Entity {
        Entity {
            pos,
            glyph: self.glyph,
            color: self.color,
            name: self.name.to_string(),
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item(Item { consumable: self.consumable }),
        }
    }
}

pub const PLAYER: ActorTemplate = ActorTemplate {
    glyph: '@',
    color: Rgb(255, 255, 255),
    name: "Player",
    ai: SpawnBehavior::Idle,
    hp: 30,
    defense: 2,
    power: 5,
    inventory_capacity: 26,
};

pub const ORC: ActorTemplate = ActorTemplate {
    glyph: 'o',
    color: Rgb(63, 127, 63),
    name: "Orc",
    ai: SpawnBehavior::Hostile,
    hp: 10,
    defense: 0,
    power: 3,
    inventory_capacity: 0,
};

pub const TROLL: ActorTemplate = ActorTemplate {
    glyph: 'T',
    color: Rgb(0, 127, 0),
    name: "Troll",
    ai: SpawnBehavior::Hostile,
    hp: 16,
    defense: 1,
    power: 4,
    inventory_capacity: 0,
};

pub const HEALTH_POTION: ItemTemplate = ItemTemplate {
    glyph: '!',
    color: Rgb(127, 0, 255),
    name: "Health Potion",
    consumable: Consumable::Healing { amount: 4 },
};

pub const LIGHTNING_SCROLL: ItemTemplate = ItemTemplate {
    glyph: '~',
    color: Rgb(255, 255, 0),
    name: "Lightning Scroll",
    consumable: Consumable::Lightning { damage: 20, max_range: 5 },
};

pub const FIREBALL_SCROLL: ItemTemplate = ItemTemplate {
    glyph: '~',
    color: Rgb(255, 0, 0),
    name: "Fireball Scroll",
    consumable: Consumable::Fireball { damage: 12, radius: 3 },
};

pub const CONFUSION_SCROLL: ItemTemplate = ItemTemplate {
    glyph: '~',
    color: Rgb(207, 63, 255),
    name: "Confusion Scroll",
    consumable: Consumable::Confusion { turns: 10 },
};

#[derive(Clone, Copy, Debug)]
pub struct SpawnEntry<T: 'static> {
    pub template: &'static T,
    pub weight: u32,
}

pub const MONSTER_TABLE: &[SpawnEntry<ActorTemplate>] =
    &[SpawnEntry { template: &ORC, weight: 80 }, SpawnEntry { template: &TROLL, weight: 20 }];

pub const ITEM_TABLE: &[SpawnEntry<ItemTemplate>] = &[
    SpawnEntry { template: &HEALTH_POTION, weight: 70 },
    SpawnEntry { template: &CONFUSION_SCROLL, weight: 10 },
    SpawnEntry { template: &FIREBALL_SCROLL, weight: 10 },
    SpawnEntry { template: &LIGHTNING_SCROLL, weight: 10 },
];

pub fn table_weights<T: 'static>(table: &[SpawnEntry<T>]) -> Vec<u32> {
    table.iter().map(|entry| entry.weight).collect()
}
