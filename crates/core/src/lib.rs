pub mod color;
pub mod config;
pub mod content;
pub mod entity;
pub mod error;
pub mod game;
pub mod mapgen;
pub mod message_log;
pub mod rng;
pub mod state;
pub mod types;

pub use config::{ConfigError, GameConfig};
pub use entity::{
    Actor, Ai, AiKind, Consumable, Entity, EntityKind, Fighter, Inventory, Item, Targeting,
};
pub use error::{ActionFailure, GameError, GameResult};
pub use game::{Action, Game, TurnOutcome};
pub use message_log::{Message, MessageLog};
pub use rng::GameRng;
pub use state::{Map, World};
pub use types::*;
