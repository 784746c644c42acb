//! Message and entity colours shared by the simulation and any presentation layer.

use crate::types::Rgb;

pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);

pub const PLAYER_ATTACK: Rgb = Rgb(0xE0, 0xE0, 0xE0);
pub const ENEMY_ATTACK: Rgb = Rgb(0xFF, 0xC0, 0xC0);

pub const PLAYER_DEATH: Rgb = Rgb(0xFF, 0x30, 0x30);
pub const ENEMY_DEATH: Rgb = Rgb(0xFF, 0xA0, 0x30);
pub const CORPSE: Rgb = Rgb(0xBF, 0x00, 0x00);

pub const HEALTH_RECOVERED: Rgb = Rgb(0x00, 0xFF, 0x00);
pub const STATUS_EFFECT_APPLIED: Rgb = Rgb(0x3F, 0xFF, 0x3F);
pub const STATUS_EFFECT_EXPIRED: Rgb = Rgb(0x80, 0x80, 0x80);

pub const NEEDS_TARGET: Rgb = Rgb(0x3F, 0xFF, 0xFF);
pub const IMPOSSIBLE: Rgb = Rgb(0x80, 0x80, 0x80);
pub const ERROR: Rgb = Rgb(0xFF, 0x40, 0x40);
pub const WELCOME_TEXT: Rgb = Rgb(0x20, 0xA0, 0xFF);
