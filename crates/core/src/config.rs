//! Numeric knobs read at level-generation and engine-construction time.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use toml::de::Error as TomlError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] TomlError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub map_width: i32,
    pub map_height: i32,

    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_rooms: u32,

    pub max_monsters_per_room: u32,
    pub max_items_per_room: u32,

    pub fov_radius: i32,
    pub inventory_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 80,
            screen_height: 60,
            map_width: 80,
            map_height: 50,
            room_min_size: 6,
            room_max_size: 10,
            max_rooms: 30,
            max_monsters_per_room: 2,
            max_items_per_room: 2,
            fov_radius: 8,
            inventory_capacity: 26,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width <= 0 || self.map_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "map dimensions must be positive, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.room_min_size < 3 {
            return Err(ConfigError::Invalid(format!(
                "room_min_size must be at least 3 to leave an interior, got {}",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(ConfigError::Invalid(format!(
                "room_min_size ({}) exceeds room_max_size ({})",
                self.room_min_size, self.room_max_size
            )));
        }
        // Room origins are drawn from 0..=dimension - size - 1.
        if self.room_max_size >= self.map_width || self.room_max_size >= self.map_height {
            return Err(ConfigError::Invalid(format!(
                "room_max_size ({}) must be smaller than the map ({}x{})",
                self.room_max_size, self.map_width, self.map_height
            )));
        }
        let longest_side = self.map_width.max(self.map_height);
        if self.fov_radius < 0 || self.fov_radius > longest_side {
            return Err(ConfigError::Invalid(format!(
                "fov_radius must be within 0..={longest_side}, got {}",
                self.fov_radius
            )));
        }
        let smallest_interior = u64::from((self.room_min_size - 1).unsigned_abs()).pow(2);
        for (name, limit) in [
            ("max_monsters_per_room", self.max_monsters_per_room),
            ("max_items_per_room", self.max_items_per_room),
        ] {
            if u64::from(limit) > smallest_interior {
                return Err(ConfigError::Invalid(format!(
                    "{name} ({limit}) exceeds the {smallest_interior} interior cells of the \
                     smallest room"
                )));
            }
        }
        Ok(())
    }
}
