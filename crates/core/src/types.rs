use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    /// Diagonal-inclusive step distance, used for melee reach.
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn euclidean(self, other: Pos) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A glyph with its foreground and background colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Graphic {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
}

impl TileKind {
    pub fn walkable(self) -> bool {
        match self {
            TileKind::Wall => false,
            TileKind::Floor => true,
        }
    }

    pub fn transparent(self) -> bool {
        match self {
            TileKind::Wall => false,
            TileKind::Floor => true,
        }
    }

    /// Graphic drawn for a remembered cell outside the current field of view.
    pub fn dark(self) -> Graphic {
        match self {
            TileKind::Wall => Graphic { glyph: ' ', fg: Rgb(255, 255, 255), bg: Rgb(0, 0, 100) },
            TileKind::Floor => Graphic { glyph: ' ', fg: Rgb(255, 255, 255), bg: Rgb(50, 50, 150) },
        }
    }

    /// Graphic drawn for a cell inside the current field of view.
    pub fn light(self) -> Graphic {
        match self {
            TileKind::Wall => Graphic { glyph: ' ', fg: Rgb(255, 255, 255), bg: Rgb(236, 207, 83) },
            TileKind::Floor => {
                Graphic { glyph: ' ', fg: Rgb(255, 255, 255), bg: Rgb(255, 242, 150) }
            }
        }
    }
}

/// Draw layering; later variants are drawn on top and win ties on a shared tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

pub const DIRECTIONS: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_counts_diagonals_as_one_step() {
        let origin = Pos::new(5, 5);
        assert_eq!(origin.chebyshev(Pos::new(6, 6)), 1);
        assert_eq!(origin.chebyshev(Pos::new(4, 5)), 1);
        assert_eq!(origin.chebyshev(Pos::new(8, 3)), 3);
    }

    #[test]
    fn render_order_layers_corpse_below_item_below_actor() {
        assert!(RenderOrder::Corpse < RenderOrder::Item);
        assert!(RenderOrder::Item < RenderOrder::Actor);
    }

    #[test]
    fn wall_blocks_both_movement_and_sight() {
        assert!(!TileKind::Wall.walkable());
        assert!(!TileKind::Wall.transparent());
        assert!(TileKind::Floor.walkable());
        assert!(TileKind::Floor.transparent());
    }
}
