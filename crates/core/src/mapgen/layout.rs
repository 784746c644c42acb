//! Room rectangles and the L-shaped corridors that join them.

use crate::rng::GameRng;
use crate::state::Map;
use crate::types::{Pos, TileKind};

use super::grid::bresenham;

/// Axis-aligned room. The outer ring (`x1`, `x2`, `y1`, `y2`) stays wall; only the interior is
/// carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectangularRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectangularRoom {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x1: x, y1: y, x2: x + width, y2: y + height }
    }

    pub fn center(&self) -> Pos {
        Pos::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    pub fn interior(&self) -> impl Iterator<Item = Pos> + '_ {
        ((self.y1 + 1)..self.y2)
            .flat_map(move |y| ((self.x1 + 1)..self.x2).map(move |x| Pos::new(x, y)))
    }

    pub fn interior_contains(&self, pos: Pos) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }

    /// Overlap test on the full rectangles, so touching rooms also count.
    pub fn intersects(&self, other: &RectangularRoom) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    pub(super) fn random_interior_cell(&self, rng: &mut GameRng) -> Pos {
        let x = rng.range_inclusive(self.x1 + 1, self.x2 - 1);
        let y = rng.range_inclusive(self.y1 + 1, self.y2 - 1);
        Pos::new(x, y)
    }
}

pub(super) fn carve_room(map: &mut Map, room: &RectangularRoom) {
    for pos in room.interior() {
        map.set_tile(pos, TileKind::Floor);
    }
}

/// Horizontal-then-vertical or vertical-then-horizontal, chosen by a coin flip.
pub(super) fn tunnel_between(rng: &mut GameRng, start: Pos, end: Pos) -> Vec<Pos> {
    let corner =
        if rng.coin_flip() { Pos::new(end.x, start.y) } else { Pos::new(start.x, end.y) };
    let mut cells = bresenham(start, corner);
    cells.extend(bresenham(corner, end).into_iter().skip(1));
    cells
}

pub(super) fn carve_tunnel(map: &mut Map, cells: &[Pos]) {
    for &pos in cells {
        map.set_tile(pos, TileKind::Floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_interior_follow_outer_ring() {
        let room = RectangularRoom::new(2, 3, 4, 5);
        assert_eq!(room.center(), Pos::new(4, 5));
        let cells: Vec<Pos> = room.interior().collect();
        assert_eq!(cells.len(), 3 * 4);
        assert!(cells.iter().all(|&pos| room.interior_contains(pos)));
        assert!(!room.interior_contains(Pos::new(2, 3)));
    }

    #[test]
    fn touching_rooms_intersect() {
        let left = RectangularRoom::new(0, 0, 4, 4);
        let touching = RectangularRoom::new(4, 0, 4, 4);
        let apart = RectangularRoom::new(5, 0, 4, 4);
        assert!(left.intersects(&touching));
        assert!(!left.intersects(&apart));
    }

    #[test]
    fn tunnel_is_an_l_shape_between_endpoints() {
        let mut rng = GameRng::seed_from_u64(5);
        for _ in 0..16 {
            let start = Pos::new(3, 3);
            let end = Pos::new(9, 7);
            let cells = tunnel_between(&mut rng, start, end);

            assert_eq!(cells.first(), Some(&start));
            assert_eq!(cells.last(), Some(&end));
            assert_eq!(cells.len(), 6 + 4 + 1);
            assert!(cells.windows(2).all(|pair| {
                pair[0].x.abs_diff(pair[1].x) + pair[0].y.abs_diff(pair[1].y) == 1
            }));
        }
    }

    #[test]
    fn random_interior_cell_stays_inside() {
        let mut rng = GameRng::seed_from_u64(11);
        let room = RectangularRoom::new(10, 10, 6, 6);
        for _ in 0..200 {
            assert!(room.interior_contains(room.random_interior_cell(&mut rng)));
        }
    }
}
