//! Field of view around the player and the explored memory it feeds.
//! Recursive shadowcasting over transparent cells, limited to a Euclidean radius, then a line
//! check that keeps light from leaking around wall corners. Opaque cells on the boundary are lit.

use super::Game;
use crate::mapgen::bresenham;
use crate::state::Map;
use crate::types::Pos;

impl Game {
    /// Recomputes `visible` around the player and folds it into `explored`.
    pub fn update_fov(&mut self) {
        let Some(player) = self.world.get(self.player) else {
            log::warn!("field of view skipped: player entity missing");
            return;
        };
        let origin = player.pos;
        compute_fov(&mut self.world.map, origin, self.config.fov_radius);
        self.world.map.remember_visible();
    }
}

/// Replaces `map`'s visible set with the cells seen from `origin` within `radius`.
pub fn compute_fov(map: &mut Map, origin: Pos, radius: i32) {
    map.clear_visible();
    if !map.in_bounds(origin) {
        return;
    }
    map.set_visible(origin, true);
    let reach = i32::try_from(map.width.max(map.height)).unwrap_or(i32::MAX);
    let radius = radius.min(reach);
    for octant in 0..8 {
        scan_octant(map, origin, radius, octant);
    }

    let min_y = (origin.y - radius).max(0);
    let max_y = (origin.y + radius + 1).min(map.height as i32);
    let min_x = (origin.x - radius).max(0);
    let max_x = (origin.x + radius + 1).min(map.width as i32);
    for y in min_y..max_y {
        for x in min_x..max_x {
            let cell = Pos::new(x, y);
            if cell != origin && map.is_visible(cell) && !has_clear_line(map, origin, cell) {
                map.set_visible(cell, false);
            }
        }
    }
}

fn within_radius(origin: Pos, cell: Pos, radius: i32) -> bool {
    let dx = i64::from(cell.x - origin.x);
    let dy = i64::from(cell.y - origin.y);
    let radius = i64::from(radius);
    dx * dx + dy * dy <= radius * radius
}

/// Maps octant-local `(depth, offset)` to a map cell; depth runs away from `origin`.
fn octant_cell(origin: Pos, depth: i32, offset: i32, octant: u8) -> Pos {
    let (dx, dy) = match octant {
        0 => (offset, -depth),
        1 => (depth, -offset),
        2 => (depth, offset),
        3 => (offset, depth),
        4 => (-offset, depth),
        5 => (-depth, offset),
        6 => (-depth, -offset),
        _ => (-offset, -depth),
    };
    Pos::new(origin.x + dx, origin.y + dy)
}

/// Slope `num / den` measured from the octant's axis.
#[derive(Clone, Copy)]
struct Slope {
    num: i64,
    den: i64,
}

impl Slope {
    fn new(num: i32, den: i32) -> Self {
        Self { num: i64::from(num), den: i64::from(den) }
    }

    fn exceeds(self, other: Slope) -> bool {
        self.num * other.den > other.num * self.den
    }
}

/// One strip of rows still to scan, bounded by `low..high` slopes.
struct Span {
    depth: i32,
    low: Slope,
    high: Slope,
}

fn scan_octant(map: &mut Map, origin: Pos, radius: i32, octant: u8) {
    let mut pending = vec![Span { depth: 1, low: Slope::new(0, 1), high: Slope::new(1, 1) }];

    while let Some(Span { depth, low, mut high }) = pending.pop() {
        if depth > radius {
            continue;
        }
        let mut blocked_run = false;
        for offset in (0..=depth).rev() {
            let near = Slope::new(2 * offset - 1, 2 * depth + 1);
            let far = Slope::new(2 * offset + 1, 2 * depth - 1);
            if near.exceeds(high) || !far.exceeds(low) {
                continue;
            }
            let cell = octant_cell(origin, depth, offset, octant);
            if within_radius(origin, cell, radius) {
                map.set_visible(cell, true);
            }
            let opaque = !map.is_transparent(cell);
            match (opaque, blocked_run) {
                (true, false) => {
                    pending.push(Span { depth: depth + 1, low: far, high });
                    blocked_run = true;
                    high = near;
                }
                (true, true) => high = near,
                (false, _) => blocked_run = false,
            }
        }
        if !blocked_run {
            pending.push(Span { depth: depth + 1, low, high });
        }
    }
}

/// True when every cell strictly between `origin` and `target` lets light through.
fn has_clear_line(map: &Map, origin: Pos, target: Pos) -> bool {
    let line = bresenham(origin, target);
    line.len() < 3 || line[1..line.len() - 1].iter().all(|&cell| map.is_transparent(cell))
}
