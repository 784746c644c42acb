//! Grid-space primitives shared by layout and spawn placement.

use crate::types::Pos;

/// Cells on the line from `start` to `end`, both endpoints included.
pub(crate) fn bresenham(start: Pos, end: Pos) -> Vec<Pos> {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let sx = if start.x < end.x { 1 } else { -1 };
    let sy = if start.y < end.y { 1 } else { -1 };

    let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    let mut current = start;
    let mut error = dx + dy;
    loop {
        cells.push(current);
        if current == end {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += sx;
        }
        if doubled <= dx {
            error += dx;
            current.y += sy;
        }
    }
    cells
}
