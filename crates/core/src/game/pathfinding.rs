//! Weighted shortest paths for pursuing actors.
//! Orthogonal steps cost 2 and diagonal steps 3, multiplied by the entered cell's cost. Walls are
//! impassable and cells holding a blocking entity cost 10 more, so pursuers route around crowds
//! while still treating them as passable.

use std::collections::{BTreeMap, BTreeSet};

use crate::state::World;
use crate::types::{DIRECTIONS, Pos};

const CARDINAL_COST: u32 = 2;
const DIAGONAL_COST: u32 = 3;
const BLOCKER_PENALTY: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Per-cell entry cost; zero means impassable.
pub(crate) fn cost_grid(world: &World) -> Vec<u32> {
    let map = &world.map;
    let mut costs = vec![0; map.width * map.height];
    for y in 0..map.height {
        for x in 0..map.width {
            let pos = Pos::new(x as i32, y as i32);
            if map.is_walkable(pos) {
                costs[y * map.width + x] = 1;
            }
        }
    }
    for (_, entity) in world.on_map() {
        if entity.blocks_movement && map.in_bounds(entity.pos) {
            let idx = (entity.pos.y as usize) * map.width + (entity.pos.x as usize);
            if costs[idx] > 0 {
                costs[idx] += BLOCKER_PENALTY;
            }
        }
    }
    costs
}

/// Steps from `start` (exclusive) to `goal` (inclusive). Empty when unreachable or already there.
pub fn find_path(world: &World, start: Pos, goal: Pos) -> Vec<Pos> {
    let costs = cost_grid(world);
    weighted_path(world.map.width, world.map.height, &costs, start, goal).unwrap_or_default()
}

/// Octile distance at the minimum cell cost; never overestimates.
fn heuristic(a: Pos, b: Pos) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    let diagonal = dx.min(dy);
    let straight = dx.max(dy) - diagonal;
    DIAGONAL_COST * diagonal + CARDINAL_COST * straight
}

fn weighted_path(
    width: usize,
    height: usize,
    costs: &[u32],
    start: Pos,
    goal: Pos,
) -> Option<Vec<Pos>> {
    let in_bounds = |pos: Pos| {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
    };
    let cost_at = |pos: Pos| costs[(pos.y as usize) * width + (pos.x as usize)];
    if !in_bounds(start) || !in_bounds(goal) || cost_at(goal) == 0 {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = heuristic(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0_u32);

    while let Some(current) = open_set.pop_first() {
        let pos = Pos::new(current.x, current.y);
        if pos == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        let Some(&current_g) = g_score.get(&pos) else {
            continue;
        };
        if current.f > current_g + current.h {
            continue;
        }
        for (dx, dy) in DIRECTIONS {
            let next = pos.offset(dx, dy);
            if !in_bounds(next) {
                continue;
            }
            let cell_cost = cost_at(next);
            if cell_cost == 0 {
                continue;
            }
            let step = if dx != 0 && dy != 0 { DIAGONAL_COST } else { CARDINAL_COST };
            let tentative = current_g + step * cell_cost;
            if tentative < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, pos);
                g_score.insert(next, tentative);
                let h = heuristic(next, goal);
                open_set.insert(OpenNode { f: tentative + h, h, y: next.y, x: next.x });
            }
        }
    }
    None
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        if previous == start {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::state::Map;
    use crate::types::TileKind;

    fn path_cost(world: &World, start: Pos, path: &[Pos]) -> u32 {
        let costs = cost_grid(world);
        let mut previous = start;
        let mut total = 0;
        for &pos in path {
            let diagonal = pos.x != previous.x && pos.y != previous.y;
            let step = if diagonal { DIAGONAL_COST } else { CARDINAL_COST };
            total += step * costs[(pos.y as usize) * world.map.width + pos.x as usize];
            previous = pos;
        }
        total
    }

    #[test]
    fn straight_corridor_path_excludes_start_and_ends_at_goal() {
        let world = World::new(Map::new(10, 5));
        let path = find_path(&world, Pos::new(1, 2), Pos::new(5, 2));
        assert_eq!(path, vec![Pos::new(2, 2), Pos::new(3, 2), Pos::new(4, 2), Pos::new(5, 2)]);
    }

    #[test]
    fn unreachable_goal_yields_empty_path() {
        let mut map = Map::new(10, 5);
        for y in 0..5 {
            map.set_tile(Pos::new(5, y), TileKind::Wall);
        }
        let world = World::new(map);
        assert!(find_path(&world, Pos::new(2, 2), Pos::new(7, 2)).is_empty());
        assert!(find_path(&world, Pos::new(2, 2), Pos::new(2, 2)).is_empty());
    }

    #[test]
    fn path_detours_around_blocking_actor_when_cheaper() {
        let mut world = World::new(Map::new(9, 5));
        world.spawn(content::ORC.create(Pos::new(4, 2)));

        let path = find_path(&world, Pos::new(2, 2), Pos::new(6, 2));

        assert!(!path.contains(&Pos::new(4, 2)), "path {path:?} should avoid the orc");
        assert_eq!(path.last(), Some(&Pos::new(6, 2)));
        assert_eq!(path_cost(&world, Pos::new(2, 2), &path), 2 + 3 + 3 + 2);
    }

    #[test]
    fn crowd_in_one_wide_corridor_is_still_passable() {
        let mut world = World::new(Map::new(9, 3));
        world.spawn(content::ORC.create(Pos::new(4, 1)));

        let path = find_path(&world, Pos::new(2, 1), Pos::new(6, 1));

        assert_eq!(path.len(), 4);
        assert!(path.contains(&Pos::new(4, 1)));
    }

    #[test]
    fn diagonal_moves_are_used_when_cheaper() {
        let world = World::new(Map::new(10, 10));
        let path = find_path(&world, Pos::new(1, 1), Pos::new(4, 4));
        assert_eq!(path.len(), 3);
        assert_eq!(path_cost(&world, Pos::new(1, 1), &path), 9);
    }
}
