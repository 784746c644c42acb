use std::collections::BTreeSet;

use delve::{Action, Game, GameConfig, Pos, TurnOutcome};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

const DIRECTIONS: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

fn pick_action(game: &Game, rng: &mut ChaCha8Rng) -> Action {
    let world = game.world();
    let player = game.player();
    let held: Vec<_> =
        world.actor(player).map(|actor| actor.inventory.items().to_vec()).unwrap_or_default();

    match rng.next_u64() % 10 {
        0 => Action::Wait,
        1 => Action::Pickup,
        2 | 3 if !held.is_empty() => {
            let item = held[(rng.next_u64() % held.len() as u64) as usize];
            let targets: Vec<Pos> = world
                .living_actor_ids()
                .into_iter()
                .filter_map(|id| world.get(id).map(|entity| entity.pos))
                .collect();
            let target = targets.get((rng.next_u64() % (targets.len() as u64 + 1)) as usize);
            Action::UseItem { item, target: target.copied() }
        }
        4 if !held.is_empty() => Action::Drop { item: held[0] },
        _ => {
            let (dx, dy) = DIRECTIONS[(rng.next_u64() % 8) as usize];
            Action::Bump { dx, dy }
        }
    }
}

fn check_invariants(game: &Game, seed: u64) -> Result<(), String> {
    let world = game.world();
    let mut blockers = BTreeSet::new();

    for (id, entity) in world.on_map() {
        if let Some(actor) = entity.as_actor() {
            let hp = actor.fighter.hp();
            if hp < 0 || hp > actor.fighter.max_hp {
                return Err(format!("seed {seed}: hp {hp} outside 0..={}", actor.fighter.max_hp));
            }
            if actor.is_alive() != (hp > 0) {
                return Err(format!("seed {seed}: {id:?} liveness disagrees with hp {hp}"));
            }
            if actor.inventory.len() > actor.inventory.capacity() {
                return Err(format!("seed {seed}: {id:?} inventory over capacity"));
            }
            for &item in actor.inventory.items() {
                if world.map.contains_entity(item) {
                    return Err(format!("seed {seed}: held item {item:?} also on the map"));
                }
            }
        }
        if !world.map.is_walkable(entity.pos) {
            return Err(format!("seed {seed}: {id:?} stands in a wall at {:?}", entity.pos));
        }
        if entity.blocks_movement && !blockers.insert(entity.pos) {
            return Err(format!("seed {seed}: two blocking entities share {:?}", entity.pos));
        }
        if entity.blocks_movement != entity.is_alive() {
            return Err(format!("seed {seed}: {id:?} blocking flag disagrees with liveness"));
        }
    }

    for y in 0..world.map.height as i32 {
        for x in 0..world.map.width as i32 {
            let pos = Pos::new(x, y);
            if world.map.is_visible(pos) && !world.map.is_explored(pos) {
                return Err(format!("seed {seed}: visible cell {pos:?} not explored"));
            }
        }
    }
    Ok(())
}

fn run_fuzz_session(map_seed: u64, choice_seed: u64, max_turns: u32) -> Result<(), String> {
    let mut game = Game::new(map_seed, GameConfig::default()).map_err(|err| err.to_string())?;
    let mut rng = ChaCha8Rng::seed_from_u64(choice_seed);
    check_invariants(&game, map_seed)?;

    for _ in 0..max_turns {
        let action = pick_action(&game, &mut rng);
        let outcome = game
            .play_turn(action)
            .map_err(|err| format!("seed {map_seed}: fatal error after {action:?}: {err}"))?;
        check_invariants(&game, map_seed)?;
        if outcome == TurnOutcome::GameOver {
            if !game.is_game_over() {
                return Err(format!("seed {map_seed}: game over reported for a living player"));
            }
            break;
        }
    }
    Ok(())
}

#[test]
fn fuzzed_sessions_preserve_world_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(24));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(map_seed, choice_seed)| {
            run_fuzz_session(map_seed, choice_seed, 300).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz should preserve invariants");
}
