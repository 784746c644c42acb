use std::collections::BTreeSet;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use game_core::{Action, EntityId, Game, GameConfig, Pos, TurnOutcome};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First seed to play
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to play
    #[arg(short, long, default_value_t = 16)]
    games: u64,
    /// Maximum player turns per game
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
}

const STEPS: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> Option<T> {
    if slice.is_empty() {
        return None;
    }
    let p = rng.next_u64() as usize % slice.len();
    Some(slice[p])
}

fn random_action(game: &Game, rng: &mut ChaCha8Rng) -> Action {
    let world = game.world();
    let held: Vec<EntityId> =
        world.actor(game.player()).map(|a| a.inventory.items().to_vec()).unwrap_or_default();
    let targets: Vec<Pos> = world
        .living_actor_ids()
        .into_iter()
        .filter_map(|id| world.get(id).map(|entity| entity.pos))
        .collect();

    match rng.next_u64() % 12 {
        0 => Action::Wait,
        1 | 2 => Action::Pickup,
        3 | 4 => match choose(rng, &held) {
            Some(item) => Action::UseItem { item, target: choose(rng, &targets) },
            None => Action::Wait,
        },
        5 => match choose(rng, &held) {
            Some(item) => Action::Drop { item },
            None => Action::Wait,
        },
        _ => {
            let (dx, dy) = choose(rng, &STEPS).unwrap_or((0, 0));
            Action::Bump { dx, dy }
        }
    }
}

fn assert_invariants(game: &Game) -> Result<()> {
    let world = game.world();
    let mut blocked = BTreeSet::new();

    for (id, entity) in world.on_map() {
        ensure!(world.map.is_walkable(entity.pos), "{id:?} is inside a wall at {:?}", entity.pos);
        if entity.blocks_movement {
            ensure!(blocked.insert(entity.pos), "two blockers share {:?}", entity.pos);
        }
        if let Some(actor) = entity.as_actor() {
            let hp = actor.fighter.hp();
            ensure!((0..=actor.fighter.max_hp).contains(&hp), "{id:?} has hp {hp}");
            ensure!(actor.is_alive() == (hp > 0), "{id:?} liveness disagrees with hp {hp}");
            ensure!(
                actor.inventory.len() <= actor.inventory.capacity(),
                "{id:?} carries more than its capacity"
            );
            for &item in actor.inventory.items() {
                ensure!(!world.map.contains_entity(item), "held item {item:?} is on the map");
            }
        }
    }
    Ok(())
}

fn play(seed: u64, max_turns: u32) -> Result<(u64, bool)> {
    let mut game = Game::new(seed, GameConfig::default()).context("default config rejected")?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    assert_invariants(&game).with_context(|| format!("seed {seed} at start"))?;

    for _ in 0..max_turns {
        let action = random_action(&game, &mut rng);
        let outcome = match game.play_turn(action) {
            Ok(outcome) => outcome,
            Err(err) => bail!("seed {seed} turn {}: fatal error on {action:?}: {err}", game.turn()),
        };
        assert_invariants(&game).with_context(|| format!("seed {seed} turn {}", game.turn()))?;
        if outcome == TurnOutcome::GameOver {
            return Ok((game.turn(), true));
        }
    }
    Ok((game.turn(), false))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Starting fuzz harness on seeds {}..{} for max {} turns...",
        args.seed,
        args.seed.saturating_add(args.games),
        args.turns
    );
    let mut deaths = 0;
    for seed in args.seed..args.seed.saturating_add(args.games) {
        let (turns, died) = play(seed, args.turns)?;
        log::info!("seed {seed}: {turns} turns, player {}", if died { "died" } else { "survived" });
        deaths += u32::from(died);
    }

    println!("Fuzzing completed successfully ({deaths} of {} games ended in death).", args.games);
    Ok(())
}
