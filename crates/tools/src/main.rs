use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use game_core::game::find_path;
use game_core::{Action, DIRECTIONS, Game, GameConfig, GameRng, Pos, TileKind, TurnOutcome};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about = "Plays a seeded game with a scripted player", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Maximum number of player turns to play
    #[arg(short, long, default_value_t = 200)]
    turns: u32,
    /// Optional TOML file overriding the default configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print a JSON summary instead of the map and message log
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    turns_played: u64,
    game_over: bool,
    player_hp: i32,
    player_max_hp: i32,
    inventory: Vec<String>,
    enemies_alive: usize,
    corpses: usize,
    explored_cells: usize,
    snapshot_hash: String,
    messages: Vec<String>,
}

/// Picks the scripted player's next action: melee an adjacent enemy, grab loot underfoot,
/// chase the nearest visible enemy, or wander.
fn choose_action(game: &Game, wander: &mut GameRng) -> Action {
    let world = game.world();
    let Some(me) = world.get(game.player()) else {
        return Action::Wait;
    };
    let here = me.pos;

    let nearest = world
        .living_actor_ids()
        .into_iter()
        .filter(|&id| id != game.player())
        .filter_map(|id| world.get(id).map(|entity| entity.pos))
        .filter(|&pos| world.map.is_visible(pos))
        .min_by_key(|&pos| (here.chebyshev(pos), pos.y, pos.x));

    if let Some(target) = nearest {
        if here.chebyshev(target) == 1 {
            return Action::Melee { dx: target.x - here.x, dy: target.y - here.y };
        }
    }
    if world.item_at(here).is_some() && me.as_actor().is_some_and(|a| !a.inventory.is_full()) {
        return Action::Pickup;
    }
    if let Some(target) = nearest {
        if let Some(step) = find_path(world, here, target).first() {
            return Action::Bump { dx: step.x - here.x, dy: step.y - here.y };
        }
    }
    let (dx, dy) = *wander.choose(&DIRECTIONS).unwrap_or(&(0, 0));
    Action::Bump { dx, dy }
}

fn render(game: &Game) -> String {
    let world = game.world();
    let map = &world.map;
    let mut rows: Vec<Vec<char>> = (0..map.height as i32)
        .map(|y| {
            (0..map.width as i32)
                .map(|x| {
                    let pos = Pos::new(x, y);
                    if !map.is_explored(pos) {
                        ' '
                    } else {
                        match map.tile_at(pos) {
                            TileKind::Wall => '#',
                            TileKind::Floor if map.is_visible(pos) => '.',
                            TileKind::Floor => ',',
                        }
                    }
                })
                .collect()
        })
        .collect();

    for (_, entity) in world.render_list() {
        if let Some(cell) = usize::try_from(entity.pos.y)
            .ok()
            .zip(usize::try_from(entity.pos.x).ok())
            .and_then(|(y, x)| rows.get_mut(y).and_then(|row| row.get_mut(x)))
        {
            *cell = entity.glyph;
        }
    }

    rows.into_iter().map(|row| row.into_iter().collect::<String>()).collect::<Vec<_>>().join("\n")
}

fn summarize(game: &Game) -> Result<Summary> {
    let world = game.world();
    let player = world.actor(game.player()).context("player entity vanished")?;
    let inventory = player
        .inventory
        .items()
        .iter()
        .filter_map(|&id| world.get(id).map(|entity| entity.name.clone()))
        .collect();

    Ok(Summary {
        seed: game.seed(),
        turns_played: game.turn(),
        game_over: game.is_game_over(),
        player_hp: player.fighter.hp(),
        player_max_hp: player.fighter.max_hp,
        inventory,
        enemies_alive: world.living_actor_ids().len() - usize::from(!game.is_game_over()),
        corpses: world.corpse_ids().len(),
        explored_cells: world.map.explored_count(),
        snapshot_hash: format!("{:016x}", game.snapshot_hash()),
        messages: game.log().messages().iter().map(|message| message.full_text()).collect(),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => GameConfig::default(),
    };
    let mut game = Game::new(args.seed, config).context("Failed to start a new game")?;
    let mut wander = GameRng::seed_from_u64(args.seed ^ 0x5eed);

    for _ in 0..args.turns {
        let action = choose_action(&game, &mut wander);
        match game.play_turn(action) {
            Ok(TurnOutcome::GameOver) => break,
            Ok(TurnOutcome::Acted | TurnOutcome::Rejected(_)) => {}
            Err(err) => bail!("turn {} failed on {action:?}: {err}", game.turn()),
        }
    }

    let summary = summarize(&game)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", render(&game));
    println!();
    for message in &summary.messages {
        println!("{message}");
    }
    println!();
    println!(
        "Seed {} | Turn {} | HP {}/{} | Enemies {} | Hash {}",
        summary.seed,
        summary.turns_played,
        summary.player_hp,
        summary.player_max_hp,
        summary.enemies_alive,
        summary.snapshot_hash
    );
    Ok(())
}
