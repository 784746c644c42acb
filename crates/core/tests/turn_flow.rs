use delve::color;
use delve::content;
use delve::{
    Action, ActionFailure, EntityId, Game, GameConfig, Map, Pos, Targeting, TurnOutcome, World,
};

fn arena(player_pos: Pos) -> (World, EntityId) {
    let mut world = World::new(Map::new(16, 10));
    let player = world.spawn(content::PLAYER.create(player_pos));
    (world, player)
}

fn start(world: World, player: EntityId) -> Game {
    Game::with_world(world, player, GameConfig::default(), 11).expect("player present")
}

fn pos_of(game: &Game, id: EntityId) -> Pos {
    game.world().entity(id).expect("entity exists").pos
}

#[test]
fn rejected_action_costs_no_time() {
    let (mut world, player) = arena(Pos::new(1, 1));
    let orc = world.spawn(content::ORC.create(Pos::new(6, 1)));
    let mut game = start(world, player);
    let before = pos_of(&game, orc);

    let outcome = game.play_turn(Action::Move { dx: 0, dy: -1 }).expect("no fatal error");

    assert_eq!(outcome, TurnOutcome::Rejected(ActionFailure::Blocked));
    assert_eq!(pos_of(&game, orc), before, "enemies must not act after a rejected action");
    assert_eq!(game.turn(), 0);
    let last = game.log().last().expect("reason logged");
    assert_eq!(last.text, "That way is blocked.");
    assert_eq!(last.fg, color::IMPOSSIBLE);
}

#[test]
fn successful_action_runs_enemy_phase_and_refreshes_sight() {
    let (mut world, player) = arena(Pos::new(1, 1));
    let orc = world.spawn(content::ORC.create(Pos::new(6, 1)));
    let mut game = start(world, player);

    let outcome = game.play_turn(Action::Move { dx: 1, dy: 0 }).expect("no fatal error");

    assert_eq!(outcome, TurnOutcome::Acted);
    assert_eq!(game.turn(), 1);
    assert_eq!(pos_of(&game, orc).chebyshev(Pos::new(2, 1)), 3, "orc closed in");
    assert!(game.world().map.is_visible(Pos::new(2, 1)));
    assert!(game.world().map.is_explored(Pos::new(1, 1)));
}

#[test]
fn trolls_chase_and_eventually_kill_an_idle_player() {
    let (mut world, player) = arena(Pos::new(2, 2));
    world.spawn(content::TROLL.create(Pos::new(8, 6)));
    world.spawn(content::TROLL.create(Pos::new(8, 2)));
    let mut game = start(world, player);

    let mut outcome = TurnOutcome::Acted;
    for _ in 0..200 {
        outcome = game.play_turn(Action::Wait).expect("no fatal error");
        if outcome == TurnOutcome::GameOver {
            break;
        }
    }

    assert_eq!(outcome, TurnOutcome::GameOver);
    assert!(game.is_game_over());
    assert!(game.log().contains("You Died!"));
    assert_eq!(game.play_turn(Action::Wait).expect("still no error"), TurnOutcome::GameOver);
    let corpse = game.world().entity(game.player()).expect("corpse remains");
    assert_eq!(corpse.name, "remains of Player");
}

#[test]
fn killing_an_enemy_leaves_a_walkable_corpse() {
    let (mut world, player) = arena(Pos::new(3, 3));
    let orc = world.spawn(content::ORC.create(Pos::new(4, 3)));
    let mut game = start(world, player);

    game.play_turn(Action::Bump { dx: 1, dy: 0 }).expect("attack");
    game.play_turn(Action::Bump { dx: 1, dy: 0 }).expect("attack");
    assert!(!game.world().is_alive(orc));
    assert!(game.log().contains("Orc is dead!"));

    game.play_turn(Action::Bump { dx: 1, dy: 0 }).expect("step onto corpse");
    assert_eq!(pos_of(&game, game.player()), Pos::new(4, 3));

    let order: Vec<EntityId> = game.world().render_list().into_iter().map(|(id, _)| id).collect();
    assert_eq!(order, vec![orc, game.player()], "corpse is drawn beneath the player");
}

#[test]
fn pickup_then_use_scroll_through_turn_driver() {
    let (mut world, player) = arena(Pos::new(2, 2));
    let scroll = world.spawn(content::CONFUSION_SCROLL.create(Pos::new(2, 2)));
    let troll = world.spawn(content::TROLL.create(Pos::new(5, 5)));
    let mut game = start(world, player);

    assert_eq!(game.play_turn(Action::Pickup).expect("pickup"), TurnOutcome::Acted);
    assert_eq!(game.begin_targeting(scroll).expect("item"), Targeting::Single);
    assert!(game.log().contains("Select a target location."));

    let target = Some(pos_of(&game, troll));
    let outcome = game.play_turn(Action::UseItem { item: scroll, target }).expect("cast");

    assert_eq!(outcome, TurnOutcome::Acted);
    assert!(!game.world().contains(scroll));
    assert!(game.log().contains("look vacant"));
}

#[test]
fn healing_potion_needs_no_target() {
    let (mut world, player) = arena(Pos::new(2, 2));
    let potion = world
        .spawn_into_inventory(player, content::HEALTH_POTION.create(Pos::new(0, 0)))
        .expect("room in inventory");
    let mut game = start(world, player);
    let messages = game.log().len();

    assert_eq!(game.begin_targeting(potion).expect("item"), Targeting::None);
    assert_eq!(game.log().len(), messages);

    let outcome = game.play_turn(Action::UseItem { item: potion, target: None }).expect("no error");
    assert_eq!(outcome, TurnOutcome::Rejected(ActionFailure::AlreadyFull));
    assert!(game.log().contains("Your health is already full."));
}

#[test]
fn names_at_reports_visible_stack() {
    let (mut world, player) = arena(Pos::new(2, 2));
    world.spawn(content::HEALTH_POTION.create(Pos::new(4, 4)));
    world.spawn(content::FIREBALL_SCROLL.create(Pos::new(4, 4)));
    let game = start(world, player);

    assert_eq!(game.world().names_at(Pos::new(4, 4)), "Health Potion, Fireball Scroll");
    assert_eq!(game.world().names_at(Pos::new(14, 8)), "");
}
