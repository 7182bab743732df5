//! Tick-by-tick scenarios covering the scene flow, scoring and difficulty ramp.

use pixel_bird::engine::{Entity, Tag};
use pixel_bird::{Game, GameConfig, InputEvent, Key, Scene};

const SPACE: InputEvent = InputEvent::KeyPress(Key::Space);
const TICK_LIMIT: u32 = 5_000;

fn new_game() -> Game {
    Game::new(GameConfig::default(), Some(42))
}

fn run(game: &mut Game, ticks: u32) {
    for _ in 0..ticks {
        game.step(&[]);
    }
}

fn start(game: &mut Game) {
    run(game, 60);
    game.step(&[SPACE]);
    assert_eq!(game.scene(), Scene::Game);
}

fn bird_entity(game: &Game) -> &Entity {
    let id = game.bird().expect("bird").entity();
    game.world().get(id).expect("bird entity")
}

fn bird_alive(game: &Game) -> bool {
    game.bird().is_some_and(|b| b.is_alive())
}

fn scrolls(entity: &&Entity) -> bool {
    entity.is(Tag::Pillar) || entity.is(Tag::ScoreZone)
}

fn speeds(game: &Game, tag: Tag) -> Vec<f32> {
    game.world().with_tag(tag).filter_map(|e| e.speed).collect()
}

/// Pins the bird mid-screen for one tick so it threads every gap.
fn hover_step(game: &mut Game) {
    let id = game.bird().expect("bird").entity();
    if let Some(entity) = game.world_mut().get_mut(id) {
        entity.pos[1] = 120.0;
    }
    game.step(&[]);
}

fn hover_until(game: &mut Game, mut done: impl FnMut(&Game) -> bool) {
    for _ in 0..TICK_LIMIT {
        if done(game) {
            return;
        }
        let before = game.score();
        hover_step(game);
        assert!(game.score() >= before, "score went down");
        assert!(
            game.world()
                .iter()
                .filter(scrolls)
                .all(|e| e.rect().max_x() >= 0.0),
            "off-screen obstacle survived a tick"
        );
    }
    panic!("condition not reached within {TICK_LIMIT} ticks");
}

#[test]
fn space_before_the_arm_delay_is_ignored() {
    let mut game = new_game();
    run(&mut game, 30);
    game.step(&[SPACE]);
    assert_eq!(game.scene(), Scene::Menu);

    run(&mut game, 27);
    game.step(&[SPACE]);
    assert_eq!(game.ticks(), 59);
    assert_eq!(game.scene(), Scene::Menu);

    game.step(&[SPACE]);
    assert_eq!(game.scene(), Scene::Game);
}

#[test]
fn other_keys_do_not_leave_the_menu() {
    let mut game = new_game();
    run(&mut game, 120);
    game.step(&[InputEvent::Click, InputEvent::KeyPress(Key::Up)]);
    assert_eq!(game.scene(), Scene::Menu);
}

#[test]
fn single_jump_falls_to_the_floor_and_ends_the_game() {
    let mut game = new_game();
    start(&mut game);
    game.step(&[SPACE]);
    assert!(bird_entity(&game).body.as_ref().unwrap().vel_y < 0.0);

    let floor_top = game.config().floor_top();
    let mut death_tick = None;
    for _ in 0..TICK_LIMIT {
        if game.scene() != Scene::Game {
            break;
        }
        game.step(&[]);
        if death_tick.is_none() && game.bird().is_some_and(|b| !b.is_alive()) {
            death_tick = Some(game.ticks());
            assert_eq!(game.world().count(Tag::Pillar), 0);
            assert!((bird_entity(&game).rect().max_y() - floor_top).abs() < 1e-2);
        }
    }

    let death_tick = death_tick.expect("bird never died");
    assert_eq!(game.scene(), Scene::GameOver);
    assert_eq!(game.ticks() - death_tick, 120);
}

#[test]
fn game_over_comes_exactly_one_second_after_death() {
    let mut game = new_game();
    start(&mut game);
    let id = game.bird().unwrap().entity();
    game.world_mut().get_mut(id).unwrap().pos[1] = 205.0;

    for _ in 0..10 {
        if !bird_alive(&game) {
            break;
        }
        game.step(&[]);
    }
    assert!(!bird_alive(&game));
    assert_eq!(game.score(), Some(0));

    for _ in 0..119 {
        game.step(&[]);
        assert_eq!(game.scene(), Scene::Game);
    }
    game.step(&[]);
    assert_eq!(game.scene(), Scene::GameOver);
}

#[test]
fn dead_bird_ignores_jumps() {
    let mut game = new_game();
    start(&mut game);
    let id = game.bird().unwrap().entity();
    game.world_mut().get_mut(id).unwrap().pos[1] = 205.0;
    game.step(&[]);
    assert!(!bird_alive(&game));

    game.step(&[SPACE, InputEvent::Click, InputEvent::KeyPress(Key::Up)]);
    assert!(bird_entity(&game).body.as_ref().unwrap().vel_y >= 0.0);
    assert_eq!(game.bird().map(|b| b.jumps()), Some(0));
    assert_eq!(game.scene(), Scene::Game);
}

#[test]
fn each_press_is_exactly_one_jump() {
    let mut game = new_game();
    start(&mut game);
    let jumps = |game: &Game| game.bird().map_or(0, |b| b.jumps());
    assert_eq!(jumps(&game), 0);

    game.step(&[SPACE]);
    assert_eq!(jumps(&game), 1);
    let vel = bird_entity(&game).body.as_ref().unwrap().vel_y;
    assert!((vel - (-300.0 + 1600.0 / 120.0)).abs() < 1e-3);

    // Nothing pressed: gravity only.
    run(&mut game, 5);
    assert_eq!(jumps(&game), 1);

    game.step(&[SPACE, InputEvent::Click, InputEvent::KeyPress(Key::Up)]);
    assert_eq!(jumps(&game), 4);

    // Auto-repeat from a held key never reaches the game.
    let held: Vec<InputEvent> = (0..10)
        .filter_map(|_| InputEvent::from_keydown("Space", true))
        .collect();
    game.step(&held);
    assert_eq!(jumps(&game), 4);
}

#[test]
fn scoring_speeds_up_everything_on_screen() {
    let mut game = new_game();
    start(&mut game);

    hover_until(&mut game, |g| g.score() == Some(1));
    assert_eq!(speeds(&game, Tag::Pillar), vec![90.5, 90.5]);
    assert_eq!(speeds(&game, Tag::ScoreZone), vec![90.5]);
    assert_eq!(game.world().count(Tag::Score), 1);

    // The next pair spawns fresh at base speed.
    hover_until(&mut game, |g| g.world().count(Tag::Pillar) == 4);
    assert_eq!(speeds(&game, Tag::Pillar), vec![90.5, 90.5, 90.0, 90.0]);
    assert_eq!(speeds(&game, Tag::ScoreZone), vec![90.5, 90.0]);

    hover_until(&mut game, |g| g.score() == Some(2));
    for speed in speeds(&game, Tag::Pillar)
        .into_iter()
        .chain(speeds(&game, Tag::ScoreZone))
    {
        assert!(speed == 90.5 || speed == 91.0, "unexpected speed {speed}");
    }
    assert!(bird_alive(&game));
}

#[test]
fn score_label_tracks_the_counter() {
    let mut game = new_game();
    start(&mut game);
    hover_until(&mut game, |g| g.score() == Some(1));
    hover_step(&mut game);

    let labels = pixel_bird::draw::labels(game.world());
    assert!(labels.iter().any(|l| l.text == "Score: 1"));
}

#[test]
fn a_new_game_resets_score_and_obstacles() {
    let mut game = new_game();
    start(&mut game);
    hover_until(&mut game, |g| g.score() == Some(1));

    let id = game.bird().unwrap().entity();
    game.world_mut().get_mut(id).unwrap().pos[1] = 205.0;
    for _ in 0..TICK_LIMIT {
        if game.scene() == Scene::GameOver {
            break;
        }
        game.step(&[]);
    }
    assert_eq!(game.scene(), Scene::GameOver);
    assert_eq!(game.score(), None);

    game.step(&[SPACE]);
    assert_eq!(game.scene(), Scene::Game);
    assert_eq!(game.score(), Some(0));
    assert!(bird_alive(&game));
    assert_eq!(game.world().count(Tag::Pillar), 0);
    assert_eq!(game.world().count(Tag::ScoreZone), 0);
}

#[test]
fn spawner_skips_while_the_bird_is_dead() {
    let mut game = new_game();
    start(&mut game);
    let id = game.bird().unwrap().entity();
    hover_until(&mut game, |g| g.ticks() >= 340);
    game.world_mut().get_mut(id).unwrap().pos[1] = 205.0;
    game.step(&[]);
    assert!(!bird_alive(&game));

    // The spawn timer fires at tick 361 and must not add anything.
    while game.ticks() < 365 {
        game.step(&[]);
    }
    assert_eq!(game.world().count(Tag::Pillar), 0);
}
