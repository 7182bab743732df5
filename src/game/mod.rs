//! Game rules: the scene state machine and everything that lives inside the `game` scene.

pub mod bird;
pub mod pillars;
pub mod scene;
pub mod scenery;
pub mod score;

use log::{debug, info};
use rand::{rngs::SmallRng, SeedableRng};

pub use bird::Bird;
pub use pillars::PillarSpawner;
pub use scene::{Scene, SceneController};
pub use score::{DifficultyRamp, ScoreTracker};

use crate::assets::MUSIC_PATH;
use crate::config::{GameConfig, FIXED_STEP};
use crate::engine::{physics, ContactTracker, InputEvent, Scheduler, Tag, World};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TimerAction {
    ArmInput,
    Flap,
    SpawnPillars,
    Go(Scene),
}

/// Sound requests for the host to carry out.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioCommand {
    PlayMusic {
        path: &'static str,
        volume: f32,
        looped: bool,
    },
    StopMusic,
}

/// State that only exists while the `game` scene is active.
#[derive(Debug)]
struct Round {
    bird: Bird,
    score: ScoreTracker,
    spawner: PillarSpawner,
    ramp: DifficultyRamp,
}

/// The whole game context. The host calls [`Game::step`] once per fixed tick and reads the world
/// back for drawing.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    scenes: SceneController,
    world: World,
    timers: Scheduler<TimerAction>,
    contacts: ContactTracker,
    round: Option<Round>,
    rng: SmallRng,
    audio: Vec<AudioCommand>,
}

impl Game {
    /// Starts on the menu. A seed makes pillar placement reproducible.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut game = Self {
            config,
            scenes: SceneController::new(),
            world: World::new(),
            timers: Scheduler::new(),
            contacts: ContactTracker::new(),
            round: None,
            rng,
            audio: Vec::new(),
        };
        game.go(Scene::Menu);
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene(&self) -> Scene {
        self.scenes.current()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Ticks simulated since start.
    pub fn ticks(&self) -> u64 {
        self.timers.now()
    }

    pub fn bird(&self) -> Option<&Bird> {
        self.round.as_ref().map(|round| &round.bird)
    }

    pub fn score(&self) -> Option<u32> {
        self.round.as_ref().map(|round| round.score.count())
    }

    pub fn take_audio(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.audio)
    }

    /// Tears down the active scene and builds `scene` from scratch.
    pub fn go(&mut self, scene: Scene) {
        let previous = self.scenes.enter(scene);
        info!("scene {previous} -> {scene}");

        self.world.clear();
        self.timers.clear();
        self.contacts.clear();
        self.round = None;

        scenery::build(&mut self.world, &self.config);
        match scene {
            Scene::Menu => {
                scenery::title_card(&mut self.world, &self.config, "Pixel Bird", 34.0);
                self.timers.wait(self.config.menu_arm_delay, TimerAction::ArmInput);
            }
            Scene::GameOver => {
                scenery::title_card(&mut self.world, &self.config, "Game Over", 32.0);
            }
            Scene::Game => self.start_round(),
        }
    }

    fn start_round(&mut self) {
        self.audio.push(AudioCommand::PlayMusic {
            path: MUSIC_PATH,
            volume: self.config.music_volume,
            looped: true,
        });

        let bird = Bird::spawn(&mut self.world, &self.config);
        let score = ScoreTracker::spawn(&mut self.world);
        self.timers
            .every(self.config.bird.flap_interval, TimerAction::Flap);
        self.timers
            .every(self.config.pillars.spawn_interval, TimerAction::SpawnPillars);

        self.round = Some(Round {
            bird,
            score,
            spawner: PillarSpawner::new(&self.config),
            ramp: DifficultyRamp::new(self.config.pillars.speed_increment),
        });
    }

    /// Advances one fixed tick: timers, input, updates, physics, then collisions.
    pub fn step(&mut self, input: &[InputEvent]) {
        let entries = self.scenes.entries();
        for action in self.timers.advance() {
            if self.scenes.entries() != entries {
                break;
            }
            self.run_timer(action);
        }

        self.handle_input(input);
        self.update(FIXED_STEP);
        physics::step_bodies(&mut self.world, self.config.gravity, FIXED_STEP);
        self.resolve_contacts();
    }

    fn run_timer(&mut self, action: TimerAction) {
        match action {
            TimerAction::ArmInput => self.scenes.arm(),
            TimerAction::Flap => {
                if let Some(round) = &self.round {
                    round.bird.flap(&mut self.world);
                }
            }
            TimerAction::SpawnPillars => {
                if let Some(round) = &self.round {
                    if round.bird.is_alive() {
                        round.spawner.spawn(&mut self.world, &mut self.rng);
                    }
                }
            }
            TimerAction::Go(scene) => self.go(scene),
        }
    }

    fn handle_input(&mut self, input: &[InputEvent]) {
        for &event in input {
            if let Some(next) = self.scenes.transition_for(event) {
                self.go(next);
                return;
            }
            if let Some(round) = self.round.as_mut() {
                round.bird.jump(&mut self.world);
            }
        }
    }

    fn update(&mut self, dt: f32) {
        if let Some(round) = &self.round {
            round
                .bird
                .update(&mut self.world, self.config.screen_height, dt);
            if round.bird.is_alive() {
                round.spawner.advance(&mut self.world, dt);
            }
            round.score.refresh(&mut self.world);
        }
        self.world.animate(dt);
    }

    fn resolve_contacts(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };

        let mut died = false;
        for contact in self.contacts.update(&self.world, round.bird.entity()) {
            if contact.is(Tag::Surface) {
                died |= round.bird.die(&mut self.world);
            } else if contact.is(Tag::ScoreZone) && round.bird.is_alive() {
                let count = round.score.increment();
                let bumped = round.ramp.apply(&mut self.world);
                debug!("score {count}, sped up {bumped} obstacles");
            }
        }

        if died {
            info!("bird died with score {}", round.score.count());
            self.audio.push(AudioCommand::StopMusic);
            self.timers.wait(
                self.config.game_over_delay,
                TimerAction::Go(Scene::GameOver),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Key;

    const SPACE: InputEvent = InputEvent::KeyPress(Key::Space);

    fn run(game: &mut Game, ticks: u32) {
        for _ in 0..ticks {
            game.step(&[]);
        }
    }

    /// Pins the bird mid-screen so it survives while pillars pass.
    fn hover(game: &mut Game, ticks: u32) {
        let bird = game.bird().unwrap().entity();
        for _ in 0..ticks {
            if let Some(entity) = game.world_mut().get_mut(bird) {
                entity.pos[1] = 120.0;
            }
            game.step(&[]);
        }
    }

    fn started() -> Game {
        let mut game = Game::new(GameConfig::default(), Some(1));
        run(&mut game, 60);
        game.step(&[SPACE]);
        assert_eq!(game.scene(), Scene::Game);
        game
    }

    #[test]
    fn starts_on_the_menu_with_scenery() {
        let game = Game::new(GameConfig::default(), Some(1));
        assert_eq!(game.scene(), Scene::Menu);
        assert_eq!(game.world().count(Tag::Floor), 1);
        assert!(game.bird().is_none());
        assert_eq!(game.score(), None);
    }

    #[test]
    fn entering_the_game_plays_music_and_spawns_the_bird() {
        let mut game = started();
        assert_eq!(game.world().count(Tag::Bird), 1);
        assert_eq!(game.score(), Some(0));
        assert_eq!(
            game.take_audio(),
            vec![AudioCommand::PlayMusic {
                path: MUSIC_PATH,
                volume: 0.6,
                looped: true,
            }]
        );
        assert!(game.take_audio().is_empty());
    }

    #[test]
    fn scene_exit_tears_down_entities_and_timers() {
        let mut game = started();
        hover(&mut game, 320);
        assert_eq!(game.world().count(Tag::Pillar), 2);

        game.go(Scene::GameOver);
        assert_eq!(game.world().count(Tag::Pillar), 0);
        assert_eq!(game.world().count(Tag::Bird), 0);
        assert_eq!(game.timers.pending(), 0);
        assert!(game.bird().is_none());
    }

    #[test]
    fn death_stops_music_once() {
        let mut game = started();
        game.take_audio();
        while game.bird().is_some_and(|b| b.is_alive()) {
            game.step(&[]);
        }
        assert_eq!(game.take_audio(), vec![AudioCommand::StopMusic]);
        run(&mut game, 60);
        assert!(game.take_audio().is_empty());
    }

    #[test]
    fn pillars_freeze_while_the_bird_is_dead() {
        let mut game = started();
        hover(&mut game, 320);
        assert_eq!(game.world().count(Tag::Pillar), 2);

        game.round.as_mut().unwrap().bird.die(&mut game.world);
        let before: Vec<f32> = game.world().with_tag(Tag::Pillar).map(|e| e.pos[0]).collect();
        run(&mut game, 10);
        let after: Vec<f32> = game.world().with_tag(Tag::Pillar).map(|e| e.pos[0]).collect();
        assert_eq!(before, after);
    }
}
