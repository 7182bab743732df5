use std::fmt;

use crate::engine::{InputEvent, Key};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scene {
    #[default]
    Menu,
    Game,
    GameOver,
}

impl Scene {
    pub fn name(self) -> &'static str {
        match self {
            Scene::Menu => "menu",
            Scene::Game => "game",
            Scene::GameOver => "game-over",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scene state machine. Only input-driven transitions are decided here; the death transition is
/// a delayed timer owned by the game scene.
#[derive(Debug, Default)]
pub struct SceneController {
    current: Scene,
    input_armed: bool,
    entries: u32,
}

impl SceneController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Scene {
        self.current
    }

    /// Number of scene activations so far, the initial menu included.
    pub fn entries(&self) -> u32 {
        self.entries
    }

    /// Makes the menu accept the start key.
    pub fn arm(&mut self) {
        self.input_armed = true;
    }

    pub fn is_armed(&self) -> bool {
        match self.current {
            Scene::Menu => self.input_armed,
            Scene::GameOver => true,
            Scene::Game => false,
        }
    }

    /// Switches to `scene` and returns the one it replaced.
    pub fn enter(&mut self, scene: Scene) -> Scene {
        let previous = self.current;
        self.current = scene;
        self.input_armed = false;
        self.entries += 1;
        previous
    }

    /// The scene an input event leads to, if any.
    pub fn transition_for(&self, event: InputEvent) -> Option<Scene> {
        match (self.current, event) {
            (Scene::Menu | Scene::GameOver, InputEvent::KeyPress(Key::Space)) if self.is_armed() => {
                Some(Scene::Game)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACE: InputEvent = InputEvent::KeyPress(Key::Space);

    #[test]
    fn menu_ignores_space_until_armed() {
        let mut scenes = SceneController::new();
        scenes.enter(Scene::Menu);
        assert_eq!(scenes.transition_for(SPACE), None);
        scenes.arm();
        assert_eq!(scenes.transition_for(SPACE), Some(Scene::Game));
    }

    #[test]
    fn game_over_accepts_space_immediately() {
        let mut scenes = SceneController::new();
        scenes.enter(Scene::GameOver);
        assert_eq!(scenes.transition_for(SPACE), Some(Scene::Game));
        assert_eq!(scenes.transition_for(InputEvent::Click), None);
        assert_eq!(scenes.transition_for(InputEvent::KeyPress(Key::Up)), None);
    }

    #[test]
    fn game_has_no_input_transitions() {
        let mut scenes = SceneController::new();
        scenes.enter(Scene::Game);
        scenes.arm();
        assert_eq!(scenes.transition_for(SPACE), None);
    }

    #[test]
    fn entering_disarms_and_counts() {
        let mut scenes = SceneController::new();
        scenes.enter(Scene::Menu);
        scenes.arm();
        assert_eq!(scenes.enter(Scene::Game), Scene::Menu);
        assert_eq!(scenes.enter(Scene::Menu), Scene::Game);
        assert!(!scenes.is_armed());
        assert_eq!(scenes.entries(), 3);
        assert_eq!(Scene::GameOver.to_string(), "game-over");
    }
}
