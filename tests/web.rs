#![cfg(target_arch = "wasm32")]

use pixel_bird::draw::{self, Palette, Viewport};
use pixel_bird::{Game, GameConfig, InputEvent, Key, LaunchOptions, Scene};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn launch_options_from_a_page_query() {
    let options = LaunchOptions::from_query("?seed=7&mute=1");
    assert_eq!(options.seed, Some(7));
    assert!(options.muted);
    assert!(!options.uncapped);
    assert_eq!(options.background, None);
}

#[wasm_bindgen_test]
fn game_steps_from_menu_into_play() {
    let mut game = Game::new(GameConfig::default(), Some(7));
    for _ in 0..60 {
        game.step(&[]);
    }
    game.step(&[InputEvent::KeyPress(Key::Space)]);
    assert_eq!(game.scene(), Scene::Game);
    assert!(!game.take_audio().is_empty());
}

#[wasm_bindgen_test]
fn menu_draws_inside_the_canvas() {
    let game = Game::new(GameConfig::default(), None);
    let viewport = Viewport::fit(800, 600, 320.0, 240.0);
    let quads = draw::quads(game.world(), &Palette::default());
    assert!(!quads.is_empty());
    for quad in quads.iter().map(|q| viewport.quad(q)) {
        assert!(quad.pos[0] >= -1e-3 && quad.pos[0] + quad.size[0] <= 800.0 + 1e-3);
    }
    assert!(draw::labels(game.world())
        .iter()
        .any(|label| label.text == "Pixel Bird"));
}
