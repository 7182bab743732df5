//! Pixel Bird: steer a bird through gaps between scrolling pillars. Every passage scores a point
//! and speeds up whatever is already on screen.
//!
//! The game rules ([`game`]) run on a small fixed-tick engine ([`engine`]) and are drawn as flat
//! quads ([`draw`]). In the browser the `web` module drives the loop, renders with wgpu and plays
//! the music.

pub mod assets;
pub mod config;
pub mod draw;
pub mod engine;
pub mod game;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::{GameConfig, LaunchOptions, FIXED_STEP, TICK_RATE};
pub use engine::{InputEvent, Key};
pub use game::{AudioCommand, Game, Scene};
