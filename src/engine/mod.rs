//! The small host engine the game rules run on: entities, collision, gravity bodies, timers and
//! input events.

pub mod collision;
pub mod input;
pub mod physics;
pub mod timer;
pub mod world;

pub use collision::{Contact, ContactTracker, Rect};
pub use input::{InputEvent, InputQueue, Key};
pub use physics::Body;
pub use timer::Scheduler;
pub use world::{Anchor, Entity, EntityId, Layer, Sprite, Tag, Visual, World};
