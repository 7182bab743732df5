use crate::assets::{SpriteKind, FLAPPING};
use crate::config::{BirdConfig, GameConfig};
use crate::engine::{Anchor, Body, Entity, EntityId, Layer, Sprite, Tag, Visual, World};

/// The player's bird. The entity stays in the world after death, so every action checks the
/// alive flag instead of relying on removal.
#[derive(Debug)]
pub struct Bird {
    entity: EntityId,
    alive: bool,
    jumps: u32,
    bounce_speed: f32,
    fall_speed: f32,
    death_frame: usize,
}

impl Bird {
    pub fn spawn(world: &mut World, config: &GameConfig) -> Self {
        let BirdConfig {
            width,
            height,
            weight,
            max_velocity,
            jump_force,
            bounce_speed,
            fall_speed,
            death_frame,
            ..
        } = config.bird;

        let entity = world.add(
            Entity::new([width, height])
                .with_tag(Tag::Bird)
                .at([config.screen_width / 2.0, config.screen_height / 3.0])
                .anchored(Anchor::Center)
                .on_layer(Layer::Foreground)
                .with_visual(Visual::Sprite(Sprite::new(SpriteKind::Bird)))
                .with_area()
                .with_body(Body::new(weight, max_velocity, jump_force)),
        );

        Self {
            entity,
            alive: true,
            jumps: 0,
            bounce_speed,
            fall_speed,
            death_frame,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Jumps applied this life.
    pub fn jumps(&self) -> u32 {
        self.jumps
    }

    /// Applies the jump impulse. Returns false when dead.
    pub fn jump(&mut self, world: &mut World) -> bool {
        if !self.alive {
            return false;
        }
        match world.get_mut(self.entity).and_then(|e| e.body.as_mut()) {
            Some(body) => {
                body.jump();
                self.jumps += 1;
                true
            }
            None => false,
        }
    }

    /// Per-tick clamp and the backward tumble after death.
    pub fn update(&self, world: &mut World, screen_height: f32, dt: f32) {
        let Some(entity) = world.get_mut(self.entity) else {
            return;
        };
        entity.pos[1] = entity.pos[1].clamp(0.0, screen_height);

        let grounded = entity.body.as_ref().is_some_and(|b| b.is_grounded());
        if !self.alive && !grounded {
            entity.pos[0] -= self.bounce_speed * dt;
            entity.pos[1] += self.fall_speed * dt;
        }
    }

    /// Restarts the wing-flap cycle while alive.
    pub fn flap(&self, world: &mut World) {
        if !self.alive {
            return;
        }
        if let Some(sprite) = world.get_mut(self.entity).and_then(|e| e.sprite_mut()) {
            sprite.play(FLAPPING);
        }
    }

    /// Marks the bird dead and freezes its sprite. Returns true only for the first call.
    pub fn die(&mut self, world: &mut World) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        if let Some(sprite) = world.get_mut(self.entity).and_then(|e| e.sprite_mut()) {
            sprite.freeze(self.death_frame);
        }
        true
    }
}
