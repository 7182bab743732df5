use log::debug;
use rand::Rng;

use crate::assets::SpriteKind;
use crate::config::{GameConfig, PillarConfig};
use crate::engine::{Anchor, Entity, Layer, Sprite, Tag, Visual, World};

/// Spawns pillar pairs with their score zones and scrolls them across the screen.
#[derive(Debug, Clone)]
pub struct PillarSpawner {
    config: PillarConfig,
    screen: [f32; 2],
}

impl PillarSpawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.pillars.clone(),
            screen: [config.screen_width, config.screen_height],
        }
    }

    /// Adds one pillar pair and its score zone at the right edge. Returns the vertical offset
    /// that was drawn.
    pub fn spawn<R: Rng>(&self, world: &mut World, rng: &mut R) -> f32 {
        let PillarConfig {
            width,
            gap,
            base_speed,
            max_offset,
            score_zone_lead,
            ..
        } = self.config;
        let [screen_w, screen_h] = self.screen;
        let offset = if max_offset > 0.0 {
            rng.gen_range(-max_offset..max_offset)
        } else {
            0.0
        };
        let centre = screen_h / 2.0 + offset;

        world.add(
            pillar([width, screen_h], Sprite::new(SpriteKind::Pillar), base_speed)
                .at([screen_w, centre + gap / 2.0]),
        );
        world.add(
            pillar([width, screen_h], Sprite::new(SpriteKind::Pillar).flipped(), base_speed)
                .at([screen_w, centre - gap / 2.0])
                .anchored(Anchor::BottomLeft),
        );
        world.add(
            Entity::new([0.0, screen_h])
                .with_tag(Tag::ScoreZone)
                .at([screen_w + score_zone_lead, 0.0])
                .on_layer(Layer::Background)
                .with_area()
                .with_speed(base_speed),
        );

        debug!("spawned pillars with offset {offset:.1}");
        offset
    }

    /// Moves every pillar and score zone left by its own speed, destroying whatever has left the
    /// screen.
    pub fn advance(&self, world: &mut World, dt: f32) -> usize {
        for entity in world.iter_mut() {
            if !scrolls(entity) {
                continue;
            }
            if let Some(speed) = entity.speed {
                entity.pos[0] -= speed * dt;
            }
        }
        world.destroy_where(|e| scrolls(e) && e.rect().max_x() < 0.0)
    }
}

fn scrolls(entity: &Entity) -> bool {
    entity.is(Tag::Pillar) || entity.is(Tag::ScoreZone)
}

fn pillar(size: [f32; 2], sprite: Sprite, speed: f32) -> Entity {
    Entity::new(size)
        .with_tag(Tag::Pillar)
        .with_tag(Tag::Surface)
        .on_layer(Layer::Midground)
        .with_visual(Visual::Sprite(sprite))
        .with_area()
        .with_speed(speed)
}
