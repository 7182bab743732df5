use crate::engine::{Entity, EntityId, Layer, Tag, Visual, World};

pub fn score_text(count: u32) -> String {
    format!("Score: {count}")
}

/// Passage counter and its on-screen label.
#[derive(Debug)]
pub struct ScoreTracker {
    count: u32,
    label: EntityId,
}

impl ScoreTracker {
    pub fn spawn(world: &mut World) -> Self {
        let label = world.add(
            Entity::new([0.0, 12.0])
                .with_tag(Tag::Score)
                .at([10.0, 10.0])
                .on_layer(Layer::Ui)
                .with_visual(Visual::Text {
                    content: score_text(0),
                    size: 12.0,
                }),
        );
        Self { count: 0, label }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn increment(&mut self) -> u32 {
        self.count += 1;
        self.count
    }

    /// Rewrites the label from the counter; called every tick.
    pub fn refresh(&self, world: &mut World) {
        if let Some(Visual::Text { content, .. }) = world.get_mut(self.label).map(|e| &mut e.visual)
        {
            *content = score_text(self.count);
        }
    }
}

/// Speeds up everything already on screen each time the player scores.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyRamp {
    increment: f32,
}

impl DifficultyRamp {
    pub fn new(increment: f32) -> Self {
        Self { increment }
    }

    /// Bumps every live pillar and score zone by the same amount. Returns how many were bumped.
    pub fn apply(&self, world: &mut World) -> usize {
        let mut bumped = 0;
        for entity in world.iter_mut() {
            if !(entity.is(Tag::Pillar) || entity.is(Tag::ScoreZone)) {
                continue;
            }
            if let Some(speed) = entity.speed.as_mut() {
                *speed += self.increment;
                bumped += 1;
            }
        }
        bumped
    }
}
