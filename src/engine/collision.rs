use std::collections::HashSet;

use super::world::{EntityId, Tag, World};

/// Tolerance under which two edges count as touching.
const CONTACT_EPSILON: f32 = 1e-3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min: [f32; 2],
    pub size: [f32; 2],
}

impl Rect {
    pub fn new(min: [f32; 2], size: [f32; 2]) -> Self {
        Self { min, size }
    }

    pub fn min_x(&self) -> f32 {
        self.min[0]
    }
    pub fn max_x(&self) -> f32 {
        self.min[0] + self.size[0]
    }
    pub fn min_y(&self) -> f32 {
        self.min[1]
    }
    pub fn max_y(&self) -> f32 {
        self.min[1] + self.size[1]
    }

    /// Overlap test that also accepts touching edges, so zero-width trigger regions and bodies
    /// resting on a solid still register.
    pub fn touches(&self, other: &Rect) -> bool {
        self.min_x() <= other.max_x() + CONTACT_EPSILON
            && other.min_x() <= self.max_x() + CONTACT_EPSILON
            && self.min_y() <= other.max_y() + CONTACT_EPSILON
            && other.min_y() <= self.max_y() + CONTACT_EPSILON
    }

    /// Strict overlap with positive penetration on both axes.
    pub fn penetrates(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x() - CONTACT_EPSILON
            && other.min_x() < self.max_x() - CONTACT_EPSILON
            && self.min_y() < other.max_y() - CONTACT_EPSILON
            && other.min_y() < self.max_y() - CONTACT_EPSILON
    }
}

/// A contact that began this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact {
    pub other: EntityId,
    pub tags: Vec<Tag>,
}

impl Contact {
    pub fn is(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Tracks which entities a subject is touching so handlers fire once per contact, not once per
/// tick.
#[derive(Debug, Default)]
pub struct ContactTracker {
    touching: HashSet<EntityId>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the contacts of `subject` that did not exist last tick, in world order.
    pub fn update(&mut self, world: &World, subject: EntityId) -> Vec<Contact> {
        let Some(rect) = world.get(subject).filter(|e| e.area).map(|e| e.rect()) else {
            self.touching.clear();
            return Vec::new();
        };

        let mut now = HashSet::new();
        let mut began = Vec::new();
        for other in world.iter() {
            if other.id == subject || !other.area || !rect.touches(&other.rect()) {
                continue;
            }
            now.insert(other.id);
            if !self.touching.contains(&other.id) {
                began.push(Contact {
                    other: other.id,
                    tags: other.tags.clone(),
                });
            }
        }
        self.touching = now;
        began
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}
