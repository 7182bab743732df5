//! Flat entity list. Entities are plain records composed of optional capabilities (area, solid,
//! body, scroll speed, visual) and queried by tag.

use super::collision::Rect;
use super::physics::Body;
use crate::assets::{AnimRange, SpriteKind};

pub type EntityId = u64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Bird,
    Floor,
    Surface,
    Pillar,
    ScoreZone,
    Score,
}

/// Draw layers, back to front.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Midground,
    #[default]
    Foreground,
    Ui,
}

/// Which point of the entity `pos` refers to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    TopLeft,
    BottomLeft,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
struct Playback {
    range: AnimRange,
    elapsed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub frame: usize,
    pub flip_y: bool,
    playback: Option<Playback>,
}

impl Sprite {
    pub fn new(kind: SpriteKind) -> Self {
        Self {
            kind,
            frame: 0,
            flip_y: false,
            playback: None,
        }
    }

    pub fn flipped(mut self) -> Self {
        self.flip_y = true;
        self
    }

    /// Restarts `range` from its first frame.
    pub fn play(&mut self, range: AnimRange) {
        self.frame = range.from;
        self.playback = Some(Playback {
            range,
            elapsed: 0.0,
        });
    }

    /// Stops any animation and pins the sprite to `frame`, clamped to the sheet.
    pub fn freeze(&mut self, frame: usize) {
        self.playback = None;
        self.frame = frame.min(self.kind.frames() - 1);
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    fn advance(&mut self, dt: f32) {
        let Some(playback) = self.playback.as_mut() else {
            return;
        };
        playback.elapsed += dt;
        let step = (playback.elapsed * playback.range.fps) as usize;
        let frame = playback.range.from + step;
        if frame >= playback.range.to {
            self.frame = playback.range.to;
            self.playback = None;
        } else {
            self.frame = frame;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Visual {
    Hidden,
    Rect { color: [f32; 4] },
    Sprite(Sprite),
    Text { content: String, size: f32 },
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub tags: Vec<Tag>,
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub anchor: Anchor,
    pub layer: Layer,
    pub visual: Visual,
    pub area: bool,
    pub solid: bool,
    pub body: Option<Body>,
    /// Leftward scroll speed, units per second.
    pub speed: Option<f32>,
}

impl Entity {
    pub fn new(size: [f32; 2]) -> Self {
        Self {
            id: 0,
            tags: Vec::new(),
            pos: [0.0, 0.0],
            size,
            anchor: Anchor::default(),
            layer: Layer::default(),
            visual: Visual::Hidden,
            area: false,
            solid: false,
            body: None,
            speed: None,
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn at(mut self, pos: [f32; 2]) -> Self {
        self.pos = pos;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_area(mut self) -> Self {
        self.area = true;
        self
    }

    pub fn solid(mut self) -> Self {
        self.solid = true;
        self.area = true;
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn is(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn rect(&self) -> Rect {
        let [x, y] = self.pos;
        let [w, h] = self.size;
        let min = match self.anchor {
            Anchor::TopLeft => [x, y],
            Anchor::BottomLeft => [x, y - h],
            Anchor::Center => [x - w * 0.5, y - h * 0.5],
        };
        Rect::new(min, self.size)
    }

    pub fn sprite_mut(&mut self) -> Option<&mut Sprite> {
        match &mut self.visual {
            Visual::Sprite(sprite) => Some(sprite),
            _ => None,
        }
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        match &self.visual {
            Visual::Sprite(sprite) => Some(sprite),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    next_id: EntityId,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        self.next_id += 1;
        entity.id = self.next_id;
        self.entities.push(entity);
        self.next_id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Destroys every entity matching `predicate`, returning how many went.
    pub fn destroy_where(&mut self, mut predicate: impl FnMut(&Entity) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !predicate(e));
        before - self.entities.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn with_tag(&self, tag: Tag) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.is(tag))
    }

    pub fn with_tag_mut(&mut self, tag: Tag) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut().filter(move |e| e.is(tag))
    }

    pub fn count(&self, tag: Tag) -> usize {
        self.with_tag(tag).count()
    }

    /// Advances every playing sprite animation.
    pub fn animate(&mut self, dt: f32) {
        for entity in &mut self.entities {
            if let Some(sprite) = entity.sprite_mut() {
                sprite.advance(dt);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
