//! Turns the world into flat coloured quads and text labels, back to front.

use crate::assets::SpriteKind;
use crate::engine::{Anchor, Entity, Rect, Sprite, Visual, World};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: [f32; 2],
    pub size: f32,
    pub centered: bool,
}

#[derive(Clone, Debug)]
pub struct Palette {
    pub sky: [f32; 4],
    pub hills: [f32; 4],
    pub pillar: [f32; 4],
    pub pillar_cap: [f32; 4],
    pub ground: [f32; 4],
    pub ground_edge: [f32; 4],
    pub bird_body: [f32; 4],
    pub bird_wing: [f32; 4],
    pub bird_beak: [f32; 4],
    pub bird_eye: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky: srgb(0x29, 0xad, 0xff),
            hills: srgb(0x1d, 0x8f, 0x5a),
            pillar: srgb(0x2e, 0xc4, 0x41),
            pillar_cap: srgb(0x1c, 0x8a, 0x2b),
            ground: srgb(0xde, 0xd8, 0x95),
            ground_edge: srgb(0x73, 0xbf, 0x2e),
            bird_body: srgb(0xff, 0xd0, 0x2a),
            bird_wing: srgb(0xf5, 0xf5, 0xf5),
            bird_beak: srgb(0xf2, 0x6b, 0x1d),
            bird_eye: srgb(0x1a, 0x1a, 0x1a),
        }
    }
}

impl Palette {
    /// Replaces the sky colour, which fills the whole background sprite.
    pub fn with_sky(mut self, rgb: [f32; 3]) -> Self {
        self.sky = [rgb[0], rgb[1], rgb[2], 1.0];
        self
    }
}

fn srgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Letterboxed mapping from world units to screen pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: [f32; 2],
}

impl Viewport {
    pub fn fit(screen_w: u32, screen_h: u32, world_w: f32, world_h: f32) -> Self {
        let scale_x = screen_w as f32 / world_w;
        let scale_y = screen_h as f32 / world_h;
        let scale = scale_x.min(scale_y);
        let offset_x = (screen_w as f32 - world_w * scale) * 0.5;
        let offset_y = (screen_h as f32 - world_h * scale) * 0.5;
        Self {
            scale,
            offset: [offset_x, offset_y],
        }
    }

    pub fn point(&self, pos: [f32; 2]) -> [f32; 2] {
        [
            pos[0] * self.scale + self.offset[0],
            pos[1] * self.scale + self.offset[1],
        ]
    }

    pub fn quad(&self, quad: &Quad) -> Quad {
        Quad {
            pos: self.point(quad.pos),
            size: [quad.size[0] * self.scale, quad.size[1] * self.scale],
            color: quad.color,
        }
    }
}

fn ordered(world: &World) -> Vec<&Entity> {
    let mut entities: Vec<&Entity> = world.iter().collect();
    // stable: insertion order within a layer
    entities.sort_by_key(|e| e.layer);
    entities
}

pub fn quads(world: &World, palette: &Palette) -> Vec<Quad> {
    let mut out = Vec::with_capacity(world.len() * 3);
    for entity in ordered(world) {
        let rect = entity.rect();
        match &entity.visual {
            Visual::Hidden | Visual::Text { .. } => {}
            Visual::Rect { color } => out.push(quad(rect.min, rect.size, *color)),
            Visual::Sprite(sprite) => sprite_quads(&mut out, rect, sprite, palette),
        }
    }
    out
}

pub fn labels(world: &World) -> Vec<Label> {
    ordered(world)
        .into_iter()
        .filter_map(|e| match &e.visual {
            Visual::Text { content, size } => Some(Label {
                text: content.clone(),
                pos: e.pos,
                size: *size,
                centered: e.anchor == Anchor::Center,
            }),
            _ => None,
        })
        .collect()
}

fn quad(pos: [f32; 2], size: [f32; 2], color: [f32; 4]) -> Quad {
    Quad { pos, size, color }
}

fn sprite_quads(out: &mut Vec<Quad>, rect: Rect, sprite: &Sprite, palette: &Palette) {
    let [x, y] = rect.min;
    let [w, h] = rect.size;
    match sprite.kind {
        SpriteKind::Background => {
            out.push(quad([x, y], [w, h], palette.sky));
            out.push(quad([x, y + h * 0.7], [w, h * 0.3], palette.hills));
        }
        SpriteKind::Floor => {
            out.push(quad([x, y], [w, h], palette.ground));
            out.push(quad([x, y], [w, 4.0_f32.min(h)], palette.ground_edge));
        }
        SpriteKind::Pillar => {
            out.push(quad([x + 3.0, y], [w - 6.0, h], palette.pillar));
            let cap = 12.0_f32.min(h);
            let cap_y = if sprite.flip_y { y + h - cap } else { y };
            out.push(quad([x, cap_y], [w, cap], palette.pillar_cap));
        }
        SpriteKind::Bird => {
            out.push(quad([x, y], [w, h], palette.bird_body));
            out.push(quad(
                [x + w * 0.75, y + h * 0.4],
                [w * 0.25, h * 0.25],
                palette.bird_beak,
            ));
            out.push(quad(
                [x + w * 0.6, y + h * 0.15],
                [w * 0.1, h * 0.2],
                palette.bird_eye,
            ));
            // wing: down, level, up
            let wing_y = match sprite.frame {
                0 => y + h * 0.55,
                1 => y + h * 0.35,
                _ => y + h * 0.1,
            };
            out.push(quad([x + w * 0.1, wing_y], [w * 0.35, h * 0.3], palette.bird_wing));
        }
    }
}
