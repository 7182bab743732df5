//! Asset paths and sprite sheet layout.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    Floor,
    Pillar,
    Bird,
}

impl SpriteKind {
    /// Number of horizontal slices in the sheet.
    pub fn frames(self) -> usize {
        match self {
            SpriteKind::Bird => 3,
            _ => 1,
        }
    }
}

/// Inclusive frame range played at `fps`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimRange {
    pub from: usize,
    pub to: usize,
    pub fps: f32,
}

pub const FLAPPING: AnimRange = AnimRange {
    from: 0,
    to: 2,
    fps: 10.0,
};

pub const MUSIC_PATH: &str = "assets/music.wav";
