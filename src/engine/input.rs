#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Space,
    Up,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.code` to a game key.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Key::Space),
            "ArrowUp" => Some(Key::Up),
            _ => None,
        }
    }
}

/// A discrete press. Held keys produce a single event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyPress(Key),
    Click,
}

impl InputEvent {
    /// Maps a DOM `keydown`. Auto-repeat from a held key yields nothing.
    pub fn from_keydown(code: &str, repeat: bool) -> Option<Self> {
        let key = Key::from_code(code)?;
        (!repeat).then_some(InputEvent::KeyPress(key))
    }
}

/// Events collected between frames, handed to the next fixed step.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn take(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}
