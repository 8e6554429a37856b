/// Logical keys the frame loop understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Left,
    Right,
    /// External close request (window close, Escape).
    Quit,
}

impl Key {
    fn bit(self) -> u8 {
        match self {
            Key::Up => 1 << 0,
            Key::Left => 1 << 1,
            Key::Right => 1 << 2,
            Key::Quit => 1 << 3,
        }
    }

    /// Map a browser `keyCode` to a logical key.
    /// Arrow keys, Escape, and W/A/D are recognised.
    pub fn from_key_code(code: u32) -> Option<Key> {
        match code {
            38 | 87 => Some(Key::Up),
            37 | 65 => Some(Key::Left),
            39 | 68 => Some(Key::Right),
            27 => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Down/up state of every logical key, sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState(u8);

impl KeyState {
    pub const NONE: KeyState = KeyState(0);

    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn is_down(self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Anything that can report the current key state.
pub trait InputSource {
    fn poll(&mut self) -> KeyState;
}

/// A fixed key state, handy for scripted runs and tests.
impl InputSource for KeyState {
    fn poll(&mut self) -> KeyState {
        *self
    }
}
