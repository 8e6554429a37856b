use super::keys::{InputSource, Key, KeyState};

/// Input events a front-end can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// The window or tab is closing. Latches `Quit` down.
    CloseRequested,
}

/// A queue of input events.
/// The host pushes events as they arrive; the frame loop folds them into
/// a [`KeyState`] once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
    state: KeyState,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
            state: KeyState::NONE,
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Push a raw browser key code. Unknown codes are ignored.
    pub fn push_key_code(&mut self, key_code: u32, down: bool) {
        if let Some(key) = Key::from_key_code(key_code) {
            self.push(if down {
                InputEvent::KeyDown(key)
            } else {
                InputEvent::KeyUp(key)
            });
        }
    }

    /// Drain pending events into the held key state and return it.
    pub fn fold(&mut self) -> KeyState {
        for event in self.events.drain(..) {
            match event {
                InputEvent::KeyDown(key) => self.state.press(key),
                // A released Escape does not cancel a close request.
                InputEvent::KeyUp(Key::Quit) => {}
                InputEvent::KeyUp(key) => self.state.release(key),
                InputEvent::CloseRequested => self.state.press(Key::Quit),
            }
        }
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for InputQueue {
    fn poll(&mut self) -> KeyState {
        self.fold()
    }
}
