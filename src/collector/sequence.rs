//! Fixed-length sliding-window matcher for the secret key sequence.

use std::collections::VecDeque;

use crate::input::Key;

/// Up, Up, Down, Down, Left, Right, Left, Right, b, a.
pub const KONAMI: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::Char('b'),
    Key::Char('a'),
];

/// Remembers the last `target.len()` keys and reports an exact match.
#[derive(Clone, Debug)]
pub struct SequenceWatcher {
    target: Vec<Key>,
    window: VecDeque<Key>,
}

impl SequenceWatcher {
    pub fn new(target: &[Key]) -> Self {
        Self {
            target: target.to_vec(),
            window: VecDeque::with_capacity(target.len()),
        }
    }

    pub fn konami() -> Self {
        Self::new(&KONAMI)
    }

    /// Record a key press. Returns true when the window now equals the target.
    pub fn push(&mut self, key: Key) -> bool {
        self.window.push_back(key);
        while self.window.len() > self.target.len() {
            self.window.pop_front();
        }
        self.window.len() == self.target.len() && self.window.iter().eq(self.target.iter())
    }

    /// The retained keys, oldest first.
    #[cfg(test)]
    pub fn window(&self) -> impl Iterator<Item = &Key> {
        self.window.iter()
    }
}
