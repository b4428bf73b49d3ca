/// Two slots with alternating roles, selected by a parity bit.
///
/// The "current" slot is read (render source, feedback input) and the
/// "next" slot is written (feedback target). [`PingPong::swap`] inverts
/// the roles.
#[derive(Debug)]
pub struct PingPong<T> {
    slots: [T; 2],
    current: usize,
}

impl<T> PingPong<T> {
    pub fn new(current: T, next: T) -> Self {
        Self {
            slots: [current, next],
            current: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn next_index(&self) -> usize {
        self.current ^ 1
    }

    pub fn current(&self) -> &T {
        &self.slots[self.current]
    }

    pub fn next(&self) -> &T {
        &self.slots[self.current ^ 1]
    }

    /// Borrow `(current, next)` at once.
    pub fn split_mut(&mut self) -> (&mut T, &mut T) {
        let [a, b] = &mut self.slots;
        if self.current == 0 {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn swap(&mut self) {
        self.current ^= 1;
    }
}
