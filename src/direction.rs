/// Canonical movement directions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit `(row, col)` offset for one step.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Single-buffered heading input.
///
/// Requests are validated against the *committed* direction and the latest
/// valid one wins until the next tick commits it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionController {
    current: Direction,
    pending: Direction,
}

impl DirectionController {
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self {
            current: initial,
            pending: initial,
        }
    }

    /// Buffers `candidate` unless it reverses the committed direction.
    ///
    /// Returns whether the request was accepted.
    pub fn request(&mut self, candidate: Direction) -> bool {
        if !direction_change_is_valid(self.current, candidate) {
            return false;
        }
        self.pending = candidate;
        true
    }

    /// Promotes the pending direction and returns it.
    pub fn commit(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }

    #[must_use]
    pub fn current(&self) -> Direction {
        self.current
    }

    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }
}
