use std::time::Instant;

/// Phase of a raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer touched down.
    Down,
    /// Pointer moved while down.
    Move,
    /// Pointer lifted.
    Up,
    /// The platform took the gesture away (parent intercept, system UI).
    Cancel,
}

/// One raw pointer sample as delivered by the UI toolkit.
///
/// Coordinates grow rightward and downward, so slide-to-cancel is negative
/// `x` travel and slide-to-lock is negative `y` travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Platform pointer id.
    pub pointer_id: u32,
    /// Number of pointers down when the sample was taken.
    pub pointer_count: u8,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Sample phase.
    pub phase: PointerPhase,
    /// Monotonic timestamp of the sample.
    pub timestamp: Instant,
}

impl PointerSample {
    /// Single-pointer sample for pointer id 0.
    pub fn new(phase: PointerPhase, x: f32, y: f32, timestamp: Instant) -> Self {
        Self {
            pointer_id: 0,
            pointer_count: 1,
            x,
            y,
            phase,
            timestamp,
        }
    }

    /// Same sample attributed to another pointer / pointer count.
    pub fn with_pointers(mut self, pointer_id: u32, pointer_count: u8) -> Self {
        self.pointer_id = pointer_id;
        self.pointer_count = pointer_count;
        self
    }
}
