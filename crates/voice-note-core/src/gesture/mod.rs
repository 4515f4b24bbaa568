mod pointer;
mod tracker;

pub use {
    pointer::{PointerPhase, PointerSample},
    tracker::{GestureFacts, GestureTracker},
};
