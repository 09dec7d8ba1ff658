//! Keyboard mapping from DOM key names to logical frame input

use crate::sim::FrameInput;

/// Apply a key transition to the held-input state. Returns false if the key
/// is not bound, so the caller can skip `preventDefault` for it.
pub fn apply_key(input: &mut FrameInput, key: &str, held: bool) -> bool {
    match key {
        "ArrowLeft" | "a" | "A" => input.left = held,
        "ArrowRight" | "d" | "D" => input.right = held,
        " " | "ArrowUp" | "w" | "W" => input.jump = held,
        _ => return false,
    }
    true
}
