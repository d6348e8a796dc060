use crate::input::{Key, MouseBtn};

/// Platform-neutral input event, produced by an `EventSource` and consumed
/// by the frame loop in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the window.
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseDown { button: MouseBtn, x: i32, y: i32 },
    MouseUp { button: MouseBtn, x: i32, y: i32 },
    MouseMotion { x: i32, y: i32 },
    Resized { width: u32, height: u32 },
}
