//! Native (winit) key and button codes to engine symbols.
//!
//! Only physical keys are mapped. Vocabulary entries that exist only as
//! shifted characters on common layouts (`exclaim`, `dollar`, `colon`, ...)
//! have no physical code and are never reported by this backend.

use kite_core::{Key, MouseBtn};
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, PhysicalKey};

pub fn map_key(physical_key: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    let key = match code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::NumpadClear => Key::Clear,
        KeyCode::Enter => Key::Return,
        KeyCode::Pause => Key::Pause,
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::Quote => Key::Quote,
        KeyCode::Comma => Key::Comma,
        KeyCode::Minus => Key::Minus,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,
        KeyCode::Digit0 => Key::Num0,
        KeyCode::Digit1 => Key::Num1,
        KeyCode::Digit2 => Key::Num2,
        KeyCode::Digit3 => Key::Num3,
        KeyCode::Digit4 => Key::Num4,
        KeyCode::Digit5 => Key::Num5,
        KeyCode::Digit6 => Key::Num6,
        KeyCode::Digit7 => Key::Num7,
        KeyCode::Digit8 => Key::Num8,
        KeyCode::Digit9 => Key::Num9,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Equal => Key::Equals,
        KeyCode::BracketLeft => Key::LeftBracket,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::BracketRight => Key::RightBracket,
        KeyCode::Backquote => Key::Grave,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::Delete => Key::Delete,
        KeyCode::NumpadDecimal => Key::KpPeriod,
        KeyCode::NumpadDivide => Key::KpDivide,
        KeyCode::NumpadMultiply => Key::KpMultiply,
        KeyCode::NumpadSubtract => Key::KpMinus,
        KeyCode::NumpadAdd => Key::KpPlus,
        KeyCode::NumpadEnter => Key::KpEnter,
        KeyCode::NumpadEqual => Key::KpEquals,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::Insert => Key::Insert,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        KeyCode::F13 => Key::F13,
        KeyCode::F14 => Key::F14,
        KeyCode::F15 => Key::F15,
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::ShiftRight => Key::RightShift,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::ControlRight => Key::RightCtrl,
        KeyCode::ControlLeft => Key::LeftCtrl,
        KeyCode::AltRight => Key::RightAlt,
        KeyCode::AltLeft => Key::LeftAlt,
        KeyCode::Help => Key::Help,
        KeyCode::PrintScreen => Key::SysRq,
        KeyCode::ContextMenu => Key::Menu,
        KeyCode::Power => Key::Power,
        KeyCode::NumLock => Key::NumLock,
        _ => return None,
    };
    Some(key)
}

pub fn map_button(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Right => Some(MouseBtn::Right),
        MouseButton::Middle => Some(MouseBtn::Middle),
        _ => None,
    }
}
