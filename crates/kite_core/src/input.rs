//! Keyboard and mouse state.
//!
//! Keys are addressed either by the typed [`Key`] enum or by their symbolic
//! name (`"space"`, `"left arrow"`, `"F5"`, ...). The name vocabulary is fixed;
//! asking for a name outside it is an error rather than a silent `false`.
//! Translating native key codes into [`Key`] is the platform layer's job, and
//! codes it cannot translate never reach this state.

use std::collections::HashSet;

use crate::error::{EngineError, Result};

macro_rules! key_vocabulary {
    ($($variant:ident => $name:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Key {
            $($variant,)*
        }

        impl Key {
            /// Every supported key in vocabulary order.
            pub const ALL: &'static [Key] = &[$(Key::$variant,)*];

            /// Canonical symbolic name used by [`InputState::is_key_pressed`].
            pub const fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => $name,)*
                }
            }
        }
    };
}

key_vocabulary! {
    Backspace => "backspace",
    Tab => "tab",
    Clear => "clear",
    Return => "return",
    Pause => "pause",
    Escape => "escape",
    Space => "space",
    Exclaim => "exclaim",
    QuoteDbl => "quotedbl",
    Hash => "hash",
    Dollar => "dollar",
    Ampersand => "ampersand",
    Quote => "quote",
    LeftParen => "left parenthesis",
    RightParen => "right parenthesis",
    Asterisk => "asterisk",
    Plus => "plus sign",
    Comma => "comma",
    Minus => "minus sign",
    Period => "period",
    Slash => "forward slash",
    Num0 => "0",
    Num1 => "1",
    Num2 => "2",
    Num3 => "3",
    Num4 => "4",
    Num5 => "5",
    Num6 => "6",
    Num7 => "7",
    Num8 => "8",
    Num9 => "9",
    Colon => "colon",
    Semicolon => "semicolon",
    Less => "less-than sign",
    Equals => "equals sign",
    Greater => "greater-than sign",
    Question => "question mark",
    At => "at",
    LeftBracket => "left bracket",
    Backslash => "backslash",
    RightBracket => "right bracket",
    Caret => "caret",
    Underscore => "underscore",
    Grave => "grave",
    A => "a",
    B => "b",
    C => "c",
    D => "d",
    E => "e",
    F => "f",
    G => "g",
    H => "h",
    I => "i",
    J => "j",
    K => "k",
    L => "l",
    M => "m",
    N => "n",
    O => "o",
    P => "p",
    Q => "q",
    R => "r",
    S => "s",
    T => "t",
    U => "u",
    V => "v",
    W => "w",
    X => "x",
    Y => "y",
    Z => "z",
    Delete => "delete",
    KpPeriod => "keypad period",
    KpDivide => "keypad divide",
    KpMultiply => "keypad multiply",
    KpMinus => "keypad minus",
    KpPlus => "keypad plus",
    KpEnter => "keypad enter",
    KpEquals => "keypad equals",
    Up => "up arrow",
    Down => "down arrow",
    Right => "right arrow",
    Left => "left arrow",
    Insert => "insert",
    Home => "home",
    End => "end",
    PageUp => "page up",
    PageDown => "page down",
    F1 => "F1",
    F2 => "F2",
    F3 => "F3",
    F4 => "F4",
    F5 => "F5",
    F6 => "F6",
    F7 => "F7",
    F8 => "F8",
    F9 => "F9",
    F10 => "F10",
    F11 => "F11",
    F12 => "F12",
    F13 => "F13",
    F14 => "F14",
    F15 => "F15",
    CapsLock => "capslock",
    RightShift => "right shift",
    LeftShift => "left shift",
    RightCtrl => "right ctrl",
    LeftCtrl => "left ctrl",
    RightAlt => "right alt",
    LeftAlt => "left alt",
    Mode => "mode shift",
    Help => "help",
    SysRq => "SysRq",
    Menu => "menu",
    Power => "power",
    NumLock => "num",
}

impl Key {
    pub fn from_name(name: &str) -> Option<Key> {
        Key::ALL.iter().copied().find(|key| key.name() == name)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    mouse_held: HashSet<MouseBtn>,

    /// Last reported cursor position in window pixels.
    pub mouse_position: (i32, i32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Name-based query. Fails with [`EngineError::UnknownKey`] for names
    /// outside the vocabulary.
    pub fn is_key_pressed(&self, name: &str) -> Result<bool> {
        let key = Key::from_name(name).ok_or_else(|| EngineError::UnknownKey(name.to_string()))?;
        Ok(self.is_held(key))
    }

    pub fn mouse_down(&mut self, btn: MouseBtn) {
        self.mouse_held.insert(btn);
    }

    pub fn mouse_up(&mut self, btn: MouseBtn) {
        self.mouse_held.remove(&btn);
    }

    pub fn mouse_motion(&mut self, x: i32, y: i32) {
        self.mouse_position = (x, y);
    }

    pub fn is_mouse_held(&self, btn: MouseBtn) -> bool {
        self.mouse_held.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_has_115_unique_names() {
        assert_eq!(Key::ALL.len(), 115);
        let names: HashSet<&str> = Key::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), Key::ALL.len());
    }

    #[test]
    fn from_name_round_trips_every_key() {
        for &key in Key::ALL {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
        assert_eq!(Key::from_name("left arrow"), Some(Key::Left));
        assert_eq!(Key::from_name("F5"), Some(Key::F5));
        assert_eq!(Key::from_name("f5"), None);
    }

    #[test]
    fn space_follows_down_and_up() {
        let mut input = InputState::new();
        assert!(!input.is_key_pressed("space").expect("known key"));
        input.key_down(Key::Space);
        assert!(input.is_key_pressed("space").expect("known key"));
        input.key_up(Key::Space);
        assert!(!input.is_key_pressed("space").expect("known key"));
    }

    #[test]
    fn unknown_key_name_is_an_error() {
        let input = InputState::new();
        let err = input.is_key_pressed("hyper").expect_err("not in vocabulary");
        assert!(matches!(err, EngineError::UnknownKey(name) if name == "hyper"));
    }

    #[test]
    fn key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::A);
        assert!(!input.is_held(Key::A));
    }

    #[test]
    fn multiple_keys_independent() {
        let mut input = InputState::new();
        input.key_down(Key::A);
        input.key_down(Key::D);
        input.key_up(Key::A);
        assert!(!input.is_held(Key::A));
        assert!(input.is_held(Key::D));
    }

    #[test]
    fn mouse_buttons_track_independently() {
        let mut input = InputState::new();
        input.mouse_down(MouseBtn::Left);
        input.mouse_down(MouseBtn::Middle);
        assert!(input.is_mouse_held(MouseBtn::Left));
        assert!(!input.is_mouse_held(MouseBtn::Right));
        assert!(input.is_mouse_held(MouseBtn::Middle));

        input.mouse_up(MouseBtn::Left);
        assert!(!input.is_mouse_held(MouseBtn::Left));
        assert!(input.is_mouse_held(MouseBtn::Middle));
    }

    #[test]
    fn mouse_motion_overwrites_position() {
        let mut input = InputState::new();
        input.mouse_motion(100, 200);
        assert_eq!(input.mouse_position, (100, 200));
        input.mouse_motion(-5, 3);
        assert_eq!(input.mouse_position, (-5, 3));
    }

    #[test]
    fn default_state_is_empty() {
        let input = InputState::new();
        for &key in Key::ALL {
            assert!(!input.is_held(key));
        }
        assert!(!input.is_mouse_held(MouseBtn::Left));
        assert_eq!(input.mouse_position, (0, 0));
    }
}
