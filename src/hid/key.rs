//! Logical key identifiers
//!
//! A [`Key`] names what a physical key means after Shift and Num Lock have
//! been applied. It is the identifier handed to the input subsystem; the
//! raw usage code never leaves the decoder.

/// Logical key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Key {
    /// No key (empty slot, error state, reserved usage)
    #[default]
    Invalid = 0,
    Escape,
    Tab,
    Backspace,
    Return,
    Insert,
    Delete,
    PrintScreen,
    PauseBreak,
    Home,
    End,
    PageUp,
    PageDown,
    Left,
    Right,
    Up,
    Down,
    CapsLock,
    NumLock,
    ScrollLock,
    Space,
    ExclamationPoint,
    DoubleQuote,
    Hashtag,
    Dollar,
    Percent,
    Ampersand,
    Apostrophe,
    LeftParen,
    RightParen,
    Asterisk,
    Plus,
    Comma,
    Minus,
    Period,
    Slash,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Colon,
    Semicolon,
    LessThan,
    Equal,
    GreaterThan,
    AtSign,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    LeftBracket,
    RightBracket,
    Backslash,
    Circumflex,
    Underscore,
    LeftBrace,
    RightBrace,
    Pipe,
    Tilde,
    Backtick,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Menu,
    Power,
    Control,
    LeftShift,
    Alt,
    LeftGui,
    RightControl,
    RightShift,
    RightAlt,
    RightGui,
}

impl Key {
    /// Returns `true` for anything other than [`Key::Invalid`]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Key::Invalid)
    }

    /// Returns `true` for keys that toggle a keyboard lock
    pub const fn is_lock(self) -> bool {
        matches!(self, Key::NumLock | Key::CapsLock | Key::ScrollLock)
    }
}
