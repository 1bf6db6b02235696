//! Input events consumed by the editor.
//!
//! Positions are in viewport pixels. The editor maps them to scene
//! coordinates through its view transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Shift or Ctrl: extend the selection instead of replacing it.
    pub fn is_additive(&self) -> bool {
        self.shift || self.ctrl
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// A mouse press, move, release or double-click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub position: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Left-button event without modifiers.
    pub fn left(position: Point) -> Self {
        Self::new(position, MouseButton::Left, Modifiers::NONE)
    }

    pub fn new(position: Point, button: MouseButton, modifiers: Modifiers) -> Self {
        Self {
            position,
            button,
            modifiers,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A wheel step. Positive `delta.y` scrolls up (away from the user).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub position: Point,
    pub delta: Vec2,
    pub modifiers: Modifiers,
}

/// Keys the editor and items react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Enter,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Character(String),
}

/// Key press or release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            pressed: true,
        }
    }

    pub fn released(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            pressed: false,
        }
    }
}
