//! Input mapping
//!
//! Raw discrete events (pointer, touch, keys, mode selector) become one of
//! four intents. What an intent does depends on the session phase and is
//! decided by the controller.

use serde::{Deserialize, Serialize};

use crate::sim::Mode;

/// A discrete event from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown,
    TouchStart,
    /// `KeyboardEvent.key` value
    Key(String),
    ModeSelect(Mode),
}

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Flap,
    TogglePause,
    Restart,
    ChangeMode(Mode),
}

/// Key names for the three bound actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub flap: Vec<String>,
    pub pause: Vec<String>,
    pub restart: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            flap: vec![" ".into(), "ArrowUp".into(), "w".into()],
            pause: vec!["p".into(), "Escape".into()],
            restart: vec!["r".into()],
        }
    }
}

impl KeyBindings {
    fn matches(keys: &[String], key: &str) -> bool {
        keys.iter().any(|k| {
            if k.chars().count() == 1 {
                k.eq_ignore_ascii_case(key)
            } else {
                k == key
            }
        })
    }

    /// Intent bound to a key, if any. Flap wins over pause over restart when
    /// a key is bound twice.
    pub fn lookup(&self, key: &str) -> Option<Intent> {
        if Self::matches(&self.flap, key) {
            Some(Intent::Flap)
        } else if Self::matches(&self.pause, key) {
            Some(Intent::TogglePause)
        } else if Self::matches(&self.restart, key) {
            Some(Intent::Restart)
        } else {
            None
        }
    }
}

/// Translates host events into intents
#[derive(Debug, Clone, Default)]
pub struct InputController {
    bindings: KeyBindings,
}

impl InputController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn map(&self, event: &InputEvent) -> Option<Intent> {
        match event {
            InputEvent::PointerDown | InputEvent::TouchStart => Some(Intent::Flap),
            InputEvent::Key(key) => self.bindings.lookup(key),
            InputEvent::ModeSelect(mode) => Some(Intent::ChangeMode(*mode)),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> InputEvent {
        InputEvent::Key(k.to_string())
    }

    #[test]
    fn test_pointer_and_touch_flap() {
        let input = InputController::default();
        assert_eq!(input.map(&InputEvent::PointerDown), Some(Intent::Flap));
        assert_eq!(input.map(&InputEvent::TouchStart), Some(Intent::Flap));
    }

    #[test]
    fn test_default_keys() {
        let input = InputController::default();
        assert_eq!(input.map(&key(" ")), Some(Intent::Flap));
        assert_eq!(input.map(&key("ArrowUp")), Some(Intent::Flap));
        assert_eq!(input.map(&key("P")), Some(Intent::TogglePause));
        assert_eq!(input.map(&key("Escape")), Some(Intent::TogglePause));
        assert_eq!(input.map(&key("R")), Some(Intent::Restart));
        assert_eq!(input.map(&key("x")), None);
        // Named keys are case sensitive
        assert_eq!(input.map(&key("arrowup")), None);
    }

    #[test]
    fn test_mode_select() {
        let input = InputController::default();
        assert_eq!(
            input.map(&InputEvent::ModeSelect(Mode::Hard)),
            Some(Intent::ChangeMode(Mode::Hard))
        );
    }

    #[test]
    fn test_custom_bindings() {
        let input = InputController::new(KeyBindings {
            flap: vec!["Enter".into()],
            pause: vec!["Enter".into(), "q".into()],
            restart: vec![],
        });
        assert_eq!(input.map(&key("Enter")), Some(Intent::Flap));
        assert_eq!(input.map(&key("Q")), Some(Intent::TogglePause));
        assert_eq!(input.map(&key("r")), None);
    }
}
