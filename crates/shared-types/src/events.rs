//! Keyboard events forwarded from the browser window

use serde::{Deserialize, Serialize};

/// Minimal view of a DOM `KeyboardEvent`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub shift_key: bool,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub meta_key: bool,
}

impl KeyEvent {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl_key: true,
            ..Default::default()
        }
    }

    /// Control + lowercase `z`
    pub fn is_undo(&self) -> bool {
        self.ctrl_key && self.key == "z"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_shortcut() {
        assert!(KeyEvent::with_ctrl("z").is_undo());
        assert!(!KeyEvent::new("z").is_undo());
        assert!(!KeyEvent::with_ctrl("y").is_undo());
        // Shift turns the key into "Z"
        assert!(!KeyEvent::with_ctrl("Z").is_undo());
    }
}
