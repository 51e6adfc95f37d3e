use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A logical action the avatar components respond to.
///
/// Components query actions, never raw keys, so bindings can change without
/// touching game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Walk along the current facing.
    MoveForward,
    /// Turn around (eased) and walk along the new facing.
    MoveBackward,
    /// Rotate the facing counter-clockwise while held.
    TurnLeft,
    /// Rotate the facing clockwise while held.
    TurnRight,
    /// Jump impulse (ground jump or air jump).
    Jump,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Jump,
    ];

    /// Name used as the key in an [`ActionMap`].
    pub fn name(self) -> &'static str {
        match self {
            Action::MoveForward => "move_forward",
            Action::MoveBackward => "move_backward",
            Action::TurnLeft => "turn_left",
            Action::TurnRight => "turn_right",
            Action::Jump => "jump",
        }
    }

    fn default_keys(self) -> &'static [&'static str] {
        match self {
            Action::MoveForward => &["w", "arrowup"],
            Action::MoveBackward => &["s", "arrowdown"],
            Action::TurnLeft => &["a", "arrowleft"],
            Action::TurnRight => &["d", "arrowright"],
            Action::Jump => &[" "],
        }
    }
}

/// Action name to bound keys. Keys are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionMap {
    bindings: BTreeMap<String, Vec<String>>,
}

impl ActionMap {
    /// A map with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Bind `name` to `keys`, replacing any previous binding.
    pub fn bind<I, S>(&mut self, name: &str, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .collect();
        self.bindings.insert(name.to_string(), keys);
    }

    /// Remove an action, returning its keys.
    pub fn unbind(&mut self, name: &str) -> Option<Vec<String>> {
        self.bindings.remove(name)
    }

    /// Keys bound to `name`.
    pub fn keys(&self, name: &str) -> Option<&[String]> {
        self.bindings.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Remove every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl Default for ActionMap {
    /// WASD plus arrow keys, space to jump.
    fn default() -> Self {
        let mut map = Self::empty();
        for action in Action::ALL {
            map.bind(action.name(), action.default_keys());
        }
        map
    }
}
