use std::collections::{HashMap, HashSet};

use crate::action::{Action, ActionMap};

/// Mouse button index as reported by the host (0 = left, 1 = middle, 2 = right).
pub type MouseButton = u8;

/// Session-wide keyboard and mouse state.
///
/// Host events (`key_down`, `key_up`, mouse events) arrive between frames
/// and only record state. Edge transitions are first collected in a pending
/// set; [`InputSystem::pre_update`] moves them into the frame window that
/// `was_*_just_*` queries read, so every edge is visible for exactly one
/// frame.
#[derive(Debug, Default)]
pub struct InputSystem {
    keys: HashMap<String, bool>,
    pending_pressed: HashSet<String>,
    pending_released: HashSet<String>,
    just_pressed: HashSet<String>,
    just_released: HashSet<String>,
    mouse_position: (f32, f32),
    mouse_buttons: HashMap<MouseButton, bool>,
    actions: ActionMap,
    initialized: bool,
}

impl InputSystem {
    /// Input system with the default action bindings.
    pub fn new() -> Self {
        Self::with_actions(ActionMap::default())
    }

    /// Input system using `actions` instead of the default bindings.
    pub fn with_actions(actions: ActionMap) -> Self {
        Self {
            actions,
            ..Self::default()
        }
    }

    /// Start of the session. The host attaches its event listeners after this.
    pub fn init(&mut self) {
        self.initialized = true;
        tracing::debug!(actions = self.actions.len(), "input system initialised");
    }

    /// Whether `init` ran and `destroy` has not.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// End of the session: forget every key, edge, button and binding.
    pub fn destroy(&mut self) {
        self.keys.clear();
        self.pending_pressed.clear();
        self.pending_released.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.mouse_buttons.clear();
        self.actions.clear();
        self.initialized = false;
        tracing::debug!("input system destroyed");
    }

    /// Open the frame's edge window. Must run once per frame before anything
    /// reads edge state.
    pub fn pre_update(&mut self) {
        self.just_pressed = std::mem::take(&mut self.pending_pressed);
        self.just_released = std::mem::take(&mut self.pending_released);
        if !self.just_pressed.is_empty() || !self.just_released.is_empty() {
            tracing::trace!(
                pressed = ?self.just_pressed,
                released = ?self.just_released,
                "input edges"
            );
        }
    }

    // --- Host events ---

    /// Host keydown. Repeats of a held key are ignored.
    pub fn key_down(&mut self, key: &str) {
        let key = key.to_lowercase();
        // Key repeat delivers keydown again while held; only the first counts.
        if !self.is_key_pressed(&key) {
            self.pending_pressed.insert(key.clone());
        }
        self.keys.insert(key, true);
    }

    /// Host keyup.
    pub fn key_up(&mut self, key: &str) {
        let key = key.to_lowercase();
        self.keys.insert(key.clone(), false);
        self.pending_released.insert(key);
    }

    /// Host pointer move, in host coordinates.
    pub fn mouse_move(&mut self, x: f32, y: f32) {
        self.mouse_position = (x, y);
    }

    /// Host mouse button press.
    pub fn mouse_down(&mut self, button: MouseButton) {
        self.mouse_buttons.insert(button, true);
    }

    /// Host mouse button release.
    pub fn mouse_up(&mut self, button: MouseButton) {
        self.mouse_buttons.insert(button, false);
    }

    // --- Queries ---

    /// Whether `key` is held. Case-insensitive.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys
            .get(&key.to_lowercase())
            .copied()
            .unwrap_or(false)
    }

    /// Whether `key` went down since the previous frame.
    pub fn was_key_just_pressed(&self, key: &str) -> bool {
        self.just_pressed.contains(&key.to_lowercase())
    }

    /// Whether `key` went up since the previous frame.
    pub fn was_key_just_released(&self, key: &str) -> bool {
        self.just_released.contains(&key.to_lowercase())
    }

    /// Last reported pointer position.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Whether `button` is held.
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).copied().unwrap_or(false)
    }

    // --- Action mapping ---

    /// Bind a logical action to one or more keys.
    pub fn map_action<I, S>(&mut self, name: &str, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.actions.bind(name, keys);
    }

    /// Current action bindings.
    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Whether any key bound to `name` is held.
    pub fn is_action_pressed(&self, name: &str) -> bool {
        self.any_bound(name, |k| self.is_key_pressed(k))
    }

    /// Whether any key bound to `name` went down this frame.
    pub fn was_action_just_pressed(&self, name: &str) -> bool {
        self.any_bound(name, |k| self.was_key_just_pressed(k))
    }

    /// Whether any key bound to `name` went up this frame.
    pub fn was_action_just_released(&self, name: &str) -> bool {
        self.any_bound(name, |k| self.was_key_just_released(k))
    }

    /// Shorthand for the built-in actions.
    pub fn is_pressed(&self, action: Action) -> bool {
        self.is_action_pressed(action.name())
    }

    /// Typed form of `was_action_just_pressed`.
    pub fn just_pressed(&self, action: Action) -> bool {
        self.was_action_just_pressed(action.name())
    }

    fn any_bound(&self, name: &str, test: impl Fn(&str) -> bool) -> bool {
        self.actions
            .keys(name)
            .is_some_and(|keys| keys.iter().any(|k| test(k.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_is_case_insensitive() {
        let mut input = InputSystem::new();
        input.key_down("W");
        assert!(input.is_key_pressed("w"));
        assert!(input.is_key_pressed("W"));
        input.key_up("w");
        assert!(!input.is_key_pressed("W"));
    }

    #[test]
    fn just_pressed_lasts_one_frame() {
        let mut input = InputSystem::new();
        input.key_down("a");
        input.pre_update();
        assert!(input.was_key_just_pressed("a"));

        input.pre_update();
        assert!(!input.was_key_just_pressed("a"));
        assert!(input.is_key_pressed("a"));

        input.pre_update();
        assert!(!input.was_key_just_pressed("a"));
        assert!(input.is_key_pressed("a"));
    }

    #[test]
    fn key_repeat_does_not_retrigger_edge() {
        let mut input = InputSystem::new();
        input.key_down("a");
        input.key_down("a");
        input.key_down("a");
        input.pre_update();
        assert!(input.was_key_just_pressed("a"));

        // Held key repeating across frames.
        input.key_down("a");
        input.pre_update();
        assert!(!input.was_key_just_pressed("a"));
    }

    #[test]
    fn release_then_repress_fires_again() {
        let mut input = InputSystem::new();
        input.key_down("s");
        input.pre_update();
        input.key_up("s");
        input.pre_update();
        assert!(input.was_key_just_released("s"));
        assert!(!input.was_key_just_pressed("s"));

        input.key_down("s");
        input.pre_update();
        assert!(input.was_key_just_pressed("s"));
        assert!(!input.was_key_just_released("s"));
    }

    #[test]
    fn unmapped_action_is_false() {
        let mut input = InputSystem::new();
        input.key_down("x");
        input.pre_update();
        assert!(!input.is_action_pressed("dance"));
        assert!(!input.was_action_just_pressed("dance"));
        assert!(!input.was_action_just_released("dance"));
    }

    #[test]
    fn action_is_or_across_keys() {
        let mut input = InputSystem::with_actions(ActionMap::empty());
        input.map_action("forward", ["W", "ArrowUp"]);
        input.key_down("ArrowUp");
        input.pre_update();
        assert!(input.is_action_pressed("forward"));
        assert!(input.was_action_just_pressed("forward"));
        assert!(!input.is_key_pressed("w"));
    }

    #[test]
    fn builtin_actions_use_default_bindings() {
        let mut input = InputSystem::new();
        input.key_down(" ");
        input.pre_update();
        assert!(input.just_pressed(Action::Jump));
        assert!(input.is_pressed(Action::Jump));
        assert!(!input.is_pressed(Action::MoveForward));
    }

    #[test]
    fn mouse_state_is_tracked() {
        let mut input = InputSystem::new();
        input.mouse_move(10.0, 20.0);
        input.mouse_down(0);
        assert_eq!(input.mouse_position(), (10.0, 20.0));
        assert!(input.is_mouse_button_pressed(0));
        input.mouse_up(0);
        assert!(!input.is_mouse_button_pressed(0));
        assert!(!input.is_mouse_button_pressed(2));
    }

    #[test]
    fn destroy_clears_everything() {
        let mut input = InputSystem::new();
        input.init();
        input.key_down("w");
        input.pre_update();
        input.destroy();
        assert!(!input.is_initialized());
        assert!(!input.is_key_pressed("w"));
        assert!(!input.was_key_just_pressed("w"));
        assert!(input.actions().is_empty());
    }
}
