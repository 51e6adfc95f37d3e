use super::animation::AnimationState;
use crate::entity::{Entity, UpdateContext};

/// Clip playback provided by the model loader / renderer.
pub trait AnimationMixer {
    /// Reset the clip to its start and play it. With `clamp_when_finished`
    /// the clip holds its last frame instead of looping back.
    fn play(&mut self, clip: &str, clamp_when_finished: bool);
    fn stop(&mut self, clip: &str);
    fn stop_all(&mut self);
    /// Advance every playing clip by `dt` seconds.
    fn update(&mut self, dt: f32);
}

const IDLE_ALIASES: &[&str] = &["Idle", "idle", "Armature|Idle", "mixamo.com|Idle"];
const WALK_ALIASES: &[&str] = &[
    "Walk",
    "walk",
    "Walking",
    "walking",
    "Armature|Walk",
    "mixamo.com|Walk",
];
const JUMP_ALIASES: &[&str] = &[
    "Jump",
    "jump",
    "Jumping",
    "jumping",
    "Armature|Jump",
    "mixamo.com|Jump",
];

/// Clip-driven animation: maps idle / walking / jumping onto named clips
/// and switches clips only when the derived state changes.
pub struct AnimationController {
    mixer: Option<Box<dyn AnimationMixer>>,
    idle: Option<String>,
    walk: Option<String>,
    jump: Option<String>,
    state: Option<AnimationState>,
    current_clip: Option<String>,
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("has_mixer", &self.mixer.is_some())
            .field("idle", &self.idle)
            .field("walk", &self.walk)
            .field("jump", &self.jump)
            .field("state", &self.state)
            .field("current_clip", &self.current_clip)
            .finish()
    }
}

impl AnimationController {
    /// Resolve each state to the first alias present in `clip_names`.
    pub fn new<S: AsRef<str>>(mixer: Box<dyn AnimationMixer>, clip_names: &[S]) -> Self {
        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find(|alias| clip_names.iter().any(|c| c.as_ref() == **alias))
                .map(|alias| alias.to_string())
        };
        let controller = Self {
            idle: find(IDLE_ALIASES),
            walk: find(WALK_ALIASES),
            jump: find(JUMP_ALIASES),
            mixer: Some(mixer),
            state: None,
            current_clip: None,
        };
        if controller.idle.is_none() && controller.walk.is_none() && controller.jump.is_none() {
            tracing::warn!(clips = clip_names.len(), "no animation clip matches idle, walk or jump");
        }
        controller
    }

    /// A controller with nothing to play; every update is a no-op.
    pub fn without_clips() -> Self {
        Self {
            mixer: None,
            idle: None,
            walk: None,
            jump: None,
            state: None,
            current_clip: None,
        }
    }

    /// State of the clip playing now, `None` before the first update.
    pub fn state(&self) -> Option<AnimationState> {
        self.state
    }

    /// Name of the clip playing now.
    pub fn current_clip(&self) -> Option<&str> {
        self.current_clip.as_deref()
    }

    /// Clip resolved for `state`, if any alias matched.
    pub fn clip_for(&self, state: AnimationState) -> Option<&str> {
        match state {
            AnimationState::Idle => self.idle.as_deref(),
            AnimationState::Walking => self.walk.as_deref(),
            AnimationState::Jumping => self.jump.as_deref(),
        }
    }

    pub(crate) fn update(&mut self, dt: f32, entity: &mut Entity, ctx: &UpdateContext<'_>) {
        if self.mixer.is_none() {
            return;
        }
        let next = AnimationState::derive(entity, ctx);
        if self.state != Some(next) {
            self.transition(next);
        }
        if let Some(mixer) = self.mixer.as_mut() {
            mixer.update(dt);
        }
    }

    fn transition(&mut self, next: AnimationState) {
        let clip = self.clip_for(next).map(str::to_string);
        let Some(mixer) = self.mixer.as_mut() else {
            return;
        };
        if let Some(old) = self.current_clip.take() {
            mixer.stop(&old);
        }
        if let Some(clip) = &clip {
            mixer.play(clip, true);
        }
        tracing::debug!(from = ?self.state, to = %next, ?clip, "animation transition");
        self.current_clip = clip;
        self.state = Some(next);
    }

    pub(crate) fn on_remove(&mut self) {
        if let Some(mixer) = self.mixer.as_mut() {
            mixer.stop_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentKind;
    use crate::components::{MovementComponent, PhysicsComponent};
    use skyline_common::{SceneNode, shared};
    use skyline_input::InputSystem;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingMixer {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl AnimationMixer for RecordingMixer {
        fn play(&mut self, clip: &str, clamp_when_finished: bool) {
            assert!(clamp_when_finished);
            self.log.borrow_mut().push(format!("play {clip}"));
        }
        fn stop(&mut self, clip: &str) {
            self.log.borrow_mut().push(format!("stop {clip}"));
        }
        fn stop_all(&mut self) {
            self.log.borrow_mut().push("stop_all".into());
        }
        fn update(&mut self, _dt: f32) {}
    }

    fn avatar() -> Entity {
        let mut e = Entity::with_object("Player", shared(SceneNode::default()));
        let mut physics = PhysicsComponent::default();
        physics.is_grounded = true;
        e.add_component(physics);
        e.add_component(MovementComponent::default());
        e
    }

    #[test]
    fn aliases_resolve_first_match() {
        let clips = ["mixamo.com|Idle", "Walking", "walk", "Armature|Jump"];
        let c = AnimationController::new(Box::new(RecordingMixer::default()), &clips);
        assert_eq!(c.clip_for(AnimationState::Idle), Some("mixamo.com|Idle"));
        assert_eq!(c.clip_for(AnimationState::Walking), Some("walk"));
        assert_eq!(c.clip_for(AnimationState::Jumping), Some("Armature|Jump"));
    }

    #[test]
    fn switches_clips_only_on_state_change() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mixer = RecordingMixer { log: log.clone() };
        let mut c = AnimationController::new(Box::new(mixer), &["Idle", "Walk", "Jump"]);
        let mut e = avatar();
        let mut input = InputSystem::new();

        c.update(0.016, &mut e, &UpdateContext::new(&input));
        c.update(0.016, &mut e, &UpdateContext::new(&input));
        input.key_down("w");
        c.update(0.016, &mut e, &UpdateContext::new(&input));
        c.update(0.016, &mut e, &UpdateContext::new(&input));

        assert_eq!(*log.borrow(), vec!["play Idle", "stop Idle", "play Walk"]);
        assert_eq!(c.current_clip(), Some("Walk"));
        assert_eq!(c.state(), Some(AnimationState::Walking));
    }

    #[test]
    fn missing_clip_leaves_nothing_playing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mixer = RecordingMixer { log: log.clone() };
        let mut c = AnimationController::new(Box::new(mixer), &["Idle"]);
        let mut e = avatar();
        c.update(0.016, &mut e, &UpdateContext::detached());
        e.physics_mut().unwrap().is_grounded = false;
        c.update(0.016, &mut e, &UpdateContext::detached());
        assert_eq!(c.current_clip(), None);
        assert_eq!(*log.borrow(), vec!["play Idle", "stop Idle"]);
    }

    #[test]
    fn removal_stops_all_clips() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mixer = RecordingMixer { log: log.clone() };
        let mut e = avatar();
        e.add_component(AnimationController::new(Box::new(mixer), &["Idle"]));
        e.remove_component(ComponentKind::Animation);
        assert_eq!(log.borrow().last().map(String::as_str), Some("stop_all"));
    }
}
