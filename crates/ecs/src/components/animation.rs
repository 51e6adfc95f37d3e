use serde::{Deserialize, Serialize};
use skyline_common::SharedObject;
use std::f32::consts::PI;

use crate::components::MovementComponent;
use crate::entity::{Entity, UpdateContext};

/// Logical animation state, derived fresh every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Walking,
    Jumping,
}

impl AnimationState {
    /// Airborne wins over walking; walking needs a movement key held.
    pub fn derive(entity: &Entity, ctx: &UpdateContext<'_>) -> Self {
        if entity.physics().is_some_and(|p| !p.is_grounded) {
            AnimationState::Jumping
        } else if entity.movement().is_some() && MovementComponent::is_walking(ctx) {
            AnimationState::Walking
        } else {
            AnimationState::Idle
        }
    }

    /// Lowercase name used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Walking => "walking",
            AnimationState::Jumping => "jumping",
        }
    }
}

impl std::fmt::Display for AnimationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Frequencies (radians per second of animation clock) and amplitudes
/// (radians) for the procedural limb swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTuning {
    pub idle_frequency: f32,
    pub idle_sway: f32,
    pub walk_frequency: f32,
    pub arm_swing: f32,
    pub leg_swing: f32,
    /// Seconds the jump pull-up takes before the rest pose is held.
    pub jump_pull_up: f32,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            idle_frequency: 2.0,
            idle_sway: 0.05,
            walk_frequency: 8.0,
            arm_swing: 0.5,
            leg_swing: 0.6,
            jump_pull_up: 0.3,
        }
    }
}

/// The four swinging limbs of the avatar mesh.
#[derive(Clone)]
pub struct Limbs {
    pub left_arm: SharedObject,
    pub right_arm: SharedObject,
    pub left_leg: SharedObject,
    pub right_leg: SharedObject,
}

/// Rest pitches captured when the limbs are attached.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct RestPose {
    left_arm: f32,
    right_arm: f32,
    left_leg: f32,
    right_leg: f32,
}

/// Pitch for each limb in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbPose {
    pub left_arm: f32,
    pub right_arm: f32,
    pub left_leg: f32,
    pub right_leg: f32,
}

/// Procedural idle / walk / jump animation of limb pitches.
#[derive(Default)]
pub struct WalkingAnimationComponent {
    pub tuning: AnimationTuning,
    animation_time: f32,
    state: AnimationState,
    jump_start_time: f32,
    limbs: Option<Limbs>,
    rest: RestPose,
}

impl std::fmt::Debug for WalkingAnimationComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkingAnimationComponent")
            .field("tuning", &self.tuning)
            .field("animation_time", &self.animation_time)
            .field("state", &self.state)
            .field("jump_start_time", &self.jump_start_time)
            .field("has_limbs", &self.limbs.is_some())
            .finish()
    }
}

impl WalkingAnimationComponent {
    /// Procedural animation with no limbs attached yet.
    pub fn new(tuning: AnimationTuning) -> Self {
        Self {
            tuning,
            ..Self::default()
        }
    }

    /// Attach the limb objects and remember their current pitch as rest pose.
    pub fn set_limbs(&mut self, limbs: Limbs) {
        self.rest = RestPose {
            left_arm: limbs.left_arm.borrow().pitch(),
            right_arm: limbs.right_arm.borrow().pitch(),
            left_leg: limbs.left_leg.borrow().pitch(),
            right_leg: limbs.right_leg.borrow().pitch(),
        };
        self.limbs = Some(limbs);
    }

    /// State derived on the last update.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Seconds of animation accumulated so far.
    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    pub(crate) fn update(&mut self, dt: f32, entity: &mut Entity, ctx: &UpdateContext<'_>) {
        if self.limbs.is_none() {
            return;
        }
        self.animation_time += dt;

        let next = AnimationState::derive(entity, ctx);
        if next == AnimationState::Jumping && self.state != AnimationState::Jumping {
            self.jump_start_time = self.animation_time;
        }
        self.state = next;

        let speed = entity
            .movement()
            .map(|m| m.speed)
            .unwrap_or(MovementComponent::default().speed);
        let pose = self.pose(speed);
        if let Some(limbs) = &self.limbs {
            limbs.left_arm.borrow_mut().set_pitch(pose.left_arm);
            limbs.right_arm.borrow_mut().set_pitch(pose.right_arm);
            limbs.left_leg.borrow_mut().set_pitch(pose.left_leg);
            limbs.right_leg.borrow_mut().set_pitch(pose.right_leg);
        }
    }

    /// Limb pitches for the current state and clock.
    pub fn pose(&self, speed: f32) -> LimbPose {
        let t = &self.tuning;
        let rest = self.rest;
        match self.state {
            AnimationState::Idle => {
                let sway = (self.animation_time * t.idle_frequency).sin() * t.idle_sway;
                LimbPose {
                    left_arm: rest.left_arm - sway,
                    right_arm: rest.right_arm + sway,
                    left_leg: rest.left_leg,
                    right_leg: rest.right_leg,
                }
            }
            AnimationState::Walking => {
                let frequency = t.walk_frequency + speed * 0.5;
                let phase = (self.animation_time * frequency).sin();
                let opposite = (self.animation_time * frequency + PI).sin();
                // Left arm swings with the right leg.
                LimbPose {
                    left_arm: rest.left_arm + phase * t.arm_swing,
                    right_arm: rest.right_arm + opposite * t.arm_swing,
                    left_leg: rest.left_leg + opposite * t.leg_swing,
                    right_leg: rest.right_leg + phase * t.leg_swing,
                }
            }
            AnimationState::Jumping => {
                let elapsed = self.animation_time - self.jump_start_time;
                let progress = if t.jump_pull_up > 0.0 {
                    (elapsed / t.jump_pull_up).min(1.0)
                } else {
                    1.0
                };
                let (arm, leg) = if progress < 0.5 {
                    let s = (progress * PI * 2.0).sin();
                    (s * PI / 9.0, s * PI / 12.0)
                } else {
                    (0.0, 0.0)
                };
                LimbPose {
                    left_arm: rest.left_arm + arm,
                    right_arm: rest.right_arm + arm,
                    left_leg: rest.left_leg - leg,
                    right_leg: rest.right_leg - leg,
                }
            }
        }
    }
}
