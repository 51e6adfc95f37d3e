use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyline_input::Action;

use crate::component::ComponentKind;
use crate::entity::{Entity, UpdateContext};
use crate::error::EcsError;

/// What a jump request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Jumped off the ground; the air budget is untouched.
    Ground,
    /// Spent one air jump; `remaining` are left.
    Air { remaining: u32 },
    /// Airborne with no air jumps left. Nothing happened.
    Exhausted,
}

/// Converts jump requests into upward impulses on the physics component.
///
/// Ground jumps are free. Air jumps draw from a budget that refills only on
/// the frame the entity lands, not on every grounded frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpComponent {
    pub jump_force: f32,
    pub max_air_jumps: u32,
    pub remaining_air_jumps: u32,
    pub was_grounded_last_frame: bool,
}

impl JumpComponent {
    /// Jump with `jump_force` impulse and a full air budget.
    pub fn new(jump_force: f32, max_air_jumps: u32) -> Self {
        Self {
            jump_force,
            max_air_jumps,
            remaining_air_jumps: max_air_jumps,
            was_grounded_last_frame: false,
        }
    }

    pub(crate) fn update(&mut self, entity: &mut Entity, ctx: &UpdateContext<'_>) {
        if let Some(grounded) = entity.physics().map(|p| p.is_grounded) {
            if grounded && !self.was_grounded_last_frame {
                self.remaining_air_jumps = self.max_air_jumps;
                tracing::trace!(entity = entity.name(), "landed, air jumps refilled");
            }
            self.was_grounded_last_frame = grounded;
        }

        if ctx.input.is_some_and(|input| input.just_pressed(Action::Jump)) {
            // Outcome is already logged, and a missing physics component warns.
            let _ = self.trigger_jump(entity);
        }
    }

    /// Apply a jump impulse if the grounded state or the air budget allows.
    pub fn trigger_jump(&mut self, entity: &mut Entity) -> Result<JumpOutcome, EcsError> {
        let name = entity.name().to_string();
        let Some(physics) = entity.physics_mut() else {
            tracing::warn!(entity = %name, "jump requested without a physics component");
            return Err(EcsError::MissingComponent {
                entity: name,
                kind: ComponentKind::Physics,
            });
        };

        let impulse = Vec3::new(0.0, self.jump_force, 0.0);
        let outcome = if physics.is_grounded {
            physics.apply_impulse(impulse);
            JumpOutcome::Ground
        } else if self.remaining_air_jumps > 0 {
            physics.apply_impulse(impulse);
            self.remaining_air_jumps -= 1;
            JumpOutcome::Air {
                remaining: self.remaining_air_jumps,
            }
        } else {
            JumpOutcome::Exhausted
        };
        tracing::debug!(entity = %name, ?outcome, "jump");
        Ok(outcome)
    }
}
