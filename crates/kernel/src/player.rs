use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyline_common::SharedObject;
use skyline_ecs::{
    AnimationTuning, EcsError, Entity, JumpComponent, Limbs, MovementComponent, PhysicsComponent,
    PositionComponent, RotationComponent, WalkingAnimationComponent,
};
use std::f32::consts::PI;

/// Tuning for the player avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Origin of the avatar at spawn. The default stands it on the ground.
    pub spawn: Vec3,
    /// Initial facing; `PI` looks toward -Z, into the city.
    pub yaw: f32,
    pub speed: f32,
    pub turn_speed: f32,
    /// Easing rate of the rotation component.
    pub rotation_speed: f32,
    pub jump_force: f32,
    pub max_air_jumps: u32,
    pub physics: PhysicsComponent,
    pub animation: AnimationTuning,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let physics = PhysicsComponent::default();
        Self {
            spawn: Vec3::new(0.0, 0.25 + physics.bottom_offset, 0.0),
            yaw: PI,
            speed: 2.0,
            turn_speed: 2.5,
            rotation_speed: 2.0,
            jump_force: 7.0,
            max_air_jumps: 1,
            physics,
            animation: AnimationTuning::default(),
        }
    }
}

impl PlayerConfig {
    /// Check the physics block.
    pub fn validate(&self) -> Result<(), EcsError> {
        self.physics.validate()
    }
}

/// Assemble the player: position, physics, movement, rotation, jump and
/// procedural animation, in that update order.
///
/// Physics starts grounded on `ground_level`; if the spawn point is higher
/// the first physics step notices and the avatar falls. `config` is assumed
/// valid; `World::spawn_player` checks it first.
pub fn spawn_player(
    config: &PlayerConfig,
    ground_level: f32,
    body: SharedObject,
    limbs: Option<Limbs>,
) -> Entity {
    let mut player = Entity::with_object("Player", body);
    let spawn = config.spawn;

    player.add_component(PositionComponent::new(spawn.x, spawn.y, spawn.z));
    player.add_component(PhysicsComponent {
        is_grounded: true,
        ground_y: ground_level,
        ..config.physics
    });
    player.add_component(MovementComponent::new(config.speed, config.turn_speed));
    player.add_component(RotationComponent::new(config.yaw, config.rotation_speed));
    player.add_component(JumpComponent::new(config.jump_force, config.max_air_jumps));

    let mut animation = WalkingAnimationComponent::new(config.animation);
    if let Some(limbs) = limbs {
        animation.set_limbs(limbs);
    }
    player.add_component(animation);

    tracing::debug!(id = %player.id().short(), ?spawn, "player spawned");
    player
}
