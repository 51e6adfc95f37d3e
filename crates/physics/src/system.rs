use glam::Vec3;
use skyline_common::Building;
use skyline_ecs::{Entity, PhysicsComponent};

use crate::aabb::{Aabb, Axis, push_out_of_footprint};
use crate::config::{GroundPolicy, PhysicsConfig};

/// Integrates physics components and resolves contacts with the terrain and
/// a static list of buildings.
///
/// `pre_update` runs the full step before entity logic, so components see
/// this frame's grounded state. `post_update` only repeats ground
/// resolution, catching movement applied by components in between.
#[derive(Debug, Clone, Default)]
pub struct PhysicsSystem {
    config: PhysicsConfig,
    buildings: Vec<Building>,
}

impl PhysicsSystem {
    /// Create a physics system with no buildings.
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            buildings: Vec::new(),
        }
    }

    /// Current physics configuration.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replace the static building list.
    pub fn set_buildings(&mut self, buildings: Vec<Building>) {
        tracing::debug!(count = buildings.len(), "physics buildings set");
        self.buildings = buildings;
    }

    /// Static obstacles, in the order they were set.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Set the height of the flat ground plane.
    pub fn set_ground_level(&mut self, level: f32) {
        self.config.ground_level = level;
    }

    /// Height of the flat ground plane.
    pub fn ground_level(&self) -> f32 {
        self.config.ground_level
    }

    /// Full physics step for every physics-enabled entity.
    pub fn pre_update(&self, dt: f32, entities: &mut [Entity]) {
        let _span = tracing::trace_span!("physics_pre_update").entered();
        for entity in entities.iter_mut() {
            self.step_entity(dt, entity);
        }
    }

    /// Ground resolution only, against the positions components left behind.
    pub fn post_update(&self, _dt: f32, entities: &mut [Entity]) {
        let _span = tracing::trace_span!("physics_post_update").entered();
        for entity in entities.iter_mut() {
            let Some(object) = entity.object().cloned() else {
                continue;
            };
            let Some(physics) = entity.physics_mut() else {
                continue;
            };
            let mut position = object.borrow().position();
            self.resolve_ground(physics, &mut position, false);
            object.borrow_mut().set_position(position);
            entity.sync_position(position);
        }
    }

    /// One integration step for a single entity. Entities without a physics
    /// component or visual object are left untouched.
    pub fn step_entity(&self, dt: f32, entity: &mut Entity) {
        let Some(object) = entity.object().cloned() else {
            return;
        };
        let Some(physics) = entity.physics_mut() else {
            return;
        };
        let mut position = object.borrow().position();

        if physics.use_gravity && !physics.is_grounded {
            physics.velocity.y += self.config.gravity * dt;
        }

        physics.velocity += physics.acceleration * dt;

        // (1 - drag)^dt decays by the same factor per second at any frame rate.
        let drag = (1.0 - physics.drag).powf(dt);
        physics.velocity.x *= drag;
        physics.velocity.z *= drag;

        position += physics.velocity * dt;

        self.resolve_ground(physics, &mut position, true);
        self.resolve_walls(physics, &mut position);

        physics.acceleration = Vec3::ZERO;

        object.borrow_mut().set_position(position);
        entity.sync_position(position);
    }

    /// Highest walkable surface under `(x, z)`: the ground level or the roof
    /// of any building whose footprint contains the point.
    pub fn ground_height(&self, x: f32, z: f32) -> f32 {
        self.buildings
            .iter()
            .filter(|b| b.footprint_contains(x, z))
            .map(Building::top)
            .fold(self.config.ground_level, f32::max)
    }

    /// Vertical contact resolution under the configured policy.
    pub fn resolve_ground(
        &self,
        physics: &mut PhysicsComponent,
        position: &mut Vec3,
        apply_friction: bool,
    ) {
        match self.config.policy {
            GroundPolicy::Heightfield => self.resolve_heightfield(physics, position),
            GroundPolicy::Aabb => self.resolve_aabb(physics, position),
        }
        if apply_friction && physics.is_grounded {
            physics.velocity.x *= physics.friction;
            physics.velocity.z *= physics.friction;
        }
    }

    fn resolve_heightfield(&self, physics: &mut PhysicsComponent, position: &mut Vec3) {
        let ground = self.ground_height(position.x, position.z);
        physics.is_grounded = false;
        if position.y - physics.bottom_offset <= ground + self.config.ground_tolerance {
            touch_surface(physics, position, ground);
        }
    }

    fn resolve_aabb(&self, physics: &mut PhysicsComponent, position: &mut Vec3) {
        let tolerance = self.config.ground_tolerance;
        physics.is_grounded = false;

        let ground = self.config.ground_level;
        if position.y - physics.bottom_offset <= ground + tolerance {
            touch_surface(physics, position, ground);
        }

        for building in &self.buildings {
            let bounds = Aabb::building(building);
            let character = Aabb::character(*position, physics);

            // Resting on the roof: feet within tolerance of the top, footprints
            // overlapping. Without this a character standing exactly on a roof
            // would lose contact every other frame.
            let feet = character.min.y;
            if character.overlaps_xz(&bounds)
                && (feet - bounds.max.y).abs() <= tolerance
                && physics.velocity.y <= 0.0
            {
                land(physics, position, bounds.max.y);
                continue;
            }

            if !character.overlaps(&bounds) {
                continue;
            }

            let penetration = character.penetration(&bounds);
            match Axis::of_min_penetration(penetration) {
                Axis::Y => {
                    if character.center().y > bounds.center().y {
                        if physics.velocity.y <= 0.0 {
                            land(physics, position, bounds.max.y);
                        }
                    } else if physics.velocity.y > 0.0 {
                        // Head hit the underside.
                        position.y =
                            bounds.min.y - physics.collider_height + physics.bottom_offset;
                        physics.velocity.y = 0.0;
                        tracing::trace!("ceiling contact");
                    }
                }
                Axis::X => {
                    position.x = if character.center().x < bounds.center().x {
                        bounds.min.x - physics.collider_radius
                    } else {
                        bounds.max.x + physics.collider_radius
                    };
                    physics.velocity.x = 0.0;
                }
                Axis::Z => {
                    position.z = if character.center().z < bounds.center().z {
                        bounds.min.z - physics.collider_radius
                    } else {
                        bounds.max.z + physics.collider_radius
                    };
                    physics.velocity.z = 0.0;
                }
            }
        }
    }

    /// Horizontal circle-vs-footprint push-out against buildings the
    /// character vertically overlaps. Standing on a roof is not a wall hit.
    fn resolve_walls(&self, physics: &mut PhysicsComponent, position: &mut Vec3) {
        let tolerance = self.config.ground_tolerance;
        for building in &self.buildings {
            let feet = position.y - physics.bottom_offset;
            let head = feet + physics.collider_height;
            let bottom = building.y - building.height / 2.0;
            if feet >= building.top() - tolerance || head <= bottom {
                continue;
            }
            if push_out_of_footprint(
                position,
                &mut physics.velocity,
                physics.collider_radius,
                building,
            ) {
                tracing::trace!(x = building.x, z = building.z, "wall contact");
            }
        }
    }
}

/// Feet reached `surface`. A body still moving up (a jump impulse applied
/// this frame) is only kept from sinking below it; anything else lands.
fn touch_surface(physics: &mut PhysicsComponent, position: &mut Vec3, surface: f32) {
    if physics.velocity.y > 0.0 {
        position.y = position.y.max(surface + physics.bottom_offset);
    } else {
        land(physics, position, surface);
    }
}

/// Put the feet on `surface`, stop vertical motion and mark grounded.
fn land(physics: &mut PhysicsComponent, position: &mut Vec3, surface: f32) {
    position.y = surface + physics.bottom_offset;
    physics.velocity.y = 0.0;
    physics.is_grounded = true;
    physics.ground_y = surface;
}
