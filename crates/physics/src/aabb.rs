use glam::Vec3;
use skyline_common::Building;
use skyline_ecs::PhysicsComponent;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// World axis picked for push-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Aabb {
    /// Box from its min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box around a character standing with its origin at `position`: feet
    /// at `position.y - bottom_offset`, `collider_height` tall, square
    /// footprint of half-width `collider_radius`.
    pub fn character(position: Vec3, physics: &PhysicsComponent) -> Self {
        let r = physics.collider_radius;
        let bottom = position.y - physics.bottom_offset;
        Self {
            min: Vec3::new(position.x - r, bottom, position.z - r),
            max: Vec3::new(position.x + r, bottom + physics.collider_height, position.z + r),
        }
    }

    /// Box occupied by a building.
    pub fn building(building: &Building) -> Self {
        let center = building.center();
        let half = building.half_extents();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: touching faces do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Per-axis overlap depth, `min(self.max - other.min, other.max - self.min)`.
    pub fn penetration(&self, other: &Aabb) -> Vec3 {
        (self.max - other.min).min(other.max - self.min)
    }

    /// Horizontal footprints overlap (Y ignored).
    pub fn overlaps_xz(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

impl Axis {
    /// Axis of least penetration; ties go to Y, then X, then Z.
    pub fn of_min_penetration(penetration: Vec3) -> Self {
        if penetration.y <= penetration.x && penetration.y <= penetration.z {
            Axis::Y
        } else if penetration.x <= penetration.z {
            Axis::X
        } else {
            Axis::Z
        }
    }
}

/// Push a circle of `radius` at `position.xz` out of the building's
/// footprint rectangle and remove the velocity component pointing into it.
///
/// Returns whether a push happened. A centre exactly on or inside the
/// rectangle has no separation direction and is left alone.
pub fn push_out_of_footprint(
    position: &mut Vec3,
    velocity: &mut Vec3,
    radius: f32,
    building: &Building,
) -> bool {
    let (cx, cz) = building.closest_footprint_point(position.x, position.z);
    let dx = position.x - cx;
    let dz = position.z - cz;
    let distance_squared = dx * dx + dz * dz;
    if distance_squared >= radius * radius || distance_squared <= 0.0 {
        return false;
    }

    let distance = distance_squared.sqrt();
    let penetration = radius - distance;
    let (nx, nz) = (dx / distance, dz / distance);
    position.x += nx * penetration;
    position.z += nz * penetration;

    let inward = velocity.x * nx + velocity.z * nz;
    if inward < 0.0 {
        velocity.x -= nx * inward;
        velocity.z -= nz * inward;
    }
    true
}
