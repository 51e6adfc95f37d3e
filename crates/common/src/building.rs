use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A static box obstacle. `x`, `y`, `z` is the box centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl Building {
    /// Building centred on `center`.
    pub fn new(center: Vec3, width: f32, depth: f32, height: f32) -> Self {
        Self {
            x: center.x,
            y: center.y,
            z: center.z,
            width,
            depth,
            height,
        }
    }

    /// Centre of the building volume.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Half of width, height and depth.
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width / 2.0, self.height / 2.0, self.depth / 2.0)
    }

    /// Y of the roof.
    pub fn top(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether the point lies on the footprint rectangle (edges inclusive).
    pub fn footprint_contains(&self, x: f32, z: f32) -> bool {
        let hw = self.width / 2.0;
        let hd = self.depth / 2.0;
        x >= self.x - hw && x <= self.x + hw && z >= self.z - hd && z <= self.z + hd
    }

    /// Closest point on the footprint rectangle to `(x, z)`.
    pub fn closest_footprint_point(&self, x: f32, z: f32) -> (f32, f32) {
        let hw = self.width / 2.0;
        let hd = self.depth / 2.0;
        (
            x.clamp(self.x - hw, self.x + hw),
            z.clamp(self.z - hd, self.z + hd),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_edges_are_inclusive() {
        let b = Building::new(Vec3::ZERO, 2.0, 2.0, 4.0);
        assert!(b.footprint_contains(1.0, -1.0));
        assert!(!b.footprint_contains(1.01, 0.0));
        assert_eq!(b.top(), 2.0);
    }

    #[test]
    fn closest_point_clamps_to_rectangle() {
        let b = Building::new(Vec3::ZERO, 2.0, 2.0, 4.0);
        assert_eq!(b.closest_footprint_point(3.0, 0.5), (1.0, 0.5));
        assert_eq!(b.closest_footprint_point(0.2, 0.3), (0.2, 0.3));
    }
}
