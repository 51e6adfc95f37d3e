use serde::{Deserialize, Serialize};

/// How vertical contact with the ground and buildings is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundPolicy {
    /// Snap to the highest surface under the entity's centre: the ground
    /// level or the roof of any building whose footprint contains it.
    Heightfield,
    /// Box-vs-box resolution along the minimum-penetration axis, covering
    /// roofs, ceilings and walls.
    #[default]
    Aabb,
}

/// Physics tuning. Defaults favour game feel over realism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration, negative is down.
    pub gravity: f32,
    /// Height of the flat terrain surface.
    pub ground_level: f32,
    /// Slack when deciding whether feet touch a surface.
    pub ground_tolerance: f32,
    pub policy: GroundPolicy,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -15.0,
            ground_level: 0.25,
            ground_tolerance: 0.01,
            policy: GroundPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physics_config_defaults() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, -15.0);
        assert_eq!(config.ground_level, 0.25);
        assert_eq!(config.ground_tolerance, 0.01);
        assert_eq!(config.policy, GroundPolicy::Aabb);
    }
}
