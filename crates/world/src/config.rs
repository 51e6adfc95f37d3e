use serde::{Deserialize, Serialize};

/// Largest accepted tile count along one side of the grid.
pub const MAX_SIDE: usize = 1024;

/// Layout parameters. Tile indices are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    pub tile_min: i32,
    pub tile_max: i32,
    pub tile_width: f32,
    pub tile_depth: f32,
    pub tile_height: f32,
    /// Probability that an eligible tile gets a building.
    pub building_chance: f32,
    pub building_width: f32,
    pub building_depth: f32,
    /// Candidate heights, picked uniformly.
    pub building_heights: Vec<f32>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            tile_min: -16,
            tile_max: 0,
            tile_width: 2.0,
            tile_depth: 2.0,
            tile_height: 0.5,
            building_chance: 0.25,
            building_width: 2.0,
            building_depth: 2.0,
            building_heights: vec![2.0, 4.0, 6.0],
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LayoutError {
    #[error("empty tile range {min}..={max}")]
    EmptyRange { min: i32, max: i32 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("building chance {0} outside [0, 1]")]
    Chance(f32),
    #[error("no building heights configured")]
    NoHeights,
    #[error("tile range {min}..={max} spans more than {MAX_SIDE} tiles per side")]
    TooLarge { min: i32, max: i32 },
}

impl WorldConfig {
    /// Default layout with a different seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reject ranges and dimensions the generator cannot lay out.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.tile_min > self.tile_max {
            return Err(LayoutError::EmptyRange {
                min: self.tile_min,
                max: self.tile_max,
            });
        }
        if self.side() > MAX_SIDE {
            return Err(LayoutError::TooLarge {
                min: self.tile_min,
                max: self.tile_max,
            });
        }
        let dims = [
            ("tile_width", self.tile_width),
            ("tile_depth", self.tile_depth),
            ("tile_height", self.tile_height),
            ("building_width", self.building_width),
            ("building_depth", self.building_depth),
        ];
        for (field, value) in dims {
            if value.is_nan() || value <= 0.0 {
                return Err(LayoutError::NonPositive { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.building_chance) {
            return Err(LayoutError::Chance(self.building_chance));
        }
        if self.building_heights.is_empty() {
            return Err(LayoutError::NoHeights);
        }
        if let Some(&value) = self
            .building_heights
            .iter()
            .find(|h| h.is_nan() || **h <= 0.0)
        {
            return Err(LayoutError::NonPositive {
                field: "building_heights",
                value,
            });
        }
        Ok(())
    }

    /// Number of tiles along one side. Computed in `i64`, so any pair of
    /// `i32` bounds is representable.
    pub fn side(&self) -> usize {
        let span = i64::from(self.tile_max) - i64::from(self.tile_min) + 1;
        usize::try_from(span.max(0)).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WorldConfig::default();
        assert_eq!(config.side(), 17);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_parameters() {
        let reversed = WorldConfig {
            tile_min: 1,
            tile_max: 0,
            ..Default::default()
        };
        assert!(matches!(reversed.validate(), Err(LayoutError::EmptyRange { .. })));

        let chance = WorldConfig {
            building_chance: 1.5,
            ..Default::default()
        };
        assert_eq!(chance.validate(), Err(LayoutError::Chance(1.5)));

        let heights = WorldConfig {
            building_heights: vec![],
            ..Default::default()
        };
        assert_eq!(heights.validate(), Err(LayoutError::NoHeights));

        let huge = WorldConfig {
            tile_min: -1,
            tile_max: MAX_SIDE as i32 - 1,
            ..Default::default()
        };
        assert_eq!(huge.side(), MAX_SIDE + 1);
        assert_eq!(
            huge.validate(),
            Err(LayoutError::TooLarge {
                min: -1,
                max: MAX_SIDE as i32 - 1
            })
        );

        let flat = WorldConfig {
            tile_height: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            flat.validate(),
            Err(LayoutError::NonPositive { field: "tile_height", .. })
        ));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: WorldConfig = serde_yaml::from_str("seed: 9\nbuilding_chance: 0.5\n").unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.building_chance, 0.5);
        assert_eq!(config.tile_min, -16);
        assert_eq!(config.building_heights, vec![2.0, 4.0, 6.0]);
    }
}
