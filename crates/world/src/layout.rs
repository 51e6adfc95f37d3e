use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyline_common::Building;

use crate::config::{LayoutError, WorldConfig};
use crate::rng::SplitMix64;

/// One ground tile, centred at `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub i: i32,
    pub j: i32,
    pub center: Vec3,
}

/// A building together with the tile it stands on and its display colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub i: i32,
    pub j: i32,
    pub building: Building,
    /// `0xRRGGBB`.
    pub color: u32,
}

/// Generated ground plane and buildings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityLayout {
    seed: u64,
    tile_size: Vec3,
    tiles: Vec<Tile>,
    lots: Vec<Lot>,
    buildings: Vec<Building>,
}

impl CityLayout {
    /// Lay out the grid row by row (`i` outer, `j` inner). Every tile draws
    /// one chance roll; a hit off the axes draws a height and a colour.
    pub fn generate(config: &WorldConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        let _span = tracing::debug_span!("city_layout", seed = config.seed).entered();

        let mut rng = SplitMix64::new(config.seed);
        let side = config.side();
        let mut tiles = Vec::with_capacity(side * side);
        let mut lots = Vec::new();
        let ground = config.tile_height / 2.0;

        for i in config.tile_min..=config.tile_max {
            for j in config.tile_min..=config.tile_max {
                let x = i as f32 * config.tile_width;
                let z = j as f32 * config.tile_depth;
                tiles.push(Tile {
                    i,
                    j,
                    center: Vec3::new(x, 0.0, z),
                });

                let roll = rng.next_f32();
                if roll >= config.building_chance || i == 0 || j == 0 {
                    continue;
                }
                let height = config.building_heights[rng.next_index(config.building_heights.len())];
                let color = (rng.next_u64() & 0x00ff_ffff) as u32;
                lots.push(Lot {
                    i,
                    j,
                    building: Building::new(
                        Vec3::new(x, ground + height / 2.0, z),
                        config.building_width,
                        config.building_depth,
                        height,
                    ),
                    color,
                });
            }
        }

        let buildings = lots.iter().map(|lot| lot.building).collect::<Vec<_>>();
        tracing::debug!(tiles = tiles.len(), buildings = buildings.len(), "layout generated");

        Ok(Self {
            seed: config.seed,
            tile_size: Vec3::new(config.tile_width, config.tile_height, config.tile_depth),
            tiles,
            lots,
            buildings,
        })
    }

    /// Seed the layout was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ground tiles, row by row.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile dimensions: width, height, depth.
    pub fn tile_size(&self) -> Vec3 {
        self.tile_size
    }

    /// Tiles that received a building, with the building and its colour.
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Building boxes, in generation order, for the physics system.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Surface height of the ground tiles.
    pub fn ground_level(&self) -> f32 {
        self.tile_size.y / 2.0
    }

    /// Horizontal extent covered by tiles, as `(min, max)` corners on XZ.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let half = Vec3::new(self.tile_size.x / 2.0, 0.0, self.tile_size.z / 2.0);
        self.tiles.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), tile| (lo.min(tile.center - half), hi.max(tile.center + half)),
        )
    }
}
