//! Terrain sampling: biomes and discrete heights
//!
//! The geometry core never generates terrain itself; it consumes per-cell
//! `(height, biome)` assignments produced by a [`TerrainSampler`]. This module
//! defines that interface plus two reference samplers: a flat no-op and a
//! Perlin-noise painter.

mod perlin;

pub use perlin::{sample_fbm, NoiseConfig};

use glam::Vec3;

/// Biome tags for planet cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Biome {
    /// Deep water
    Ocean,
    /// Shallow coastal transition
    Beach,
    /// General lowland
    #[default]
    Plains,
    /// Wooded mid-elevation terrain
    Forest,
    /// Elevated rocky terrain
    Mountain,
    /// Frozen polar regions
    Ice,
}

impl Biome {
    /// Check if this biome is water
    pub fn is_water(&self) -> bool {
        matches!(self, Biome::Ocean)
    }

    /// Check if this biome is walkable land
    pub fn is_land(&self) -> bool {
        !self.is_water()
    }
}

/// Trait for assigning terrain to cells
///
/// Called once per cell after every dual-mesh rebuild, with the cell centroid
/// on the sphere surface. Implementations must be pure functions of position
/// so rebuilds are deterministic.
pub trait TerrainSampler {
    /// Sample the discrete height (in steps) and biome at a position
    fn sample(&self, position: Vec3, radius: f32) -> (i32, Biome);
}

/// Sampler that assigns height 0 and a single biome everywhere
///
/// Useful for tests and for callers that assign terrain through the attribute
/// setters instead.
#[derive(Debug, Clone, Copy)]
pub struct FlatSampler {
    /// Biome assigned to every cell
    pub biome: Biome,
}

impl Default for FlatSampler {
    fn default() -> Self {
        Self {
            biome: Biome::Plains,
        }
    }
}

impl TerrainSampler for FlatSampler {
    fn sample(&self, _position: Vec3, _radius: f32) -> (i32, Biome) {
        (0, self.biome)
    }
}

/// Default terrain sampler using fractal Perlin noise
///
/// Heights come from a domain-warped elevation field quantized to
/// `[min_height, max_height]`; biomes follow elevation with polar ice caps.
pub struct NoiseSampler {
    /// Seed for elevation noise
    pub seed: u32,
    /// Seed for biome detail noise (forest placement)
    pub biome_seed: u32,
    /// Lowest assignable height step (ocean floor)
    pub min_height: i32,
    /// Highest assignable height step (mountain peak)
    pub max_height: i32,
    /// Elevation below which terrain is ocean
    pub ocean_threshold: f32,
    /// Elevation above which terrain is mountain
    pub mountain_threshold: f32,
    /// |latitude| above which terrain is ice
    pub ice_cap_latitude: f32,
    /// Width of the beach band above the ocean threshold
    pub beach_band: f32,
    /// Noise parameters for the elevation field
    pub config: NoiseConfig,
}

impl Default for NoiseSampler {
    fn default() -> Self {
        Self {
            seed: 0,
            biome_seed: 0,
            min_height: -3,
            max_height: 6,
            ocean_threshold: -0.12,
            mountain_threshold: 0.4,
            ice_cap_latitude: 0.85,
            beach_band: 0.05,
            config: NoiseConfig::default(),
        }
    }
}

impl NoiseSampler {
    /// Create a new sampler with the given seeds
    pub fn new(seed: u32, biome_seed: u32) -> Self {
        Self {
            seed,
            biome_seed,
            ..Default::default()
        }
    }

    /// Elevation field in `[-1, 1]` at a unit direction, with domain warping
    /// for organic coastlines
    fn elevation(&self, unit: Vec3) -> f32 {
        let warp_freq = 0.9;
        let warp_strength = 0.35;
        let warp = Vec3::new(
            sample_fbm(unit * warp_freq, self.seed.wrapping_add(1000), &self.config),
            sample_fbm(unit * warp_freq, self.seed.wrapping_add(2000), &self.config),
            sample_fbm(unit * warp_freq, self.seed.wrapping_add(3000), &self.config),
        );
        sample_fbm(unit + warp * warp_strength, self.seed, &self.config)
    }
}

impl TerrainSampler for NoiseSampler {
    fn sample(&self, position: Vec3, radius: f32) -> (i32, Biome) {
        let unit = crate::math::normalize_or(position, Vec3::Y);
        let elevation = self.elevation(unit);

        // Quantize elevation to discrete height steps. Water surfaces sit at
        // step 0 so coasts form a clean shelf.
        let span = (self.max_height - self.min_height).max(1) as f32;
        let t = ((elevation + 1.0) / 2.0).clamp(0.0, 1.0);
        let height = (self.min_height as f32 + t * span).round() as i32;
        let height = height.clamp(self.min_height, self.max_height);

        let latitude = (position.y / radius.max(f32::MIN_POSITIVE)).abs();
        if latitude > self.ice_cap_latitude {
            return (height.max(0), Biome::Ice);
        }

        if elevation < self.ocean_threshold {
            (height.min(0), Biome::Ocean)
        } else if elevation < self.ocean_threshold + self.beach_band {
            (0, Biome::Beach)
        } else if elevation > self.mountain_threshold {
            (height.max(1), Biome::Mountain)
        } else {
            let detail = sample_fbm(unit * 3.0, self.biome_seed, &self.config);
            let biome = if detail > 0.15 {
                Biome::Forest
            } else {
                Biome::Plains
            };
            (height.max(0), biome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_sampler() {
        let sampler = FlatSampler::default();
        let (height, biome) = sampler.sample(Vec3::new(0.3, 0.8, -0.5), 10.0);
        assert_eq!(height, 0);
        assert_eq!(biome, Biome::Plains);
    }

    #[test]
    fn test_polar_ice() {
        let sampler = NoiseSampler::new(42, 42);

        let (_, north) = sampler.sample(Vec3::new(0.0, 1.0, 0.0), 1.0);
        let (_, south) = sampler.sample(Vec3::new(0.0, -1.0, 0.0), 1.0);
        assert_eq!(north, Biome::Ice);
        assert_eq!(south, Biome::Ice);
    }

    #[test]
    fn test_heights_within_bounds() {
        let sampler = NoiseSampler::new(7, 13);
        for i in 0..64 {
            let theta = i as f32 * 0.41;
            let pos = Vec3::new(theta.cos(), (i as f32 * 0.13).sin(), theta.sin()).normalize();
            let (height, _) = sampler.sample(pos, 1.0);
            assert!(
                (sampler.min_height..=sampler.max_height).contains(&height),
                "height {} out of bounds at {:?}",
                height,
                pos
            );
        }
    }

    #[test]
    fn test_ocean_heights_non_positive() {
        let sampler = NoiseSampler::new(42, 42);
        for i in 0..128 {
            let theta = i as f32 * 0.37;
            let pos = Vec3::new(theta.cos() * 0.9, 0.1, theta.sin() * 0.9).normalize();
            let (height, biome) = sampler.sample(pos, 1.0);
            if biome == Biome::Ocean {
                assert!(height <= 0, "ocean cell with height {}", height);
            }
        }
    }

    #[test]
    fn test_sampler_determinism() {
        let sampler = NoiseSampler::new(123, 456);
        let pos = Vec3::new(0.5, 0.5, 0.5);

        assert_eq!(sampler.sample(pos, 1.0), sampler.sample(pos, 1.0));
    }

    #[test]
    fn test_biome_helpers() {
        assert!(Biome::Ocean.is_water());
        assert!(!Biome::Ocean.is_land());
        for biome in [Biome::Beach, Biome::Plains, Biome::Forest, Biome::Mountain, Biome::Ice] {
            assert!(biome.is_land());
        }
    }
}
