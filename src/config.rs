//! Planet and tessellation configuration
//!
//! This module provides configuration types for deterministic hex planet
//! construction. Construction is a pure function of configuration: the same
//! configuration always produces the identical planet and terrain mesh.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{HexPlanetError, Result};

/// Maximum supported subdivision level.
///
/// Level 8 already produces 1,310,720 primal faces; beyond that, memory and
/// rebuild time stop being interactive, so the builder rejects it.
pub const MAX_SUBDIVISIONS: u32 = 8;

/// Configuration for deterministic hex planet construction
///
/// The topology (cell layout) is fully determined by `subdivisions` and
/// `radius`. The seeds only affect terrain sampling, so the same layout can
/// carry different height/biome distributions.
///
/// # Example
///
/// ```rust
/// use hexplanet::*;
///
/// let config = PlanetConfigBuilder::new()
///     .seed(42)
///     .subdivisions(4)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.subdivisions, 4);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetConfig {
    /// Number of icosahedron subdivision iterations (0 = base icosahedron)
    ///
    /// Cell count grows as `12 + 10*(4^n - 1)`:
    /// - 0: 12 cells (all pentagons)
    /// - 3: 642 cells
    /// - 5: 10,242 cells
    /// - 7: 163,842 cells
    pub subdivisions: u32,

    /// Sphere radius in world units
    pub radius: f32,

    /// Random seed for terrain height sampling
    pub seed: u32,

    /// Random seed for biome sampling (separate from height seed)
    ///
    /// This allows the same elevation layout with different biome painting.
    pub terrain_seed: u32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        PlanetConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating [`PlanetConfig`] with validation
///
/// # Example
///
/// ```rust
/// use hexplanet::*;
///
/// // Use defaults
/// let config = PlanetConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = PlanetConfigBuilder::new()
///     .seed(12345)
///     .subdivisions(5)
///     .unwrap()
///     .radius(30.0)
///     .unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PlanetConfigBuilder {
    seed: Option<u32>,
    subdivisions: u32,
    radius: f32,
    terrain_seed: Option<u32>,
}

impl PlanetConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - subdivisions: 4 (2,562 cells)
    /// - radius: 20.0
    /// - terrain_seed: Same as seed
    pub fn new() -> Self {
        Self {
            seed: None,
            subdivisions: 4,
            radius: 20.0,
            terrain_seed: None,
        }
    }

    /// Set the random seed for terrain sampling
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the subdivision level
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if level exceeds [`MAX_SUBDIVISIONS`].
    pub fn subdivisions(mut self, level: u32) -> Result<Self> {
        if level > MAX_SUBDIVISIONS {
            return Err(HexPlanetError::InvalidConfig(format!(
                "subdivisions must be <= {} (got {})",
                MAX_SUBDIVISIONS, level
            )));
        }
        self.subdivisions = level;
        Ok(self)
    }

    /// Set the sphere radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius is not strictly positive.
    pub fn radius(mut self, radius: f32) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(HexPlanetError::InvalidConfig(format!(
                "radius must be positive (got {})",
                radius
            )));
        }
        self.radius = radius;
        Ok(self)
    }

    /// Set a separate terrain seed
    ///
    /// If not set, the terrain seed will match the planet seed.
    pub fn terrain_seed(mut self, seed: u32) -> Self {
        self.terrain_seed = Some(seed);
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<PlanetConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let terrain_seed = self.terrain_seed.unwrap_or(seed);

        Ok(PlanetConfig {
            subdivisions: self.subdivisions,
            radius: self.radius,
            seed,
            terrain_seed,
        })
    }
}

impl Default for PlanetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the terrain tessellator
///
/// All fields are plain values; there is no hidden global state. The mesh is
/// a deterministic function of the planet and this configuration.
///
/// # Stages
///
/// Each geometry stage can be toggled independently, which is mostly useful
/// for debugging a single stage in isolation:
/// - `caps`: the flat inset top of every cell
/// - `blades`: the strips from each cap edge toward the cell boundary
/// - `corner_fill`: the notch-filling triangles where two blades meet
/// - `cliffs`: the deferred cross-cell stitching pass (walls and slope fixes)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationConfig {
    /// World-space elevation per discrete height step
    pub height_step: f32,

    /// Fraction each boundary vertex is pulled toward the cell centroid to
    /// form the cap, in `[0, 0.49]`
    pub inset: f32,

    /// Fraction the outer blade edge is pulled in from the raw boundary, in
    /// `[0, 0.49]`; 0 means blades reach the exact shared cell boundary
    pub outer_trim: f32,

    /// Largest height delta (in steps) still rendered as a smooth slope;
    /// anything greater becomes a vertical cliff
    pub smooth_max_delta: i32,

    /// Distance above which two slope corner apexes are considered to have
    /// drifted apart and get a corrective stitch triangle
    pub eps_apex: f32,

    /// Emit cap fans
    pub caps: bool,
    /// Emit blade strips
    pub blades: bool,
    /// Emit corner fill triangles
    pub corner_fill: bool,
    /// Run the deferred cliff/slope stitching pass
    pub cliffs: bool,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        TessellationConfigBuilder::new().build()
    }
}

/// Builder for creating [`TessellationConfig`] with validation
#[derive(Debug, Clone)]
pub struct TessellationConfigBuilder {
    height_step: f32,
    inset: f32,
    outer_trim: f32,
    smooth_max_delta: i32,
    eps_apex: f32,
    caps: bool,
    blades: bool,
    corner_fill: bool,
    cliffs: bool,
}

impl TessellationConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults: height_step 0.15, inset 0.25, outer_trim 0.0,
    /// smooth_max_delta 1, eps_apex 1e-4, all stages enabled.
    pub fn new() -> Self {
        Self {
            height_step: 0.15,
            inset: 0.25,
            outer_trim: 0.0,
            smooth_max_delta: 1,
            eps_apex: 1e-4,
            caps: true,
            blades: true,
            corner_fill: true,
            cliffs: true,
        }
    }

    /// Set the world-space elevation per height step
    pub fn height_step(mut self, step: f32) -> Self {
        self.height_step = step;
        self
    }

    /// Set the cap inset fraction
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if outside `[0, 0.49]`.
    pub fn inset(mut self, inset: f32) -> Result<Self> {
        if !(0.0..=0.49).contains(&inset) {
            return Err(HexPlanetError::InvalidConfig(format!(
                "inset must be in [0, 0.49] (got {})",
                inset
            )));
        }
        self.inset = inset;
        Ok(self)
    }

    /// Set the outer boundary trim fraction
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if outside `[0, 0.49]`.
    pub fn outer_trim(mut self, trim: f32) -> Result<Self> {
        if !(0.0..=0.49).contains(&trim) {
            return Err(HexPlanetError::InvalidConfig(format!(
                "outer_trim must be in [0, 0.49] (got {})",
                trim
            )));
        }
        self.outer_trim = trim;
        Ok(self)
    }

    /// Set the slope-vs-cliff height threshold
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if negative.
    pub fn smooth_max_delta(mut self, delta: i32) -> Result<Self> {
        if delta < 0 {
            return Err(HexPlanetError::InvalidConfig(format!(
                "smooth_max_delta must be >= 0 (got {})",
                delta
            )));
        }
        self.smooth_max_delta = delta;
        Ok(self)
    }

    /// Set the apex drift threshold for slope stitch correction
    pub fn eps_apex(mut self, eps: f32) -> Self {
        self.eps_apex = eps;
        self
    }

    /// Toggle the cap fan stage
    pub fn caps(mut self, enabled: bool) -> Self {
        self.caps = enabled;
        self
    }

    /// Toggle the blade strip stage
    pub fn blades(mut self, enabled: bool) -> Self {
        self.blades = enabled;
        self
    }

    /// Toggle the corner fill stage
    pub fn corner_fill(mut self, enabled: bool) -> Self {
        self.corner_fill = enabled;
        self
    }

    /// Toggle the cliff/slope stitching stage
    pub fn cliffs(mut self, enabled: bool) -> Self {
        self.cliffs = enabled;
        self
    }

    /// Build the configuration
    ///
    /// Infallible: every fallible field is validated by its setter.
    pub fn build(self) -> TessellationConfig {
        TessellationConfig {
            height_step: self.height_step,
            inset: self.inset,
            outer_trim: self.outer_trim,
            smooth_max_delta: self.smooth_max_delta,
            eps_apex: self.eps_apex,
            caps: self.caps,
            blades: self.blades,
            corner_fill: self.corner_fill,
            cliffs: self.cliffs,
        }
    }
}

impl Default for TessellationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = PlanetConfigBuilder::new().build().unwrap();
        assert_eq!(config.subdivisions, 4);
        assert_eq!(config.radius, 20.0);
        // seed and terrain_seed are random, so just verify they were set
        let _seed = config.seed;
    }

    #[test]
    fn test_builder_custom() {
        let config = PlanetConfigBuilder::new()
            .seed(42)
            .subdivisions(3)
            .unwrap()
            .radius(50.0)
            .unwrap()
            .terrain_seed(99)
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.subdivisions, 3);
        assert_eq!(config.radius, 50.0);
        assert_eq!(config.terrain_seed, 99);
    }

    #[test]
    fn test_builder_too_many_subdivisions() {
        let result = PlanetConfigBuilder::new().subdivisions(MAX_SUBDIVISIONS + 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_invalid_radius() {
        assert!(PlanetConfigBuilder::new().radius(0.0).is_err());
        assert!(PlanetConfigBuilder::new().radius(-5.0).is_err());
        assert!(PlanetConfigBuilder::new().radius(f32::NAN).is_err());
    }

    #[test]
    fn test_terrain_seed_defaults_to_planet_seed() {
        let config = PlanetConfigBuilder::new().seed(42).build().unwrap();
        assert_eq!(config.terrain_seed, 42);
    }

    #[test]
    fn test_separate_terrain_seed() {
        let config = PlanetConfigBuilder::new()
            .seed(42)
            .terrain_seed(99)
            .build()
            .unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.terrain_seed, 99);
    }

    #[test]
    fn test_tessellation_defaults() {
        let config = TessellationConfig::default();
        assert!(config.caps && config.blades && config.corner_fill && config.cliffs);
        assert_eq!(config.smooth_max_delta, 1);
    }

    #[test]
    fn test_tessellation_validation() {
        assert!(TessellationConfigBuilder::new().inset(0.5).is_err());
        assert!(TessellationConfigBuilder::new().inset(-0.1).is_err());
        assert!(TessellationConfigBuilder::new().outer_trim(0.6).is_err());
        assert!(TessellationConfigBuilder::new().smooth_max_delta(-1).is_err());

        let config = TessellationConfigBuilder::new()
            .inset(0.3)
            .unwrap()
            .outer_trim(0.05)
            .unwrap()
            .smooth_max_delta(2)
            .unwrap()
            .build();
        assert_eq!(config.inset, 0.3);
        assert_eq!(config.smooth_max_delta, 2);
    }

    #[test]
    fn test_stage_flags() {
        let config = TessellationConfigBuilder::new()
            .caps(false)
            .cliffs(false)
            .build();
        assert!(!config.caps);
        assert!(config.blades);
        assert!(!config.cliffs);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = PlanetConfigBuilder::new()
            .seed(12345)
            .subdivisions(3)
            .unwrap()
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: PlanetConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
