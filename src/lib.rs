//! Geodesic hex-planet generation
//!
//! A standalone library for generating spherical worlds tiled by hexagonal
//! (and exactly twelve pentagonal) cells, rendering them as watertight
//! terrain meshes with smooth slopes and explicit cliff faces, and finding
//! shortest paths between cells along the sphere. Engine-agnostic output,
//! suitable for Bevy, Godot, wgpu or anything else that eats triangles.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hexplanet::*;
//!
//! // Generate a planet
//! let config = PlanetConfigBuilder::new()
//!     .seed(42)
//!     .subdivisions(4).unwrap()
//!     .radius(20.0).unwrap()
//!     .build().unwrap();
//!
//! let planet = HexPlanet::generate(config).unwrap();
//!
//! // Generate terrain mesh for rendering
//! let mesh = generate_terrain_mesh(
//!     &planet,
//!     &TessellationConfig::default(),
//!     &BiomeColorMapper::default(),
//! );
//! println!("Generated {} triangles", mesh.triangle_count());
//!
//! // Find a path between two cells and turn it into a polyline
//! let graph = PathGraph::build(&planet, None);
//! let path = graph.astar(0, planet.cell_count() / 2);
//! let line = polyline_on_sphere(&planet, &path, 4, 0.05, 0.15);
//! println!("Path polyline has {} points", line.len());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-cell lookups using KD-tree
//! - `serde`: Enables serialization support for configuration

// Modules
pub mod error;
pub mod config;
pub mod math;
pub mod primal;
pub mod cell;
pub mod dual;
pub mod terrain;
pub mod planet;
pub mod mesh;
pub mod path;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{HexPlanetError, Result};
pub use config::{PlanetConfig, PlanetConfigBuilder, TessellationConfig, TessellationConfigBuilder};
pub use cell::HexCell;
pub use dual::{DualMesh, PickTriangle};
pub use planet::HexPlanet;
pub use primal::PrimalMesh;
pub use terrain::{Biome, TerrainSampler, FlatSampler, NoiseSampler, NoiseConfig};
pub use mesh::{TerrainMesh, generate_terrain_mesh, ColorMapper, BiomeColorMapper, CellColor};
pub use path::{PathGraph, WeightFn, polyline_on_sphere};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
