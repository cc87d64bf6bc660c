//! HexPlanet main structure

use glam::Vec3;

use crate::cell::HexCell;
use crate::config::PlanetConfig;
use crate::dual::{DualMesh, PickTriangle};
use crate::error::{HexPlanetError, Result};
use crate::primal::PrimalMesh;
use crate::terrain::{Biome, NoiseSampler, TerrainSampler};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete geodesic hex planet
///
/// Owns the dual mesh (cells, dual vertices, wire edges, pick triangles) and
/// the per-cell terrain attributes. Topology is immutable after generation;
/// heights and biomes are mutated through the bounds-checked setters and the
/// terrain mesh is regenerated from scratch after any change.
///
/// # Examples
///
/// ```
/// use hexplanet::*;
///
/// let config = PlanetConfigBuilder::new()
///     .seed(42)
///     .subdivisions(3)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let planet = HexPlanet::generate(config).unwrap();
/// println!("Generated {} cells", planet.cell_count());
///
/// if let Some(cell) = planet.get_cell(0) {
///     println!("Cell 0 biome: {:?}", cell.biome);
/// }
/// ```
#[derive(Clone)]
pub struct HexPlanet {
    /// Configuration used to generate this planet
    config: PlanetConfig,

    /// All cells on the planet (indexed by cell ID)
    cells: Vec<HexCell>,

    /// Dual vertex positions, index-shared with primal faces
    dual_vertices: Vec<Vec3>,

    /// Deduplicated wireframe edge list (dual vertex index pairs)
    wire_edges: Vec<[usize; 2]>,

    /// Per-cell pick fans for ray-based selection
    pick_triangles: Vec<PickTriangle>,

    /// Spatial index for fast position-to-cell lookups
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl HexPlanet {
    /// Generate a planet with the default noise terrain sampler
    ///
    /// # Example
    ///
    /// ```
    /// use hexplanet::*;
    ///
    /// let config = PlanetConfigBuilder::new()
    ///     .seed(12345)
    ///     .subdivisions(3)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let planet = HexPlanet::generate(config).unwrap();
    /// assert!(planet.cell_count() > 0);
    /// ```
    pub fn generate(config: PlanetConfig) -> Result<Self> {
        let sampler = NoiseSampler::new(config.seed, config.terrain_seed);
        Self::generate_with_sampler(config, &sampler)
    }

    /// Generate a planet with a custom terrain sampler
    ///
    /// The sampler is called once for each cell centroid to assign the
    /// initial height and biome.
    ///
    /// # Example
    ///
    /// ```
    /// use hexplanet::*;
    ///
    /// let config = PlanetConfig::default();
    /// let planet = HexPlanet::generate_with_sampler(config, &FlatSampler::default()).unwrap();
    /// assert!(planet.cells().iter().all(|c| c.height == 0));
    /// ```
    pub fn generate_with_sampler<S: TerrainSampler>(
        config: PlanetConfig,
        sampler: &S,
    ) -> Result<Self> {
        let primal = PrimalMesh::build(config.subdivisions);
        let dual = DualMesh::build(&primal, config.radius);

        // Any geodesic dual has exactly 12 pentagons; a different count means
        // the subdivision or the boundary ordering went wrong.
        let pentagons = dual.cells.iter().filter(|c| c.is_pentagon).count();
        if pentagons != 12 {
            return Err(HexPlanetError::ConstructionFailed(format!(
                "expected 12 pentagon cells, found {}",
                pentagons
            )));
        }

        let DualMesh {
            vertices: dual_vertices,
            mut cells,
            wire_edges,
            pick_triangles,
        } = dual;

        for cell in &mut cells {
            let (height, biome) = sampler.sample(cell.centroid, config.radius);
            cell.height = height;
            cell.biome = biome;
        }

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<Vec3> = cells.iter().map(|c| c.centroid).collect();
            SpatialIndex::new(&centers)
        };

        Ok(Self {
            config,
            cells,
            dual_vertices,
            wire_edges,
            pick_triangles,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this planet
    #[inline]
    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    /// Get the number of cells on this planet
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get the sphere radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    /// Get a cell by ID
    ///
    /// Returns `None` if the cell ID is out of bounds.
    #[inline]
    pub fn get_cell(&self, id: usize) -> Option<&HexCell> {
        self.cells.get(id)
    }

    /// Get all cells as a slice
    #[inline]
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    /// Get the dual vertex positions (index-shared with primal faces)
    #[inline]
    pub fn dual_vertices(&self) -> &[Vec3] {
        &self.dual_vertices
    }

    /// Get the deduplicated wireframe edge list
    #[inline]
    pub fn wire_edges(&self) -> &[[usize; 2]] {
        &self.wire_edges
    }

    /// Get the pick triangle list for ray-based cell selection
    #[inline]
    pub fn pick_triangles(&self) -> &[PickTriangle] {
        &self.pick_triangles
    }

    /// Get neighbor IDs for a cell
    ///
    /// Returns an empty slice if the cell ID is invalid.
    pub fn get_neighbors(&self, cell_id: usize) -> &[usize] {
        self.cells
            .get(cell_id)
            .map(|c| c.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Set a cell's height
    ///
    /// Out-of-range ids are silently ignored. A UI holding a stale selection
    /// after a rebuild must not crash the engine, so this is a no-op rather
    /// than an error.
    pub fn set_height(&mut self, cell_id: usize, height: i32) {
        if let Some(cell) = self.cells.get_mut(cell_id) {
            cell.height = height;
        }
    }

    /// Add a delta to a cell's height
    ///
    /// Out-of-range ids are silently ignored.
    pub fn add_height(&mut self, cell_id: usize, delta: i32) {
        if let Some(cell) = self.cells.get_mut(cell_id) {
            cell.height = cell.height.saturating_add(delta);
        }
    }

    /// Set a cell's biome
    ///
    /// Out-of-range ids are silently ignored.
    pub fn set_biome(&mut self, cell_id: usize, biome: Biome) {
        if let Some(cell) = self.cells.get_mut(cell_id) {
            cell.biome = biome;
        }
    }

    /// Find the cell containing a position (requires spatial-index feature)
    ///
    /// Nearest-centroid lookup via KD-tree; used to convert raycast hits or
    /// click positions into cell IDs.
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: Vec3) -> usize {
        self.spatial_index.find_nearest(position)
    }

    /// Find cells within a given hop count from a center cell (BFS)
    ///
    /// Returns cell IDs reachable within `hops` edge traversals, including
    /// the center. Empty if `center_id` is invalid.
    pub fn find_cells_within_radius(&self, center_id: usize, hops: usize) -> Vec<usize> {
        if center_id >= self.cells.len() {
            return vec![];
        }

        let mut visited = std::collections::HashSet::new();
        let mut current = vec![center_id];
        visited.insert(center_id);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &cell_id in &current {
                for &neighbor in self.get_neighbors(cell_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            current = next;
        }

        let mut result: Vec<usize> = visited.into_iter().collect();
        result.sort_unstable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanetConfigBuilder;
    use crate::terrain::FlatSampler;

    fn small_planet() -> HexPlanet {
        let config = PlanetConfigBuilder::new()
            .seed(42)
            .subdivisions(2)
            .unwrap()
            .build()
            .unwrap();
        HexPlanet::generate(config).unwrap()
    }

    #[test]
    fn test_planet_generation() {
        let planet = small_planet();

        // 12 + 10*(4^2 - 1) = 162 cells at level 2
        assert_eq!(planet.cell_count(), 162);
        assert_eq!(planet.radius(), 20.0);
        assert!(!planet.wire_edges().is_empty());
        assert!(!planet.pick_triangles().is_empty());
    }

    #[test]
    fn test_get_cell() {
        let planet = small_planet();

        assert!(planet.get_cell(0).is_some());
        assert!(planet.get_cell(planet.cell_count()).is_none());
    }

    #[test]
    fn test_attribute_setters() {
        let mut planet = small_planet();

        planet.set_height(3, 4);
        assert_eq!(planet.get_cell(3).unwrap().height, 4);

        planet.add_height(3, -2);
        assert_eq!(planet.get_cell(3).unwrap().height, 2);

        planet.set_biome(3, Biome::Mountain);
        assert_eq!(planet.get_cell(3).unwrap().biome, Biome::Mountain);
    }

    #[test]
    fn test_stale_ids_ignored() {
        // Out-of-range writes are a silent no-op, not an error.
        let mut planet = small_planet();
        let before: Vec<i32> = planet.cells().iter().map(|c| c.height).collect();

        planet.set_height(999_999, 7);
        planet.add_height(999_999, 7);
        planet.set_biome(999_999, Biome::Ice);

        let after: Vec<i32> = planet.cells().iter().map(|c| c.height).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_invalid_cell_id_queries() {
        let planet = small_planet();

        assert!(planet.get_neighbors(999_999).is_empty());
        assert!(planet.find_cells_within_radius(999_999, 5).is_empty());
    }

    #[test]
    fn test_find_cells_within_radius() {
        let planet = small_planet();

        let r0 = planet.find_cells_within_radius(0, 0);
        assert_eq!(r0, vec![0]);

        let r1 = planet.find_cells_within_radius(0, 1);
        assert_eq!(r1.len(), 1 + planet.get_neighbors(0).len());

        let r2 = planet.find_cells_within_radius(0, 2);
        assert!(r2.len() > r1.len());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at() {
        let planet = small_planet();

        let center = planet.get_cell(5).unwrap().centroid;
        assert_eq!(planet.find_cell_at(center), 5);
    }

    #[test]
    fn test_flat_sampler_generation() {
        let config = PlanetConfigBuilder::new()
            .seed(1)
            .subdivisions(1)
            .unwrap()
            .build()
            .unwrap();
        let planet = HexPlanet::generate_with_sampler(config, &FlatSampler::default()).unwrap();

        for cell in planet.cells() {
            assert_eq!(cell.height, 0);
            assert_eq!(cell.biome, Biome::Plains);
        }
    }

    #[test]
    fn test_terrain_variation() {
        let planet = small_planet();
        let mut biomes = std::collections::HashSet::new();
        for cell in planet.cells() {
            biomes.insert(cell.biome);
        }
        assert!(biomes.len() > 1, "noise sampler should produce varied biomes");
    }
}
