//! Hex cell structure
//!
//! Represents one hexagonal (or pentagonal) cell of the dual mesh, with its
//! boundary geometry, neighbor connectivity and mutable terrain attributes.

use glam::Vec3;

use crate::terrain::Biome;

/// A single hex/pentagon cell on the planet surface
///
/// Each cell is the dual polygon around one primal vertex:
/// - `id` equals the owning primal vertex index
/// - `boundary` lists dual vertex indices in CCW order around the cell
/// - `neighbors[i]` is the cell across the edge `boundary[i]..boundary[i+1]`
/// - exactly 12 cells on any planet are pentagons (the original icosahedron
///   vertices); all others are hexagons
///
/// Topology fields are fixed at construction. Only `height` and `biome` are
/// mutated afterwards, through the bounds-checked setters on
/// [`HexPlanet`](crate::planet::HexPlanet).
#[derive(Debug, Clone)]
pub struct HexCell {
    /// Unique identifier, equal to the owning primal vertex index
    pub id: usize,

    /// True iff this cell has 5 boundary vertices
    pub is_pentagon: bool,

    /// Dual vertex indices in CCW order; consecutive entries are physically
    /// adjacent, and the list wraps around
    pub boundary: Vec<usize>,

    /// Neighbor cell ids, same length as `boundary`; `neighbors[i]` shares
    /// the edge between `boundary[i]` and `boundary[(i+1) % len]`
    pub neighbors: Vec<usize>,

    /// Cell center on the sphere surface (at planet radius)
    ///
    /// The normalized centroid is the cell's outward "up" direction; used for
    /// cap placement, pathfinding heuristics and polyline interpolation.
    pub centroid: Vec3,

    /// Discrete elevation in height steps, externally assigned
    pub height: i32,

    /// Biome tag, externally assigned
    pub biome: Biome,
}

impl HexCell {
    /// Number of boundary vertices (5 or 6 on a subdivided icosahedron)
    #[inline]
    pub fn degree(&self) -> usize {
        self.boundary.len()
    }

    /// Check if this cell shares an edge with another cell
    #[inline]
    pub fn is_neighbor_of(&self, other_cell_id: usize) -> bool {
        self.neighbors.contains(&other_cell_id)
    }

    /// Outward unit direction at the cell center
    #[inline]
    pub fn up(&self) -> Vec3 {
        crate::math::normalize_or(self.centroid, Vec3::Y)
    }

    /// Great-circle distance to another cell along the sphere surface
    pub fn distance_to(&self, other: &HexCell, sphere_radius: f32) -> f32 {
        sphere_radius * crate::math::arc_angle(self.centroid, other.centroid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cell(id: usize, centroid: Vec3) -> HexCell {
        HexCell {
            id,
            is_pentagon: false,
            boundary: vec![0, 1, 2, 3, 4, 5],
            neighbors: vec![1, 2, 3, 4, 5, 6],
            centroid,
            height: 0,
            biome: Biome::Plains,
        }
    }

    #[test]
    fn test_degree_and_neighbors() {
        let cell = test_cell(0, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(cell.degree(), 6);
        assert!(cell.is_neighbor_of(3));
        assert!(!cell.is_neighbor_of(99));
    }

    #[test]
    fn test_distance_to() {
        let a = test_cell(0, Vec3::new(10.0, 0.0, 0.0));
        let b = test_cell(1, Vec3::new(0.0, 10.0, 0.0));

        // 90 degree arc on sphere with radius 10
        let expected = 10.0 * std::f32::consts::FRAC_PI_2;
        assert!((a.distance_to(&b, 10.0) - expected).abs() < 0.01);
        assert!(a.distance_to(&a, 10.0) < 1e-5);
    }
}
