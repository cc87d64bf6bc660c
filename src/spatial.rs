//! Position-to-cell spatial lookups
//!
//! Only available with the `spatial-index` feature. Complements the
//! pick-triangle list: where pick triangles serve exact ray intersection,
//! this answers "which cell is this point in" by nearest centroid.

#[cfg(feature = "spatial-index")]
use glam::Vec3;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// KD-tree over cell centroids for O(log n) nearest-cell queries
///
/// Built once during planet generation. On a geodesic grid the nearest
/// centroid is the containing cell for any point on or near the sphere
/// surface, so this doubles as point-in-cell lookup.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 3, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build the index from cell centroid positions
    pub fn new(centers: &[Vec3]) -> Self {
        let points: Vec<[f32; 3]> = centers.iter().map(|c| [c.x, c.y, c.z]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the cell whose centroid is nearest to a position
    pub fn find_nearest(&self, position: Vec3) -> usize {
        let query = [position.x, position.y, position.z];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
