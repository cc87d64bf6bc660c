//! Dual mesh construction
//!
//! Consumes the primal icosphere and produces the hex/pentagon dual: one
//! polygonal cell per primal vertex, one dual vertex per primal triangle
//! (the normalized face centroid), plus the deduplicated wire edge list and
//! per-cell pick triangles for ray-based selection.

use std::collections::HashSet;

use glam::Vec3;

use crate::cell::HexCell;
use crate::math::{normalize_or, tangent_basis};
use crate::primal::PrimalMesh;
use crate::terrain::Biome;

/// A single triangle of a cell's pick fan, tagged with its cell id
///
/// Consumed by external ray-picking; the tessellator does not use these.
#[derive(Debug, Clone, Copy)]
pub struct PickTriangle {
    /// Cell this triangle belongs to
    pub cell: usize,
    /// Triangle corners on the sphere surface
    pub points: [Vec3; 3],
}

/// The hex/pentagon dual of a subdivided icosahedron
///
/// Dual vertex indices are shared 1:1 with primal face indices. Cells carry
/// default terrain (height 0, `Biome::Plains`) until a sampler or the
/// attribute setters assign real values.
#[derive(Debug, Clone)]
pub struct DualMesh {
    /// Dual vertex positions at sphere radius, index-aligned with the primal
    /// face array
    pub vertices: Vec<Vec3>,
    /// One cell per primal vertex, index-aligned with the primal vertex array
    pub cells: Vec<HexCell>,
    /// Unordered dual-vertex index pairs, each shared cell edge collapsed to
    /// one entry; for wireframe/overlay rendering
    pub wire_edges: Vec<[usize; 2]>,
    /// Per-cell centroid fans for ray-based cell picking
    pub pick_triangles: Vec<PickTriangle>,
}

impl DualMesh {
    /// Build the dual mesh from a primal icosphere
    ///
    /// Boundary ordering is CCW seen from outside the sphere: incident faces
    /// are sorted by the angle of their centroid's projection into a tangent
    /// frame at the owning vertex.
    pub fn build(primal: &PrimalMesh, radius: f32) -> Self {
        let vertices: Vec<Vec3> = (0..primal.face_count())
            .map(|f| primal.face_centroid(f) * radius)
            .collect();

        let mut cells = Vec::with_capacity(primal.vertex_count());
        let mut wire_set: HashSet<(usize, usize)> = HashSet::new();
        let mut pick_triangles = Vec::new();

        for v in 0..primal.vertex_count() {
            let boundary = order_boundary(primal, v);
            let degree = boundary.len();

            let neighbors: Vec<usize> = (0..degree)
                .map(|i| resolve_neighbor(primal, v, boundary[i], boundary[(i + 1) % degree]))
                .collect();

            let centroid_dir = normalize_or(
                boundary.iter().map(|&d| vertices[d]).sum::<Vec3>() / degree.max(1) as f32,
                primal.vertices[v],
            );
            let centroid = centroid_dir * radius;

            for i in 0..degree {
                let a = boundary[i];
                let b = boundary[(i + 1) % degree];
                wire_set.insert(if a < b { (a, b) } else { (b, a) });
                pick_triangles.push(PickTriangle {
                    cell: v,
                    points: [centroid, vertices[a], vertices[b]],
                });
            }

            cells.push(HexCell {
                id: v,
                is_pentagon: degree == 5,
                boundary,
                neighbors,
                centroid,
                height: 0,
                biome: Biome::default(),
            });
        }

        let mut wire_edges: Vec<[usize; 2]> = wire_set.into_iter().map(|(a, b)| [a, b]).collect();
        wire_edges.sort_unstable();

        Self {
            vertices,
            cells,
            wire_edges,
            pick_triangles,
        }
    }
}

/// Sort the faces incident to vertex `v` into CCW boundary order.
///
/// Projects each face centroid into a tangent frame at the vertex and sorts
/// by angle, so consecutive entries are physically adjacent triangles.
fn order_boundary(primal: &PrimalMesh, v: usize) -> Vec<usize> {
    let normal = primal.vertices[v];
    let (t1, t2) = tangent_basis(normal);

    let mut faces: Vec<(f32, usize)> = primal.vertex_faces[v]
        .iter()
        .map(|&f| {
            let offset = primal.face_centroid(f) - normal;
            let angle = offset.dot(t2).atan2(offset.dot(t1));
            (angle, f)
        })
        .collect();

    faces.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    faces.into_iter().map(|(_, f)| f).collect()
}

/// Find the cell across the boundary edge between faces `f0` and `f1`.
///
/// Both faces contain `v`; the neighbor is the one other vertex they share.
/// On a closed sphere this always exists. The fallback of returning `v`
/// itself keeps downstream height deltas at zero (a flat edge) instead of
/// panicking on a malformed mesh.
fn resolve_neighbor(primal: &PrimalMesh, v: usize, f0: usize, f1: usize) -> usize {
    let t0 = primal.faces[f0];
    let t1 = primal.faces[f1];

    for &candidate in &t0 {
        if candidate != v && t1.contains(&candidate) {
            return candidate;
        }
    }
    v
}
