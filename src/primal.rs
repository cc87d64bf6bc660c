//! Primal mesh: the subdivided icosahedron
//!
//! Builds a unit icosphere by recursive 4-way subdivision of a regular
//! icosahedron. The triangles of this mesh are the "primal" mesh from which
//! the hex/pentagon dual is derived: one dual cell per primal vertex, one
//! dual vertex per primal triangle.

use std::collections::HashMap;

use glam::Vec3;

/// The subdivided icosahedron
///
/// Vertices are unit directions; scaling to the sphere radius happens during
/// dual construction. Immutable once built.
///
/// # Counts
///
/// After `level` subdivisions:
/// - vertices: `12 + 10*(4^level - 1)`
/// - faces: `20 * 4^level`
#[derive(Debug, Clone)]
pub struct PrimalMesh {
    /// Unit vertex positions; index is the vertex identity
    pub vertices: Vec<Vec3>,
    /// CCW-wound triangles as vertex index triples; index is the face
    /// identity and doubles as the dual vertex index
    pub faces: Vec<[usize; 3]>,
    /// For each vertex, the indices of all incident faces (unsorted)
    pub vertex_faces: Vec<Vec<usize>>,
}

impl PrimalMesh {
    /// Build the icosphere at the given subdivision level
    ///
    /// Level 0 is the base icosahedron. Each level splits every face into
    /// four, with edge midpoints deduplicated so shared edges produce exactly
    /// one new vertex. Skipping that dedup would yield a non-manifold,
    /// visually cracked sphere.
    pub fn build(level: u32) -> Self {
        let (mut vertices, mut faces) = icosahedron();

        for _ in 0..level {
            let mut next_faces = Vec::with_capacity(faces.len() * 4);
            // One midpoint cache per pass, keyed on the unordered parent pair
            let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();

            for &[a, b, c] in &faces {
                let ab = midpoint(&mut vertices, &mut midpoints, a, b);
                let bc = midpoint(&mut vertices, &mut midpoints, b, c);
                let ca = midpoint(&mut vertices, &mut midpoints, c, a);

                next_faces.push([a, ab, ca]);
                next_faces.push([b, bc, ab]);
                next_faces.push([c, ca, bc]);
                next_faces.push([ab, bc, ca]);
            }
            faces = next_faces;
        }

        let vertex_faces = build_vertex_faces(vertices.len(), &faces);

        Self {
            vertices,
            faces,
            vertex_faces,
        }
    }

    /// Number of primal vertices (equals the dual cell count)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of primal faces (equals the dual vertex count)
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Centroid of a face, normalized onto the unit sphere
    #[inline]
    pub fn face_centroid(&self, face: usize) -> Vec3 {
        let [a, b, c] = self.faces[face];
        crate::math::normalize_or(
            (self.vertices[a] + self.vertices[b] + self.vertices[c]) / 3.0,
            self.vertices[a],
        )
    }
}

/// The 12 vertices and 20 faces of a regular icosahedron, from the golden
/// ratio, each vertex normalized to unit length. Faces are CCW seen from
/// outside.
fn icosahedron() -> (Vec<Vec3>, Vec<[usize; 3]>) {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let vertices = vec![
        Vec3::new(-1.0, phi, 0.0).normalize(),
        Vec3::new(1.0, phi, 0.0).normalize(),
        Vec3::new(-1.0, -phi, 0.0).normalize(),
        Vec3::new(1.0, -phi, 0.0).normalize(),
        Vec3::new(0.0, -1.0, phi).normalize(),
        Vec3::new(0.0, 1.0, phi).normalize(),
        Vec3::new(0.0, -1.0, -phi).normalize(),
        Vec3::new(0.0, 1.0, -phi).normalize(),
        Vec3::new(phi, 0.0, -1.0).normalize(),
        Vec3::new(phi, 0.0, 1.0).normalize(),
        Vec3::new(-phi, 0.0, -1.0).normalize(),
        Vec3::new(-phi, 0.0, 1.0).normalize(),
    ];

    let faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    (vertices, faces)
}

/// Get or create the normalized midpoint vertex of edge `(a, b)`
fn midpoint(
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(usize, usize), usize>,
    a: usize,
    b: usize,
) -> usize {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }

    let mid = crate::math::normalize_or((vertices[a] + vertices[b]) * 0.5, vertices[a]);
    let idx = vertices.len();
    vertices.push(mid);
    cache.insert(key, idx);
    idx
}

/// Build the vertex -> incident faces adjacency list
fn build_vertex_faces(vertex_count: usize, faces: &[[usize; 3]]) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::with_capacity(6); vertex_count];
    for (face_idx, face) in faces.iter().enumerate() {
        for &v in face {
            adjacency[v].push(face_idx);
        }
    }
    adjacency
}
