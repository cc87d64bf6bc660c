//! Terrain mesh generation
//!
//! Turns per-cell discrete heights and biomes into a watertight,
//! engine-agnostic triangle mesh: a flat inset cap per cell, blade strips
//! toward each neighbor, corner fill triangles, and a deferred cliff/slope
//! stitching pass across shared edges.
//!
//! The mesh is a deterministic pure function of the planet and the
//! tessellation configuration; it is fully regenerated after any height,
//! biome or topology change, never patched incrementally.

mod cliffs;
mod colors;
mod tessellate;

pub use colors::{BiomeColorMapper, CellColor, ColorMapper};

use glam::Vec3;

use crate::config::TessellationConfig;
use crate::math::normalize_or;
use crate::planet::HexPlanet;

use cliffs::EdgeRegistry;

/// Engine-agnostic terrain mesh output
///
/// Flat buffers suitable for any rendering engine:
/// - Bevy: convert to `Mesh` with attributes
/// - Godot: convert to `ArrayMesh`
/// - wgpu: use directly as vertex buffers
///
/// `owners[t]` is the id of the cell that emitted triangle `t` (cliff walls
/// belong to the higher cell). Used for color-by-cell diagnostics and
/// triangle-level picking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex RGB colors
    pub colors: Vec<[f32; 3]>,
    /// Per-vertex normals (flat-shaded; shared across each triangle)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Owning cell id per triangle, parallel to `indices / 3`
    pub owners: Vec<u32>,
}

impl TerrainMesh {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Generate the terrain mesh for a planet
///
/// Per-cell geometry (caps, blades, corner fills) is emitted independently
/// for each cell; cross-cell cliff walls and slope corrections are stitched
/// in a deferred pass once both sides of every shared edge are known.
pub fn generate_terrain_mesh<C: ColorMapper>(
    planet: &HexPlanet,
    config: &TessellationConfig,
    color_mapper: &C,
) -> TerrainMesh {
    let mut builder = MeshBuilder::new(planet.radius(), config.height_step);
    let mut registry = EdgeRegistry::new();

    for cell in planet.cells() {
        // A degree-2 cell cannot form a polygon. Does not occur on a valid
        // dual mesh.
        if cell.degree() < 3 {
            continue;
        }
        tessellate::tessellate_cell(planet, cell, config, color_mapper, &mut builder, &mut registry);
    }

    if config.cliffs {
        registry.finalize(config, &mut builder);
    }

    builder.mesh
}

/// Accumulates oriented triangles into the flat mesh buffers.
///
/// All winding decisions go through one rule: a triangle whose face normal
/// opposes its outward hint gets its second and third vertices swapped. This
/// guarantees consistent outward winding without a separate back-face pass.
pub(crate) struct MeshBuilder {
    pub mesh: TerrainMesh,
    radius: f32,
    height_step: f32,
}

impl MeshBuilder {
    fn new(radius: f32, height_step: f32) -> Self {
        Self {
            mesh: TerrainMesh::default(),
            radius,
            height_step,
        }
    }

    /// Place a direction at a radial elevation: `unit(dir) * (R + h*step)`.
    ///
    /// The single primitive behind all emitted geometry.
    pub(crate) fn lift(&self, dir: Vec3, height: f32) -> Vec3 {
        normalize_or(dir, Vec3::Y) * (self.radius + height * self.height_step)
    }

    /// Emit one triangle, flat-shaded, wound outward along `hint`.
    ///
    /// Zero-area triangles are still emitted, with the normalized hint as
    /// their normal. Collapsed cliff trapezoids and corner fills keep the
    /// triangle count a function of topology alone, so downstream index
    /// bookkeeping never depends on which corners happened to coincide.
    pub(crate) fn push_tri(
        &mut self,
        a: Vec3,
        mut b: Vec3,
        mut c: Vec3,
        hint: Vec3,
        color: [f32; 3],
        owner: u32,
    ) {
        let mut normal = (b - a).cross(c - a);
        if normal.dot(hint) < 0.0 {
            std::mem::swap(&mut b, &mut c);
            normal = -normal;
        }
        let normal = if normal.length_squared() < 1e-12 {
            normalize_or(hint, Vec3::Y)
        } else {
            normal.normalize()
        };

        let base = self.mesh.positions.len() as u32;
        for p in [a, b, c] {
            self.mesh.positions.push([p.x, p.y, p.z]);
            self.mesh.normals.push([normal.x, normal.y, normal.z]);
            self.mesh.colors.push(color);
        }
        self.mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        self.mesh.owners.push(owner);
    }

    /// Emit a quad as two triangles sharing the `a..c` diagonal.
    pub(crate) fn push_quad(
        &mut self,
        a: Vec3,
        b: Vec3,
        c: Vec3,
        d: Vec3,
        hint: Vec3,
        color: [f32; 3],
        owner: u32,
    ) {
        self.push_tri(a, b, c, hint, color, owner);
        self.push_tri(a, c, d, hint, color, owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlanetConfigBuilder, TessellationConfig, TessellationConfigBuilder};
    use crate::terrain::{Biome, FlatSampler};

    fn flat_planet(level: u32) -> HexPlanet {
        let config = PlanetConfigBuilder::new()
            .seed(42)
            .subdivisions(level)
            .unwrap()
            .build()
            .unwrap();
        HexPlanet::generate_with_sampler(config, &FlatSampler::default()).unwrap()
    }

    #[test]
    fn test_generate_mesh_basic() {
        let planet = flat_planet(2);
        let mesh = generate_terrain_mesh(&planet, &TessellationConfig::default(), &BiomeColorMapper::default());

        assert!(!mesh.is_empty());
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len(), mesh.colors.len());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert_eq!(mesh.owners.len(), mesh.triangle_count());
    }

    #[test]
    fn test_owners_are_valid_cells() {
        let planet = flat_planet(1);
        let mesh = generate_terrain_mesh(&planet, &TessellationConfig::default(), &BiomeColorMapper::default());

        for &owner in &mesh.owners {
            assert!((owner as usize) < planet.cell_count());
        }
    }

    #[test]
    fn test_uniform_planet_has_no_cliffs_or_slopes() {
        // On a uniform-height planet every edge is Flat; disabling the
        // per-cell stages should therefore leave nothing for the stitching
        // pass to emit.
        let planet = flat_planet(2);
        let config = TessellationConfigBuilder::new()
            .caps(false)
            .blades(false)
            .corner_fill(false)
            .build();

        let mesh = generate_terrain_mesh(&planet, &config, &BiomeColorMapper::default());
        assert!(mesh.is_empty(), "flat planet emitted stitch geometry");
    }

    #[test]
    fn test_uniform_planet_watertight_at_shared_edges() {
        // With outer_trim = 0 and uniform heights, both cells of every shared
        // edge must place their blade points at numerically identical
        // positions (no cracks).
        let planet = flat_planet(1);
        let config = TessellationConfigBuilder::new()
            .caps(false)
            .corner_fill(false)
            .cliffs(false)
            .build();
        assert_eq!(config.outer_trim, 0.0);

        let mesh = generate_terrain_mesh(&planet, &config, &BiomeColorMapper::default());

        // Each blade quad's outer edge sits exactly on the dual boundary
        // vertices lifted to height 0, for every cell that touches them.
        let expected_len = planet.radius();
        let mut on_boundary = 0;
        for p in &mesh.positions {
            let len = Vec3::from(*p).length();
            if (len - expected_len).abs() < 1e-4 {
                on_boundary += 1;
            }
        }
        assert!(on_boundary > 0);

        // All positions on a uniform height-0 planet lie on the sphere.
        for p in &mesh.positions {
            let len = Vec3::from(*p).length();
            assert!(
                (len - expected_len).abs() < 1e-3,
                "vertex off the sphere on a flat planet: {:?}",
                p
            );
        }
    }

    #[test]
    fn test_stage_flags_reduce_geometry() {
        let mut planet = flat_planet(1);
        // Introduce some relief so every stage has work to do.
        planet.set_height(0, 3);
        planet.set_height(7, -2);

        let full = generate_terrain_mesh(&planet, &TessellationConfig::default(), &BiomeColorMapper::default());

        let no_caps_cfg = TessellationConfigBuilder::new().caps(false).build();
        let no_caps = generate_terrain_mesh(&planet, &no_caps_cfg, &BiomeColorMapper::default());

        assert!(no_caps.triangle_count() < full.triangle_count());
    }

    #[test]
    fn test_normals_point_outward_on_flat_planet() {
        let planet = flat_planet(1);
        let mesh = generate_terrain_mesh(&planet, &TessellationConfig::default(), &BiomeColorMapper::default());

        // Flat-shaded triples share a normal; every normal on a uniform
        // planet must have a positive radial component.
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let radial = Vec3::from(*p).normalize();
            let normal = Vec3::from(*n);
            assert!(
                normal.dot(radial) > 0.0,
                "inward-facing normal {:?} at {:?}",
                n,
                p
            );
        }
    }

    #[test]
    fn test_raised_pentagon_triangle_budget() {
        // Raise pentagon cell 0 far enough that all 5 of its edges become
        // cliffs. Its triangle budget is then exact: 5 cap fan triangles,
        // 10 blade triangles, 10 corner fill triangles, and 6 wall triangles
        // per cliff edge (owned by the higher cell) for 30 more.
        let mut planet = flat_planet(1);
        planet.set_height(0, 3);

        let mesh = generate_terrain_mesh(&planet, &TessellationConfig::default(), &BiomeColorMapper::default());

        let owned = mesh.owners.iter().filter(|&&o| o == 0).count();
        assert_eq!(owned, 5 + 10 + 10 + 30);
    }

    #[test]
    fn test_mesh_determinism() {
        let mut planet = flat_planet(2);
        planet.set_height(10, 2);
        planet.set_height(11, -1);
        planet.set_biome(10, Biome::Mountain);

        let config = TessellationConfig::default();
        let mapper = BiomeColorMapper::default();

        let a = generate_terrain_mesh(&planet, &config, &mapper);
        let b = generate_terrain_mesh(&planet, &config, &mapper);
        assert_eq!(a, b, "rebuild must be byte-identical");
    }
}
