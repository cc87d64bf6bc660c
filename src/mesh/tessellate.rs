//! Per-cell terrain geometry: caps, blade strips and corner fills
//!
//! Each cell is tessellated independently; everything that needs both sides
//! of a shared edge (cliff walls, slope corrections) is only *registered*
//! here and emitted later by the deferred pass in [`super::cliffs`].

use glam::Vec3;

use crate::cell::HexCell;
use crate::config::TessellationConfig;
use crate::math::{normalize_or, slerp};
use crate::planet::HexPlanet;

use super::cliffs::{EdgeKind, EdgeRegistry, EdgeSide};
use super::{ColorMapper, MeshBuilder};

/// Classify an edge by the height delta with the neighbor across it.
fn classify(delta: i32, smooth_max_delta: i32) -> EdgeKind {
    if delta == 0 {
        EdgeKind::Flat
    } else if delta.abs() <= smooth_max_delta {
        EdgeKind::Slope
    } else {
        EdgeKind::Cliff
    }
}

/// Emit one cell's geometry and register its edges for the stitching pass.
pub(crate) fn tessellate_cell<C: ColorMapper>(
    planet: &HexPlanet,
    cell: &HexCell,
    config: &TessellationConfig,
    color_mapper: &C,
    builder: &mut MeshBuilder,
    registry: &mut EdgeRegistry,
) {
    let n = cell.degree();
    let up = cell.up();
    let h = cell.height as f32;
    let owner = cell.id as u32;
    let color = color_mapper.map_color(&cell.biome, cell.height);

    let dual_vertices = planet.dual_vertices();
    let cells = planet.cells();

    // Unit directions of the boundary corners.
    let b_dir: Vec<Vec3> = cell
        .boundary
        .iter()
        .map(|&d| normalize_or(dual_vertices[d], up))
        .collect();

    // Edge classification and blade heights. On a Slope edge the blade drops
    // (or rises) to the midpoint of the two cells' heights, forming half of a
    // continuous ramp; Flat and Cliff edges keep the cell's own height, the
    // vertical step being deferred to the cliff pass.
    let mut kinds = Vec::with_capacity(n);
    let mut blade_h = Vec::with_capacity(n);
    for i in 0..n {
        let neighbor_h = cells[cell.neighbors[i]].height;
        let kind = classify(neighbor_h - cell.height, config.smooth_max_delta);
        kinds.push(kind);
        blade_h.push(match kind {
            EdgeKind::Slope => (cell.height + neighbor_h) as f32 / 2.0,
            EdgeKind::Flat | EdgeKind::Cliff => h,
        });
    }

    // Inner ring: boundary corners pulled toward the centroid, at the cell's
    // own height. Outer directions: corners trimmed by outer_trim (0 keeps
    // the exact shared boundary, which is what makes flat edges watertight).
    let inner: Vec<Vec3> = b_dir
        .iter()
        .map(|&d| builder.lift(slerp(d, up, config.inset), h))
        .collect();
    let outer_dir: Vec<Vec3> = b_dir
        .iter()
        .map(|&d| slerp(d, up, config.outer_trim))
        .collect();

    // Corner apex heights: the blend of the cell's height with whatever
    // slope ramps meet at the corner. With no adjacent Slope edge the apex
    // stays at the cell's height.
    let mut apex_h = Vec::with_capacity(n);
    for i in 0..n {
        let prev = (i + n - 1) % n;
        let mut sum = h;
        let mut count = 1.0;
        for e in [prev, i] {
            if kinds[e] == EdgeKind::Slope {
                sum += blade_h[e];
                count += 1.0;
            }
        }
        apex_h.push(sum / count);
    }

    if config.caps {
        let cap_apex = builder.lift(up, h);
        for i in 0..n {
            builder.push_tri(cap_apex, inner[i], inner[(i + 1) % n], up, color, owner);
        }
    }

    if config.blades {
        for i in 0..n {
            let j = (i + 1) % n;
            let oa = builder.lift(outer_dir[i], blade_h[i]);
            let ob = builder.lift(outer_dir[j], blade_h[i]);
            let hint = normalize_or(inner[i] + inner[j] + oa + ob, up);
            builder.push_quad(inner[i], inner[j], ob, oa, hint, color, owner);
        }
    }

    if config.corner_fill {
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let o_prev = builder.lift(outer_dir[i], blade_h[prev]);
            let o_next = builder.lift(outer_dir[i], blade_h[i]);
            let apex = builder.lift(outer_dir[i], apex_h[i]);
            let hint = normalize_or(inner[i] + apex, up);
            builder.push_tri(inner[i], o_prev, apex, hint, color, owner);
            builder.push_tri(inner[i], apex, o_next, hint, color, owner);
        }
    }

    // Register every edge for the deferred pass, in this cell's traversal
    // order; the registry canonicalizes endpoint order per key.
    for i in 0..n {
        let j = (i + 1) % n;
        let side = EdgeSide {
            cell: owner,
            height: cell.height,
            kind: kinds[i],
            outer_a: builder.lift(outer_dir[i], blade_h[i]),
            outer_b: builder.lift(outer_dir[j], blade_h[i]),
            apex_a: builder.lift(outer_dir[i], apex_h[i]),
            apex_b: builder.lift(outer_dir[j], apex_h[j]),
            centroid_dir: up,
            color,
        };
        registry.register(cell.boundary[i], cell.boundary[j], side);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlanetConfigBuilder, TessellationConfig};
    use crate::mesh::BiomeColorMapper;
    use crate::terrain::FlatSampler;

    #[test]
    fn test_shared_edge_blade_points_identical() {
        // On a uniform-height planet with outer_trim = 0, both cells of
        // every shared edge must register numerically identical blade
        // endpoints and corner apexes. Any divergence is a crack in the
        // surface.
        let config = PlanetConfigBuilder::new()
            .seed(9)
            .subdivisions(2)
            .unwrap()
            .build()
            .unwrap();
        let planet = HexPlanet::generate_with_sampler(config, &FlatSampler::default()).unwrap();

        let tess = TessellationConfig::default();
        assert_eq!(tess.outer_trim, 0.0);
        let mapper = BiomeColorMapper::default();
        let mut builder = MeshBuilder::new(planet.radius(), tess.height_step);
        let mut registry = EdgeRegistry::new();

        for cell in planet.cells() {
            tessellate_cell(&planet, cell, &tess, &mapper, &mut builder, &mut registry);
        }

        assert!(registry.all_paired());
        for (s0, s1) in registry.paired_sides() {
            assert_ne!(s0.cell, s1.cell);
            assert_eq!(s0.outer_a, s1.outer_a);
            assert_eq!(s0.outer_b, s1.outer_b);
            // Equal heights everywhere, so the apexes coincide too.
            assert_eq!(s0.apex_a, s1.apex_a);
            assert_eq!(s0.apex_b, s1.apex_b);
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0, 1), EdgeKind::Flat);
        assert_eq!(classify(1, 1), EdgeKind::Slope);
        assert_eq!(classify(-1, 1), EdgeKind::Slope);
        assert_eq!(classify(2, 1), EdgeKind::Cliff);
        assert_eq!(classify(-2, 1), EdgeKind::Cliff);
        assert_eq!(classify(3, 3), EdgeKind::Slope);
        // Zero threshold turns every non-flat edge into a cliff
        assert_eq!(classify(1, 0), EdgeKind::Cliff);
    }
}
