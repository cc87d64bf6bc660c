//! Deferred cliff/slope stitching across shared cell edges
//!
//! During per-cell tessellation each cell registers one [`EdgeSide`] per
//! boundary edge into a registry keyed by the unordered dual-vertex pair.
//! Cells are processed in arbitrary order, so either side may arrive first;
//! once both are present the finalize pass classifies the edge and emits the
//! cross-cell geometry:
//!
//! - **Cliff**: three quads forming a vertical wall (central rectangle plus
//!   one trapezoid per end up to the corner apexes)
//! - **Slope**: nothing unless floating-point drift separated the two sides'
//!   corner apexes, in which case a thin corrective triangle seals each end
//! - **Flat**: nothing; the two cells already tile seamlessly
//!
//! The registry canonicalizes every side so that its `*_a` fields belong to
//! the lower dual-vertex-index end of the edge. Both cells traverse a shared
//! edge in opposite directions (each is CCW around its own center), so
//! exactly one side gets swapped; without this the wall corners pair up
//! crosswise and the wall comes out inverted.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::config::TessellationConfig;
use crate::math::normalize_or;

use super::MeshBuilder;

/// Edge classification by height delta with the neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeKind {
    /// Equal heights; no transition geometry
    Flat,
    /// Small delta rendered as a continuous ramp
    Slope,
    /// Large delta rendered as a vertical wall
    Cliff,
}

/// One cell's view of one of its boundary edges
///
/// Field order convention after registration: `outer_a`/`apex_a` sit at the
/// lower dual-vertex-index end of the edge.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeSide {
    pub cell: u32,
    pub height: i32,
    pub kind: EdgeKind,
    /// Blade outer edge endpoints
    pub outer_a: Vec3,
    pub outer_b: Vec3,
    /// Corner apex points at each end of the edge
    pub apex_a: Vec3,
    pub apex_b: Vec3,
    /// Outward unit direction at the owning cell's center
    pub centroid_dir: Vec3,
    pub color: [f32; 3],
}

/// Registry of edge sides, keyed by canonical (min, max) dual-vertex pair
///
/// A `BTreeMap` keeps finalize order deterministic, which the byte-identical
/// rebuild guarantee depends on.
pub(crate) struct EdgeRegistry {
    entries: BTreeMap<(usize, usize), [Option<EdgeSide>; 2]>,
}

impl EdgeRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register one cell's side of the edge between dual vertices `d0`/`d1`,
    /// with the side's `*_a` fields at the `d0` end.
    pub(crate) fn register(&mut self, d0: usize, d1: usize, mut side: EdgeSide) {
        let key = if d0 < d1 { (d0, d1) } else { (d1, d0) };
        if d0 > d1 {
            std::mem::swap(&mut side.outer_a, &mut side.outer_b);
            std::mem::swap(&mut side.apex_a, &mut side.apex_b);
        }

        let slots = self.entries.entry(key).or_insert([None, None]);
        if slots[0].is_none() {
            slots[0] = Some(side);
        } else if slots[1].is_none() {
            slots[1] = Some(side);
        }
        // A third registration would mean a non-manifold edge; ignored.
    }

    /// Number of registered edge keys
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check that every registered edge has both sides present
    #[cfg(test)]
    pub(crate) fn all_paired(&self) -> bool {
        self.entries
            .values()
            .all(|slots| slots[0].is_some() && slots[1].is_some())
    }

    /// Iterate the fully-registered edges as (side, side) pairs
    #[cfg(test)]
    pub(crate) fn paired_sides(&self) -> impl Iterator<Item = (&EdgeSide, &EdgeSide)> {
        self.entries.values().filter_map(|slots| match slots {
            [Some(s0), Some(s1)] => Some((s0, s1)),
            _ => None,
        })
    }

    /// Emit the cross-cell geometry for every fully-registered edge.
    pub(crate) fn finalize(&self, config: &TessellationConfig, builder: &mut MeshBuilder) {
        for slots in self.entries.values() {
            let (s0, s1) = match slots {
                [Some(s0), Some(s1)] => (s0, s1),
                // A boundary edge with a single side cannot occur on a
                // closed sphere; nothing sensible to emit.
                _ => continue,
            };

            if s0.height == s1.height {
                continue;
            }
            let (hi, lo) = if s0.height > s1.height {
                (s0, s1)
            } else {
                (s1, s0)
            };

            if hi.kind == EdgeKind::Cliff {
                emit_cliff(hi, lo, builder);
            } else {
                emit_slope_correction(hi, lo, config.eps_apex, builder);
            }
        }
    }
}

/// Vertical wall between two cells: a central rectangle between the blade
/// edges plus a trapezoid per end up to the corner apexes. All three quads
/// are owned by the higher cell.
fn emit_cliff(hi: &EdgeSide, lo: &EdgeSide, builder: &mut MeshBuilder) {
    // Wall faces from the higher cell toward the lower one. If the two
    // centroids coincide, fall back to the sum of the four blade corners.
    let hint = normalize_or(
        lo.centroid_dir - hi.centroid_dir,
        normalize_or(hi.outer_a + hi.outer_b + lo.outer_a + lo.outer_b, Vec3::Y),
    );

    builder.push_quad(
        hi.outer_a, hi.outer_b, lo.outer_b, lo.outer_a,
        hint, hi.color, hi.cell,
    );
    builder.push_quad(
        hi.apex_a, hi.outer_a, lo.outer_a, lo.apex_a,
        hint, hi.color, hi.cell,
    );
    builder.push_quad(
        hi.apex_b, hi.outer_b, lo.outer_b, lo.apex_b,
        hint, hi.color, hi.cell,
    );
}

/// Both sides of a slope edge compute the same blended blade height, so the
/// ramp itself is already crack-free; only the corner apexes can drift apart
/// when the cells' other edges blend differently. Seal each end with a thin
/// triangle when the apexes are measurably distinct.
fn emit_slope_correction(
    hi: &EdgeSide,
    lo: &EdgeSide,
    eps_apex: f32,
    builder: &mut MeshBuilder,
) {
    for (pa, pb, anchor) in [
        (hi.apex_a, lo.apex_a, hi.outer_a),
        (hi.apex_b, lo.apex_b, hi.outer_b),
    ] {
        if (pa - pb).length() > eps_apex {
            let hint = normalize_or(pa + pb + anchor, Vec3::Y);
            builder.push_tri(pa, pb, anchor, hint, hi.color, hi.cell);
        }
    }
}
