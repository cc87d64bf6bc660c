//! Shortest paths between cells and path polylines on the sphere
//!
//! The adjacency graph is derived on demand from the cells' neighbor lists
//! rather than stored on the planet; building it is cheap and a caller can
//! supply its own edge weights (terrain cost, movement rules) without the
//! planet knowing anything about them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::Vec3;

use crate::cell::HexCell;
use crate::math::{arc_angle, lerp, slerp};
use crate::planet::HexPlanet;

/// Edge weight function: cost of stepping from the first cell to the second.
///
/// Called once per directed edge at graph build time.
pub type WeightFn<'a> = &'a dyn Fn(&HexCell, &HexCell) -> f32;

/// Weighted adjacency graph over planet cells
///
/// Symmetric in structure (every neighbor relation in the dual mesh is
/// mutual) but weights may be asymmetric if the weight function is, e.g.
/// cheaper downhill than uphill.
pub struct PathGraph {
    adjacency: Vec<Vec<(usize, f32)>>,
    centers: Vec<Vec3>,
}

impl PathGraph {
    /// Build the graph from a planet's neighbor lists.
    ///
    /// With no weight function every edge costs 1.0, making path cost equal
    /// hop count. The great-circle heuristic used by [`Self::astar`] is
    /// admissible for these unit weights; a custom function that produces
    /// weights below the angular step between neighbors can make A* return a
    /// non-optimal path.
    pub fn build(planet: &HexPlanet, weight_fn: Option<WeightFn>) -> Self {
        let cells = planet.cells();
        let mut adjacency = Vec::with_capacity(cells.len());

        for cell in cells {
            let mut edges = Vec::with_capacity(cell.neighbors.len());
            for &n in &cell.neighbors {
                if n == cell.id {
                    continue;
                }
                let weight = match weight_fn {
                    Some(f) => f(cell, &cells[n]),
                    None => 1.0,
                };
                edges.push((n, weight));
            }
            adjacency.push(edges);
        }

        Self {
            adjacency,
            centers: cells.iter().map(|c| c.centroid).collect(),
        }
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbors of a node with their edge weights
    pub fn edges(&self, node: usize) -> &[(usize, f32)] {
        &self.adjacency[node]
    }

    /// Great-circle angular distance between two nodes' centers, in radians.
    ///
    /// The A* heuristic; also useful on its own as an "as the crow flies"
    /// distance estimate.
    pub fn heuristic(&self, a: usize, b: usize) -> f32 {
        arc_angle(self.centers[a], self.centers[b])
    }

    /// A* shortest path from `start` to `goal`, inclusive of both.
    ///
    /// Returns `[start]` when start and goal coincide, and an empty vector
    /// when either id is out of range or the goal is unreachable. An empty
    /// result is a normal outcome, not an error; callers with nothing to
    /// draw simply draw nothing.
    pub fn astar(&self, start: usize, goal: usize) -> Vec<usize> {
        let n = self.node_count();
        if start >= n || goal >= n {
            return Vec::new();
        }
        if start == goal {
            return vec![start];
        }

        let mut g_score = vec![f32::INFINITY; n];
        let mut parent = vec![usize::MAX; n];
        let mut open = BinaryHeap::new();

        g_score[start] = 0.0;
        open.push(OpenNode {
            node: start,
            f_score: self.heuristic(start, goal),
        });

        while let Some(OpenNode { node, f_score }) = open.pop() {
            if node == goal {
                return self.reconstruct(&parent, goal);
            }
            // Stale entry; a cheaper route to this node was already expanded.
            if f_score > g_score[node] + self.heuristic(node, goal) {
                continue;
            }

            for &(next, weight) in &self.adjacency[node] {
                let tentative = g_score[node] + weight;
                if tentative < g_score[next] {
                    g_score[next] = tentative;
                    parent[next] = node;
                    open.push(OpenNode {
                        node: next,
                        f_score: tentative + self.heuristic(next, goal),
                    });
                }
            }
        }

        Vec::new()
    }

    fn reconstruct(&self, parent: &[usize], goal: usize) -> Vec<usize> {
        let mut path = vec![goal];
        let mut node = goal;
        while parent[node] != usize::MAX {
            node = parent[node];
            path.push(node);
        }
        path.reverse();
        path
    }
}

/// Open-set entry ordered so the binary max-heap pops the lowest f-score.
struct OpenNode {
    node: usize,
    f_score: f32,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_score.total_cmp(&self.f_score)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Convert a cell-id path into a smooth 3D polyline hugging the terrain.
///
/// Between each consecutive pair of cells the point direction is spherically
/// interpolated (staying on the sphere, unlike linear interpolation which
/// would cut through it) and the radius blends the two cells' heights, plus
/// a constant `bias` to keep the line clear of the terrain surface. The last
/// cell's exact lifted centroid is appended so the polyline terminates at
/// the destination with no interpolation drift.
///
/// `segments_per_edge` is clamped to at least 2. An empty or single-cell
/// path yields a polyline of zero or one point respectively. A path holding
/// any out-of-range cell id (stale after a planet rebuild) yields an empty
/// polyline, the same tolerant posture as the attribute setters.
pub fn polyline_on_sphere(
    planet: &HexPlanet,
    path: &[usize],
    segments_per_edge: usize,
    bias: f32,
    height_step: f32,
) -> Vec<Vec3> {
    let radius = planet.radius();
    let place = |dir: Vec3, h: f32| -> Vec3 { dir * (radius + h * height_step + bias) };

    let cells = planet.cells();
    let mut points = Vec::new();
    if path.is_empty() || path.iter().any(|&id| id >= cells.len()) {
        return points;
    }

    let segments = segments_per_edge.max(2);

    for pair in path.windows(2) {
        let a = &cells[pair[0]];
        let b = &cells[pair[1]];
        let da = a.up();
        let db = b.up();
        for step in 0..segments {
            let t = step as f32 / segments as f32;
            let dir = slerp(da, db, t);
            let h = lerp(a.height as f32, b.height as f32, t);
            points.push(place(dir, h));
        }
    }

    let last = &cells[*path.last().unwrap()];
    points.push(place(last.up(), last.height as f32));
    points
}
