//! Demonstration of pathfinding and path polyline generation

use hexplanet::*;

fn main() -> Result<()> {
    println!("Generating planet...");

    let config = PlanetConfigBuilder::new()
        .seed(1234)
        .subdivisions(4)?
        .radius(20.0)?
        .build()?;

    let planet = HexPlanet::generate(config)?;
    println!("Generated {} cells", planet.cell_count());

    // Unit-weight graph: path cost equals hop count
    let graph = PathGraph::build(&planet, None);

    let start = 0;
    let goal = planet.cell_count() / 2;
    let path = graph.astar(start, goal);
    println!("\nPath from {} to {}: {} cells", start, goal, path.len());
    println!("  Great-circle estimate: {:.3} rad", graph.heuristic(start, goal));
    println!("  Cells: {:?}", path);

    // Polyline hugging the terrain, slightly biased off the surface
    let line = polyline_on_sphere(&planet, &path, 6, 0.1, 0.15);
    println!("  Polyline points: {}", line.len());
    if let Some(last) = line.last() {
        println!("  Terminates at {:?}", last);
    }

    // Terrain-aware weights: water is ten times as expensive to cross
    let avoid_water = |_: &HexCell, to: &HexCell| -> f32 {
        if to.biome.is_water() {
            10.0
        } else {
            1.0
        }
    };
    let land_graph = PathGraph::build(&planet, Some(&avoid_water));
    let land_path = land_graph.astar(start, goal);
    println!("\nWater-avoiding path: {} cells", land_path.len());

    let crossings = |p: &[usize]| {
        p.iter()
            .filter(|&&id| planet.get_cell(id).map_or(false, |c| c.biome.is_water()))
            .count()
    };
    println!("  Water cells on unit-weight path: {}", crossings(&path));
    println!("  Water cells on weighted path:    {}", crossings(&land_path));

    // Neighborhood query around the start cell
    let nearby = planet.find_cells_within_radius(start, 2);
    println!("\nCells within 2 hops of {}: {}", start, nearby.len());

    Ok(())
}
