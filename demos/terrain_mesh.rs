//! Demonstration of terrain mesh generation

use hexplanet::*;

fn main() -> Result<()> {
    println!("Generating planet...");

    let config = PlanetConfigBuilder::new()
        .seed(42)
        .subdivisions(4)?
        .radius(20.0)?
        .build()?;

    let planet = HexPlanet::generate(config)?;
    println!("Generated {} cells", planet.cell_count());

    let pentagons = planet.cells().iter().filter(|c| c.is_pentagon).count();
    println!("  Pentagons: {}", pentagons);
    println!("  Hexagons: {}", planet.cell_count() - pentagons);

    // Generate terrain mesh with default colors
    let color_mapper = BiomeColorMapper::default();
    let tess = TessellationConfig::default();
    let mesh = generate_terrain_mesh(&planet, &tess, &color_mapper);

    println!("\nMesh statistics:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Indices: {}", mesh.indices.len());

    // Memory estimate
    let mem_positions = mesh.positions.len() * 12; // 3 floats * 4 bytes
    let mem_normals = mesh.normals.len() * 12;
    let mem_colors = mesh.colors.len() * 12;
    let mem_indices = mesh.indices.len() * 4;
    let total = mem_positions + mem_normals + mem_colors + mem_indices;
    println!("\nMemory usage:");
    println!("  Positions: {} bytes", mem_positions);
    println!("  Normals: {} bytes", mem_normals);
    println!("  Colors: {} bytes", mem_colors);
    println!("  Indices: {} bytes", mem_indices);
    println!("  Total: {} bytes ({:.2} MB)", total, total as f32 / 1024.0 / 1024.0);

    // Test custom colors
    let custom = BiomeColorMapper {
        ocean: [0.0, 0.2, 0.5],
        plains: [0.3, 0.5, 0.1],
        ..Default::default()
    };
    let _mesh2 = generate_terrain_mesh(&planet, &tess, &custom);
    println!("\nCustom color mapper works!");

    // Caps-only mesh, the cheap preview used while editing terrain
    let caps_only = TessellationConfigBuilder::new()
        .blades(false)
        .corner_fill(false)
        .cliffs(false)
        .build();
    let preview = generate_terrain_mesh(&planet, &caps_only, &color_mapper);
    println!("Caps-only preview: {} triangles", preview.triangle_count());

    // Test a range of subdivision levels
    println!("\n=== Testing subdivision levels ===");
    for level in 0..=5 {
        let config = PlanetConfigBuilder::new()
            .seed(42)
            .subdivisions(level)?
            .radius(20.0)?
            .build()?;

        let planet = HexPlanet::generate(config)?;
        let mesh = generate_terrain_mesh(&planet, &tess, &color_mapper);

        let mem = mesh.positions.len() * 12
            + mesh.normals.len() * 12
            + mesh.colors.len() * 12
            + mesh.indices.len() * 4;

        println!("level {}: {} cells, {} vertices, {} triangles, {:.2} MB",
            level,
            planet.cell_count(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            mem as f32 / 1024.0 / 1024.0
        );
    }

    Ok(())
}
