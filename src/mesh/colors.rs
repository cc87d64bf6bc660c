//! Color mapping for terrain mesh generation

use crate::terrain::Biome;

/// RGB color type used in the terrain mesh color buffer
pub type CellColor = [f32; 3];

/// Trait for mapping cell attributes to colors
pub trait ColorMapper {
    /// Map a biome and discrete height to an RGB color
    fn map_color(&self, biome: &Biome, height: i32) -> CellColor;
}

/// Default color mapper with per-biome base colors and height shading
///
/// Base colors are public so callers can re-theme individual biomes:
///
/// ```
/// use hexplanet::*;
///
/// let mapper = BiomeColorMapper {
///     ocean: [0.0, 0.2, 0.5],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct BiomeColorMapper {
    pub ocean: CellColor,
    pub beach: CellColor,
    pub plains: CellColor,
    pub forest: CellColor,
    pub mountain: CellColor,
    pub ice: CellColor,
    /// Brightness change per height step; higher cells render lighter
    pub height_shade: f32,
}

impl Default for BiomeColorMapper {
    fn default() -> Self {
        Self {
            ocean: [0.1, 0.3, 0.7],
            beach: [0.9, 0.8, 0.5],
            plains: [0.2, 0.6, 0.2],
            forest: [0.1, 0.4, 0.15],
            mountain: [0.5, 0.5, 0.5],
            ice: [0.95, 0.95, 1.0],
            height_shade: 0.04,
        }
    }
}

impl ColorMapper for BiomeColorMapper {
    fn map_color(&self, biome: &Biome, height: i32) -> CellColor {
        let base = match biome {
            Biome::Ocean => self.ocean,
            Biome::Beach => self.beach,
            Biome::Plains => self.plains,
            Biome::Forest => self.forest,
            Biome::Mountain => self.mountain,
            Biome::Ice => self.ice,
        };

        let shade = 1.0 + self.height_shade * height as f32;
        [
            (base[0] * shade).clamp(0.0, 1.0),
            (base[1] * shade).clamp(0.0, 1.0),
            (base[2] * shade).clamp(0.0, 1.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biome_colors() {
        let mapper = BiomeColorMapper::default();

        let ocean = mapper.map_color(&Biome::Ocean, 0);
        assert!(ocean[2] > 0.5, "ocean should be blue-dominant");

        let plains = mapper.map_color(&Biome::Plains, 0);
        assert!(plains[1] > 0.5, "plains should be green-dominant");
    }

    #[test]
    fn test_height_shading() {
        let mapper = BiomeColorMapper::default();

        let low = mapper.map_color(&Biome::Plains, 0);
        let high = mapper.map_color(&Biome::Plains, 5);
        assert!(high[1] > low[1], "higher cells should render lighter");

        let sunken = mapper.map_color(&Biome::Plains, -3);
        assert!(sunken[1] < low[1]);
    }

    #[test]
    fn test_colors_stay_in_range() {
        let mapper = BiomeColorMapper::default();
        for height in [-50, 0, 50] {
            let c = mapper.map_color(&Biome::Ice, height);
            for channel in c {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn test_custom_theme() {
        let mapper = BiomeColorMapper {
            ocean: [0.0, 0.2, 0.5],
            height_shade: 0.0,
            ..Default::default()
        };
        assert_eq!(mapper.map_color(&Biome::Ocean, 3), [0.0, 0.2, 0.5]);
    }
}
