//! Seeded 3D Perlin noise with fractal octaves
//!
//! Used by [`NoiseSampler`](super::NoiseSampler) to paint heights and biomes.
//! The permutation table is Ken Perlin's reference table; it must stay fixed
//! so a given seed always reproduces the same terrain.

use glam::Vec3;

/// Parameters for fractal (multi-octave) noise sampling
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseConfig {
    /// Base frequency; lower values produce larger features
    pub base_frequency: f32,
    /// Number of detail octaves
    pub octaves: usize,
    /// Amplitude decay per octave
    pub persistence: f32,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            base_frequency: 0.8,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

const PERM: [u32; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Seed-mixed lattice hash: LCG-scrambled seed XORed into the coordinates,
/// then a three-level permutation table lookup.
#[inline]
fn hash(x: i32, y: i32, z: i32, seed: u32) -> u32 {
    let seed_hash = (seed.wrapping_mul(1103515245).wrapping_add(12345)) >> 16;
    let ix = ((x as u32) ^ seed_hash) & 255;
    let iy = ((y as u32) ^ (seed_hash >> 8)) & 255;
    let iz = ((z as u32) ^ (seed_hash >> 16)) & 255;
    let a = PERM[ix as usize];
    let b = PERM[((a + iy) & 255) as usize];
    PERM[((b + iz) & 255) as usize]
}

/// Dot product with one of the 12 cube-edge gradient directions.
#[inline]
fn gradient(hash_value: u32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash_value & 15;

    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };

    let su = if (h & 1) == 0 { -u } else { u };
    let sv = if (h & 2) == 0 { -v } else { v };

    su + sv
}

/// Perlin's quintic fade: 6t^5 - 15t^4 + 10t^3
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Single-octave 3D Perlin noise in `[-1, 1]`
fn perlin_3d(pos: Vec3, seed: u32) -> f32 {
    let x0 = pos.x.floor() as i32;
    let y0 = pos.y.floor() as i32;
    let z0 = pos.z.floor() as i32;

    let xf = pos.x - pos.x.floor();
    let yf = pos.y - pos.y.floor();
    let zf = pos.z - pos.z.floor();

    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    let g000 = gradient(hash(x0, y0, z0, seed), xf, yf, zf);
    let g100 = gradient(hash(x0 + 1, y0, z0, seed), xf - 1.0, yf, zf);
    let g010 = gradient(hash(x0, y0 + 1, z0, seed), xf, yf - 1.0, zf);
    let g110 = gradient(hash(x0 + 1, y0 + 1, z0, seed), xf - 1.0, yf - 1.0, zf);
    let g001 = gradient(hash(x0, y0, z0 + 1, seed), xf, yf, zf - 1.0);
    let g101 = gradient(hash(x0 + 1, y0, z0 + 1, seed), xf - 1.0, yf, zf - 1.0);
    let g011 = gradient(hash(x0, y0 + 1, z0 + 1, seed), xf, yf - 1.0, zf - 1.0);
    let g111 = gradient(hash(x0 + 1, y0 + 1, z0 + 1, seed), xf - 1.0, yf - 1.0, zf - 1.0);

    let x00 = lerp(g000, g100, u);
    let x10 = lerp(g010, g110, u);
    let x01 = lerp(g001, g101, u);
    let x11 = lerp(g011, g111, u);

    lerp(lerp(x00, x10, v), lerp(x01, x11, v), w)
}

/// Fractal Brownian Motion: layered octaves of Perlin noise.
///
/// Returns a value in approximately `[-1, 1]`, normalized by the total
/// octave amplitude.
pub fn sample_fbm(position: Vec3, seed: u32, config: &NoiseConfig) -> f32 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = config.base_frequency;
    let mut max_value = 0.0;

    for _ in 0..config.octaves {
        total += perlin_3d(position * frequency, seed) * amplitude;
        max_value += amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    total / max_value
}
