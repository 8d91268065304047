//! Seeded map generation
//!
//! The same `MapConfig` (including its seed) always yields the same grid.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::MapConfig;
use crate::economy::ResourceKind;
use crate::map::grid::{Cell, HexGrid};
use crate::map::hex::HexCoord;
use crate::map::terrain::Terrain;

/// Generate a hexagonal map with terrain and resource deposits
pub fn generate_map(config: &MapConfig) -> HexGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    // hexes_in_range yields (q, r) order, so rng draws are stable per seed
    let cells: Vec<Cell> = HexCoord::ORIGIN
        .hexes_in_range(config.radius)
        .into_iter()
        .map(|coord| {
            let mut cell = Cell::new(coord, generate_terrain(coord, config, &mut rng));
            if rng.gen::<f32>() < config.resource_chance {
                cell.resource = Some(random_resource(&mut rng));
            }
            cell
        })
        .collect();

    HexGrid::from_cells(cells)
}

fn generate_terrain(coord: HexCoord, config: &MapConfig, rng: &mut ChaCha8Rng) -> Terrain {
    let noise = simple_noise(coord, config.seed);

    if noise > 0.6 && rng.gen::<f32>() < config.mountain_frequency {
        return Terrain::Mountain;
    }

    if noise > 0.3 && rng.gen::<f32>() < config.forest_frequency {
        return Terrain::Forest;
    }

    Terrain::Plains
}

fn random_resource(rng: &mut ChaCha8Rng) -> ResourceKind {
    match rng.gen_range(0..3) {
        0 => ResourceKind::Wood,
        1 => ResourceKind::Gold,
        _ => ResourceKind::Food,
    }
}

fn simple_noise(coord: HexCoord, seed: u64) -> f32 {
    // Very simple pseudo-noise
    let n = (coord.q as i64 as u64)
        .wrapping_mul(374761393)
        .wrapping_add((coord.r as i64 as u64).wrapping_mul(668265263))
        .wrapping_add(seed);
    let n = n.wrapping_mul(n).wrapping_mul(n);
    (n as f32) / (u64::MAX as f32)
}
