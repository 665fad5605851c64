//! NPC random-walk movement
//!
//! One tick moves every NPC independently by a random step of -1, 0 or +1 on
//! each axis. Destinations are clamped to the grid and rejected if they are
//! water. NPCs may share a tile.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::npc::Npc;
use crate::terrain::Grid;
use crate::tilemap::Coord;

/// Clamp `pos + delta` into `0..len`.
fn step_axis(pos: usize, delta: i64, len: usize) -> usize {
    (pos as i64 + delta).clamp(0, len as i64 - 1) as usize
}

/// Pick a destination for one NPC. Returns `None` when the NPC stays put.
fn propose_move(position: Coord, grid: &Grid, rng: &mut ChaCha8Rng) -> Option<Coord> {
    let dx: i64 = rng.gen_range(-1..=1);
    let dy: i64 = rng.gen_range(-1..=1);

    let target = Coord::new(
        step_axis(position.x, dx, grid.width),
        step_axis(position.y, dy, grid.height),
    );

    if target != position && grid.at(target).is_passable() {
        Some(target)
    } else {
        None
    }
}

/// Advance every NPC by one tick. Returns how many NPCs changed tile.
pub fn step_npcs(npcs: &mut [Npc], grid: &Grid, rng: &mut ChaCha8Rng) -> usize {
    let mut moved = 0;
    for npc in npcs.iter_mut() {
        if let Some(target) = propose_move(npc.position, grid, rng) {
            npc.position = target;
            moved += 1;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npc::{NpcKind, TradeOffer};
    use crate::terrain::TerrainKind::{self, *};
    use crate::tilemap::Tilemap;
    use rand::SeedableRng;

    fn npc_at(x: usize, y: usize) -> Npc {
        Npc {
            kind: NpcKind::Wanderer,
            position: Coord::new(x, y),
            origin: Coord::new(x, y),
            dialogue: String::new(),
            trade_offer: TradeOffer {
                item: "Stone".to_string(),
                price: 1,
            },
        }
    }

    #[test]
    fn test_npcs_never_enter_water_or_leave_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let kinds: Vec<TerrainKind> = (0..144)
            .map(|_| TerrainKind::natural()[rng.gen_range(0..5)])
            .collect();
        let grid = Tilemap::from_vec(12, 12, kinds).unwrap();

        let mut npcs: Vec<Npc> = grid
            .iter()
            .filter(|(_, _, k)| k.is_passable())
            .take(10)
            .map(|(x, y, _)| npc_at(x, y))
            .collect();

        for _ in 0..500 {
            step_npcs(&mut npcs, &grid, &mut rng);
            for npc in &npcs {
                assert!(grid.in_bounds(npc.position.x, npc.position.y));
                assert_ne!(*grid.at(npc.position), Water);
            }
        }
    }

    #[test]
    fn test_npc_surrounded_by_water_stays_put() {
        let mut grid = Tilemap::new_with(3, 3, Water);
        grid.set(1, 1, Grass);
        let mut npcs = vec![npc_at(1, 1)];
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        for _ in 0..100 {
            assert_eq!(step_npcs(&mut npcs, &grid, &mut rng), 0);
            assert_eq!(npcs[0].position, Coord::new(1, 1));
        }
    }

    #[test]
    fn test_single_tile_grid_never_moves() {
        let grid = Tilemap::new_with(1, 1, Forest);
        let mut npcs = vec![npc_at(0, 0), npc_at(0, 0)];
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..20 {
            step_npcs(&mut npcs, &grid, &mut rng);
        }
        assert!(npcs.iter().all(|n| n.position == Coord::new(0, 0)));
    }

    #[test]
    fn test_moves_are_single_steps() {
        let grid = Tilemap::new_with(10, 10, Grass);
        let mut npcs = vec![npc_at(5, 5)];
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut moved_total = 0;

        for _ in 0..200 {
            let before = npcs[0].position;
            moved_total += step_npcs(&mut npcs, &grid, &mut rng);
            let after = npcs[0].position;
            assert!((before.x as i64 - after.x as i64).abs() <= 1);
            assert!((before.y as i64 - after.y as i64).abs() <= 1);
        }
        assert!(moved_total > 0);
    }

    #[test]
    fn test_npcs_may_share_a_tile() {
        // A 2x1 corridor with water on one side: both NPCs end up on the
        // only passable tile.
        let grid = Tilemap::from_vec(2, 1, vec![Grass, Water]).unwrap();
        let mut npcs = vec![npc_at(0, 0), npc_at(0, 0)];
        step_npcs(&mut npcs, &grid, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(npcs[0].position, npcs[1].position);
    }

    #[test]
    fn test_step_axis_clamps() {
        assert_eq!(step_axis(0, -1, 5), 0);
        assert_eq!(step_axis(4, 1, 5), 4);
        assert_eq!(step_axis(2, 1, 5), 3);
    }
}
