//! Level construction: random walls, reachability-checked treasure
//! placement, and the magnet item from level two onward.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

use crate::game::pathfinding::reachable_from;
use crate::game::visibility::reveal_around;
use crate::state::Map;
use crate::types::{GRID, PLAYER_SPAWN, Pos, REVEAL_RADIUS, TileKind};

use super::model::GeneratedLevel;
use super::seed::derive_level_seed;

const GRID_I: i32 = GRID as i32;

const BASE_WALL_CHANCE: f64 = 0.08;
const WALL_CHANCE_PER_LEVEL: f64 = 0.03;
const MAX_WALL_CHANCE: f64 = 0.35;
const BASE_TREASURE_COUNT: u32 = 4;
const TREASURE_LEVEL_CAP: u32 = 8;
/// The magnet item only appears once the player has seen a plain level.
const FIRST_MAGNET_LEVEL: u32 = 2;

pub struct LevelGenerator {
    run_seed: u64,
}

impl LevelGenerator {
    pub fn new(run_seed: u64) -> Self {
        Self { run_seed }
    }

    pub fn generate(&self, level: u32) -> GeneratedLevel {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_level_seed(self.run_seed, level));
        let mut map = Map::new();

        let wall_chance =
            (BASE_WALL_CHANCE + WALL_CHANCE_PER_LEVEL * f64::from(level)).min(MAX_WALL_CHANCE);
        for y in 1..(GRID_I - 1) {
            for x in 1..(GRID_I - 1) {
                if unit_interval(&mut rng) < wall_chance {
                    map.set_tile(Pos { y, x }, TileKind::Wall).expect("interior cell");
                }
            }
        }
        map.set_tile(PLAYER_SPAWN, TileKind::Floor).expect("spawn is an interior cell");

        // Candidates come out of the reachable set, so every treasure is
        // collectable no matter how the walls fell.
        let mut candidates: Vec<Pos> = reachable_from(&map, PLAYER_SPAWN)
            .into_iter()
            .filter(|&p| p != PLAYER_SPAWN)
            .collect();
        shuffle(&mut rng, &mut candidates);

        let desired = BASE_TREASURE_COUNT + level.min(TREASURE_LEVEL_CAP);
        let treasure_count = (desired as usize).min(candidates.len());
        for &pos in &candidates[..treasure_count] {
            map.set_tile(pos, TileKind::Treasure).expect("candidate is on the grid");
        }

        if level >= FIRST_MAGNET_LEVEL {
            let open: Vec<Pos> = candidates[treasure_count..]
                .iter()
                .copied()
                .filter(|&p| map.tile_at(p) == TileKind::Floor)
                .collect();
            if !open.is_empty() {
                let pick = open[rng.next_u64() as usize % open.len()];
                map.set_tile(pick, TileKind::Magnet).expect("candidate is on the grid");
            }
        }

        reveal_around(&mut map, PLAYER_SPAWN, REVEAL_RADIUS);

        GeneratedLevel { map, spawn: PLAYER_SPAWN, treasure_count: treasure_count as u32 }
    }
}

fn unit_interval(rng: &mut ChaCha8Rng) -> f64 {
    // 53 uniform bits, the usual double-precision [0, 1) construction.
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

fn shuffle(rng: &mut ChaCha8Rng, cells: &mut [Pos]) {
    for i in (1..cells.len()).rev() {
        let j = rng.next_u64() as usize % (i + 1);
        cells.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn tiles_of(generated: &GeneratedLevel, kind: TileKind) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..GRID_I {
            for x in 0..GRID_I {
                let pos = Pos { y, x };
                if generated.map.tile_at(pos) == kind {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    /// Treasures and the magnet are walkable, so the reachable set after
    /// placement equals the candidate pool the generator drew from.
    fn candidate_pool(generated: &GeneratedLevel) -> usize {
        reachable_from(&generated.map, generated.spawn).len() - 1
    }

    #[test]
    fn borders_are_walls_and_spawn_is_floor() {
        for seed in [1_u64, 7, 42, 9_999] {
            let generated = generate_case(seed, 3);
            for i in 0..GRID_I {
                assert_eq!(generated.map.tile_at(Pos { y: 0, x: i }), TileKind::Wall);
                assert_eq!(generated.map.tile_at(Pos { y: GRID_I - 1, x: i }), TileKind::Wall);
                assert_eq!(generated.map.tile_at(Pos { y: i, x: 0 }), TileKind::Wall);
                assert_eq!(generated.map.tile_at(Pos { y: i, x: GRID_I - 1 }), TileKind::Wall);
            }
            assert_eq!(generated.map.tile_at(generated.spawn), TileKind::Floor);
        }
    }

    #[test]
    fn treasure_count_follows_the_level_curve() {
        for seed in 0..20_u64 {
            for level in [1, 5, 9, 40] {
                let generated = generate_case(seed, level);
                let desired = (BASE_TREASURE_COUNT + level.min(TREASURE_LEVEL_CAP)) as usize;
                assert_eq!(
                    generated.treasure_count as usize,
                    desired.min(candidate_pool(&generated)),
                    "count off the curve for seed={seed} level={level}"
                );
            }
        }

        let max_at_level_1 =
            (0..20_u64).map(|seed| generate_case(seed, 1).treasure_count).max();
        assert_eq!(max_at_level_1, Some(5));

        // The per-level bonus saturates at +8.
        let max_at_level_40 =
            (0..20_u64).map(|seed| generate_case(seed, 40).treasure_count).max();
        assert_eq!(max_at_level_40, Some(12));
    }

    #[test]
    fn magnet_item_appears_from_level_two_onward() {
        for seed in 0..20_u64 {
            assert!(tiles_of(&generate_case(seed, 1), TileKind::Magnet).is_empty());

            let generated = generate_case(seed, 2);
            let open = candidate_pool(&generated) - generated.treasure_count as usize;
            let magnets = tiles_of(&generated, TileKind::Magnet).len();
            assert_eq!(magnets, usize::from(open > 0), "seed={seed}");
        }
    }

    #[test]
    fn spawn_surroundings_are_revealed_and_the_far_corner_is_not() {
        let generated = generate_case(21, 4);
        assert!(generated.map.is_revealed(generated.spawn));
        assert!(generated.map.is_revealed(Pos { y: 1, x: 5 }));
        assert!(!generated.map.is_revealed(Pos { y: GRID_I - 2, x: GRID_I - 2 }));
    }

    #[test]
    fn same_inputs_produce_byte_identical_levels() {
        let a = generate_case(123_456, 2);
        let b = generate_case(123_456, 2);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
    }

    #[test]
    fn changing_the_level_changes_the_output_for_the_same_seed() {
        let level_1 = generate_case(123_456, 1);
        let level_2 = generate_case(123_456, 2);
        assert_ne!(level_1.canonical_bytes(), level_2.canonical_bytes());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]
        #[test]
        fn every_treasure_is_reachable_from_spawn(seed in any::<u64>(), level in 1_u32..=12) {
            let generated = generate_case(seed, level);
            let reachable = reachable_from(&generated.map, generated.spawn);
            let treasures = tiles_of(&generated, TileKind::Treasure);
            prop_assert_eq!(treasures.len(), generated.treasure_count as usize);
            for pos in treasures {
                prop_assert!(reachable.contains(&pos), "unreachable treasure at {:?}", pos);
            }
            for pos in tiles_of(&generated, TileKind::Magnet) {
                prop_assert!(reachable.contains(&pos), "unreachable magnet at {:?}", pos);
            }
        }
    }

    fn generate_case(seed: u64, level: u32) -> GeneratedLevel {
        LevelGenerator::new(seed).generate(level)
    }
}
