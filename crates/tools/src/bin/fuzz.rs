use anyhow::Result;
use clap::Parser;
use nugget_core::{GRID, Game, Pos, TileKind};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} turns...", args.seed, args.turns);
    let mut game = Game::new(args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut last_score = 0;
    let mut last_revealed = 0;
    let mut last_level = game.state().level;

    for _ in 0..args.turns {
        if rng.next_u64() % 4 < 3 {
            let dirs = [(1, 0), (-1, 0), (0, 1), (0, -1)];
            let (dx, dy) = dirs[rng.next_u64() as usize % dirs.len()];
            game.attempt_move(dx, dy);
            game.end_step_window();
        } else {
            let target = Pos {
                y: (rng.next_u64() % GRID as u64) as i32,
                x: (rng.next_u64() % GRID as u64) as i32,
            };
            if game.travel_to(target) {
                while game.step_path() {
                    game.end_step_window();
                }
            }
        }

        // Assert invariants
        let state = game.state();
        assert!(
            state.map.tile_at(state.player.pos) != TileKind::Wall,
            "Invariant failed: player inside a wall"
        );
        let treasure_tiles =
            state.map.tiles.iter().filter(|&&t| t == TileKind::Treasure).count() as u32;
        assert_eq!(
            treasure_tiles, state.treasures_remaining,
            "Invariant failed: treasure count drifted from the map"
        );
        assert!(state.score >= last_score, "Invariant failed: score decreased");

        if state.level != last_level {
            last_level = state.level;
            last_revealed = 0;
        }
        let revealed = state.map.revealed.iter().filter(|&&r| r).count();
        assert!(revealed >= last_revealed, "Invariant failed: reveal mask shrank mid-level");

        last_score = state.score;
        last_revealed = revealed;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
