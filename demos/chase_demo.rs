// Demonstration: play the chase game on the default board and print each turn.
//
// Build/run from this repo root:
//   cargo run --example chase_demo -- --turns 30 --seed 3

use std::env;

use qtty::Quantity;
use robogrid::chase::{ChaseConfig, ChaseGame};
use robogrid::TickDriver;

fn main() {
    let args: Vec<String> = env::args().collect();
    let turns: u32 = arg_value(&args, "--turns")
        .and_then(|s| s.parse().ok())
        .unwrap_or(30);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut game = match ChaseGame::new(ChaseConfig::default(), seed) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            std::process::exit(2);
        }
    };

    let mut driver = TickDriver::default();
    driver.play();

    for _ in 0..turns {
        let stepped = match driver.advance(&mut game, Quantity::new(1.0)) {
            Ok(stepped) => stepped,
            Err(err) => {
                eprintln!("driver error: {}", err);
                std::process::exit(1);
            }
        };
        for report in stepped {
            print!(
                "turn {:>3}: P1 {} P2 {}",
                report.turn, report.positions[0], report.positions[1]
            );
            if let Some(conflict) = report.conflict {
                print!(
                    "  conflict won by {:?} ({:.2} vs {:.2})",
                    conflict.winner, conflict.scores[0], conflict.scores[1]
                );
            }
            println!();
        }
        if !game.players_at_goal().is_empty() {
            break;
        }
    }

    println!();
    print!("{}", game.snapshot());
    for player in game.players_at_goal() {
        println!("{} reached the goal", player.name);
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
