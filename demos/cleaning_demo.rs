// Demonstration: dispatch robot vacuums once per second and print the state.
//
// Build/run from this repo root:
//   cargo run --example cleaning_demo -- --seconds 20 --seed 7 --randomize

use std::env;

use qtty::Quantity;
use robogrid::cleaning::{CleaningConfig, CleaningSimulation, TickOutcome};
use robogrid::TickDriver;

fn main() {
    let args: Vec<String> = env::args().collect();
    let seconds: u32 = arg_value(&args, "--seconds")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let randomize = args.iter().any(|a| a == "--randomize");

    let mut sim = match CleaningSimulation::new(CleaningConfig::default(), seed) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            std::process::exit(2);
        }
    };
    if randomize {
        sim.randomize_load();
    }

    let mut driver = TickDriver::default();
    driver.play();

    for second in 1..=seconds {
        let stepped = match driver.advance(&mut sim, Quantity::new(1.0)) {
            Ok(stepped) => stepped,
            Err(err) => {
                eprintln!("driver error: {}", err);
                std::process::exit(1);
            }
        };
        for outcome in stepped {
            if let TickOutcome::Assigned { robot, room, .. } = outcome {
                println!("t={:>3}s  robot {} -> {}", second, robot, room);
            }
        }

        // Top up anyone who ran low while idle.
        let low: Vec<u32> = sim
            .robots()
            .iter()
            .filter(|r| r.is_idle() && r.energy < 20)
            .map(|r| r.id)
            .collect();
        for id in low {
            if let Ok(energy) = sim.recharge(id) {
                println!("t={:>3}s  robot {} recharged to {}", second, id, energy);
            }
        }
    }

    let snapshot = sim.teardown();
    println!();
    for robot in &snapshot.robots {
        println!(
            "robot {}: energy {:>3}, {}, uses {}",
            robot.id, robot.energy, robot.status, robot.usage_count
        );
    }
    for room in &snapshot.rooms {
        println!("{:<12} {:<6} load {}", room.name, room.size.to_string(), room.load);
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
