/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use serde::Serialize;
use std::time::Duration;

/* Custom libraries */
use shared::{ElevatorHistory, ElevatorRequest, ElevatorSnapshot, ElevatorStats};
use system::ElevatorSystem;

/* Modules */
mod config;
mod dispatch;
mod elevator;
mod shared;
mod system;

/// End-of-run summary printed to stdout as JSON.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationReport {
    ticks: u64,
    elevators: Vec<ElevatorSnapshot>,
    pending_requests: Vec<ElevatorRequest>,
    histories: Vec<ElevatorHistory>,
    statistics: Vec<ElevatorStats>,
}

fn parse_request(raw: &str) -> Option<(u8, u8)> {
    let (from, to) = raw.split_once(':')?;
    Some((from.trim().parse().ok()?, to.trim().parse().ok()?))
}

/* Main */
fn main() {
    env_logger::init();

    let matches = Command::new("liftsim")
        .about("Multi-elevator dispatch simulator")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("request")
                .long("request")
                .short('r')
                .takes_value(true)
                .multiple_occurrences(true)
                .help("Travel request as from:to, e.g. 3:5 (repeatable)"),
        )
        .arg(
            Arg::new("ticks")
                .long("ticks")
                .takes_value(true)
                .default_value("120")
                .help("Maximum number of ticks to simulate"),
        )
        .get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap();
    let config = crate::unwrap_or_exit!(config::load_config(config_path));
    let max_ticks = crate::unwrap_or_exit!(matches.value_of("ticks").unwrap().parse::<u64>());

    // Create the engine and seed the requested journeys
    let mut system = ElevatorSystem::new(&config);

    if let Some(raw_requests) = matches.values_of("request") {
        for raw in raw_requests {
            match parse_request(raw) {
                Some((from_floor, to_floor)) => {
                    match system.add_request(from_floor, to_floor) {
                        Ok(id) => info!("queued {} ({} -> {})", id, from_floor, to_floor),
                        Err(e) => warn!("rejected request '{}': {}", raw, e),
                    }
                }
                None => warn!("malformed request '{}', expected from:to", raw),
            }
        }
    }

    system.start_all();

    // Drive the engine at the configured cadence until every request is
    // served or the tick budget runs out
    let ticker = cbc::tick(Duration::from_millis(config.timing.tick_interval_ms));
    let mut ticks_driven: u64 = 0;

    while ticks_driven < max_ticks {
        if ticker.recv().is_err() {
            break;
        }
        if !system.is_running() {
            continue;
        }

        system.tick();
        ticks_driven += 1;

        for elevator in system.elevators() {
            debug!(
                "tick {}: elevator {} at floor {} ({:?}, queue {:?})",
                system.clock(),
                elevator.id,
                elevator.current_floor,
                elevator.status,
                elevator.destination_queue
            );
        }

        if system.is_settled() {
            info!("all requests served after {} ticks", ticks_driven);
            break;
        }
    }

    let report = SimulationReport {
        ticks: system.clock(),
        elevators: system.elevators(),
        pending_requests: system.pending_requests().to_vec(),
        histories: system.all_histories(),
        statistics: system.statistics(),
    };
    println!("{}", crate::unwrap_or_exit!(serde_json::to_string_pretty(&report)));
}
