//! Scout - command-line lookups against the SC2 Pulse API
//!
//! Usage:
//!   scout player <name> [--race <race>] [--json]
//!   scout team <name> <name>... [--json]
//!   scout duo <name> <name> [--json]
//!
//! Environment variables:
//!   PULSE_API_URL - API base URL (default: https://sc2pulse.nephest.com/sc2/api)
//!   PULSE_TIMEOUT_SECS - Request timeout (default: 10)
//!   SCOUT_HISTORY_KEY_LIMIT - Legacy uids per history request (default: 10)
//!   SCOUT_MIN_MMR / SCOUT_MAX_MMR - Candidate rating band (default: 0 / 5000)
//!   SCOUT_SPARKLINE_DAYS - Sparkline window in days (default: 7, max: 3650)

use chrono::Utc;
use dotenv::dotenv;
use ladderscout::roster::Race;
use ladderscout::{Scout, ScoutConfig};
use log::info;
use serde::Serialize;
use std::env;

const USAGE: &str = "usage: scout player <name> [--race <race>] [--json]\n       scout team <name> <name>... [--json]\n       scout duo <name> <name> [--json]";

#[derive(Debug, PartialEq)]
enum Command {
    Player { name: String, race: Option<Race> },
    Team { names: Vec<String> },
    Duo { first: String, second: String },
}

fn parse_args(args: &[String]) -> Result<(Command, bool), String> {
    let json = args.iter().any(|a| a == "--json");

    let mut race = None;
    let mut positional = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => {}
            "--race" => {
                let alias = iter.next().ok_or("--race needs a value")?;
                race = Some(Race::from_alias(alias).ok_or_else(|| format!("unknown race '{}'", alias))?);
            }
            _ => positional.push(arg.clone()),
        }
    }

    let (mode, rest) = positional.split_first().ok_or(USAGE)?;
    let command = match (mode.as_str(), rest) {
        ("player", [name]) => Command::Player {
            name: name.clone(),
            race,
        },
        ("team", names) if !names.is_empty() => Command::Team {
            names: names.to_vec(),
        },
        ("duo", [first, second]) => Command::Duo {
            first: first.clone(),
            second: second.clone(),
        },
        _ => return Err(USAGE.to_string()),
    };

    Ok((command, json))
}

fn print<T: Serialize + std::fmt::Display>(value: &T, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", value);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (command, json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    let config = ScoutConfig::from_env()?;
    info!("🔎 Scout");
    info!("   ├─ API: {}", config.api_url);
    info!("   └─ Rating band: {}-{}", config.min_rating, config.max_rating);

    let scout = Scout::pulse(config)?;
    let now = Utc::now();

    match command {
        Command::Player { name, race } => {
            let lookup = scout.lookup_player(&name, race).await?;
            print(&lookup.analyze(now).await?, json)?;
        }
        Command::Team { names } => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            print(&scout.lookup_team(&names, now).await?, json)?;
        }
        Command::Duo { first, second } => {
            print(&scout.lookup_duo(&first, &second, now).await?, json)?;
        }
    }

    Ok(())
}
