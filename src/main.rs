//! tranche-waterfall CLI
//!
//! Run waterfall accounting and simulations on a tranche market from the
//! command line.
//!
//! # Usage
//!
//! ```bash
//! # Derived per-tranche state
//! tranche-waterfall compute --input market.json
//!
//! # Interest flow over three months, as JSON
//! tranche-waterfall interest --input market.json --period 3months --format json
//!
//! # Two losses absorbed by the waterfall
//! tranche-waterfall bad-debt --input market.json --event 0:150 --event 2:40
//!
//! # Generate a random market for testing
//! tranche-waterfall generate --tranches 8 --output market.json
//! ```

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::process;
use tranche_waterfall::core::period::TimePeriod;
use tranche_waterfall::core::tranche::TrancheInput;
use tranche_waterfall::core::validation::validate_collecting;
use tranche_waterfall::simulation::bad_debt::BadDebtEvent;
use tranche_waterfall::simulation::market_generator::{generate_random_market, MarketConfig};
use tranche_waterfall::waterfall::engine::WaterfallEngine;
use tranche_waterfall::waterfall::funding_matrix::compute_funding_matrix;
use tranche_waterfall::waterfall::table::TrancheTable;

fn print_usage() {
    eprintln!(
        r#"tranche-waterfall — waterfall accounting for tranched lending markets

USAGE:
    tranche-waterfall <COMMAND> [OPTIONS]

COMMANDS:
    compute     Compute junior aggregates, free supply, utilization and rates
    interest    Simulate interest accrual over a time period
    bad-debt    Simulate bad-debt absorption
    matrix      Show which lender tranche funds which borrower tranche
    generate    Generate a random tranche market (for testing)
    help        Show this message

OPTIONS (compute, interest, bad-debt, matrix):
    --input <FILE>          Path to JSON market file
    --exclude-pending       Leave pending interest out of supply
    --strict                Reject negative balances and unordered LLTVs
    --format <FORMAT>       Output format: text (default) or json

OPTIONS (interest):
    --period <PERIOD>       1week, 1month (default), 3months or 1year

OPTIONS (bad-debt):
    --event <INDEX:AMOUNT>  Bad debt at a tranche index (repeatable, indices
                            outside the market are ignored)

OPTIONS (generate):
    --tranches <N>          Number of tranches (default: 5)
    --seed <N>              Seed for a reproducible market
    --output <FILE>         Write to file instead of stdout

EXAMPLES:
    tranche-waterfall compute --input market.json
    tranche-waterfall interest --input market.json --period 1year
    tranche-waterfall bad-debt --input market.json --event 1:500
    tranche-waterfall matrix --input market.json --format json
    tranche-waterfall generate --tranches 8 --output market.json"#
    );
}

/// JSON schema for an input market.
#[derive(Serialize, Deserialize)]
struct MarketFile {
    tranches: Vec<TrancheInput>,
}

/// Options shared by every command that reads a market.
struct MarketOptions {
    input_path: Option<String>,
    include_pending: bool,
    strict: bool,
    format: String,
}

impl Default for MarketOptions {
    fn default() -> Self {
        Self {
            input_path: None,
            include_pending: true,
            strict: false,
            format: "text".to_string(),
        }
    }
}

impl MarketOptions {
    /// Consume a shared option at `args[*i]`. Returns false when the option
    /// belongs to the command.
    fn parse(&mut self, args: &[String], i: &mut usize) -> bool {
        match args[*i].as_str() {
            "--input" => {
                *i += 1;
                self.input_path = Some(required_value(args, *i, "--input requires a file path"));
            }
            "--format" => {
                *i += 1;
                self.format = required_value(args, *i, "--format requires 'text' or 'json'");
                if self.format != "text" && self.format != "json" {
                    eprintln!("Unknown format: {}", self.format);
                    process::exit(1);
                }
            }
            "--exclude-pending" => self.include_pending = false,
            "--strict" => self.strict = true,
            _ => return false,
        }
        true
    }

    fn json(&self) -> bool {
        self.format == "json"
    }

    fn load(&self) -> Vec<TrancheInput> {
        let path = self.input_path.as_deref().unwrap_or_else(|| {
            eprintln!("Error: --input <FILE> is required");
            process::exit(1);
        });
        let tranches = load_market(path);

        if self.strict {
            let violations = validate_collecting(&tranches);
            if !violations.is_empty() {
                for violation in &violations {
                    eprintln!("Invalid market: {}", violation);
                }
                process::exit(1);
            }
        }
        tranches
    }
}

fn required_value(args: &[String], i: usize, message: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{}", message);
        process::exit(1);
    })
}

fn unknown_option(option: &str) -> ! {
    eprintln!("Unknown option: {}", option);
    process::exit(1);
}

fn load_market(path: &str) -> Vec<TrancheInput> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: MarketFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "tranches": [
    {{ "id": 0, "lltv": 75, "supplyAssets": "1000", "borrowAssets": "500", "pendingInterest": "0", "borrowRate": "0.05" }}
  ]
}}"#
        );
        process::exit(1);
    });

    info!("loaded {} tranches from {}", file.tranches.len(), path);
    file.tranches
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn parse_event(raw: &str) -> BadDebtEvent {
    let parsed = raw.split_once(':').and_then(|(index, amount)| {
        Some(BadDebtEvent::new(
            index.trim().parse().ok()?,
            amount.trim().parse().ok()?,
        ))
    });
    parsed.unwrap_or_else(|| {
        eprintln!("Invalid event '{}': expected INDEX:AMOUNT", raw);
        process::exit(1);
    })
}

fn cmd_compute(args: &[String]) {
    let mut options = MarketOptions::default();
    let mut i = 0;
    while i < args.len() {
        if !options.parse(args, &mut i) {
            unknown_option(&args[i]);
        }
        i += 1;
    }

    let tranches = options.load();
    let data = WaterfallEngine::compute_all_tranches(&tranches, options.include_pending);

    if options.json() {
        print_json(&data);
    } else {
        println!("{}", TrancheTable(&data));
    }
}

fn cmd_interest(args: &[String]) {
    let mut options = MarketOptions::default();
    let mut period = TimePeriod::default();
    let mut i = 0;
    while i < args.len() {
        if options.parse(args, &mut i) {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--period" => {
                i += 1;
                let raw = required_value(args, i, "--period requires a time period");
                period = raw.parse().unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                });
            }
            other => unknown_option(other),
        }
        i += 1;
    }

    let tranches = options.load();
    let data = WaterfallEngine::compute_all_tranches(&tranches, options.include_pending);
    let result = WaterfallEngine::simulate_interest_accrual(&data, period);

    if options.json() {
        print_json(&result);
    } else {
        println!("{}", result);
    }
}

fn cmd_bad_debt(args: &[String]) {
    let mut options = MarketOptions::default();
    let mut events = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if options.parse(args, &mut i) {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--event" => {
                i += 1;
                events.push(parse_event(&required_value(
                    args,
                    i,
                    "--event requires INDEX:AMOUNT",
                )));
            }
            other => unknown_option(other),
        }
        i += 1;
    }

    if events.is_empty() {
        eprintln!("Error: at least one --event <INDEX:AMOUNT> is required");
        process::exit(1);
    }

    let tranches = options.load();
    let data = WaterfallEngine::compute_all_tranches(&tranches, options.include_pending);
    let result = WaterfallEngine::simulate_bad_debt(&data, events);

    if options.json() {
        print_json(&result);
    } else {
        println!("{}", result);
    }
}

fn cmd_matrix(args: &[String]) {
    let mut options = MarketOptions::default();
    let mut i = 0;
    while i < args.len() {
        if !options.parse(args, &mut i) {
            unknown_option(&args[i]);
        }
        i += 1;
    }

    let tranches = options.load();
    let matrix = compute_funding_matrix(&tranches, options.include_pending);

    if options.json() {
        print_json(&matrix);
    } else {
        println!("{}", matrix);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = MarketConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--tranches" => {
                i += 1;
                config.tranche_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--tranches requires a number");
                        process::exit(1);
                    });
            }
            "--seed" => {
                i += 1;
                config.seed = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(
                    || {
                        eprintln!("--seed requires a number");
                        process::exit(1);
                    },
                ));
            }
            "--output" => {
                i += 1;
                output_path = Some(required_value(args, i, "--output requires a file path"));
            }
            other => unknown_option(other),
        }
        i += 1;
    }

    let output = MarketFile {
        tranches: generate_random_market(&config),
    };
    let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        eprintln!("Error serializing market: {}", e);
        process::exit(1);
    });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} tranches → {}", output.tranches.len(), path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "compute" => cmd_compute(rest),
        "interest" => cmd_interest(rest),
        "bad-debt" => cmd_bad_debt(rest),
        "matrix" => cmd_matrix(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
