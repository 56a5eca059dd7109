//! FAIRWAY: Side-wager settlement engine for a round of golf
//!
//! Entry point. Loads configuration, initialises structured logging,
//! loads a saved round from disk, runs one settlement pass and prints
//! the per-bet breakdown and the per-player ledger.

use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use fairway::config;
use fairway::engine::{Aggregator, SettlementReport};
use fairway::formats::Outcome;
use fairway::round::Round;
use fairway::storage;
use fairway::types::Money;

const BANNER: &str = r#"
 _____ _    ___ ______        ___ __   __
|  ___/ \  |_ _|  _ \ \      / / \\ \ / /
| |_ / _ \  | || |_) \ \ /\ / / _ \\ V /
|  _/ ___ \ | ||  _ < \ V  V / ___ \| |
|_|/_/   \_\___|_| \_\ \_/\_/_/   \_\_|

  Side-wager settlement for the weekend game
  v0.1.0
"#;

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML
    let cfg = config::AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging(&cfg.logging);

    println!("{BANNER}");

    let mut path = std::env::args().nth(1).unwrap_or_else(|| cfg.round.file.clone());

    // A directory is a round archive: settle its most recent round.
    if Path::new(&path).is_dir() {
        let Some(latest) = storage::list_rounds(&path)?.pop() else {
            bail!("No saved rounds in {path}");
        };
        info!(archive = %path, round = %latest.name, played_on = %latest.played_on, "Settling most recent round");
        path = latest.path.to_string_lossy().to_string();
    }

    info!(
        round_file = %path,
        team_share = %cfg.settlement.team_share,
        decimals = cfg.display.decimals,
        "FAIRWAY starting up"
    );

    let Some(round) = storage::load_round(Some(&path))? else {
        bail!("No round found at {path}");
    };

    if let Some(tee) = cfg.round.tee.as_deref() {
        if !tee.eq_ignore_ascii_case(round.tee_box.name()) {
            info!(configured = tee, actual = round.tee_box.name(), "Round uses different tees than configured");
        }
    }

    let aggregator = Aggregator::new(cfg.settlement.team_share);
    let report = round.settle(&aggregator);
    print_report(&round, &report, &cfg.display);

    Ok(())
}

/// Print the per-bet breakdown and the ledger, rounded for display.
fn print_report(round: &Round, report: &SettlementReport, display: &config::DisplayConfig) {
    let money = |amount: Money| format!("{}{}", display.currency, amount.round_dp(display.decimals));

    let course = round.course.as_deref().unwrap_or("(course not set)");
    println!("{} | {} | {}", round.name, round.played_on, course);
    println!("{}", round.tee_box);
    println!();

    for bet in &report.bets {
        let frozen = if bet.from_frozen { " [frozen]" } else { "" };
        println!("{} ({}){frozen}", bet.title, bet.format);
        match &bet.outcome {
            Outcome::HeadToHead(amount) => {
                // Two-party formats list the first side's players first.
                let names: Vec<String> = round
                    .bets
                    .get(bet.bet_id)
                    .map(|b| b.wager.participants())
                    .unwrap_or_default()
                    .iter()
                    .map(|p| round.display_name(p))
                    .collect();
                let (first, second) = names.split_at(names.len() / 2);
                println!("  {} vs {}: {}", first.join(" & "), second.join(" & "), money(*amount));
            }
            Outcome::PerPlayer(map) => {
                for (player, amount) in map {
                    println!("  {:<20} {}", round.display_name(player), money(*amount));
                }
            }
        }
    }

    println!();
    println!("Ledger (team share: {})", report.team_share);
    for (player, amount) in report.ledger.standings() {
        println!("  {:<20} {}", round.display_name(player), money(amount));
    }

    let net = report.ledger.net().round_dp(display.decimals);
    info!(
        bets = report.bets.len(),
        net = %net,
        "Settlement printed"
    );
}

/// Initialise the `tracing` subscriber from `[logging]`.
fn init_logging(logging: &config::LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let json_logging = logging.json || std::env::var("FAIRWAY_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .without_time()
            .init();
    }
}
