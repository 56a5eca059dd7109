//! Persistence layer.
//!
//! Saves and loads a round (roster, tee box, score sheet and bets) to and
//! from a JSON file. Ledgers are derived and never written; they are
//! recomputed by a settlement pass after loading. A directory of saved
//! rounds doubles as the season archive, named by date and round name.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::round::Round;

/// Default round file path.
pub const DEFAULT_ROUND_FILE: &str = "fairway_round.json";

/// A round found while scanning an archive directory.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRound {
    pub path: PathBuf,
    pub name: String,
    pub played_on: NaiveDate,
}

/// Archive file name for a round: `YYYY-MM-DD-round-name.json`.
pub fn round_file_name(round: &Round) -> String {
    let mut slug = String::new();
    for c in round.name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        format!("{}.json", round.played_on)
    } else {
        format!("{}-{slug}.json", round.played_on)
    }
}

/// Save a round to a JSON file, creating parent directories.
/// Rounds that would fail validation on load are refused.
pub fn save_round(round: &Round, path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_ROUND_FILE);
    round
        .validate()
        .context(format!("Refusing to save invalid round {}", round.name))?;

    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .context(format!("Failed to create round directory {}", dir.display()))?;
    }

    let json = serde_json::to_string_pretty(round)
        .context("Failed to serialise round")?;

    std::fs::write(path, &json)
        .context(format!("Failed to write round to {path}"))?;

    debug!(path, round = %round.name, bets = round.bets.len(), "Round saved");
    Ok(())
}

/// Save a round into `dir` under its archive file name.
/// Returns the path written.
pub fn archive_round(round: &Round, dir: &str) -> Result<PathBuf> {
    let path = Path::new(dir).join(round_file_name(round));
    let file = path.to_string_lossy();
    save_round(round, Some(&*file))?;
    info!(path = %path.display(), round = %round.name, "Round archived");
    Ok(path)
}

/// Saved rounds in `dir`, oldest first.
/// Files that don't parse as a round are skipped with a warning.
pub fn list_rounds(dir: &str) -> Result<Vec<SavedRound>> {
    let entries = std::fs::read_dir(dir)
        .context(format!("Failed to read round directory {dir}"))?;

    let mut found = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let parsed = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|json| serde_json::from_str::<Round>(&json).map_err(anyhow::Error::from));
        match parsed {
            Ok(round) => found.push(SavedRound {
                path,
                name: round.name,
                played_on: round.played_on,
            }),
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable round file"),
        }
    }

    found.sort_by(|a, b| a.played_on.cmp(&b.played_on).then_with(|| a.path.cmp(&b.path)));
    debug!(dir, rounds = found.len(), "Round directory scanned");
    Ok(found)
}

/// Load a round from a JSON file and re-validate it.
/// Returns None if the file doesn't exist.
pub fn load_round(path: Option<&str>) -> Result<Option<Round>> {
    let path = path.unwrap_or(DEFAULT_ROUND_FILE);

    if !Path::new(path).exists() {
        info!(path, "No saved round found");
        return Ok(None);
    }

    let json = std::fs::read_to_string(path)
        .context(format!("Failed to read round from {path}"))?;

    let round: Round = serde_json::from_str(&json)
        .context(format!("Failed to parse round from {path}"))?;

    round
        .validate()
        .context(format!("Round in {path} failed validation"))?;

    info!(
        path,
        round = %round.name,
        tee = round.tee_box.name(),
        players = round.roster.len(),
        bets = round.bets.len(),
        "Round loaded from disk"
    );

    Ok(Some(round))
}

/// Delete the round file.
pub fn delete_round(path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_ROUND_FILE);
    if Path::new(path).exists() {
        std::fs::remove_file(path)
            .context(format!("Failed to delete round file {path}"))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
