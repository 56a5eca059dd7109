//! Registry: the owned collection of live bet instances.
//!
//! Bets are added and removed by identity and are otherwise immutable,
//! except that a bet may be frozen against a copy of the score sheet and
//! tee box. A frozen copy is authoritative for that bet's settlement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::formats::{Wager, WagerFormat};
use crate::types::{PlayerId, ScoreSheet, TeeBox, WagerError};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Stable identity of a bet instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetId(pub Uuid);

impl BetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Bet instance
// ---------------------------------------------------------------------------

/// Score sheet and tee box captured for one bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenRound {
    pub sheet: ScoreSheet,
    pub tee_box: TeeBox,
    pub frozen_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetInstance {
    pub id: BetId,
    #[serde(default)]
    pub label: Option<String>,
    pub wager: Wager,
    #[serde(default)]
    pub frozen: Option<FrozenRound>,
}

impl BetInstance {
    pub fn format(&self) -> WagerFormat {
        self.wager.format()
    }

    /// The sheet and tee box this bet settles against: its frozen copy if
    /// it has one, else the live ones passed in.
    pub fn inputs<'a>(&'a self, sheet: &'a ScoreSheet, tee_box: &'a TeeBox) -> (&'a ScoreSheet, &'a TeeBox) {
        match &self.frozen {
            Some(frozen) => (&frozen.sheet, &frozen.tee_box),
            None => (sheet, tee_box),
        }
    }

    /// Label if set, else the format name.
    pub fn title(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.format().to_string())
    }
}

impl fmt::Display for BetInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frozen = if self.frozen.is_some() { " [frozen]" } else { "" };
        write!(f, "{} ({}){frozen}", self.title(), self.format())
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Arena of bet instances, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetRegistry {
    bets: Vec<BetInstance>,
}

impl BetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a wager. Returns its new identity.
    pub fn add(&mut self, wager: Wager, label: Option<String>) -> Result<BetId, WagerError> {
        wager.validate()?;
        let id = BetId::new();
        info!(bet_id = %id, format = %wager.format(), "Bet added");
        self.bets.push(BetInstance { id, label, wager, frozen: None });
        Ok(id)
    }

    /// Remove a bet by identity, returning it.
    pub fn remove(&mut self, id: BetId) -> Result<BetInstance, WagerError> {
        let idx = self.position(id)?;
        let bet = self.bets.remove(idx);
        info!(bet_id = %id, format = %bet.format(), "Bet removed");
        Ok(bet)
    }

    /// Capture copies of the sheet and tee box for one bet.
    pub fn freeze(&mut self, id: BetId, sheet: &ScoreSheet, tee_box: &TeeBox) -> Result<(), WagerError> {
        let idx = self.position(id)?;
        self.bets[idx].frozen = Some(FrozenRound {
            sheet: sheet.clone(),
            tee_box: tee_box.clone(),
            frozen_at: Utc::now(),
        });
        debug!(bet_id = %id, "Bet frozen");
        Ok(())
    }

    /// Drop a bet's frozen copy so it follows the live sheet again.
    pub fn thaw(&mut self, id: BetId) -> Result<(), WagerError> {
        let idx = self.position(id)?;
        self.bets[idx].frozen = None;
        Ok(())
    }

    pub fn get(&self, id: BetId) -> Option<&BetInstance> {
        self.bets.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BetInstance> {
        self.bets.iter()
    }

    /// Bets of one format, in insertion order.
    pub fn of_format(&self, format: WagerFormat) -> impl Iterator<Item = &BetInstance> {
        self.bets.iter().filter(move |b| b.format() == format)
    }

    /// Bets with a stake for `player`.
    pub fn involving<'a>(&'a self, player: &'a PlayerId) -> impl Iterator<Item = &'a BetInstance> {
        self.bets.iter().filter(move |b| b.wager.involves(player))
    }

    /// Immutable copy for a settlement pass.
    pub fn snapshot(&self) -> Vec<BetInstance> {
        self.bets.clone()
    }

    /// Re-check every bet's parameters (e.g. after loading from disk).
    pub fn validate(&self) -> Result<(), WagerError> {
        self.bets.iter().try_for_each(|b| b.wager.validate())
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    fn position(&self, id: BetId) -> Result<usize, WagerError> {
        self.bets
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| WagerError::BetNotFound(id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
