//! Wager formats.
//!
//! Every format is a pure calculator `sheet × tee box × params → outcome`.
//! The closed `Wager` union dispatches to them through a single
//! [`Wager::settle`], so adding a format is an exhaustive-match change.
//!
//! - Individual Match: head-to-head, per hole + birdies, optional press
//! - Four-Ball Match: two-man teams, best ball per hole
//! - Alabama: N teams, best-N totals, low ball and birdies, floating player
//! - Do-Da: holes made in exactly two strokes, pool or per-unit payout
//! - Skins: outright low score wins the hole

pub mod alabama;
pub mod do_da;
pub mod four_ball;
pub mod individual;
pub mod skins;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::{Money, PlayerId, ScoreSheet, TeeBox, WagerError};

pub use alabama::Alabama;
pub use do_da::{DoDa, DoDaMode};
pub use four_ball::FourBallMatch;
pub use individual::IndividualMatch;
pub use skins::Skins;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of settling one bet instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Two-party formats: positive means the first-named side is owed.
    HeadToHead(Money),
    /// Multi-party formats: signed amount per participating player.
    /// Players absent from the map are owed nothing.
    PerPlayer(BTreeMap<PlayerId, Money>),
}

impl Outcome {
    /// Head-to-head amount; zero for multi-party outcomes.
    pub fn head_to_head(&self) -> Money {
        match self {
            Outcome::HeadToHead(amount) => *amount,
            Outcome::PerPlayer(_) => Money::ZERO,
        }
    }

    /// Per-player amount; zero if the player is not in the mapping.
    pub fn for_player(&self, player: &PlayerId) -> Money {
        match self {
            Outcome::PerPlayer(map) => map.get(player).copied().unwrap_or_default(),
            Outcome::HeadToHead(_) => Money::ZERO,
        }
    }

    /// Sum across all players (multi-party) or the single amount.
    pub fn net(&self) -> Money {
        match self {
            Outcome::HeadToHead(amount) => *amount,
            Outcome::PerPlayer(map) => map.values().copied().sum(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wager
// ---------------------------------------------------------------------------

/// Format discriminant, for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WagerFormat {
    Individual,
    FourBall,
    Alabama,
    DoDa,
    Skins,
}

impl WagerFormat {
    pub const ALL: &'static [WagerFormat] = &[
        WagerFormat::Individual,
        WagerFormat::FourBall,
        WagerFormat::Alabama,
        WagerFormat::DoDa,
        WagerFormat::Skins,
    ];
}

impl fmt::Display for WagerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WagerFormat::Individual => write!(f, "Individual"),
            WagerFormat::FourBall => write!(f, "Four-Ball"),
            WagerFormat::Alabama => write!(f, "Alabama"),
            WagerFormat::DoDa => write!(f, "Do-Da"),
            WagerFormat::Skins => write!(f, "Skins"),
        }
    }
}

/// One wager's parameters, tagged by format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Wager {
    Individual(IndividualMatch),
    FourBall(FourBallMatch),
    Alabama(Alabama),
    DoDa(DoDa),
    Skins(Skins),
}

impl Wager {
    /// Settle this wager against a score sheet and tee box.
    pub fn settle(&self, sheet: &ScoreSheet, tee_box: &TeeBox) -> Outcome {
        match self {
            Wager::Individual(m) => Outcome::HeadToHead(m.settle(sheet, tee_box)),
            Wager::FourBall(m) => Outcome::HeadToHead(m.settle(sheet, tee_box)),
            Wager::Alabama(a) => Outcome::PerPlayer(a.settle(sheet, tee_box)),
            Wager::DoDa(d) => Outcome::PerPlayer(d.settle(sheet)),
            Wager::Skins(s) => Outcome::PerPlayer(s.settle(sheet)),
        }
    }

    /// Check the construction preconditions of the wrapped parameters.
    pub fn validate(&self) -> Result<(), WagerError> {
        match self {
            Wager::Individual(m) => m.validate(),
            Wager::FourBall(m) => m.validate(),
            Wager::Alabama(a) => a.validate(),
            Wager::DoDa(d) => d.validate(),
            Wager::Skins(s) => s.validate(),
        }
    }

    pub fn format(&self) -> WagerFormat {
        match self {
            Wager::Individual(_) => WagerFormat::Individual,
            Wager::FourBall(_) => WagerFormat::FourBall,
            Wager::Alabama(_) => WagerFormat::Alabama,
            Wager::DoDa(_) => WagerFormat::DoDa,
            Wager::Skins(_) => WagerFormat::Skins,
        }
    }

    /// Every player with a stake in this wager.
    pub fn participants(&self) -> Vec<PlayerId> {
        match self {
            Wager::Individual(m) => vec![m.player1.clone(), m.player2.clone()],
            Wager::FourBall(m) => m.team1.iter().chain(m.team2.iter()).cloned().collect(),
            Wager::Alabama(a) => a
                .teams
                .iter()
                .flatten()
                .chain(a.floater.iter())
                .cloned()
                .collect(),
            Wager::DoDa(d) => d.players.clone(),
            Wager::Skins(s) => s.players.clone(),
        }
    }

    pub fn involves(&self, player: &PlayerId) -> bool {
        self.participants().iter().any(|p| p == player)
    }
}

impl From<IndividualMatch> for Wager {
    fn from(value: IndividualMatch) -> Self {
        Wager::Individual(value)
    }
}

impl From<FourBallMatch> for Wager {
    fn from(value: FourBallMatch) -> Self {
        Wager::FourBall(value)
    }
}

impl From<Alabama> for Wager {
    fn from(value: Alabama) -> Self {
        Wager::Alabama(value)
    }
}

impl From<DoDa> for Wager {
    fn from(value: DoDa) -> Self {
        Wager::DoDa(value)
    }
}

impl From<Skins> for Wager {
    fn from(value: Skins) -> Self {
        Wager::Skins(value)
    }
}

// ---------------------------------------------------------------------------
// Shared scoring helpers
// ---------------------------------------------------------------------------

/// Lower score wins `amount`, higher loses it, ties are a push.
pub(crate) fn lower_wins(mine: u32, theirs: u32, amount: Money) -> Money {
    match mine.cmp(&theirs) {
        std::cmp::Ordering::Less => amount,
        std::cmp::Ordering::Greater => -amount,
        std::cmp::Ordering::Equal => Money::ZERO,
    }
}

/// Birdie differential priced at `rate`.
pub(crate) fn birdie_swing(mine: u32, theirs: u32, rate: Money) -> Money {
    (Money::from(mine) - Money::from(theirs)) * rate
}

/// Split `pool` across `total` units and pay out `units` of them.
/// Multiplies before dividing so rounding stays in the last digit.
pub(crate) fn pool_share(pool: Money, units: u32, total: u32) -> Money {
    if total == 0 {
        return Money::ZERO;
    }
    pool * Money::from(units) / Money::from(total)
}

/// Split `pool` by `units` so the shares add back to exactly `pool`.
///
/// Each share is proportional; the last holder with any units absorbs
/// the division remainder. Nobody is paid when no units were earned.
pub(crate) fn split_pool(pool: Money, units: &[u32]) -> Vec<Money> {
    let total: u32 = units.iter().sum();
    let mut shares: Vec<Money> = units.iter().map(|&u| pool_share(pool, u, total)).collect();
    if let Some(last) = units.iter().rposition(|&u| u > 0) {
        let others: Money = shares
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != last)
            .map(|(_, share)| *share)
            .sum();
        shares[last] = pool - others;
    }
    shares
}

/// Reject a pool that names the same player twice.
pub(crate) fn ensure_distinct(players: &[PlayerId]) -> Result<(), WagerError> {
    let mut seen = std::collections::BTreeSet::new();
    for p in players {
        if !seen.insert(p) {
            return Err(WagerError::Participants(format!("{p} appears more than once")));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
