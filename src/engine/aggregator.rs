//! Aggregator: folds every bet's outcome into one per-player ledger.
//!
//! Sign conventions:
//! - Individual: player 1 books the amount, player 2 books its negation.
//! - Four-Ball: team 1 members book the amount, team 2 its negation, each
//!   scaled by the configured [`TeamShare`].
//! - Alabama, Do-Da, Skins: each player books their own mapped amount.
//!
//! Players a bet does not mention book nothing for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

use super::registry::{BetId, BetInstance, BetRegistry};
use crate::formats::four_ball::TeamSide;
use crate::formats::{Outcome, Wager, WagerFormat};
use crate::types::{Money, PlayerId, ScoreSheet, TeeBox};

// ---------------------------------------------------------------------------
// Team share
// ---------------------------------------------------------------------------

/// How a shared-team (four-ball) result is booked to each teammate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamShare {
    /// Each teammate books the whole bet-level amount.
    #[default]
    Full,
    /// Each teammate books half of it.
    Split,
}

impl TeamShare {
    pub fn apply(&self, amount: Money) -> Money {
        match self {
            TeamShare::Full => amount,
            TeamShare::Split => amount / Money::TWO,
        }
    }
}

impl fmt::Display for TeamShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamShare::Full => write!(f, "full"),
            TeamShare::Split => write!(f, "split"),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Running per-player totals across all bets. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ledger {
    totals: BTreeMap<PlayerId, Money>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, player: &PlayerId, amount: Money) {
        *self.totals.entry(player.clone()).or_default() += amount;
    }

    /// Total for a player; zero if no bet touched them.
    pub fn total_for(&self, player: &PlayerId) -> Money {
        self.totals.get(player).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &Money)> {
        self.totals.iter()
    }

    /// Sum of all totals. Zero when every bet was zero-sum.
    pub fn net(&self) -> Money {
        self.totals.values().copied().sum()
    }

    /// Players ordered from biggest winner to biggest loser.
    pub fn standings(&self) -> Vec<(&PlayerId, Money)> {
        let mut rows: Vec<(&PlayerId, Money)> = self.totals.iter().map(|(p, m)| (p, *m)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Settlement report
// ---------------------------------------------------------------------------

/// One bet's result within a settlement pass.
#[derive(Debug, Clone, Serialize)]
pub struct BetSettlement {
    pub bet_id: BetId,
    pub title: String,
    pub format: WagerFormat,
    pub outcome: Outcome,
    /// Settled against the bet's own frozen copy.
    pub from_frozen: bool,
}

/// Summary of a complete settlement pass.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementReport {
    pub bets: Vec<BetSettlement>,
    pub ledger: Ledger,
    pub team_share: TeamShare,
    pub settled_at: DateTime<Utc>,
}

impl SettlementReport {
    pub fn bet(&self, id: BetId) -> Option<&BetSettlement> {
        self.bets.iter().find(|b| b.bet_id == id)
    }
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    team_share: TeamShare,
}

impl Aggregator {
    pub fn new(team_share: TeamShare) -> Self {
        Self { team_share }
    }

    pub fn team_share(&self) -> TeamShare {
        self.team_share
    }

    /// Settle every bet in the registry and fold the results per player.
    ///
    /// The registry, sheet and tee box are borrowed immutably for the whole
    /// pass, so nothing can change underneath it.
    pub fn settle_all(&self, registry: &BetRegistry, sheet: &ScoreSheet, tee_box: &TeeBox) -> SettlementReport {
        let mut ledger = Ledger::new();
        let mut bets = Vec::with_capacity(registry.len());

        for bet in registry.iter() {
            let settlement = self.settle_bet(bet, sheet, tee_box);
            for player in bet.wager.participants() {
                let share = self.share_for(&bet.wager, &settlement.outcome, &player);
                ledger.credit(&player, share);
            }
            bets.push(settlement);
        }

        info!(
            bets = bets.len(),
            players = ledger.len(),
            net = %ledger.net(),
            team_share = %self.team_share,
            "Settlement pass complete"
        );

        SettlementReport {
            bets,
            ledger,
            team_share: self.team_share,
            settled_at: Utc::now(),
        }
    }

    /// One player's total across every bet in the registry.
    pub fn player_total(
        &self,
        player: &PlayerId,
        registry: &BetRegistry,
        sheet: &ScoreSheet,
        tee_box: &TeeBox,
    ) -> Money {
        registry
            .involving(player)
            .map(|bet| {
                let settlement = self.settle_bet(bet, sheet, tee_box);
                self.share_for(&bet.wager, &settlement.outcome, player)
            })
            .sum()
    }

    /// Settle a single bet, honouring its frozen copy.
    pub fn settle_bet(&self, bet: &BetInstance, sheet: &ScoreSheet, tee_box: &TeeBox) -> BetSettlement {
        let (sheet, tee_box) = bet.inputs(sheet, tee_box);
        let outcome = bet.wager.settle(sheet, tee_box);
        debug!(
            bet_id = %bet.id,
            format = %bet.format(),
            net = %outcome.net(),
            frozen = bet.frozen.is_some(),
            "Bet settled"
        );
        BetSettlement {
            bet_id: bet.id,
            title: bet.title(),
            format: bet.format(),
            outcome,
            from_frozen: bet.frozen.is_some(),
        }
    }

    /// What `player` books from one bet's outcome.
    pub fn share_for(&self, wager: &Wager, outcome: &Outcome, player: &PlayerId) -> Money {
        match wager {
            Wager::Individual(m) => {
                let amount = outcome.head_to_head();
                if *player == m.player1 {
                    amount
                } else if *player == m.player2 {
                    -amount
                } else {
                    Money::ZERO
                }
            }
            Wager::FourBall(m) => {
                let amount = self.team_share.apply(outcome.head_to_head());
                match m.side_of(player) {
                    Some(TeamSide::One) => amount,
                    Some(TeamSide::Two) => -amount,
                    None => Money::ZERO,
                }
            }
            Wager::Alabama(_) | Wager::DoDa(_) | Wager::Skins(_) => outcome.for_player(player),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
