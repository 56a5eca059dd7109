//! Do-Da: holes made in exactly two strokes.
//!
//! Only active players (anything recorded on their card) take part.
//! In `Pool` mode everyone antes `amount` and the pot is split by Do-Da
//! count. In `PerUnit` mode everyone owes `amount` per Do-Da made in the
//! field and each Do-Da collects `amount × active players`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::{ensure_distinct, split_pool};
use crate::types::{ensure_non_negative, Money, PlayerId, ScoreSheet, WagerError, HOLES};

/// Strokes that make a Do-Da.
pub const DO_DA_STROKES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoDaMode {
    /// Fixed ante, pot split by Do-Da count.
    #[default]
    Pool,
    /// Charged per Do-Da made by anyone in the field.
    PerUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoDa {
    pub players: Vec<PlayerId>,
    #[serde(default)]
    pub mode: DoDaMode,
    pub amount: Money,
}

impl DoDa {
    pub fn new(players: Vec<PlayerId>, mode: DoDaMode, amount: Money) -> Result<Self, WagerError> {
        let d = Self { players, mode, amount };
        d.validate()?;
        Ok(d)
    }

    pub fn validate(&self) -> Result<(), WagerError> {
        if self.players.is_empty() {
            return Err(WagerError::Participants("do-da needs at least one player".into()));
        }
        ensure_distinct(&self.players)?;
        ensure_non_negative("amount", self.amount)
    }

    /// Do-Das made by each active player, in pool order.
    pub fn counts<'a>(&'a self, sheet: &ScoreSheet) -> Vec<(&'a PlayerId, u32)> {
        sheet
            .active_players(&self.players)
            .into_iter()
            .map(|p| {
                let made = (0..HOLES)
                    .filter(|&h| sheet.strokes(p, h) == Some(DO_DA_STROKES))
                    .count() as u32;
                (p, made)
            })
            .collect()
    }

    pub fn settle(&self, sheet: &ScoreSheet) -> BTreeMap<PlayerId, Money> {
        let counts = self.counts(sheet);
        let active = Money::from(counts.len() as u64);
        let total: u32 = counts.iter().map(|(_, n)| n).sum();

        let entry = match self.mode {
            DoDaMode::Pool => self.amount,
            DoDaMode::PerUnit => self.amount * Money::from(total),
        };

        debug!(
            mode = ?self.mode,
            active = counts.len(),
            total_do_das = total,
            entry = %entry,
            "Do-Da settled"
        );

        let credits: Vec<Money> = match self.mode {
            DoDaMode::Pool => {
                let units: Vec<u32> = counts.iter().map(|(_, n)| *n).collect();
                split_pool(self.amount * active, &units)
            }
            DoDaMode::PerUnit => counts
                .iter()
                .map(|(_, made)| self.amount * active * Money::from(*made))
                .collect(),
        };

        counts
            .into_iter()
            .zip(credits)
            .map(|((player, _), credit)| (player.clone(), credit - entry))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
