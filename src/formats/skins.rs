//! Skins: the outright low score on a hole wins a skin.
//!
//! Every active player antes `amount`. A hole only plays when every
//! active player has a stroke count on it; ties for low void the skin.
//! The whole pot is then split by skins won.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::{ensure_distinct, split_pool};
use crate::types::{ensure_non_negative, Money, PlayerId, ScoreSheet, WagerError, HOLES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skins {
    pub players: Vec<PlayerId>,
    /// Entry per player.
    pub amount: Money,
}

impl Skins {
    pub fn new(players: Vec<PlayerId>, amount: Money) -> Result<Self, WagerError> {
        let s = Self { players, amount };
        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> Result<(), WagerError> {
        if self.players.is_empty() {
            return Err(WagerError::Participants("skins needs at least one player".into()));
        }
        ensure_distinct(&self.players)?;
        ensure_non_negative("amount", self.amount)
    }

    /// Winner of a hole among `active`, if exactly one player holds the low score.
    fn skin_winner<'a>(active: &[&'a PlayerId], sheet: &ScoreSheet, hole: usize) -> Option<&'a PlayerId> {
        let scores: Option<Vec<(&PlayerId, u32)>> = active
            .iter()
            .map(|&p| sheet.strokes(p, hole).map(|s| (p, s)))
            .collect();
        let Some(scores) = scores else {
            trace!(hole = hole + 1, "Skipping hole with an unscored player");
            return None;
        };

        let low = scores.iter().map(|(_, s)| *s).min()?;
        let mut at_low = scores.iter().filter(|(_, s)| *s == low);
        match (at_low.next(), at_low.next()) {
            (Some((winner, _)), None) => Some(*winner),
            _ => None,
        }
    }

    /// Skins won per active player, in pool order.
    pub fn skins_won<'a>(&'a self, sheet: &ScoreSheet) -> Vec<(&'a PlayerId, u32)> {
        let active = sheet.active_players(&self.players);
        let mut won: Vec<(&PlayerId, u32)> = active.iter().map(|&p| (p, 0)).collect();

        if active.is_empty() {
            return won;
        }
        for hole in 0..HOLES {
            if let Some(winner) = Self::skin_winner(&active, sheet, hole) {
                if let Some(slot) = won.iter_mut().find(|(p, _)| *p == winner) {
                    slot.1 += 1;
                }
            }
        }
        won
    }

    pub fn settle(&self, sheet: &ScoreSheet) -> BTreeMap<PlayerId, Money> {
        let won = self.skins_won(sheet);
        let pot = self.amount * Money::from(won.len() as u64);
        let total: u32 = won.iter().map(|(_, n)| n).sum();

        debug!(active = won.len(), total_skins = total, pot = %pot, "Skins settled");

        let units: Vec<u32> = won.iter().map(|(_, n)| *n).collect();
        won.into_iter()
            .zip(split_pool(pot, &units))
            .map(|((player, _), share)| (player.clone(), share - self.amount))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
