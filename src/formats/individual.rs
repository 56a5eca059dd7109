//! Individual match play with a birdie side bet and an optional press.
//!
//! Each nine is settled on its first eight holes: a win is worth
//! `per_hole`, and the birdie differential over the same holes is worth
//! `per_birdie` apiece. The ninth hole of each nine (9 and 18) is the
//! press hole: when pressing, winning it doubles the nine's subtotal,
//! losing it wipes the subtotal out, and a halve leaves it alone.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{birdie_swing, lower_wins};
use crate::types::{ensure_non_negative, Money, Nine, PlayerId, ScoreSheet, TeeBox, WagerError};

/// Head-to-head match between two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualMatch {
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub per_hole: Money,
    #[serde(default)]
    pub per_birdie: Money,
    /// Press on holes 9 and 18.
    #[serde(default)]
    pub press: bool,
}

/// Running tally for one nine.
#[derive(Debug, Default)]
struct NineTally {
    subtotal: Money,
    birdies1: u32,
    birdies2: u32,
}

impl IndividualMatch {
    pub fn new(
        player1: PlayerId,
        player2: PlayerId,
        per_hole: Money,
        per_birdie: Money,
        press: bool,
    ) -> Result<Self, WagerError> {
        let m = Self { player1, player2, per_hole, per_birdie, press };
        m.validate()?;
        Ok(m)
    }

    pub fn validate(&self) -> Result<(), WagerError> {
        if self.player1 == self.player2 {
            return Err(WagerError::Participants(format!(
                "{} cannot play a match against themselves",
                self.player1
            )));
        }
        ensure_non_negative("per_hole", self.per_hole)?;
        ensure_non_negative("per_birdie", self.per_birdie)
    }

    /// Amount player 2 owes player 1 (negative when player 2 is ahead).
    pub fn settle(&self, sheet: &ScoreSheet, tee_box: &TeeBox) -> Money {
        Nine::BOTH
            .iter()
            .map(|&nine| self.settle_nine(nine, sheet, tee_box))
            .sum()
    }

    /// Both players' strokes on a hole, if both are scored.
    fn pair(&self, sheet: &ScoreSheet, hole: usize) -> Option<(u32, u32)> {
        Some((sheet.strokes(&self.player1, hole)?, sheet.strokes(&self.player2, hole)?))
    }

    fn settle_nine(&self, nine: Nine, sheet: &ScoreSheet, tee_box: &TeeBox) -> Money {
        let holes = nine.holes();
        let press_hole = holes.end - 1;
        let mut tally = NineTally::default();

        for hole in holes.start..press_hole {
            let Some((s1, s2)) = self.pair(sheet, hole) else {
                trace!(hole = hole + 1, "Skipping hole without both scores");
                continue;
            };
            tally.subtotal += lower_wins(s1, s2, self.per_hole);
            if tee_box.is_birdie(hole, s1) {
                tally.birdies1 += 1;
            }
            if tee_box.is_birdie(hole, s2) {
                tally.birdies2 += 1;
            }
        }

        let subtotal = tally.subtotal + birdie_swing(tally.birdies1, tally.birdies2, self.per_birdie);

        if !self.press {
            return subtotal;
        }
        match self.pair(sheet, press_hole) {
            Some((s1, s2)) if s1 < s2 => subtotal * Money::TWO,
            Some((s1, s2)) if s1 > s2 => Money::ZERO,
            _ => subtotal,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
