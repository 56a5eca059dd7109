//! Four-ball (best ball) match between two teams of two.
//!
//! Each team plays its better score on every hole. A team with only one
//! scored member plays that score; a team with neither scored sits the
//! hole out, and so does the other team.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{birdie_swing, lower_wins};
use crate::types::{ensure_non_negative, Money, Nine, PlayerId, ScoreSheet, TeeBox, WagerError, HOLES};

/// Which side of a four-ball match a player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamSide {
    One,
    Two,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourBallMatch {
    pub team1: [PlayerId; 2],
    pub team2: [PlayerId; 2],
    pub per_hole: Money,
    #[serde(default)]
    pub per_birdie: Money,
    /// Accepted and stored, but the four-ball settlement adds both nines
    /// unconditionally; the flag never changes the amount.
    #[serde(default)]
    pub press: bool,
}

impl FourBallMatch {
    pub fn new(
        team1: [PlayerId; 2],
        team2: [PlayerId; 2],
        per_hole: Money,
        per_birdie: Money,
        press: bool,
    ) -> Result<Self, WagerError> {
        let m = Self { team1, team2, per_hole, per_birdie, press };
        m.validate()?;
        Ok(m)
    }

    pub fn validate(&self) -> Result<(), WagerError> {
        let everyone: Vec<PlayerId> = self.team1.iter().chain(self.team2.iter()).cloned().collect();
        super::ensure_distinct(&everyone)
            .map_err(|_| WagerError::Participants("four-ball needs four distinct players".into()))?;
        ensure_non_negative("per_hole", self.per_hole)?;
        ensure_non_negative("per_birdie", self.per_birdie)
    }

    pub fn side_of(&self, player: &PlayerId) -> Option<TeamSide> {
        if self.team1.contains(player) {
            Some(TeamSide::One)
        } else if self.team2.contains(player) {
            Some(TeamSide::Two)
        } else {
            None
        }
    }

    /// Amount team 2 owes team 1 as a whole (negative when team 2 is ahead).
    pub fn settle(&self, sheet: &ScoreSheet, tee_box: &TeeBox) -> Money {
        if self.press {
            debug!("Press flag has no effect on four-ball settlement");
        }

        let mut front = Money::ZERO;
        let mut back = Money::ZERO;
        let mut birdies1 = 0u32;
        let mut birdies2 = 0u32;

        for hole in 0..HOLES {
            let (Some(best1), Some(best2)) = (
                team_best(&self.team1, sheet, hole),
                team_best(&self.team2, sheet, hole),
            ) else {
                trace!(hole = hole + 1, "Skipping hole without a ball from each team");
                continue;
            };

            let result = lower_wins(best1, best2, self.per_hole);
            match Nine::of(hole) {
                Nine::Front => front += result,
                Nine::Back => back += result,
            }
            if tee_box.is_birdie(hole, best1) {
                birdies1 += 1;
            }
            if tee_box.is_birdie(hole, best2) {
                birdies2 += 1;
            }
        }

        front + back + birdie_swing(birdies1, birdies2, self.per_birdie)
    }
}

/// Lower of the team's scored balls on a hole.
fn team_best(team: &[PlayerId; 2], sheet: &ScoreSheet, hole: usize) -> Option<u32> {
    team.iter().filter_map(|p| sheet.strokes(p, hole)).min()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
