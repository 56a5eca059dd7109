//! Alabama: team game over best-N totals, low ball and birdies.
//!
//! On every hole each team pools its members' scores (plus the floating
//! player's, when one is set) and books:
//!
//! * the sum of its lowest `counting_scores` balls into the nine's total,
//! * its single lowest ball into the nine's low-ball total,
//! * one birdie for every pooled score under par.
//!
//! After the round every team is matched against every other team on
//! front total, back total, front low ball and back low ball (lower wins
//! the matching rate), plus the birdie differential at `birdie_rate`.
//! Each member is credited the team's full result, undivided.
//!
//! The floating player belongs to every team, so their scores count for
//! all sides. They are credited each team's result in turn and keep the
//! last team's. Payouts are therefore not zero-sum per player once a
//! floater is set or team sizes differ.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::{birdie_swing, ensure_distinct, lower_wins};
use crate::types::{ensure_non_negative, Money, Nine, PlayerId, ScoreSheet, TeeBox, WagerError, HOLES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alabama {
    pub teams: Vec<Vec<PlayerId>>,
    /// Swing player counted toward every team.
    #[serde(default)]
    pub floater: Option<PlayerId>,
    /// Balls summed into a team's hole total.
    pub counting_scores: usize,
    pub front_rate: Money,
    pub back_rate: Money,
    pub low_ball_rate: Money,
    pub birdie_rate: Money,
}

/// Accumulated team numbers for the round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamTally {
    pub front_total: u32,
    pub back_total: u32,
    pub front_low: u32,
    pub back_low: u32,
    pub birdies: u32,
}

impl TeamTally {
    fn add_hole(&mut self, hole: usize, total: u32, low: u32) {
        match Nine::of(hole) {
            Nine::Front => {
                self.front_total += total;
                self.front_low += low;
            }
            Nine::Back => {
                self.back_total += total;
                self.back_low += low;
            }
        }
    }
}

impl Alabama {
    /// Build a game with the same rate on both nines.
    pub fn new(
        teams: Vec<Vec<PlayerId>>,
        floater: Option<PlayerId>,
        counting_scores: usize,
        nine_rate: Money,
        low_ball_rate: Money,
        birdie_rate: Money,
    ) -> Result<Self, WagerError> {
        let game = Self {
            teams,
            floater,
            counting_scores,
            front_rate: nine_rate,
            back_rate: nine_rate,
            low_ball_rate,
            birdie_rate,
        };
        game.validate()?;
        Ok(game)
    }

    pub fn validate(&self) -> Result<(), WagerError> {
        if self.teams.len() < 2 {
            return Err(WagerError::Participants("alabama needs at least two teams".into()));
        }
        if let Some(idx) = self.teams.iter().position(Vec::is_empty) {
            return Err(WagerError::Participants(format!("team {} has no players", idx + 1)));
        }
        if self.counting_scores == 0 {
            return Err(WagerError::CountingScores);
        }
        let everyone: Vec<PlayerId> = self
            .teams
            .iter()
            .flatten()
            .chain(self.floater.iter())
            .cloned()
            .collect();
        ensure_distinct(&everyone)?;
        ensure_non_negative("front_rate", self.front_rate)?;
        ensure_non_negative("back_rate", self.back_rate)?;
        ensure_non_negative("low_ball_rate", self.low_ball_rate)?;
        ensure_non_negative("birdie_rate", self.birdie_rate)
    }

    /// Per-team tallies, in team order.
    pub fn tally(&self, sheet: &ScoreSheet, tee_box: &TeeBox) -> Vec<TeamTally> {
        self.teams
            .iter()
            .map(|team| self.tally_team(team, sheet, tee_box))
            .collect()
    }

    fn tally_team(&self, team: &[PlayerId], sheet: &ScoreSheet, tee_box: &TeeBox) -> TeamTally {
        let mut tally = TeamTally::default();

        for hole in 0..HOLES {
            let mut scores: Vec<u32> = team
                .iter()
                .chain(self.floater.iter())
                .filter_map(|p| sheet.strokes(p, hole))
                .collect();
            if scores.is_empty() {
                continue;
            }

            tally.birdies += scores.iter().filter(|&&s| tee_box.is_birdie(hole, s)).count() as u32;

            scores.sort_unstable();
            let total: u32 = scores.iter().take(self.counting_scores).sum();
            tally.add_hole(hole, total, scores[0]);
        }

        tally
    }

    /// Each team's net result against every other team, in team order.
    pub fn team_results(&self, sheet: &ScoreSheet, tee_box: &TeeBox) -> Vec<Money> {
        let tallies = self.tally(sheet, tee_box);

        tallies
            .iter()
            .enumerate()
            .map(|(i, mine)| {
                tallies
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, theirs)| self.versus(mine, theirs))
                    .sum()
            })
            .collect()
    }

    fn versus(&self, mine: &TeamTally, theirs: &TeamTally) -> Money {
        lower_wins(mine.front_total, theirs.front_total, self.front_rate)
            + lower_wins(mine.back_total, theirs.back_total, self.back_rate)
            + lower_wins(mine.front_low, theirs.front_low, self.low_ball_rate)
            + lower_wins(mine.back_low, theirs.back_low, self.low_ball_rate)
            + birdie_swing(mine.birdies, theirs.birdies, self.birdie_rate)
    }

    pub fn settle(&self, sheet: &ScoreSheet, tee_box: &TeeBox) -> BTreeMap<PlayerId, Money> {
        let results = self.team_results(sheet, tee_box);
        let mut payouts: BTreeMap<PlayerId, Money> = BTreeMap::new();

        for (team, amount) in self.teams.iter().zip(&results) {
            debug!(team = ?team, amount = %amount, "Alabama team result");
            for player in team {
                payouts.insert(player.clone(), *amount);
            }
            // Overwritten per team: the floater ends on the last team's result.
            if let Some(floater) = &self.floater {
                payouts.insert(floater.clone(), *amount);
            }
        }

        payouts
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
