//! Round fixtures for integration testing.
//!
//! Provides a deterministic `RoundBuilder` that rosters players, fills in
//! their cards and hands back a ready-to-settle `Round`, all in-memory.

use chrono::NaiveDate;

use fairway::course::Course;
use fairway::round::Round;
use fairway::types::{Player, PlayerId, ScoreToken, TeeBox, HOLES};

/// Par 72 layout: out 36, in 36, par 3s on holes 3, 7, 12 and 16.
pub const PAR_72: [u32; HOLES] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 4, 3, 5, 4, 4, 3, 4, 5];

/// Builds a round hole by hole.
///
/// Players added with [`RoundBuilder::par_player`] start with a par on
/// every hole; individual holes are then overridden with
/// [`RoundBuilder::score`] (1-based hole numbers, like a scorecard).
pub struct RoundBuilder {
    pars: [u32; HOLES],
    round: Round,
}

impl RoundBuilder {
    pub fn new() -> Self {
        Self::with_pars(PAR_72)
    }

    pub fn with_pars(pars: [u32; HOLES]) -> Self {
        let tee = TeeBox::new("White", pars.to_vec()).expect("valid pars");
        let course = Course::new("Test Links").with_tee(tee);
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        Self {
            pars,
            round: Round::on_course("Test round", date, &course, "white").expect("known tee"),
        }
    }

    /// Rostered player who shoots par on every hole.
    pub fn par_player(self, player: &str) -> Self {
        let pars = self.pars;
        self.player(player, pars)
    }

    /// Rostered player with a complete card.
    pub fn player(mut self, player: &str, strokes: [u32; HOLES]) -> Self {
        self = self.idle_player(player);
        for (idx, s) in strokes.into_iter().enumerate() {
            self.round
                .record_score(&id(player), idx + 1, ScoreToken::Strokes(s))
                .expect("rostered player, valid hole");
        }
        self
    }

    /// Rostered player with nothing recorded.
    pub fn idle_player(mut self, player: &str) -> Self {
        self.round
            .add_player(Player::new(player, player, "Tester"))
            .expect("unique player");
        self
    }

    /// Override one hole (1-based).
    pub fn score(mut self, player: &str, hole: usize, token: impl Into<ScoreToken>) -> Self {
        self.round
            .record_score(&id(player), hole, token.into())
            .expect("rostered player, valid hole");
        self
    }

    /// Par minus one on each listed hole (1-based).
    pub fn birdies(mut self, player: &str, holes: &[usize]) -> Self {
        for &hole in holes {
            let birdie = self.pars[hole - 1] - 1;
            self = self.score(player, hole, birdie);
        }
        self
    }

    pub fn build(self) -> Round {
        self.round
    }
}

pub fn id(player: &str) -> PlayerId {
    PlayerId::from(player)
}

pub fn ids(players: &[&str]) -> Vec<PlayerId> {
    players.iter().map(|p| id(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fills_cards() {
        let round = RoundBuilder::new()
            .par_player("ann")
            .birdies("ann", &[1, 18])
            .idle_player("bob")
            .build();

        assert_eq!(round.sheet.strokes(&id("ann"), 0), Some(3));
        assert_eq!(round.sheet.strokes(&id("ann"), 17), Some(4));
        assert_eq!(round.sheet.strokes(&id("ann"), 2), Some(3));
        assert!(!round.sheet.is_active(&id("bob")));
        assert_eq!(round.roster.len(), 2);
    }
}
