//! Round: the roster, tee box, live score sheet and bets for one outing.
//!
//! This is the mutable collaborator around the engine. Every edit goes
//! through here so that bets can only name rostered players and a player
//! cannot leave the roster while a bet still has a stake for them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::course::Course;
use crate::engine::{Aggregator, BetId, BetInstance, BetRegistry, SettlementReport};
use crate::formats::Wager;
use crate::types::{Player, PlayerId, ScoreSheet, ScoreToken, TeeBox, WagerError, HOLES};

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Players in the group, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, player: Player) -> Result<(), WagerError> {
        if self.contains(&player.id) {
            return Err(WagerError::DuplicatePlayer(player.id));
        }
        self.players.push(player);
        Ok(())
    }

    pub fn remove(&mut self, id: &PlayerId) -> Result<Player, WagerError> {
        let idx = self
            .players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| WagerError::UnknownPlayer(id.clone()))?;
        Ok(self.players.remove(idx))
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub name: String,
    pub played_on: NaiveDate,
    #[serde(default)]
    pub course: Option<String>,
    pub tee_box: TeeBox,
    #[serde(default)]
    pub roster: Roster,
    #[serde(default)]
    pub sheet: ScoreSheet,
    #[serde(default)]
    pub bets: BetRegistry,
}

impl Round {
    pub fn new(name: impl Into<String>, played_on: NaiveDate, tee_box: TeeBox) -> Self {
        Self {
            name: name.into(),
            played_on,
            course: None,
            tee_box,
            roster: Roster::new(),
            sheet: ScoreSheet::new(),
            bets: BetRegistry::new(),
        }
    }

    /// Start a round on a course, playing the named tees.
    pub fn on_course(
        name: impl Into<String>,
        played_on: NaiveDate,
        course: &Course,
        tee: &str,
    ) -> Result<Self, WagerError> {
        let mut round = Self::new(name, played_on, course.tee(tee)?.clone());
        round.course = Some(course.name.clone());
        Ok(round)
    }

    // -- Roster -------------------------------------------------------------

    pub fn add_player(&mut self, player: Player) -> Result<(), WagerError> {
        debug!(player = %player.id, "Player added");
        self.roster.add(player)
    }

    /// Remove a player and their score card. Rejected while any bet,
    /// frozen or live, still has a stake for them.
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Player, WagerError> {
        if self.bets.involving(id).next().is_some() {
            return Err(WagerError::PlayerInUse(id.clone()));
        }
        let player = self.roster.remove(id)?;
        self.sheet.remove_card(id);
        debug!(player = %id, "Player removed");
        Ok(player)
    }

    /// Scoreboard name for a player id, falling back to the raw id.
    pub fn display_name(&self, id: &PlayerId) -> String {
        self.roster
            .get(id)
            .map(Player::display_name)
            .unwrap_or_else(|| id.to_string())
    }

    // -- Scores -------------------------------------------------------------

    /// Record a score on a 1-based hole number.
    pub fn record_score(&mut self, player: &PlayerId, hole: usize, token: ScoreToken) -> Result<(), WagerError> {
        if !self.roster.contains(player) {
            return Err(WagerError::UnknownPlayer(player.clone()));
        }
        if !(1..=HOLES).contains(&hole) {
            return Err(WagerError::InvalidHole(hole));
        }
        self.sheet.record(player, hole - 1, token)
    }

    pub fn clear_score(&mut self, player: &PlayerId, hole: usize) -> Result<(), WagerError> {
        self.record_score(player, hole, ScoreToken::Absent)
    }

    pub fn set_tee_box(&mut self, tee_box: TeeBox) {
        info!(tee = tee_box.name(), "Tee box changed");
        self.tee_box = tee_box;
    }

    // -- Bets ---------------------------------------------------------------

    /// Register a wager whose participants are all on the roster.
    pub fn add_bet(&mut self, wager: Wager, label: Option<String>) -> Result<BetId, WagerError> {
        self.ensure_rostered(&wager)?;
        self.bets.add(wager, label)
    }

    pub fn remove_bet(&mut self, id: BetId) -> Result<BetInstance, WagerError> {
        self.bets.remove(id)
    }

    /// Pin a bet to the current sheet and tee box.
    pub fn freeze_bet(&mut self, id: BetId) -> Result<(), WagerError> {
        self.bets.freeze(id, &self.sheet, &self.tee_box)
    }

    pub fn thaw_bet(&mut self, id: BetId) -> Result<(), WagerError> {
        self.bets.thaw(id)
    }

    // -- Settlement ---------------------------------------------------------

    pub fn settle(&self, aggregator: &Aggregator) -> SettlementReport {
        aggregator.settle_all(&self.bets, &self.sheet, &self.tee_box)
    }

    /// Re-check a round read from disk: a duplicate-free roster, bet
    /// parameters, and every bet participant present on the roster.
    pub fn validate(&self) -> Result<(), WagerError> {
        let mut seen = Roster::new();
        for player in self.roster.iter() {
            seen.add(player.clone())?;
        }
        self.bets.validate()?;
        self.bets.iter().try_for_each(|bet| self.ensure_rostered(&bet.wager))
    }

    fn ensure_rostered(&self, wager: &Wager) -> Result<(), WagerError> {
        match wager.participants().into_iter().find(|p| !self.roster.contains(p)) {
            Some(missing) => Err(WagerError::UnknownPlayer(missing)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
