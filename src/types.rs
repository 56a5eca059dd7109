//! Shared types for the FAIRWAY settlement engine.
//!
//! These types form the data model consumed by every wager format.
//! They are designed to be stable so that format calculators, the
//! registry and the aggregator can depend on them without circular
//! references.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// Currency amount. Signed; positive means "is owed".
pub type Money = Decimal;

/// Holes in a regulation round.
pub const HOLES: usize = 18;

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Stable unique player identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A golfer in the group. Equality, hashing and ordering use `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl Player {
    pub fn new(id: impl Into<String>, first_name: &str, last_name: &str) -> Self {
        Self {
            id: PlayerId::new(id),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            nickname: None,
        }
    }

    /// Name shown on the scoreboard: nickname if set, else "First L.".
    pub fn display_name(&self) -> String {
        if let Some(nick) = self.nickname.as_deref().filter(|n| !n.trim().is_empty()) {
            return nick.to_string();
        }
        match self.last_name.chars().next() {
            Some(initial) => format!("{} {initial}.", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.id)
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Player {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Player {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

// ---------------------------------------------------------------------------
// Score tokens
// ---------------------------------------------------------------------------

/// One hole's recorded result for one player.
///
/// `DidNotFinish` is a recorded result (the player is active) but carries
/// no stroke count, so every calculator skips it exactly like `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreToken {
    #[default]
    Absent,
    Strokes(u32),
    DidNotFinish,
}

impl ScoreToken {
    /// Parse raw scorecard input. Never fails: anything that is not a
    /// non-negative integer or the "X" marker is treated as unrecorded.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return ScoreToken::Absent;
        }
        if raw.eq_ignore_ascii_case("x") {
            return ScoreToken::DidNotFinish;
        }
        raw.parse::<u32>()
            .map(ScoreToken::Strokes)
            .unwrap_or(ScoreToken::Absent)
    }

    /// Stroke count, if this token carries one.
    pub fn strokes(&self) -> Option<u32> {
        match self {
            ScoreToken::Strokes(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether anything at all was entered for the hole.
    pub fn is_recorded(&self) -> bool {
        !matches!(self, ScoreToken::Absent)
    }
}

impl fmt::Display for ScoreToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreToken::Absent => write!(f, "-"),
            ScoreToken::Strokes(n) => write!(f, "{n}"),
            ScoreToken::DidNotFinish => write!(f, "X"),
        }
    }
}

impl From<&str> for ScoreToken {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<u32> for ScoreToken {
    fn from(value: u32) -> Self {
        ScoreToken::Strokes(value)
    }
}

impl Serialize for ScoreToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScoreToken::Absent => serializer.serialize_none(),
            ScoreToken::Strokes(n) => serializer.serialize_u32(*n),
            ScoreToken::DidNotFinish => serializer.serialize_str("X"),
        }
    }
}

/// Wire shapes accepted for a score token: `null`, an integer, or text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawToken {
    Int(i64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for ScoreToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawToken>::deserialize(deserializer)?;
        Ok(match raw {
            None => ScoreToken::Absent,
            Some(RawToken::Int(n)) => u32::try_from(n)
                .map(ScoreToken::Strokes)
                .unwrap_or(ScoreToken::Absent),
            Some(RawToken::Text(s)) => ScoreToken::parse(&s),
            Some(RawToken::Other(_)) => ScoreToken::Absent,
        })
    }
}

// ---------------------------------------------------------------------------
// Score cards & sheet
// ---------------------------------------------------------------------------

/// One player's 18 score tokens, aligned by hole index 0..17.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScoreToken>", into = "Vec<ScoreToken>")]
pub struct ScoreCard([ScoreToken; HOLES]);

impl ScoreCard {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Build a card from raw strings (e.g. form input).
    pub fn from_raw(raw: &[&str]) -> Result<Self, WagerError> {
        raw.iter().map(|s| ScoreToken::parse(s)).collect::<Vec<_>>().try_into()
    }

    /// Build a fully-scored card.
    pub fn from_strokes(strokes: [u32; HOLES]) -> Self {
        Self(strokes.map(ScoreToken::Strokes))
    }

    pub fn token(&self, hole: usize) -> ScoreToken {
        self.0.get(hole).copied().unwrap_or_default()
    }

    pub fn strokes(&self, hole: usize) -> Option<u32> {
        self.token(hole).strokes()
    }

    pub fn set(&mut self, hole: usize, token: ScoreToken) -> Result<(), WagerError> {
        let slot = self
            .0
            .get_mut(hole)
            .ok_or(WagerError::InvalidHole(hole + 1))?;
        *slot = token;
        Ok(())
    }

    /// At least one hole has something recorded.
    pub fn has_recorded(&self) -> bool {
        self.0.iter().any(ScoreToken::is_recorded)
    }

    pub fn tokens(&self) -> &[ScoreToken; HOLES] {
        &self.0
    }

    /// Gross strokes over the holes that carry a count.
    pub fn gross(&self, holes: Range<usize>) -> u32 {
        holes.filter_map(|h| self.strokes(h)).sum()
    }
}

impl TryFrom<Vec<ScoreToken>> for ScoreCard {
    type Error = WagerError;

    fn try_from(tokens: Vec<ScoreToken>) -> Result<Self, Self::Error> {
        let len = tokens.len();
        let arr: [ScoreToken; HOLES] = tokens
            .try_into()
            .map_err(|_| WagerError::CardLength { expected: HOLES, found: len })?;
        Ok(Self(arr))
    }
}

impl From<ScoreCard> for Vec<ScoreToken> {
    fn from(card: ScoreCard) -> Self {
        card.0.to_vec()
    }
}

/// All players' score cards for the round, keyed by player id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSheet {
    cards: BTreeMap<PlayerId, ScoreCard>,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(&self, player: &PlayerId) -> Option<&ScoreCard> {
        self.cards.get(player)
    }

    pub fn insert_card(&mut self, player: PlayerId, card: ScoreCard) {
        self.cards.insert(player, card);
    }

    pub fn remove_card(&mut self, player: &PlayerId) -> Option<ScoreCard> {
        self.cards.remove(player)
    }

    /// Record one hole, creating a blank card for the player if needed.
    pub fn record(&mut self, player: &PlayerId, hole: usize, token: ScoreToken) -> Result<(), WagerError> {
        if hole >= HOLES {
            return Err(WagerError::InvalidHole(hole + 1));
        }
        self.cards.entry(player.clone()).or_default().set(hole, token)
    }

    /// Parsed stroke count for a player on a hole index, if any.
    pub fn strokes(&self, player: &PlayerId, hole: usize) -> Option<u32> {
        self.cards.get(player).and_then(|c| c.strokes(hole))
    }

    /// A player is active once anything has been recorded for them.
    pub fn is_active(&self, player: &PlayerId) -> bool {
        self.cards.get(player).is_some_and(ScoreCard::has_recorded)
    }

    /// Subset of `pool` that is active, preserving pool order.
    pub fn active_players<'a>(&self, pool: &'a [PlayerId]) -> Vec<&'a PlayerId> {
        pool.iter().filter(|p| self.is_active(p)).collect()
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.cards.keys()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Course reference
// ---------------------------------------------------------------------------

/// Front or back nine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nine {
    Front,
    Back,
}

impl Nine {
    pub const BOTH: [Nine; 2] = [Nine::Front, Nine::Back];

    /// Hole indices covered by this nine.
    pub fn holes(&self) -> Range<usize> {
        match self {
            Nine::Front => 0..9,
            Nine::Back => 9..HOLES,
        }
    }

    /// The nine a hole index belongs to.
    pub fn of(hole: usize) -> Self {
        if hole < 9 {
            Nine::Front
        } else {
            Nine::Back
        }
    }
}

impl fmt::Display for Nine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nine::Front => write!(f, "Front"),
            Nine::Back => write!(f, "Back"),
        }
    }
}

/// A single hole on a tee box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    /// 1-based hole number.
    pub number: u8,
    pub par: u32,
}

/// Ordered 18-hole par list for one set of tees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTeeBox", into = "RawTeeBox")]
pub struct TeeBox {
    name: String,
    pars: [u32; HOLES],
}

/// Serialized shape of a tee box; validated on the way in.
#[derive(Serialize, Deserialize)]
pub struct RawTeeBox {
    pub name: String,
    pub pars: Vec<u32>,
}

impl TeeBox {
    /// Lowest par accepted on any hole.
    pub const MIN_PAR: u32 = 3;

    pub fn new(name: impl Into<String>, pars: Vec<u32>) -> Result<Self, WagerError> {
        let found = pars.len();
        let pars: [u32; HOLES] = pars
            .try_into()
            .map_err(|_| WagerError::CardLength { expected: HOLES, found })?;
        if let Some(idx) = pars.iter().position(|&p| p < Self::MIN_PAR) {
            return Err(WagerError::InvalidPar { hole: idx + 1, par: pars[idx] });
        }
        Ok(Self { name: name.into(), pars })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Par for a hole index. Out-of-range indices have no par.
    pub fn par(&self, hole: usize) -> Option<u32> {
        self.pars.get(hole).copied()
    }

    pub fn hole(&self, hole: usize) -> Option<Hole> {
        self.par(hole).map(|par| Hole { number: (hole + 1) as u8, par })
    }

    pub fn holes(&self) -> impl Iterator<Item = Hole> + '_ {
        self.pars
            .iter()
            .enumerate()
            .map(|(i, &par)| Hole { number: (i + 1) as u8, par })
    }

    /// Whether `strokes` beats par on the hole.
    pub fn is_birdie(&self, hole: usize, strokes: u32) -> bool {
        self.par(hole).is_some_and(|par| strokes < par)
    }

    pub fn par_for(&self, nine: Nine) -> u32 {
        self.pars[nine.holes()].iter().sum()
    }

    pub fn total_par(&self) -> u32 {
        self.pars.iter().sum()
    }
}

impl fmt::Display for TeeBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tees (out {} / in {} / par {})",
            self.name,
            self.par_for(Nine::Front),
            self.par_for(Nine::Back),
            self.total_par(),
        )
    }
}

impl TryFrom<RawTeeBox> for TeeBox {
    type Error = WagerError;

    fn try_from(raw: RawTeeBox) -> Result<Self, Self::Error> {
        TeeBox::new(raw.name, raw.pars)
    }
}

impl From<TeeBox> for RawTeeBox {
    fn from(tee: TeeBox) -> Self {
        RawTeeBox { name: tee.name, pars: tee.pars.to_vec() }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for FAIRWAY.
///
/// Calculators never fail; these are raised when a bet instance, tee box
/// or score card is constructed from malformed input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WagerError {
    #[error("Expected {expected} holes, found {found}")]
    CardLength { expected: usize, found: usize },

    #[error("Invalid par {par} on hole {hole}")]
    InvalidPar { hole: usize, par: u32 },

    #[error("Invalid hole number: {0}")]
    InvalidHole(usize),

    #[error("Negative amount for {field}: {amount}")]
    NegativeAmount { field: &'static str, amount: Money },

    #[error("Invalid participants: {0}")]
    Participants(String),

    #[error("Counting scores must be at least 1")]
    CountingScores,

    #[error("Bet not found: {0}")]
    BetNotFound(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Player already on the roster: {0}")]
    DuplicatePlayer(PlayerId),

    #[error("Player {0} is still part of an active bet")]
    PlayerInUse(PlayerId),

    #[error("Unknown tee box: {0}")]
    UnknownTee(String),
}

/// Reject negative monetary parameters.
pub(crate) fn ensure_non_negative(field: &'static str, amount: Money) -> Result<(), WagerError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        Err(WagerError::NegativeAmount { field, amount })
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
