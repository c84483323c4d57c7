use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{CHIP_DENOMINATIONS, HARDWAY_NUMBERS, PLACE_NUMBERS};

/// Placeholder for currency units.
pub type Usd = u32;

/// Up-face value of a single die.
pub type Face = u8;

/// A completed throw is the pair of up-faces of the two dice.
///
/// Individual faces matter beyond their sum: a hardway only wins when
/// both dice show the same face.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Roll(pub Face, pub Face);

impl Roll {
    #[must_use]
    pub fn total(self) -> u8 {
        self.0 + self.1
    }

    /// Both dice landed on the same face.
    #[must_use]
    pub fn is_hard(self) -> bool {
        self.0 == self.1
    }

    /// Whether both faces are in 1..=6.
    #[must_use]
    pub fn is_valid(self) -> bool {
        (1..=6).contains(&self.0) && (1..=6).contains(&self.1)
    }

    /// A uniformly random throw of two fair dice.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self(rng.random_range(1..=6), rng.random_range(1..=6))
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.0, self.1)
    }
}

/// Betting phase of the table.
///
/// The point exists exactly when the table is in the point phase, so the
/// two can never disagree.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Phase {
    ComeOut,
    Point(u8),
}

impl Phase {
    /// The established point, if any.
    #[must_use]
    pub fn point(self) -> Option<u8> {
        match self {
            Self::ComeOut => None,
            Self::Point(n) => Some(n),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::ComeOut => "come out".to_string(),
            Self::Point(n) => format!("point {n}"),
        };
        write!(f, "{repr}")
    }
}

/// Table-level betting state, mutated only by the resolution engine.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableState {
    pub phase: Phase,
    /// Whether line/come/odds wagers may currently be opened.
    pub can_bet: bool,
    /// Total of the most recently settled throw.
    pub last_roll: Option<u8>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new()
    }
}

impl TableState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::ComeOut,
            can_bet: true,
            last_roll: None,
        }
    }

    /// The established point, if any.
    #[must_use]
    pub fn point(&self) -> Option<u8> {
        self.phase.point()
    }

    pub(crate) fn set_point(&mut self, point: u8) {
        self.phase = Phase::Point(point);
    }

    pub(crate) fn clear_point(&mut self) {
        self.phase = Phase::ComeOut;
    }
}

/// A come or don't-come entry.
///
/// Starts "in the box" with no point; on the first roll that doesn't
/// resolve it outright, it migrates onto the rolled number and works
/// there until that number repeats or a seven shows.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComeBet {
    pub amount: Usd,
    pub point: Option<u8>,
    pub odds: Usd,
}

impl ComeBet {
    #[must_use]
    pub fn new(amount: Usd) -> Self {
        Self {
            amount,
            point: None,
            odds: 0,
        }
    }

    /// Flat amount plus attached odds.
    #[must_use]
    pub fn total(&self) -> Usd {
        self.amount + self.odds
    }
}

/// One player's balance and every wager they have riding.
///
/// The balance can never be debited below zero: wager creation checks
/// funds before touching anything, and every other mutation is a credit.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Account {
    pub balance: Usd,
    pub pass_line: Usd,
    /// Odds riding behind the pass line wager.
    pub line_odds: Usd,
    pub dont_pass: Usd,
    /// One-roll field wager.
    pub field: Usd,
    pub come_bets: Vec<ComeBet>,
    pub dont_come_bets: Vec<ComeBet>,
    /// Place wagers, one slot per number in [`PLACE_NUMBERS`].
    pub place_bets: [Usd; 6],
    /// Hardway wagers, one slot per number in [`HARDWAY_NUMBERS`].
    pub hardways: [Usd; 4],
}

impl Default for Account {
    fn default() -> Self {
        Self::new(super::constants::DEFAULT_BANKROLL)
    }
}

impl Account {
    #[must_use]
    pub fn new(bankroll: Usd) -> Self {
        Self {
            balance: bankroll,
            pass_line: 0,
            line_odds: 0,
            dont_pass: 0,
            field: 0,
            come_bets: Vec::new(),
            dont_come_bets: Vec::new(),
            place_bets: [0; 6],
            hardways: [0; 4],
        }
    }

    /// Sum of every open wager, attached odds included.
    #[must_use]
    pub fn total_wagered(&self) -> Usd {
        let come: Usd = self.come_bets.iter().map(ComeBet::total).sum();
        let dont_come: Usd = self.dont_come_bets.iter().map(ComeBet::total).sum();
        let place: Usd = self.place_bets.iter().sum();
        let hard: Usd = self.hardways.iter().sum();
        self.pass_line
            + self.line_odds
            + self.dont_pass
            + self.field
            + come
            + dont_come
            + place
            + hard
    }

    /// Amount riding on the place slot for `number`, 0 when `number`
    /// offers no place wager.
    #[must_use]
    pub fn place_amount(&self, number: u8) -> Usd {
        place_slot(number).map_or(0, |slot| self.place_bets[slot])
    }

    /// Amount riding on the hardway slot for `number`, 0 when `number`
    /// offers no hardway.
    #[must_use]
    pub fn hardway_amount(&self, number: u8) -> Usd {
        hardway_slot(number).map_or(0, |slot| self.hardways[slot])
    }
}

/// Slot index of a place number.
#[must_use]
pub fn place_slot(number: u8) -> Option<usize> {
    PLACE_NUMBERS.iter().position(|&n| n == number)
}

/// Slot index of a hardway number.
#[must_use]
pub fn hardway_slot(number: u8) -> Option<usize> {
    HARDWAY_NUMBERS.iter().position(|&n| n == number)
}

/// Break an amount into standard chip denominations, largest first.
#[must_use]
pub fn chip_stack(mut amount: Usd) -> Vec<Usd> {
    let mut chips = Vec::new();
    for value in CHIP_DENOMINATIONS {
        while amount >= value {
            chips.push(value);
            amount -= value;
        }
    }
    chips
}

/// A wager-creation request routed to one of the table's slots.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Wager {
    PassLine,
    DontPass,
    Come,
    DontCome,
    Field,
    Place(u8),
    Hardway(u8),
    Odds(OddsTarget),
}

/// Which standing bet an odds wager backs.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum OddsTarget {
    Line,
    Come(u8),
    DontCome(u8),
}

impl fmt::Display for Wager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PassLine => "pass line".to_string(),
            Self::DontPass => "don't pass".to_string(),
            Self::Come => "come".to_string(),
            Self::DontCome => "don't come".to_string(),
            Self::Field => "field".to_string(),
            Self::Place(n) => format!("place {n}"),
            Self::Hardway(n) => format!("hard {n}"),
            Self::Odds(OddsTarget::Line) => "pass line odds".to_string(),
            Self::Odds(OddsTarget::Come(n)) => format!("odds on come {n}"),
            Self::Odds(OddsTarget::DontCome(n)) => format!("odds on don't come {n}"),
        };
        write!(f, "{repr}")
    }
}
