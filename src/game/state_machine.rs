//! Session state and wager placement.
//!
//! A [`Session`] bundles one account with one table. Everything mutates
//! through `&mut self` entry points; there are no ambient singletons and
//! no locks, since the game loop owns the session outright.
//!
//! Wager creation is all-or-nothing: every precondition (phase, target
//! number, funds) is checked before the first debit, and a refused wager
//! leaves the account and table exactly as they were.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::DEFAULT_BANKROLL;
use super::entities::{
    Account, ComeBet, OddsTarget, Phase, Roll, TableState, Usd, Wager, hardway_slot, place_slot,
};
use super::resolve::{self, RollError, Settlement};

/// Reasons a wager request is refused.
///
/// The `Display` text is the advisory shown to the player. A refusal is
/// a silent no-op on the session; nothing is debited.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum WagerError {
    #[error("Bets are locked until the round is over.")]
    BetsLocked,
    #[error("Come bets only allowed after the point is set.")]
    ComeBeforePoint,
    #[error("Don't Come only after point is set.")]
    DontComeBeforePoint,
    #[error("Don't Pass only on come out.")]
    DontPassOffComeOut,
    #[error("need ${required} but only ${available} remains")]
    InsufficientFunds { available: Usd, required: Usd },
    #[error("no number takes a wager on {0}")]
    InvalidNumber(u8),
    #[error("no come bet riding on {0} to back with odds")]
    NoComeBetOn(u8),
    #[error("no don't come bet riding on {0} to back with odds")]
    NoDontComeBetOn(u8),
    #[error("Pass line odds only after a point.")]
    OddsBeforePoint,
    #[error("Place bets only after the point is set.")]
    PlaceBeforePoint,
}

/// A craps session: one account at one table.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    pub account: Account,
    pub table: TableState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh table with the default bankroll.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bankroll(DEFAULT_BANKROLL)
    }

    #[must_use]
    pub fn with_bankroll(bankroll: Usd) -> Self {
        Self {
            account: Account::new(bankroll),
            table: TableState::new(),
        }
    }

    /// Route a wager request to its slot.
    ///
    /// Each category enforces its own phase/point precondition plus the
    /// funds precondition; the first violation is returned and nothing
    /// changes.
    pub fn place_wager(&mut self, wager: Wager, amount: Usd) -> Result<(), WagerError> {
        match wager {
            Wager::PassLine => {
                if !self.table.can_bet || self.table.phase != Phase::ComeOut {
                    return Err(WagerError::BetsLocked);
                }
                self.debit(amount)?;
                self.account.pass_line += amount;
            }
            Wager::DontPass => {
                if self.table.phase != Phase::ComeOut {
                    return Err(WagerError::DontPassOffComeOut);
                }
                self.debit(amount)?;
                self.account.dont_pass += amount;
            }
            Wager::Come => {
                if self.table.point().is_none() {
                    return Err(WagerError::ComeBeforePoint);
                }
                if !self.table.can_bet {
                    return Err(WagerError::BetsLocked);
                }
                self.debit(amount)?;
                self.account.come_bets.push(ComeBet::new(amount));
            }
            Wager::DontCome => {
                if self.table.point().is_none() {
                    return Err(WagerError::DontComeBeforePoint);
                }
                if !self.table.can_bet {
                    return Err(WagerError::BetsLocked);
                }
                self.debit(amount)?;
                self.account.dont_come_bets.push(ComeBet::new(amount));
            }
            Wager::Field => {
                self.debit(amount)?;
                self.account.field += amount;
            }
            Wager::Place(number) => {
                let slot = place_slot(number).ok_or(WagerError::InvalidNumber(number))?;
                if self.table.point().is_none() {
                    return Err(WagerError::PlaceBeforePoint);
                }
                self.debit(amount)?;
                self.account.place_bets[slot] += amount;
            }
            Wager::Hardway(number) => {
                let slot = hardway_slot(number).ok_or(WagerError::InvalidNumber(number))?;
                self.debit(amount)?;
                self.account.hardways[slot] += amount;
            }
            Wager::Odds(OddsTarget::Line) => {
                if self.table.point().is_none() {
                    return Err(WagerError::OddsBeforePoint);
                }
                self.debit(amount)?;
                self.account.line_odds += amount;
            }
            Wager::Odds(OddsTarget::Come(point)) => {
                let idx = self
                    .account
                    .come_bets
                    .iter()
                    .position(|bet| bet.point == Some(point))
                    .ok_or(WagerError::NoComeBetOn(point))?;
                self.debit(amount)?;
                self.account.come_bets[idx].odds += amount;
            }
            Wager::Odds(OddsTarget::DontCome(point)) => {
                let idx = self
                    .account
                    .dont_come_bets
                    .iter()
                    .position(|bet| bet.point == Some(point))
                    .ok_or(WagerError::NoDontComeBetOn(point))?;
                self.debit(amount)?;
                self.account.dont_come_bets[idx].odds += amount;
            }
        }
        debug!("placed ${amount} on {wager}");
        Ok(())
    }

    /// Take (part of) a standing wager back down, refunding it to the
    /// balance.
    ///
    /// Returns the amount actually refunded, capped at what is
    /// outstanding on the slot. `Come`/`DontCome` target the entry still
    /// in the box; a working entry's odds come down through its odds
    /// target. An emptied come entry is dropped from its list.
    pub fn take_down(&mut self, wager: Wager, amount: Usd) -> Result<Usd, WagerError> {
        let refund = match wager {
            Wager::PassLine => take_from(&mut self.account.pass_line, amount),
            Wager::DontPass => take_from(&mut self.account.dont_pass, amount),
            Wager::Field => take_from(&mut self.account.field, amount),
            Wager::Come => take_from_entry(&mut self.account.come_bets, None, amount),
            Wager::DontCome => take_from_entry(&mut self.account.dont_come_bets, None, amount),
            Wager::Place(number) => {
                let slot = place_slot(number).ok_or(WagerError::InvalidNumber(number))?;
                take_from(&mut self.account.place_bets[slot], amount)
            }
            Wager::Hardway(number) => {
                let slot = hardway_slot(number).ok_or(WagerError::InvalidNumber(number))?;
                take_from(&mut self.account.hardways[slot], amount)
            }
            Wager::Odds(OddsTarget::Line) => take_from(&mut self.account.line_odds, amount),
            Wager::Odds(OddsTarget::Come(point)) => {
                take_odds_from_entry(&mut self.account.come_bets, point, amount)
            }
            Wager::Odds(OddsTarget::DontCome(point)) => {
                take_odds_from_entry(&mut self.account.dont_come_bets, point, amount)
            }
        };
        self.account.balance += refund;
        if refund > 0 {
            debug!("took ${refund} down from {wager}");
        }
        Ok(refund)
    }

    /// Sum of every open wager for display, attached odds included.
    #[must_use]
    pub fn total_outstanding(&self) -> Usd {
        self.account.total_wagered()
    }

    /// Settle a completed throw.
    ///
    /// The only mutation entry point for roll outcomes: applies every
    /// category's outcome and the phase transition, or nothing at all
    /// when a face is out of range.
    pub fn resolve_roll(&mut self, roll: Roll) -> Result<Settlement, RollError> {
        resolve::resolve_roll(self, roll)
    }

    fn debit(&mut self, amount: Usd) -> Result<(), WagerError> {
        if self.account.balance < amount {
            return Err(WagerError::InsufficientFunds {
                available: self.account.balance,
                required: amount,
            });
        }
        self.account.balance -= amount;
        Ok(())
    }
}

fn take_from(slot: &mut Usd, amount: Usd) -> Usd {
    let taken = amount.min(*slot);
    *slot -= taken;
    taken
}

/// Refund from the entry riding `point`, odds first, then the flat
/// amount; drop the entry once both are gone.
fn take_from_entry(entries: &mut Vec<ComeBet>, point: Option<u8>, amount: Usd) -> Usd {
    let Some(idx) = entries.iter().position(|bet| bet.point == point) else {
        return 0;
    };
    let bet = &mut entries[idx];
    let mut taken = take_from(&mut bet.odds, amount);
    taken += take_from(&mut bet.amount, amount - taken);
    if bet.total() == 0 {
        entries.remove(idx);
    }
    taken
}

fn take_odds_from_entry(entries: &mut [ComeBet], point: u8, amount: Usd) -> Usd {
    entries
        .iter_mut()
        .find(|bet| bet.point == Some(point))
        .map_or(0, |bet| take_from(&mut bet.odds, amount))
}
