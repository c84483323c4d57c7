//! Per-roll wager resolution.
//!
//! One call settles every category in a fixed order - field, hardways,
//! place, come, don't come, then the line - and advances the betting
//! phase. Categories with nothing riding are skipped silently. The whole
//! update is atomic: invalid input is rejected before the first credit.

use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use thiserror::Error;

use super::constants::{CRAPS, HARDWAY_NUMBERS, NATURALS, PLACE_NUMBERS};
use super::entities::{Account, Phase, Roll, TableState, Usd};
use super::payouts::{field_multiplier, hardway_multiplier, odds_payout, place_payout};
use super::state_machine::Session;

/// Contract violation on the resolution entry point.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum RollError {
    #[error("die face out of range: {0}")]
    FaceOutOfRange(u8),
}

/// One category's outcome on a settled roll.
///
/// The `Display` text is the player-facing line for that category; a
/// settlement message is the events' text joined in category order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RollEvent {
    FieldWin { total: u8, payout: Usd },
    FieldDouble { total: u8, payout: Usd },
    FieldLoss,
    HardwayWin { number: u8, payout: Usd },
    HardwayLoss { number: u8 },
    PlaceWin { number: u8, payout: Usd },
    PlaceLoss { number: u8 },
    ComeWin { total: u8, payout: Usd },
    ComeLoss { total: u8 },
    ComeMoved { point: u8 },
    ComePointWin { point: u8, payout: Usd },
    ComePointLoss { point: u8 },
    DontComeWin { total: u8, payout: Usd },
    DontComeLoss,
    DontComePush { payout: Usd },
    DontComeMoved { point: u8 },
    DontComePointWin { point: u8, payout: Usd },
    DontComePointLoss { point: u8 },
    PassLineWin { payout: Usd },
    PassLineHit { point: u8, payout: Usd },
    PassLineLoss,
    DontPassWin { payout: Usd },
    DontPassHit { payout: Usd },
    DontPassLoss,
    DontPassPush { payout: Usd },
    PointEstablished { point: u8 },
}

impl fmt::Display for RollEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::FieldWin { total, .. } => format!("Field bet wins on {total}!"),
            Self::FieldDouble { total, .. } => format!("Field bet pays double on {total}!"),
            Self::FieldLoss => "Field bet loses.".to_string(),
            Self::HardwayWin { number, payout } => format!("Hard {number} pays {payout}!"),
            Self::HardwayLoss { number } => format!("Hard {number} loses."),
            Self::PlaceWin { number, .. } => format!("Place {number} pays!"),
            Self::PlaceLoss { number } => format!("Place {number} loses."),
            Self::ComeWin { total, .. } => format!("Come bet wins on {total}."),
            Self::ComeLoss { total } => format!("Come bet loses on {total}."),
            Self::ComeMoved { point } => format!("Come bet moves to {point}."),
            Self::ComePointWin { point, .. } => format!("Come bet on {point} wins."),
            Self::ComePointLoss { point } => format!("Come bet on {point} loses."),
            Self::DontComeWin { total, .. } => format!("Don't come wins on {total}."),
            Self::DontComeLoss => "Don't come loses.".to_string(),
            Self::DontComePush { .. } => "Don't come pushes on 12.".to_string(),
            Self::DontComeMoved { point } => format!("Don't come moves behind {point}."),
            Self::DontComePointWin { point, .. } => format!("Don't come on {point} wins."),
            Self::DontComePointLoss { point } => format!("Don't come on {point} loses."),
            Self::PassLineWin { .. } => "Pass line wins.".to_string(),
            Self::PassLineHit { .. } => "Pass line wins!".to_string(),
            Self::PassLineLoss => "Pass line loses.".to_string(),
            Self::DontPassWin { .. } => "Don't pass wins.".to_string(),
            Self::DontPassHit { .. } => "Don't pass wins!".to_string(),
            Self::DontPassLoss => "Don't pass loses.".to_string(),
            Self::DontPassPush { .. } => "Don't pass pushes on 12.".to_string(),
            Self::PointEstablished { point } => format!("Point is {point}."),
        };
        write!(f, "{repr}")
    }
}

/// The published outcome of one settled throw: what fired, the message,
/// and snapshots of the account and table after the update.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Settlement {
    pub roll: Roll,
    pub total: u8,
    pub events: Vec<RollEvent>,
    pub message: String,
    pub account: Account,
    pub table: TableState,
}

impl Settlement {
    /// Serialize for the UI boundary.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub(super) fn resolve_roll(session: &mut Session, roll: Roll) -> Result<Settlement, RollError> {
    for face in [roll.0, roll.1] {
        if !(1..=6).contains(&face) {
            error!("rejecting roll {roll}: face {face} out of range");
            return Err(RollError::FaceOutOfRange(face));
        }
    }

    let total = roll.total();
    let mut events = Vec::new();

    resolve_field(&mut session.account, total, &mut events);
    resolve_hardways(&mut session.account, roll, &mut events);
    resolve_place(&mut session.account, total, &mut events);
    resolve_come(&mut session.account, total, &mut events);
    resolve_dont_come(&mut session.account, total, &mut events);
    resolve_line(&mut session.account, &mut session.table, total, &mut events);

    session.table.last_roll = Some(total);

    let message = if events.is_empty() {
        format!("You rolled {total}.")
    } else {
        events
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    debug!("roll {roll} settled: {message}");

    Ok(Settlement {
        roll,
        total,
        events,
        message,
        account: session.account.clone(),
        table: session.table,
    })
}

/// The field is a one-roll wager: it wins or dies on this total either
/// way.
fn resolve_field(account: &mut Account, total: u8, events: &mut Vec<RollEvent>) {
    if account.field == 0 {
        return;
    }
    match field_multiplier(total) {
        2 => {
            let payout = account.field * 2;
            account.balance += payout;
            events.push(RollEvent::FieldWin { total, payout });
        }
        3 => {
            let payout = account.field * 3;
            account.balance += payout;
            events.push(RollEvent::FieldDouble { total, payout });
        }
        _ => events.push(RollEvent::FieldLoss),
    }
    account.field = 0;
}

/// A hardway wins only on the doubled face; the easy way and the seven
/// both take it down.
fn resolve_hardways(account: &mut Account, roll: Roll, events: &mut Vec<RollEvent>) {
    let total = roll.total();
    for (slot, &number) in HARDWAY_NUMBERS.iter().enumerate() {
        let amount = account.hardways[slot];
        if amount == 0 {
            continue;
        }
        if roll.is_hard() && total == number {
            let payout = amount * hardway_multiplier(number);
            account.balance += payout;
            account.hardways[slot] = 0;
            events.push(RollEvent::HardwayWin { number, payout });
        } else if total == 7 || total == number {
            account.hardways[slot] = 0;
            events.push(RollEvent::HardwayLoss { number });
        }
    }
}

/// Place wagers pay on their number and stay working; the seven clears
/// them all.
fn resolve_place(account: &mut Account, total: u8, events: &mut Vec<RollEvent>) {
    for (slot, &number) in PLACE_NUMBERS.iter().enumerate() {
        let amount = account.place_bets[slot];
        if amount == 0 {
            continue;
        }
        if total == number {
            let payout = place_payout(number, amount);
            account.balance += payout;
            events.push(RollEvent::PlaceWin { number, payout });
        } else if total == 7 {
            account.place_bets[slot] = 0;
            events.push(RollEvent::PlaceLoss { number });
        }
    }
}

fn resolve_come(account: &mut Account, total: u8, events: &mut Vec<RollEvent>) {
    let bets = mem::take(&mut account.come_bets);
    for mut bet in bets {
        match bet.point {
            None if NATURALS.contains(&total) => {
                let payout = bet.amount * 2;
                account.balance += payout;
                events.push(RollEvent::ComeWin { total, payout });
            }
            None if CRAPS.contains(&total) => {
                events.push(RollEvent::ComeLoss { total });
            }
            None => {
                bet.point = Some(total);
                events.push(RollEvent::ComeMoved { point: total });
                account.come_bets.push(bet);
            }
            Some(point) if total == point => {
                let payout = bet.amount * 2 + odds_payout(point, bet.odds) + bet.odds;
                account.balance += payout;
                events.push(RollEvent::ComePointWin { point, payout });
            }
            Some(point) if total == 7 => {
                events.push(RollEvent::ComePointLoss { point });
            }
            Some(_) => account.come_bets.push(bet),
        }
    }
}

/// Mirror image of the come bets: craps win in the box, the seven wins
/// once working, and the box twelve pushes.
fn resolve_dont_come(account: &mut Account, total: u8, events: &mut Vec<RollEvent>) {
    let bets = mem::take(&mut account.dont_come_bets);
    for mut bet in bets {
        match bet.point {
            None if total == 2 || total == 3 => {
                let payout = bet.amount * 2;
                account.balance += payout;
                events.push(RollEvent::DontComeWin { total, payout });
            }
            None if NATURALS.contains(&total) => {
                events.push(RollEvent::DontComeLoss);
            }
            None if total == 12 => {
                let payout = bet.amount;
                account.balance += payout;
                events.push(RollEvent::DontComePush { payout });
            }
            None => {
                bet.point = Some(total);
                events.push(RollEvent::DontComeMoved { point: total });
                account.dont_come_bets.push(bet);
            }
            Some(point) if total == 7 => {
                let payout = bet.amount * 2 + odds_payout(point, bet.odds) + bet.odds;
                account.balance += payout;
                events.push(RollEvent::DontComePointWin { point, payout });
            }
            Some(point) if total == point => {
                events.push(RollEvent::DontComePointLoss { point });
            }
            Some(_) => account.dont_come_bets.push(bet),
        }
    }
}

fn resolve_line(
    account: &mut Account,
    table: &mut TableState,
    total: u8,
    events: &mut Vec<RollEvent>,
) {
    match table.phase {
        Phase::ComeOut if NATURALS.contains(&total) => {
            if account.pass_line > 0 {
                let payout = account.pass_line * 2;
                account.balance += payout;
                account.pass_line = 0;
                account.line_odds = 0;
                events.push(RollEvent::PassLineWin { payout });
            }
            if account.dont_pass > 0 {
                account.dont_pass = 0;
                events.push(RollEvent::DontPassLoss);
            }
            table.can_bet = true;
        }
        Phase::ComeOut if CRAPS.contains(&total) => {
            if account.pass_line > 0 {
                account.pass_line = 0;
                account.line_odds = 0;
                events.push(RollEvent::PassLineLoss);
            }
            if account.dont_pass > 0 {
                if total == 12 {
                    let payout = account.dont_pass;
                    account.balance += payout;
                    events.push(RollEvent::DontPassPush { payout });
                } else {
                    let payout = account.dont_pass * 2;
                    account.balance += payout;
                    events.push(RollEvent::DontPassWin { payout });
                }
                account.dont_pass = 0;
            }
            table.can_bet = true;
        }
        Phase::ComeOut => {
            // The point goes up whether or not a line wager is open.
            table.set_point(total);
            table.can_bet = true;
            events.push(RollEvent::PointEstablished { point: total });
        }
        Phase::Point(point) if total == point => {
            if account.pass_line > 0 {
                let payout =
                    account.pass_line * 2 + odds_payout(point, account.line_odds) + account.line_odds;
                account.balance += payout;
                events.push(RollEvent::PassLineHit { point, payout });
            }
            if account.dont_pass > 0 {
                events.push(RollEvent::DontPassLoss);
            }
            account.pass_line = 0;
            account.dont_pass = 0;
            account.line_odds = 0;
            table.clear_point();
            table.can_bet = true;
        }
        Phase::Point(_) if total == 7 => {
            if account.pass_line > 0 {
                events.push(RollEvent::PassLineLoss);
            }
            if account.dont_pass > 0 {
                let payout = account.dont_pass * 2;
                account.balance += payout;
                events.push(RollEvent::DontPassHit { payout });
            }
            account.pass_line = 0;
            account.dont_pass = 0;
            account.line_odds = 0;
            table.clear_point();
            table.can_bet = true;
        }
        Phase::Point(_) => {}
    }
}
