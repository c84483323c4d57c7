//! True-odds and place payout math.
//!
//! The ratios for 5/9 and 6/8 are not whole numbers, so winnings are
//! computed in floating point and rounded half away from zero. Every
//! amount must come out to the same integer credit the table has always
//! paid, which pins both the rounding mode and the order of operations.

use super::constants::{FIELD_DOUBLE, FIELD_SINGLE};
use super::entities::Usd;

/// Winnings for a true-odds wager riding on `point`, excluding the
/// returned stake. Non-point numbers fall through to the stake itself.
#[must_use]
pub fn odds_payout(point: u8, amount: Usd) -> Usd {
    match point {
        4 | 10 => amount * 2,
        5 | 9 => (f64::from(amount) * 1.5).round() as Usd,
        6 | 8 => (f64::from(amount) * 1.2).round() as Usd,
        _ => amount,
    }
}

/// Total credit for a winning place wager on `point`. The wager itself
/// stays on the table, so the stake is not part of the credit.
#[must_use]
pub fn place_payout(point: u8, amount: Usd) -> Usd {
    let amount = f64::from(amount);
    let credit = match point {
        4 | 10 => amount * 9.0 / 5.0,
        5 | 9 => amount * 7.0 / 5.0,
        6 | 8 => amount * 7.0 / 6.0,
        _ => return 0,
    };
    credit.round() as Usd
}

/// Credit multiplier for a hardway hit on `number`.
#[must_use]
pub fn hardway_multiplier(number: u8) -> Usd {
    match number {
        6 | 8 => 9,
        _ => 7,
    }
}

/// Credit multiplier for a field wager on `total`; 0 means the field
/// loses.
#[must_use]
pub fn field_multiplier(total: u8) -> Usd {
    if FIELD_SINGLE.contains(&total) {
        2
    } else if FIELD_DOUBLE.contains(&total) {
        3
    } else {
        0
    }
}
