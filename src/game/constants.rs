//! Fixed table numbers and tuning constants.

use super::entities::Usd;

/// Numbers a point can be established on; also the place-bet slots.
pub const PLACE_NUMBERS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Numbers offering a hardway wager.
pub const HARDWAY_NUMBERS: [u8; 4] = [4, 6, 8, 10];

/// Field totals paying even money.
pub const FIELD_SINGLE: [u8; 5] = [3, 4, 9, 10, 11];

/// Field totals paying double.
pub const FIELD_DOUBLE: [u8; 2] = [2, 12];

/// Come-out totals that win the pass line outright.
pub const NATURALS: [u8; 2] = [7, 11];

/// Come-out totals that lose the pass line outright.
pub const CRAPS: [u8; 3] = [2, 3, 12];

/// Bankroll a fresh session starts with.
pub const DEFAULT_BANKROLL: Usd = 500;

/// Standard chip denominations, largest first.
pub const CHIP_DENOMINATIONS: [Usd; 6] = [1000, 500, 100, 25, 5, 1];

/// Velocity magnitude below which a die counts as still.
pub const STILLNESS_EPSILON: f32 = 0.1;

/// Continuous stillness required before a throw settles, in seconds.
pub const SETTLE_DELAY: f32 = 1.2;
