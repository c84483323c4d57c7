//! # Casino Craps
//!
//! A craps table engine: wager settlement and betting-phase state for a dice
//! simulation.
//!
//! Rendering, rigid-body physics, and input handling live outside this crate.
//! What comes in is the pair of up-faces of a finished throw (or, one layer
//! further out, per-tick motion samples for two dice); what comes out is the
//! updated account, the updated table state, and a human-readable settlement
//! message.
//!
//! ## Architecture
//!
//! The table is a state machine over two betting phases:
//!
//! - **Come-out**: the opening roll of a round. Naturals (7, 11) win the pass
//!   line, craps (2, 3, 12) lose it, and any box number becomes the point.
//! - **Point**: the table aims to repeat the point before a 7. Come bets,
//!   odds, and place bets open up while the point is live.
//!
//! Seven wager categories ride across rolls independently of the phase:
//! pass/don't pass line wagers with attached odds, come/don't come entries
//! that migrate onto a number, place and hardway slots, and the one-roll
//! field.
//!
//! ## Core Modules
//!
//! - [`game`]: wager slots, payout math, the session, and per-roll resolution
//! - [`roll`]: the settlement detector sitting on the physics boundary
//!
//! ## Example
//!
//! ```
//! use casino_craps::{Roll, Session, Wager};
//!
//! let mut session = Session::new();
//! session.place_wager(Wager::PassLine, 10).unwrap();
//!
//! // A natural on the come-out roll pays even money.
//! let settlement = session.resolve_roll(Roll(4, 3)).unwrap();
//! assert_eq!(settlement.message, "Pass line wins.");
//! ```

/// Wager slots, payout math, and per-roll resolution.
pub mod game;
pub use game::{
    Account, ComeBet, OddsTarget, Phase, Roll, RollError, RollEvent, Session, Settlement,
    TableState, Usd, Wager, WagerError,
    constants::{self, DEFAULT_BANKROLL},
};

/// Roll settlement detection on the physics boundary.
pub mod roll;
pub use roll::{DiceTable, Motion, SettleDetector};
