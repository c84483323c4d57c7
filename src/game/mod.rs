//! Craps table engine - wager slots, payouts, and per-roll resolution.
//!
//! This module provides the in-memory core of the table:
//! - The data model: account ledger, wager slots, and the betting phase
//! - True-odds and place payout math with exact rounding
//! - A [`Session`] bundling one account with one table
//! - The resolution engine that settles every category on each roll

// Submodules
pub mod constants;
pub mod entities;
pub mod payouts;

mod resolve;
mod state_machine;

pub use entities::{Account, ComeBet, OddsTarget, Phase, Roll, TableState, Usd, Wager};
pub use resolve::{RollError, RollEvent, Settlement};
pub use state_machine::{Session, WagerError};
