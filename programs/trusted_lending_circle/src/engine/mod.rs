//! Circle state machine, independent of account plumbing.
//!
//! Every function here takes plain state plus an explicit `now` and never
//! touches sysvars, so instruction handlers stay thin and the rules are unit
//! tested without a validator. Custody goes through [`treasury::CustodyRail`].

pub mod config;
pub mod fees;
pub mod gate;
pub mod ledger;
pub mod membership;
pub mod scheduler;
pub mod selector;
pub mod treasury;
pub mod views;

#[cfg(test)]
pub(crate) mod testkit;

#[cfg(test)]
mod scenarios;
