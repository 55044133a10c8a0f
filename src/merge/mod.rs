//! The per-round merge shared by both engines
//!
//! [`Ledger`] tracks which slots are retired and routes each terminal payload
//! to a [`Policy`], one per combinator strategy.

mod ledger;
mod policy;

pub(crate) use ledger::{Ledger, spread};
pub use ledger::SlotState;
pub use policy::{All, AllSettled, Any, Policy, Race, Settlement};
