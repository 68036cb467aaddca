//! Fauna Common - shared types for the Fauna Atlas service.
//!
//! Wire payloads exchanged between faunad and its clients, plus the
//! normalized species key used for every table lookup in the daemon.

pub mod species;
pub mod types;

pub use species::SpeciesKey;
pub use types::*;
