//! Fundamental types for the ballot ledger.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! participant addresses, fixed-length proposal labels, and their parse errors.

pub mod address;
pub mod error;
pub mod name;

pub use address::VoterAddress;
pub use error::TypesError;
pub use name::ProposalName;
