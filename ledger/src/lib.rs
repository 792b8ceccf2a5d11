//! Single-election voting ledger.
//!
//! A chairperson enrolls voters; each voter either votes directly for one of
//! a fixed, ordered set of proposals or delegates its whole weight to another
//! voter. Delegation chains are resolved eagerly when an edge is added, so
//! proposal tallies are always current and the leading proposal can be read
//! at any time.
//!
//! Weight is conserved: every unit granted (the chairperson's implicit 1 plus
//! one per enrollment) is either held by a voter that has not voted yet or
//! folded into exactly one proposal's tally.

pub mod authority;
pub mod election;
pub mod error;
pub mod event;
pub mod proposal;
pub mod shared;
pub mod snapshot;
pub mod tally;
pub mod voter;

pub use authority::{ChairpersonOnly, EnrollAuthority};
pub use election::ElectionLedger;
pub use error::LedgerError;
pub use event::{BallotEvent, EventBus};
pub use proposal::Proposal;
pub use shared::SharedLedger;
pub use snapshot::LedgerSnapshot;
pub use tally::{TallyEntry, TallyReport};
pub use voter::Voter;
