//! Ballot proposals.

use ballot_types::ProposalName;
use serde::{Deserialize, Serialize};

/// One entry on the ballot, identified externally by its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub name: ProposalName,
    /// Accumulated weight. Only ever increases.
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(name: ProposalName) -> Self {
        Self {
            name,
            vote_count: 0,
        }
    }
}
