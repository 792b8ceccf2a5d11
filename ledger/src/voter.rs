//! Per-participant voting records.

use ballot_types::VoterAddress;
use serde::{Deserialize, Serialize};

/// The voting record of one participant.
///
/// Records are materialised lazily: an identity the ledger has never seen
/// reads as `Voter::default()` (weight 0, not voted).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Voting weight held. Frozen once `voted` is set.
    pub weight: u64,
    /// Set exactly once, by a direct vote or a delegation.
    pub voted: bool,
    /// Resolved end of the delegation chain, if this voter delegated.
    pub delegate: Option<VoterAddress>,
    /// Proposal index, if this voter voted directly.
    pub vote: Option<usize>,
}

impl Voter {
    /// Weight not yet folded into any proposal tally.
    pub fn pending_weight(&self) -> u64 {
        if self.voted {
            0
        } else {
            self.weight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_has_no_standing() {
        let voter = Voter::default();
        assert_eq!(voter.weight, 0);
        assert!(!voter.voted);
        assert!(voter.delegate.is_none());
        assert!(voter.vote.is_none());
        assert_eq!(voter.pending_weight(), 0);
    }

    #[test]
    fn pending_weight_drops_to_zero_after_voting() {
        let mut voter = Voter {
            weight: 3,
            ..Voter::default()
        };
        assert_eq!(voter.pending_weight(), 3);

        voter.voted = true;
        assert_eq!(voter.pending_weight(), 0);
        assert_eq!(voter.weight, 3);
    }
}
