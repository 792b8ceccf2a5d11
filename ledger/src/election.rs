//! The election ledger: enrollment, delegation and direct voting.
//!
//! Delegation is resolved eagerly. When `A` delegates to `B`, the chain
//! starting at `B` is followed to its end `T` right away, and `A`'s weight
//! lands either on `T` (if `T` has not voted) or directly on the proposal `T`
//! voted for. Tallies therefore never need a separate resolution pass.

use std::collections::HashMap;

use ballot_types::{ProposalName, VoterAddress};
use tracing::{debug, warn};

use crate::authority::{ChairpersonOnly, EnrollAuthority};
use crate::error::LedgerError;
use crate::event::{BallotEvent, EventBus};
use crate::proposal::Proposal;
use crate::voter::Voter;

/// State of a single election.
///
/// Every mutating operation validates all of its preconditions before the
/// first write, so a returned error means nothing changed.
pub struct ElectionLedger {
    pub(crate) chairperson: VoterAddress,
    pub(crate) proposals: Vec<Proposal>,
    pub(crate) voters: HashMap<VoterAddress, Voter>,
    /// Chairperson's implicit 1 plus one per enrollment.
    pub(crate) granted_weight: u64,
    authority: Box<dyn EnrollAuthority>,
    events: EventBus,
}

impl ElectionLedger {
    /// Open an election with `chairperson` holding weight 1.
    ///
    /// Proposals keep the order given; their position is their index.
    pub fn new(
        chairperson: VoterAddress,
        names: impl IntoIterator<Item = ProposalName>,
    ) -> Result<Self, LedgerError> {
        let proposals: Vec<Proposal> = names.into_iter().map(Proposal::new).collect();
        if proposals.is_empty() {
            return Err(LedgerError::EmptyBallot);
        }

        let mut voters = HashMap::new();
        voters.insert(
            chairperson,
            Voter {
                weight: 1,
                ..Voter::default()
            },
        );

        debug!(%chairperson, proposals = proposals.len(), "election opened");
        Ok(Self::from_parts(chairperson, proposals, voters, 1))
    }

    pub(crate) fn from_parts(
        chairperson: VoterAddress,
        proposals: Vec<Proposal>,
        voters: HashMap<VoterAddress, Voter>,
        granted_weight: u64,
    ) -> Self {
        Self {
            chairperson,
            proposals,
            voters,
            granted_weight,
            authority: Box::new(ChairpersonOnly),
            events: EventBus::new(),
        }
    }

    /// Replace the enrollment authorization hook.
    pub fn with_authority(mut self, authority: impl EnrollAuthority + 'static) -> Self {
        self.authority = Box::new(authority);
        self
    }

    /// Register a listener for committed operations.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&BallotEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Mutating operations ──────────────────────────────────────────────

    /// Grant `target` the right to vote (weight 1).
    ///
    /// Fails with `Unauthorized` if the authority hook refuses `caller`, and
    /// with `AlreadyVotedOrEnrolled` if `target` has voted or already holds
    /// weight (including weight received through delegation).
    pub fn enroll(
        &mut self,
        caller: &VoterAddress,
        target: &VoterAddress,
    ) -> Result<(), LedgerError> {
        if !self.authority.may_enroll(caller, &self.chairperson) {
            return Err(LedgerError::Unauthorized);
        }
        let current = self.voter(target);
        if current.voted || current.weight != 0 {
            return Err(LedgerError::AlreadyVotedOrEnrolled);
        }

        self.voters.entry(*target).or_default().weight = 1;
        self.granted_weight += 1;

        debug!(voter = %target, "voter enrolled");
        self.events.emit(&BallotEvent::Enrolled { voter: *target });
        Ok(())
    }

    /// Hand the caller's whole weight to `target`.
    ///
    /// The chain from `target` is followed to its end before anything is
    /// written. Failure order: `AlreadyVoted`, `SelfDelegation`,
    /// `DelegationCycle`.
    pub fn delegate(
        &mut self,
        caller: &VoterAddress,
        target: &VoterAddress,
    ) -> Result<(), LedgerError> {
        let sender = self.voter(caller);
        if sender.voted {
            return Err(LedgerError::AlreadyVoted);
        }
        if caller == target {
            return Err(LedgerError::SelfDelegation);
        }
        let terminal = self.resolve_chain(caller, target)?;
        let end = self.voter(&terminal);

        // Checks done; commit.
        let record = self.voters.entry(*caller).or_default();
        record.voted = true;
        record.delegate = Some(terminal);

        let applied_to = match end.vote {
            Some(index) if end.voted => {
                self.proposals[index].vote_count += sender.weight;
                Some(index)
            }
            _ => {
                self.voters.entry(terminal).or_default().weight += sender.weight;
                None
            }
        };

        debug!(
            from = %caller,
            to = %terminal,
            weight = sender.weight,
            ?applied_to,
            "vote delegated"
        );
        self.events.emit(&BallotEvent::Delegated {
            from: *caller,
            to: terminal,
            weight: sender.weight,
            applied_to,
        });
        Ok(())
    }

    /// Cast the caller's full current weight for proposal `index`.
    pub fn vote(&mut self, caller: &VoterAddress, index: usize) -> Result<(), LedgerError> {
        let sender = self.voter(caller);
        if sender.weight == 0 {
            return Err(LedgerError::NoRightToVote);
        }
        if sender.voted {
            return Err(LedgerError::AlreadyVoted);
        }
        self.check_index(index)?;

        let record = self.voters.entry(*caller).or_default();
        record.voted = true;
        record.vote = Some(index);
        self.proposals[index].vote_count += sender.weight;

        debug!(voter = %caller, proposal = index, weight = sender.weight, "vote cast");
        self.events.emit(&BallotEvent::Voted {
            voter: *caller,
            proposal: index,
            weight: sender.weight,
        });
        Ok(())
    }

    // ── Chain resolution ─────────────────────────────────────────────────

    /// Follow delegate links from `target` to the end of its chain.
    ///
    /// Every hop visits a distinct known voter on an acyclic chain, so more
    /// hops than known voters means a loop. Reaching `caller` means the new
    /// edge would close a loop.
    fn resolve_chain(
        &self,
        caller: &VoterAddress,
        target: &VoterAddress,
    ) -> Result<VoterAddress, LedgerError> {
        let max_hops = self.voters.len();
        let mut current = *target;
        let mut hops = 0usize;

        while let Some(next) = self.voters.get(&current).and_then(|v| v.delegate) {
            hops += 1;
            if next == *caller || hops > max_hops {
                warn!(from = %caller, to = %target, hops, "delegation loop rejected");
                return Err(LedgerError::DelegationCycle);
            }
            current = next;
        }
        Ok(current)
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), LedgerError> {
        if index < self.proposals.len() {
            Ok(())
        } else {
            Err(LedgerError::InvalidProposal {
                index,
                count: self.proposals.len(),
            })
        }
    }

    // ── Read accessors ───────────────────────────────────────────────────

    pub fn chairperson(&self) -> &VoterAddress {
        &self.chairperson
    }

    /// The record for `address`, or the default record if never seen.
    pub fn voter(&self, address: &VoterAddress) -> Voter {
        self.voters.get(address).copied().unwrap_or_default()
    }

    /// Number of materialised voter records.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    pub fn proposal(&self, index: usize) -> Result<&Proposal, LedgerError> {
        self.check_index(index)?;
        Ok(&self.proposals[index])
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Total weight ever granted: the chairperson's 1 plus every enrollment.
    pub fn total_granted_weight(&self) -> u64 {
        self.granted_weight
    }

    /// Weight still held by voters that have not voted.
    pub fn pending_weight(&self) -> u64 {
        self.voters.values().map(Voter::pending_weight).sum()
    }

    /// Weight already folded into proposal tallies.
    pub fn cast_weight(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }
}
