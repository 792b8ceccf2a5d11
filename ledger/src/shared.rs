//! Thread-safe handle to a single election.
//!
//! Delegation reads and writes several voter records, so the whole ledger
//! sits behind one mutex and every operation holds it from first check to
//! last write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ballot_types::{ProposalName, VoterAddress};

use crate::election::ElectionLedger;
use crate::error::LedgerError;
use crate::proposal::Proposal;
use crate::tally::TallyReport;
use crate::voter::Voter;

#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<ElectionLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: ElectionLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    // Operations validate before writing, so a panicking listener cannot
    // leave a half-applied transition behind the poisoned lock.
    fn lock(&self) -> MutexGuard<'_, ElectionLedger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn enroll(&self, caller: &VoterAddress, target: &VoterAddress) -> Result<(), LedgerError> {
        self.lock().enroll(caller, target)
    }

    pub fn delegate(
        &self,
        caller: &VoterAddress,
        target: &VoterAddress,
    ) -> Result<(), LedgerError> {
        self.lock().delegate(caller, target)
    }

    pub fn vote(&self, caller: &VoterAddress, index: usize) -> Result<(), LedgerError> {
        self.lock().vote(caller, index)
    }

    pub fn winning_proposal(&self) -> usize {
        self.lock().winning_proposal()
    }

    pub fn winner_name(&self) -> ProposalName {
        self.lock().winner_name()
    }

    pub fn voter(&self, address: &VoterAddress) -> Voter {
        self.lock().voter(address)
    }

    pub fn proposal(&self, index: usize) -> Result<Proposal, LedgerError> {
        self.lock().proposal(index).copied()
    }

    pub fn chairperson(&self) -> VoterAddress {
        *self.lock().chairperson()
    }

    pub fn report(&self) -> TallyReport {
        self.lock().report()
    }

    pub fn save_state(&self) -> Result<Vec<u8>, LedgerError> {
        self.lock().save_state()
    }

    /// Run `f` with exclusive access, e.g. to read several values
    /// consistently.
    pub fn with<R>(&self, f: impl FnOnce(&mut ElectionLedger) -> R) -> R {
        f(&mut self.lock())
    }
}
