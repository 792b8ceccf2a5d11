//! Ledger snapshots — the hand-off format to durable storage.
//!
//! A snapshot captures the chairperson, the proposal sequence and every
//! materialised voter record. Voters are stored sorted by address so the
//! Blake2b integrity hash is deterministic; the hash is verified on load.

use std::collections::HashMap;

use ballot_types::VoterAddress;
use serde::{Deserialize, Serialize};

use crate::election::ElectionLedger;
use crate::error::LedgerError;
use crate::proposal::Proposal;
use crate::voter::Voter;

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: u32,
    /// Blake2b-256 over every other field.
    pub hash: [u8; 32],
    pub chairperson: VoterAddress,
    pub proposals: Vec<Proposal>,
    pub voters: Vec<(VoterAddress, Voter)>,
    pub granted_weight: u64,
}

impl LedgerSnapshot {
    pub fn capture(ledger: &ElectionLedger) -> Self {
        let mut voters: Vec<(VoterAddress, Voter)> =
            ledger.voters.iter().map(|(a, v)| (*a, *v)).collect();
        voters.sort_by_key(|(address, _)| *address);

        let mut snap = Self {
            version: SNAPSHOT_VERSION,
            hash: [0u8; 32],
            chairperson: ledger.chairperson,
            proposals: ledger.proposals.clone(),
            voters,
            granted_weight: ledger.granted_weight,
        };
        snap.hash = snap.compute_hash();
        snap
    }

    fn compute_hash(&self) -> [u8; 32] {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(self.chairperson.as_bytes());
        for proposal in &self.proposals {
            hasher.update(proposal.name.as_bytes());
            hasher.update(proposal.vote_count.to_le_bytes());
        }
        for (address, voter) in &self.voters {
            hasher.update(address.as_bytes());
            hasher.update(voter.weight.to_le_bytes());
            hasher.update([u8::from(voter.voted)]);
            match voter.delegate {
                Some(d) => {
                    hasher.update([1u8]);
                    hasher.update(d.as_bytes());
                }
                None => hasher.update([0u8]),
            }
            match voter.vote {
                Some(index) => {
                    hasher.update([1u8]);
                    hasher.update((index as u64).to_le_bytes());
                }
                None => hasher.update([0u8]),
            }
        }
        hasher.update(self.granted_weight.to_le_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    /// Check version, hash and internal consistency.
    ///
    /// The hash is unkeyed and only catches corruption, so the ledger
    /// invariants are re-checked here: unique sorted records, a chairperson
    /// with weight, `vote`/`delegate` set exactly when voted, delegate links
    /// to known records without loops, and conserved weight.
    pub fn verify(&self) -> Result<(), LedgerError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(LedgerError::Snapshot(format!(
                "unsupported version {}",
                self.version
            )));
        }
        if self.hash != self.compute_hash() {
            return Err(LedgerError::Snapshot("hash mismatch".into()));
        }
        if self.proposals.is_empty() {
            return Err(LedgerError::EmptyBallot);
        }
        if self.voters.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(LedgerError::Snapshot(
                "voter records not sorted or not unique".into(),
            ));
        }

        let records: HashMap<VoterAddress, Voter> = self.voters.iter().copied().collect();
        match records.get(&self.chairperson) {
            Some(chair) if chair.weight >= 1 => {}
            _ => {
                return Err(LedgerError::Snapshot(format!(
                    "chairperson {} has no weight",
                    self.chairperson
                )))
            }
        }

        for (address, voter) in &self.voters {
            match (voter.voted, voter.vote, voter.delegate) {
                (false, None, None) => {}
                (true, Some(index), None) => {
                    if index >= self.proposals.len() {
                        return Err(LedgerError::Snapshot(format!(
                            "voter {address} voted for missing proposal {index}"
                        )));
                    }
                }
                (true, None, Some(delegate)) => {
                    if delegate == *address || !records.contains_key(&delegate) {
                        return Err(LedgerError::Snapshot(format!(
                            "voter {address} delegated to unknown voter {delegate}"
                        )));
                    }
                }
                _ => {
                    return Err(LedgerError::Snapshot(format!(
                        "voter {address} has inconsistent voted/vote/delegate fields"
                    )))
                }
            }
            Self::check_chain(&records, address)?;
        }

        let cast: u64 = self.proposals.iter().map(|p| p.vote_count).sum();
        let pending: u64 = self.voters.iter().map(|(_, v)| v.pending_weight()).sum();
        if cast + pending != self.granted_weight {
            return Err(LedgerError::Snapshot(format!(
                "weight not conserved: cast {cast} + pending {pending} != granted {}",
                self.granted_weight
            )));
        }
        Ok(())
    }

    fn check_chain(
        records: &HashMap<VoterAddress, Voter>,
        start: &VoterAddress,
    ) -> Result<(), LedgerError> {
        let mut current = *start;
        for _ in 0..=records.len() {
            match records.get(&current).and_then(|v| v.delegate) {
                Some(next) => current = next,
                None => return Ok(()),
            }
        }
        Err(LedgerError::Snapshot(format!(
            "delegation loop reachable from {start}"
        )))
    }

    fn into_ledger(self) -> ElectionLedger {
        let voters: HashMap<VoterAddress, Voter> = self.voters.into_iter().collect();
        ElectionLedger::from_parts(self.chairperson, self.proposals, voters, self.granted_weight)
    }
}

impl ElectionLedger {
    /// Serialize the ledger state with `bincode`.
    pub fn save_state(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(&LedgerSnapshot::capture(self))
            .map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Restore a ledger from [`ElectionLedger::save_state`] output.
    ///
    /// The restored ledger uses the default chairperson-only enrollment
    /// authority and has no event listeners.
    pub fn load_state(data: &[u8]) -> Result<Self, LedgerError> {
        let snapshot: LedgerSnapshot =
            bincode::deserialize(data).map_err(|e| LedgerError::Snapshot(e.to_string()))?;
        snapshot.verify()?;
        Ok(snapshot.into_ledger())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_types::ProposalName;

    fn addr(seed: u8) -> VoterAddress {
        VoterAddress::new([seed; 20])
    }

    fn busy_ledger() -> ElectionLedger {
        let names = ["A", "B", "C"].map(|l| ProposalName::from_label(l).unwrap());
        let mut l = ElectionLedger::new(addr(0xc0), names).unwrap();
        for seed in 1..=4 {
            l.enroll(&addr(0xc0), &addr(seed)).unwrap();
        }
        l.delegate(&addr(0xc0), &addr(1)).unwrap();
        l.vote(&addr(2), 2).unwrap();
        l.delegate(&addr(3), &addr(2)).unwrap();
        l
    }

    #[test]
    fn restored_ledger_continues_the_election() {
        let saved = busy_ledger();
        let bytes = saved.save_state().unwrap();
        let mut restored = ElectionLedger::load_state(&bytes).unwrap();

        assert_eq!(restored.chairperson(), saved.chairperson());
        assert_eq!(restored.proposals(), saved.proposals());
        assert_eq!(restored.voter(&addr(1)), saved.voter(&addr(1)));
        assert_eq!(restored.total_granted_weight(), 5);

        restored.vote(&addr(1), 0).unwrap();
        assert_eq!(restored.proposal(0).unwrap().vote_count, 2);
        assert_eq!(
            restored.enroll(&addr(1), &addr(9)),
            Err(LedgerError::Unauthorized)
        );
    }

    #[test]
    fn capture_is_deterministic() {
        let l = busy_ledger();
        assert_eq!(LedgerSnapshot::capture(&l), LedgerSnapshot::capture(&l));
    }

    #[test]
    fn tampered_snapshot_rejected() {
        let mut snap = LedgerSnapshot::capture(&busy_ledger());
        snap.proposals[0].vote_count += 10;
        let bytes = bincode::serialize(&snap).unwrap();
        assert_eq!(
            ElectionLedger::load_state(&bytes).err(),
            Some(LedgerError::Snapshot("hash mismatch".into()))
        );
    }

    /// Edit a captured snapshot and re-seal its hash, as a writer
    /// without access to the ledger could.
    fn forged(edit: impl FnOnce(&mut LedgerSnapshot)) -> Vec<u8> {
        let mut snap = LedgerSnapshot::capture(&busy_ledger());
        edit(&mut snap);
        snap.hash = snap.compute_hash();
        bincode::serialize(&snap).unwrap()
    }

    fn record(snap: &mut LedgerSnapshot, seed: u8) -> &mut Voter {
        &mut snap
            .voters
            .iter_mut()
            .find(|(a, _)| *a == addr(seed))
            .unwrap()
            .1
    }

    fn rejected(bytes: &[u8]) -> bool {
        matches!(
            ElectionLedger::load_state(bytes),
            Err(LedgerError::Snapshot(_))
        )
    }

    #[test]
    fn voted_record_without_vote_or_delegate_rejected() {
        let bytes = forged(|s| {
            s.voters.push((
                addr(5),
                Voter {
                    weight: 0,
                    voted: true,
                    delegate: None,
                    vote: None,
                },
            ));
            s.voters.sort_by_key(|(a, _)| *a);
        });
        assert!(rejected(&bytes));
    }

    #[test]
    fn unvoted_record_with_choice_rejected() {
        assert!(rejected(&forged(|s| record(s, 4).vote = Some(0))));
        assert!(rejected(&forged(|s| record(s, 4).delegate = Some(addr(1)))));
    }

    #[test]
    fn missing_chairperson_rejected() {
        let bytes = forged(|s| {
            s.voters.retain(|(a, _)| *a != addr(0xc0));
            // Chairperson's unit sits with voter 1; keep the books balanced.
            record(s, 1).weight -= 1;
            s.granted_weight -= 1;
        });
        assert!(rejected(&bytes));
    }

    #[test]
    fn unbalanced_weight_rejected() {
        assert!(rejected(&forged(|s| s.granted_weight += 1)));
        assert!(rejected(&forged(|s| record(s, 4).weight += 1)));
    }

    #[test]
    fn delegation_loop_rejected() {
        let bytes = forged(|s| {
            // 0xc0 already delegates to 1; close the loop 1 -> 0xc0.
            let one = record(s, 1);
            one.voted = true;
            one.delegate = Some(addr(0xc0));
        });
        assert!(rejected(&bytes));
    }

    #[test]
    fn duplicate_records_rejected() {
        let bytes = forged(|s| {
            let dup = s.voters[0];
            s.voters.insert(0, dup);
        });
        assert!(rejected(&bytes));
    }

    #[test]
    fn wrong_version_rejected() {
        let mut snap = LedgerSnapshot::capture(&busy_ledger());
        snap.version = 99;
        assert!(matches!(snap.verify(), Err(LedgerError::Snapshot(_))));
    }

    #[test]
    fn garbage_bytes_rejected() {
        assert!(matches!(
            ElectionLedger::load_state(&[1, 2, 3]),
            Err(LedgerError::Snapshot(_))
        ));
    }
}
