//! Winner queries and tally reports.
//!
//! All of these are pure reads over the current partial tally and may be
//! called at any point of the election.

use ballot_types::ProposalName;
use serde::{Deserialize, Serialize};

use crate::election::ElectionLedger;

/// One row of a tally report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub index: usize,
    pub name: String,
    pub vote_count: u64,
}

/// Current standings plus the weight bookkeeping behind them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyReport {
    pub entries: Vec<TallyEntry>,
    pub winning_proposal: usize,
    pub winner_name: String,
    /// Weight folded into proposal tallies.
    pub cast_weight: u64,
    /// Weight held by voters that have not voted yet.
    pub pending_weight: u64,
    pub granted_weight: u64,
}

impl ElectionLedger {
    /// Index of the leading proposal.
    ///
    /// A later proposal only takes the lead on a strictly greater count, so
    /// ties go to the lowest index, and an untouched ballot reports index 0.
    pub fn winning_proposal(&self) -> usize {
        let mut winning = 0;
        let mut winning_count = 0;
        for (index, proposal) in self.proposals.iter().enumerate() {
            if proposal.vote_count > winning_count {
                winning_count = proposal.vote_count;
                winning = index;
            }
        }
        winning
    }

    /// Label of the leading proposal.
    pub fn winner_name(&self) -> ProposalName {
        self.proposals[self.winning_proposal()].name
    }

    /// Every proposal with its current count, in ballot order.
    pub fn tally(&self) -> Vec<(ProposalName, u64)> {
        self.proposals
            .iter()
            .map(|p| (p.name, p.vote_count))
            .collect()
    }

    pub fn report(&self) -> TallyReport {
        let entries = self
            .tally()
            .into_iter()
            .enumerate()
            .map(|(index, (name, vote_count))| TallyEntry {
                index,
                name: name.as_label(),
                vote_count,
            })
            .collect();
        TallyReport {
            entries,
            winning_proposal: self.winning_proposal(),
            winner_name: self.winner_name().as_label(),
            cast_weight: self.cast_weight(),
            pending_weight: self.pending_weight(),
            granted_weight: self.total_granted_weight(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_types::VoterAddress;

    fn addr(seed: u8) -> VoterAddress {
        VoterAddress::new([seed; 20])
    }

    fn ledger(n: usize) -> ElectionLedger {
        let names = (0..n).map(|i| ProposalName::from_label(&format!("P{i}")).unwrap());
        ElectionLedger::new(addr(0xc0), names).unwrap()
    }

    #[test]
    fn untouched_ballot_reports_first_proposal() {
        let l = ledger(3);
        assert_eq!(l.winning_proposal(), 0);
        assert_eq!(l.winner_name().as_label(), "P0");
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let mut l = ledger(3);
        l.enroll(&addr(0xc0), &addr(1)).unwrap();
        l.vote(&addr(0xc0), 2).unwrap();
        l.vote(&addr(1), 1).unwrap();
        assert_eq!(l.winning_proposal(), 1);
    }

    #[test]
    fn strictly_greater_takes_the_lead() {
        let mut l = ledger(3);
        for seed in 1..=3 {
            l.enroll(&addr(0xc0), &addr(seed)).unwrap();
        }
        l.vote(&addr(1), 0).unwrap();
        l.vote(&addr(2), 2).unwrap();
        l.vote(&addr(3), 2).unwrap();
        assert_eq!(l.winning_proposal(), 2);
        assert_eq!(l.winner_name().as_label(), "P2");
    }

    #[test]
    fn tally_lists_counts_in_ballot_order() {
        let mut l = ledger(3);
        l.enroll(&addr(0xc0), &addr(1)).unwrap();
        l.vote(&addr(1), 2).unwrap();
        l.vote(&addr(0xc0), 2).unwrap();

        let tally = l.tally();
        let labels: Vec<String> = tally.iter().map(|(name, _)| name.as_label()).collect();
        assert_eq!(labels, ["P0", "P1", "P2"]);
        assert_eq!(
            tally.iter().map(|(_, count)| *count).collect::<Vec<_>>(),
            [0, 0, 2]
        );
    }

    #[test]
    fn report_reflects_partial_tally() {
        let mut l = ledger(2);
        l.enroll(&addr(0xc0), &addr(1)).unwrap();
        l.enroll(&addr(0xc0), &addr(2)).unwrap();
        l.vote(&addr(1), 1).unwrap();

        let report = l.report();
        assert_eq!(
            report.entries,
            vec![
                TallyEntry {
                    index: 0,
                    name: "P0".into(),
                    vote_count: 0
                },
                TallyEntry {
                    index: 1,
                    name: "P1".into(),
                    vote_count: 1
                },
            ]
        );
        assert_eq!(report.winning_proposal, 1);
        assert_eq!(report.winner_name, "P1");
        assert_eq!(report.cast_weight, 1);
        assert_eq!(report.pending_weight, 2);
        assert_eq!(report.granted_weight, 3);
    }
}
