//! Applies an election file's actions to a ledger.

use ballot_ledger::{ElectionLedger, LedgerError};
use tracing::{info, warn};

use crate::config::{Action, ElectionFile};
use crate::CliError;

/// What happened during a replay.
#[derive(Debug, Default)]
pub struct ReplayOutcome {
    pub applied: usize,
    /// Rejected actions by position, when replay continued past them.
    pub rejected: Vec<(usize, LedgerError)>,
}

/// Open the election described by `file`.
pub fn open_ledger(file: &ElectionFile) -> Result<ElectionLedger, CliError> {
    Ok(ElectionLedger::new(file.chairperson, file.proposal_names()?)?)
}

pub fn apply(ledger: &mut ElectionLedger, action: &Action) -> Result<(), LedgerError> {
    match action {
        Action::Enroll { caller, target } => ledger.enroll(caller, target),
        Action::Delegate { caller, target } => ledger.delegate(caller, target),
        Action::Vote { caller, proposal } => ledger.vote(caller, *proposal),
    }
}

/// Replay `actions` in order.
///
/// Stops at the first rejected action unless `keep_going` is set, in which
/// case rejections are collected and replay continues.
pub fn replay(
    ledger: &mut ElectionLedger,
    actions: &[Action],
    keep_going: bool,
) -> Result<ReplayOutcome, CliError> {
    let mut outcome = ReplayOutcome::default();
    for (step, action) in actions.iter().enumerate() {
        match apply(ledger, action) {
            Ok(()) => outcome.applied += 1,
            Err(source) if keep_going => {
                warn!(step, ?action, error = %source, "action rejected");
                outcome.rejected.push((step, source));
            }
            Err(source) => return Err(CliError::Action { step, source }),
        }
    }
    info!(
        applied = outcome.applied,
        rejected = outcome.rejected.len(),
        "replay finished"
    );
    Ok(outcome)
}
