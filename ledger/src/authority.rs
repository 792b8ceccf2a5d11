//! Enrollment authorization hook.
//!
//! Caller identity is attested outside the ledger. The ledger only asks the
//! installed [`EnrollAuthority`] whether an attested caller may grant voting
//! rights.

use ballot_types::VoterAddress;

/// Decides whether `caller` may enroll voters.
pub trait EnrollAuthority: Send + Sync {
    fn may_enroll(&self, caller: &VoterAddress, chairperson: &VoterAddress) -> bool;
}

/// Only the chairperson may enroll.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChairpersonOnly;

impl EnrollAuthority for ChairpersonOnly {
    fn may_enroll(&self, caller: &VoterAddress, chairperson: &VoterAddress) -> bool {
        caller == chairperson
    }
}

impl<F> EnrollAuthority for F
where
    F: Fn(&VoterAddress, &VoterAddress) -> bool + Send + Sync,
{
    fn may_enroll(&self, caller: &VoterAddress, chairperson: &VoterAddress) -> bool {
        self(caller, chairperson)
    }
}
