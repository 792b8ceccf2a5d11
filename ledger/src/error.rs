use thiserror::Error;

/// Why a ledger operation was refused.
///
/// Every variant is a precondition failure: the ledger is left exactly as it
/// was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("caller is not allowed to enroll voters")]
    Unauthorized,

    #[error("voter has already voted or already holds voting weight")]
    AlreadyVotedOrEnrolled,

    #[error("voter has already voted")]
    AlreadyVoted,

    #[error("self-delegation is disallowed")]
    SelfDelegation,

    #[error("found loop in delegation")]
    DelegationCycle,

    #[error("voter has no right to vote")]
    NoRightToVote,

    #[error("proposal index {index} out of range ({count} proposals)")]
    InvalidProposal { index: usize, count: usize },

    #[error("an election needs at least one proposal")]
    EmptyBallot,

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
