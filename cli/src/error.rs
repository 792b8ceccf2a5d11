use thiserror::Error;

use ballot_ledger::LedgerError;
use ballot_types::TypesError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("action {step} failed: {source}")]
    Action {
        step: usize,
        #[source]
        source: LedgerError,
    },

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("invalid value: {0}")]
    Types(#[from] TypesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
