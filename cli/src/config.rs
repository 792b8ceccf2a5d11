//! Election files: who chairs, what is on the ballot, and what happens.

use std::path::Path;

use ballot_types::{ProposalName, VoterAddress};
use ballot_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// A complete election description loaded from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectionFile {
    /// Identity that opens the election and holds weight 1.
    pub chairperson: VoterAddress,

    /// Proposal labels in ballot order, at most 31 bytes each.
    pub proposals: Vec<String>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Operations replayed in order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One ledger operation with its attested caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    Enroll {
        caller: VoterAddress,
        target: VoterAddress,
    },
    Delegate {
        caller: VoterAddress,
        target: VoterAddress,
    },
    Vote {
        caller: VoterAddress,
        proposal: usize,
    },
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ElectionFile {
    /// Load an election from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse an election from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CliError> {
        toml::from_str(s).map_err(|e| CliError::Config(e.to_string()))
    }

    /// A small starter election: three proposals, one enrolled voter.
    pub fn template() -> Self {
        let chairperson = VoterAddress::new([0xc0; 20]);
        let voter = VoterAddress::new([0x01; 20]);
        Self {
            chairperson,
            proposals: vec!["Person1".into(), "Person2".into(), "Person3".into()],
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            actions: vec![
                Action::Enroll {
                    caller: chairperson,
                    target: voter,
                },
                Action::Delegate {
                    caller: chairperson,
                    target: voter,
                },
                Action::Vote {
                    caller: voter,
                    proposal: 2,
                },
            ],
        }
    }

    /// Serialize the election to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn proposal_names(&self) -> Result<Vec<ProposalName>, CliError> {
        self.proposals
            .iter()
            .map(|label| ProposalName::from_label(label).map_err(CliError::from))
            .collect()
    }

    /// Static checks that do not need a ledger.
    ///
    /// Ledger preconditions (who may enroll, who already voted) are only
    /// known during replay and are not checked here.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.proposals.is_empty() {
            return Err(CliError::Config("at least one proposal is required".into()));
        }
        self.proposal_names()?;
        for (step, action) in self.actions.iter().enumerate() {
            if let Action::Vote { proposal, .. } = action {
                if *proposal >= self.proposals.len() {
                    return Err(CliError::Config(format!(
                        "action {step}: proposal {proposal} out of range ({} proposals)",
                        self.proposals.len()
                    )));
                }
            }
        }
        Ok(())
    }
}
