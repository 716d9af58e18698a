use thiserror::Error;

use crate::state::Role;

/// Returns early with the given error when the condition does not hold.
macro_rules! require {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
pub(crate) use require;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AllocationError {
    #[error("Participant {name} is already assigned as {role}")]
    DuplicateParticipant { name: String, role: Role },

    #[error("Participant name cannot be empty")]
    EmptyParticipantName,

    #[error("Malformed operation record: {0}")]
    MalformedRecord(String),

    #[error("Distribution would total {attempted}% (maximum 100%)")]
    ExceedsFullAllocation { attempted: u32 },

    #[error("Distribution must total exactly 100% (currently {total}%)")]
    UnbalancedDistribution { total: f64 },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Missing required fields: {}", fields.join(", "))]
    Validation { fields: Vec<&'static str> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Operation {0} does not exist")]
    NotFound(String),

    #[error("Record store failure: {0}")]
    Failure(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}

pub type Result<T, E = AllocationError> = std::result::Result<T, E>;
