//! Errors from the external URL reputation service (§4.6).

use thiserror::Error;

/// Error raised while consulting the reputation service. Per spec these
/// always degrade the verdict to `ask` rather than propagating further.
#[derive(Debug, Error)]
pub enum ReputationError {
    #[error("reputation request timed out")]
    Timeout,

    #[error("reputation service returned status {0}")]
    NonSuccessStatus(u16),

    #[error("reputation request failed: {0}")]
    Transport(String),
}
