use thiserror::Error;

/// Errors raised by a [`crate::store::SecretStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors raised by a [`crate::prover::ProofProvider`]
#[derive(Error, Debug)]
pub enum ProverError {
    #[error("proving service unavailable: {0}")]
    Unavailable(String),

    #[error("proving service rejected the request: {0}")]
    Rejected(String),

    #[error("malformed proof response: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum GhostpadError {
    #[error("commitment generation failed: {0}")]
    Generation(String),

    #[error("a commitment generation is already in progress")]
    GenerationInProgress,

    #[error("no deposit data available, generate or import a commitment first")]
    NoSecret,

    #[error("invalid commitment file: {0}")]
    InvalidCommitmentFile(String),

    #[error("recipient must be set to a non-zero address before submission")]
    ZeroRecipient,

    #[error("unsupported pool amount: {0} ETH (expected 0.1, 1, 10 or 100)")]
    UnsupportedAmount(String),

    #[error("address book has no entry for {0}")]
    MissingAddress(String),

    #[error("invalid address {0}: {1}")]
    InvalidAddress(String, String),

    #[error("invalid token info, missing required fields: {}", .0.join(", "))]
    InvalidTokenInfo(Vec<String>),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("proof provider error: {0}")]
    Prover(#[from] ProverError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GhostpadError>;
