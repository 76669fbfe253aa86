//! GhostPad commitment library
//!
//! Generates the secret material behind a privacy-pool deposit and prepares
//! the payloads the pool contract's `deposit` and `withdraw` entry points
//! expect. Proof generation and storage are injected capabilities.

pub mod crypto;
pub mod error;
pub mod export;
pub mod generator;
pub mod note;
pub mod payloads;
pub mod pool;
pub mod prover;
pub mod session;
pub mod store;
pub mod token;

pub use error::{GhostpadError, ProverError, Result, StoreError};
pub use export::{format_commitment, parse_commitment_file, CommitmentFile, ExportMetadata};
pub use generator::{
    generate_commitment, prepare_deposit_data, prepare_withdraw_data, GeneratedCommitment,
};
pub use note::{DepositSecret, Note};
pub use payloads::{DepositData, WithdrawData, WithdrawParams};
pub use pool::{normalize_address, AddressBook, Network, PoolTier};
pub use prover::{ProofBundle, ProofProvider};
pub use session::{backup_key, CommitmentSession};
pub use store::{FileStore, InMemoryStore, SecretStore, DEPOSIT_SLOT};
pub use token::{MintRequest, TokenInfo};

// Re-export the primitive types used across the public API
pub use alloy_primitives::{Address, Bytes, B256, U256};
