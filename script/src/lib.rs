//! GhostPad command-line front end
//!
//! Wraps the commitment library with a file-backed store, an HTTP proof
//! provider and the `ghostpad` subcommands:
//!
//! - Generate and save deposit commitments
//! - Export and import commitment files
//! - Prepare deposit, withdrawal and anonymous mint payloads

pub mod commands;
pub mod config;
pub mod prover;

pub use config::{expand_env_vars, AppContext, GlobalOpts};
pub use prover::{HttpProofProvider, UnconfiguredProver};
