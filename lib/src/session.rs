use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::{GhostpadError, Result};
use crate::export::{format_commitment, parse_commitment_file, CommitmentFile};
use crate::generator::{self, GeneratedCommitment};
use crate::note::DepositSecret;
use crate::payloads::{DepositData, WithdrawData, WithdrawParams};
use crate::pool::PoolTier;
use crate::prover::ProofProvider;
use crate::store::{SecretStore, DEPOSIT_SLOT};

/// A client session around the Commitment Generator
///
/// Holds the current deposit secret, persists every new one to the store
/// before exposing it, and refuses to start a second generation while one
/// is still running.
pub struct CommitmentSession {
    store: Arc<dyn SecretStore>,
    prover: Arc<dyn ProofProvider>,
    current: RwLock<Option<DepositSecret>>,
    generating: Mutex<()>,
}

impl CommitmentSession {
    pub fn new(store: Arc<dyn SecretStore>, prover: Arc<dyn ProofProvider>) -> Self {
        Self {
            store,
            prover,
            current: RwLock::new(None),
            generating: Mutex::new(()),
        }
    }

    /// Restore the most recently saved deposit secret, if any
    ///
    /// Shares the generation lock so a reload cannot resurrect a secret that
    /// a concurrent generation has just replaced.
    pub async fn load(&self) -> Result<Option<DepositSecret>> {
        let _guard = self
            .generating
            .try_lock()
            .map_err(|_| GhostpadError::GenerationInProgress)?;

        let Some(raw) = self.store.get(DEPOSIT_SLOT)? else {
            debug!("no saved deposit data");
            return Ok(None);
        };
        let deposit = parse_commitment_file(&raw)?.deposit;
        info!(
            commitment = %format_commitment(&deposit.commitment),
            "loaded saved deposit data"
        );
        *self.current.write().await = Some(deposit.clone());
        Ok(Some(deposit))
    }

    /// Generate a commitment and persist it before returning
    ///
    /// Fails with [`GhostpadError::GenerationInProgress`] if another call has
    /// not yet finished saving its result.
    pub async fn generate_commitment(&self) -> Result<GeneratedCommitment> {
        let _guard = self.generating.try_lock().map_err(|_| {
            warn!("refusing concurrent commitment generation");
            GhostpadError::GenerationInProgress
        })?;

        let generated = generator::generate_commitment()?;
        self.set_aside_unknown_slot().await?;
        self.persist(&generated.deposit_secret)?;
        *self.current.write().await = Some(generated.deposit_secret.clone());

        info!(
            commitment = %format_commitment(&generated.commitment),
            "commitment generated and saved"
        );
        Ok(generated)
    }

    /// Adopt a previously exported commitment file
    pub async fn import(&self, json: &str) -> Result<DepositSecret> {
        let _guard = self
            .generating
            .try_lock()
            .map_err(|_| GhostpadError::GenerationInProgress)?;

        let file = parse_commitment_file(json)?;
        self.set_aside_unknown_slot().await?;
        self.persist(&file.deposit)?;
        *self.current.write().await = Some(file.deposit.clone());

        info!(
            commitment = %format_commitment(&file.deposit.commitment),
            full_note = file.deposit.note().is_some(),
            "imported commitment file"
        );
        Ok(file.deposit)
    }

    /// Export file for the current deposit secret
    pub async fn export(&self, amount: PoolTier) -> Result<CommitmentFile> {
        let deposit = self.current().await.ok_or(GhostpadError::NoSecret)?;
        Ok(CommitmentFile::new(deposit, amount))
    }

    pub async fn current(&self) -> Option<DepositSecret> {
        self.current.read().await.clone()
    }

    /// Forget the current deposit secret, locally and in the store
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(DEPOSIT_SLOT)?;
        *self.current.write().await = None;
        Ok(())
    }

    pub async fn prepare_deposit_data(&self) -> Result<DepositData> {
        generator::prepare_deposit_data(self.current().await.as_ref())
    }

    /// Build the withdrawal payload, asking the proof provider for proof and root
    pub async fn prepare_withdraw_data(&self, params: WithdrawParams) -> Result<WithdrawData> {
        let deposit = self.current().await.ok_or(GhostpadError::NoSecret)?;
        let bundle = self.prover.prove(&deposit, &params).await?;
        debug!(root = %bundle.root, proof_len = bundle.proof.len(), "received proof");
        generator::prepare_withdraw_data(Some(&deposit), params, bundle)
    }

    /// Copy the saved slot to a [`backup_key`] unless it holds the current secret
    async fn set_aside_unknown_slot(&self) -> Result<Option<String>> {
        let Some(raw) = self.store.get(DEPOSIT_SLOT)? else {
            return Ok(None);
        };
        let saved = parse_commitment_file(&raw).ok().map(|file| file.deposit);
        if saved.is_some() && saved == *self.current.read().await {
            return Ok(None);
        }

        let key = backup_key(Utc::now().timestamp_millis());
        self.store.put(&key, &raw)?;
        warn!(key = %key, "moved unrecognised deposit data aside before overwriting");
        Ok(Some(key))
    }

    fn persist(&self, deposit: &DepositSecret) -> Result<()> {
        let json = serde_json::to_string(deposit)?;
        self.store.put(DEPOSIT_SLOT, &json)?;
        Ok(())
    }
}

/// Store key receiving displaced deposit data
pub fn backup_key(millis: i64) -> String {
    format!("{DEPOSIT_SLOT}-backup-{millis}")
}
