//! Proof providers available to the CLI

use std::time::Duration;

use async_trait::async_trait;
use ghostpad_lib::{B256, DepositSecret, ProofBundle, ProofProvider, ProverError, WithdrawParams};
use serde::Serialize;
use tracing::debug;

/// Request sent to the proving service. Only public values leave the
/// device; the secret and nullifier stay local.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProveRequest {
    pub commitment: B256,
    pub nullifier_hash: B256,
    #[serde(flatten)]
    pub params: WithdrawParams,
}

impl ProveRequest {
    pub fn new(deposit: &DepositSecret, params: &WithdrawParams) -> Self {
        Self {
            commitment: deposit.commitment,
            nullifier_hash: deposit.nullifier_hash,
            params: params.clone(),
        }
    }
}

/// Relayer or proving service reachable over HTTP
///
/// `POST <base>/prove` with a [`ProveRequest`], answered by
/// `{ "proof": "0x…", "root": "0x…" }`.
pub struct HttpProofProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpProofProvider {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/prove", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProofProvider for HttpProofProvider {
    async fn prove(
        &self,
        deposit: &DepositSecret,
        params: &WithdrawParams,
    ) -> Result<ProofBundle, ProverError> {
        debug!(endpoint = %self.endpoint, "requesting withdrawal proof");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ProveRequest::new(deposit, params))
            .send()
            .await
            .map_err(|e| ProverError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProverError::Rejected(format!("{status}: {body}")));
        }

        response
            .json::<ProofBundle>()
            .await
            .map_err(|e| ProverError::MalformedResponse(e.to_string()))
    }
}

/// Used when no proving service is configured; every request fails
pub struct UnconfiguredProver;

#[async_trait]
impl ProofProvider for UnconfiguredProver {
    async fn prove(
        &self,
        _deposit: &DepositSecret,
        _params: &WithdrawParams,
    ) -> Result<ProofBundle, ProverError> {
        Err(ProverError::Unavailable(
            "no proving service configured, set --prover-url or GHOSTPAD_PROVER_URL".to_string(),
        ))
    }
}
