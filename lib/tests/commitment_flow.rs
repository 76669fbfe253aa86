use std::sync::Arc;

use async_trait::async_trait;
use ghostpad_lib::{
    parse_commitment_file, Address, Bytes, CommitmentSession, DepositSecret, FileStore,
    GhostpadError, InMemoryStore, PoolTier, ProofBundle, ProofProvider, ProverError,
    WithdrawParams, B256, U256,
};

struct StubProver;

#[async_trait]
impl ProofProvider for StubProver {
    async fn prove(
        &self,
        _deposit: &DepositSecret,
        _params: &WithdrawParams,
    ) -> Result<ProofBundle, ProverError> {
        Ok(ProofBundle {
            proof: Bytes::from(vec![0x01; 256]),
            root: B256::repeat_byte(0x42),
        })
    }
}

fn memory_session() -> CommitmentSession {
    CommitmentSession::new(Arc::new(InMemoryStore::new()), Arc::new(StubProver))
}

#[tokio::test]
async fn export_then_reimport_keeps_nullifier_hash() {
    let origin = memory_session();
    let generated = origin.generate_commitment().await.unwrap();

    let exported = origin.export(PoolTier::One).await.unwrap().to_json().unwrap();
    let reparsed = parse_commitment_file(&exported).unwrap();
    assert_eq!(reparsed.deposit, generated.deposit_secret);

    // A different device picks the file up
    let other = memory_session();
    other.import(&exported).await.unwrap();

    let recipient: Address = "0xAbC0000000000000000000000000000000000123".parse().unwrap();
    let data = other
        .prepare_withdraw_data(WithdrawParams::new(recipient))
        .await
        .unwrap();

    assert_eq!(data.nullifier_hash, generated.deposit_secret.nullifier_hash);
    assert_eq!(data.recipient, recipient);
    assert_eq!(data.relayer, Address::ZERO);
    assert_eq!(data.fee, U256::ZERO);
    assert_eq!(data.refund, U256::ZERO);
    assert!(data.ensure_submittable().is_ok());
}

#[tokio::test]
async fn import_without_nullifier_hash_is_rejected() {
    let session = memory_session();
    let json = format!(r#"{{ "commitment": "{}" }}"#, B256::repeat_byte(0x10));

    let err = session.import(&json).await.unwrap_err();
    assert!(matches!(err, GhostpadError::InvalidCommitmentFile(_)));
    assert!(err.to_string().contains("nullifierHash"));
    assert!(session.current().await.is_none());
}

#[tokio::test]
async fn import_with_public_hashes_only_is_accepted() {
    let session = memory_session();
    let nullifier_hash = B256::repeat_byte(0x20);
    let json = format!(
        r#"{{ "commitment": "{}", "nullifierHash": "{}" }}"#,
        B256::repeat_byte(0x10),
        nullifier_hash
    );

    session.import(&json).await.unwrap();
    let data = session
        .prepare_withdraw_data(WithdrawParams::new(Address::repeat_byte(0x01)))
        .await
        .unwrap();
    assert_eq!(data.nullifier_hash, nullifier_hash);

    let deposit = session.prepare_deposit_data().await.unwrap();
    assert_eq!(deposit.commitment, B256::repeat_byte(0x10));
}

#[tokio::test]
async fn file_store_survives_a_new_session() {
    let dir = std::env::temp_dir().join(format!("ghostpad-flow-{}", rand::random::<u64>()));

    let generated = {
        let store = Arc::new(FileStore::open(&dir).unwrap());
        let session = CommitmentSession::new(store, Arc::new(StubProver));
        session.generate_commitment().await.unwrap()
    };

    let store = Arc::new(FileStore::open(&dir).unwrap());
    let session = CommitmentSession::new(store, Arc::new(StubProver));
    let loaded = session.load().await.unwrap().unwrap();
    assert_eq!(loaded, generated.deposit_secret);
    assert_eq!(
        session.prepare_deposit_data().await.unwrap().commitment,
        generated.commitment
    );

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn generating_over_unreadable_file_keeps_a_backup() {
    let dir = std::env::temp_dir().join(format!("ghostpad-flow-{}", rand::random::<u64>()));
    let store = Arc::new(FileStore::open(&dir).unwrap());
    let slot = dir.join("depositData.json");
    let broken = format!(
        r#"{{ "secret": "{}", "nullifier": "{}", "nullifierHash": "{}", "commitment": "0xnot-hex" }}"#,
        B256::repeat_byte(0x11),
        B256::repeat_byte(0x22),
        B256::repeat_byte(0x33)
    );
    std::fs::write(&slot, &broken).unwrap();

    let session = CommitmentSession::new(store, Arc::new(StubProver));
    assert!(session.load().await.is_err());
    session.generate_commitment().await.unwrap();

    let backups: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("depositData-backup-")
        })
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(std::fs::read_to_string(backups[0].path()).unwrap(), broken);
    assert_ne!(std::fs::read_to_string(&slot).unwrap(), broken);

    std::fs::remove_dir_all(dir).unwrap();
}
