//! Runtime configuration shared by every subcommand

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Args;
use ghostpad_lib::{
    AddressBook, CommitmentSession, FileStore, GhostpadError, Network, ProofProvider, SecretStore,
};

use crate::prover::{HttpProofProvider, UnconfiguredProver};

/// Expand environment variables in a string (e.g., "$RECIPIENT" -> actual value)
pub fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    match input.strip_prefix('$') {
        Some(var_name) => match env::var(var_name) {
            Ok(value) => {
                tracing::info!(variable = var_name, "expanded environment variable");
                Ok(value)
            }
            Err(_) => Err(anyhow!("Environment variable {} not found", var_name)),
        },
        None => Ok(input.to_string()),
    }
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Directory holding the saved deposit data
    #[arg(long, global = true, env = "GHOSTPAD_STORE_DIR", default_value = ".ghostpad")]
    pub store_dir: PathBuf,

    /// Proving service used to obtain withdrawal proofs
    #[arg(long, global = true, env = "GHOSTPAD_PROVER_URL")]
    pub prover_url: Option<String>,

    /// Network whose contract addresses should be used
    #[arg(long, global = true, env = "GHOSTPAD_NETWORK", default_value = "local")]
    pub network: Network,

    /// Address book JSON (defaults to smart_contract_address.<network>.json)
    #[arg(long, global = true, env = "GHOSTPAD_ADDRESSES")]
    pub addresses: Option<PathBuf>,
}

/// Everything a command needs to run
pub struct AppContext {
    pub session: CommitmentSession,
    pub network: Network,
    /// Why saved deposit data present in the store could not be restored
    pub saved_error: Option<GhostpadError>,
    store_dir: PathBuf,
    address_book_path: PathBuf,
}

impl AppContext {
    /// Open the store, pick a proof provider and restore any saved deposit data
    pub async fn init(opts: &GlobalOpts) -> anyhow::Result<Self> {
        let store: Arc<dyn SecretStore> = Arc::new(
            FileStore::open(&opts.store_dir)
                .with_context(|| format!("opening store at {}", opts.store_dir.display()))?,
        );

        let prover: Arc<dyn ProofProvider> = match &opts.prover_url {
            Some(url) => Arc::new(HttpProofProvider::new(&expand_env_vars(url)?)?),
            None => Arc::new(UnconfiguredProver),
        };

        let session = CommitmentSession::new(store, prover);
        let saved_error = match session.load().await {
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "saved deposit data could not be restored");
                Some(e)
            }
        };

        let address_book_path = opts
            .addresses
            .clone()
            .unwrap_or_else(|| PathBuf::from(opts.network.address_book_file()));

        Ok(Self {
            session,
            network: opts.network,
            saved_error,
            store_dir: opts.store_dir.clone(),
            address_book_path,
        })
    }

    pub fn store_dir(&self) -> &std::path::Path {
        &self.store_dir
    }

    pub fn address_book(&self) -> anyhow::Result<AddressBook> {
        AddressBook::load(&self.address_book_path).with_context(|| {
            format!(
                "loading {} address book from {}",
                self.network,
                self.address_book_path.display()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_vars_passthrough() {
        assert_eq!(expand_env_vars("0xabc").unwrap(), "0xabc");
    }

    #[test]
    fn test_expand_env_vars_reads_environment() {
        env::set_var("GHOSTPAD_TEST_RECIPIENT", "0x1234");
        assert_eq!(expand_env_vars("$GHOSTPAD_TEST_RECIPIENT").unwrap(), "0x1234");
        assert!(expand_env_vars("$GHOSTPAD_TEST_DEFINITELY_UNSET").is_err());
    }

    fn temp_opts(name: &str) -> GlobalOpts {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        GlobalOpts {
            store_dir: env::temp_dir().join(format!("ghostpad-cli-{name}-{nanos}")),
            prover_url: None,
            network: Network::Local,
            addresses: None,
        }
    }

    #[tokio::test]
    async fn test_init_keeps_unreadable_saved_data_error() {
        let opts = temp_opts("unreadable");
        std::fs::create_dir_all(&opts.store_dir).unwrap();
        let slot = opts.store_dir.join("depositData.json");
        std::fs::write(&slot, r#"{ "secret": "0x01", "commitment": "bad" }"#).unwrap();

        let ctx = AppContext::init(&opts).await.unwrap();
        assert!(ctx.saved_error.is_some());
        assert!(ctx.session.current().await.is_none());

        ctx.session.generate_commitment().await.unwrap();
        let kept = std::fs::read_dir(&opts.store_dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .any(|entry| {
                entry.file_name().to_string_lossy().starts_with("depositData-backup-")
                    && std::fs::read_to_string(entry.path()).unwrap().contains("\"bad\"")
            });
        assert!(kept);

        std::fs::remove_dir_all(&opts.store_dir).unwrap();
    }

    #[tokio::test]
    async fn test_init_with_empty_store() {
        let opts = temp_opts("empty");
        let ctx = AppContext::init(&opts).await.unwrap();
        assert!(ctx.saved_error.is_none());
        assert!(ctx.session.current().await.is_none());
        std::fs::remove_dir_all(&opts.store_dir).unwrap();
    }
}
