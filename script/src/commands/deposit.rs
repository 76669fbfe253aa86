use alloy::primitives::utils::format_ether;
use clap::Args;
use colored::*;
use ghostpad_lib::PoolTier;

use super::{print_field, print_header};
use crate::config::AppContext;

/// Prepare the deposit call for the selected pool
#[derive(Args, Debug)]
pub struct DepositCommand {
    /// Pool amount in ETH (0.1, 1, 10 or 100)
    #[arg(long, short = 'a')]
    pub amount: PoolTier,

    /// Print only the JSON payload
    #[arg(long)]
    pub json: bool,
}

impl DepositCommand {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let data = ctx.session.prepare_deposit_data().await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        print_header("👻 GhostPad - Deposit");
        match ctx
            .address_book()
            .and_then(|book| book.instance_address(self.amount).map_err(Into::into))
        {
            Ok(pool) => print_field("Pool contract", pool.to_string().bright_cyan()),
            Err(e) => {
                tracing::warn!(error = %e, "pool address unavailable");
                print_field("Pool contract", "unknown (no address book entry)".yellow())
            }
        }
        print_field("Network", ctx.network);
        print_field(
            "Value",
            format!("{} ETH ({} wei)", format_ether(self.amount.wei()), self.amount.wei()),
        );
        print_field("Commitment", data.commitment.to_string().bright_cyan());
        print_field("Call data", data.calldata().to_string().bright_black());
        Ok(())
    }
}
