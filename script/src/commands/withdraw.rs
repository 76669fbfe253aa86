use std::str::FromStr;

use clap::Args;
use colored::*;
use ghostpad_lib::{Address, WithdrawParams, U256};

use super::{parse_address, print_field, print_header, resolve_recipient, spinner};
use crate::config::AppContext;

/// Prepare the withdrawal call for the saved deposit
#[derive(Args, Debug)]
pub struct WithdrawCommand {
    /// Address receiving the withdrawn funds (will prompt if not provided)
    #[arg(long, short = 'r')]
    pub recipient: Option<String>,

    /// Relayer submitting the withdrawal on your behalf
    #[arg(long)]
    pub relayer: Option<String>,

    /// Relayer fee in wei
    #[arg(long, default_value = "0")]
    pub fee: String,

    /// Refund in wei
    #[arg(long, default_value = "0")]
    pub refund: String,

    /// Print only the JSON payload
    #[arg(long)]
    pub json: bool,
}

impl WithdrawCommand {
    /// Withdrawal policy, checked before anything is sent to the prover
    pub fn params(&self, recipient: Address) -> anyhow::Result<WithdrawParams> {
        let relayer = match &self.relayer {
            Some(raw) => parse_address(raw)?,
            None => Address::ZERO,
        };
        let params = WithdrawParams::new(recipient)
            .with_relayer(relayer, parse_wei("fee", &self.fee)?)
            .with_refund(parse_wei("refund", &self.refund)?);
        params.ensure_submittable()?;
        Ok(params)
    }

    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        let recipient = resolve_recipient(self.recipient.as_deref())?;
        let params = self.params(recipient)?;

        let pb = spinner("Requesting withdrawal proof...");
        let result = ctx.session.prepare_withdraw_data(params).await;
        pb.finish_and_clear();
        let data = result?;
        data.ensure_submittable()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        print_header("👻 GhostPad - Withdraw");
        print_field("Recipient", data.recipient.to_string().bright_cyan());
        print_field("Relayer", data.relayer);
        print_field("Fee", format!("{} wei", data.fee));
        print_field("Refund", format!("{} wei", data.refund));
        print_field("Nullifier hash", data.nullifier_hash.to_string().bright_cyan());
        print_field("Root", data.root);
        print_field("Call data", data.calldata().to_string().bright_black());
        Ok(())
    }
}

fn parse_wei(field: &str, raw: &str) -> anyhow::Result<U256> {
    U256::from_str(raw.trim()).map_err(|e| anyhow::anyhow!("invalid {field} {raw}: {e}"))
}
