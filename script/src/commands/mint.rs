use clap::Args;
use colored::*;
use ghostpad_lib::{MintRequest, TokenInfo, WithdrawParams};

use super::{print_header, resolve_recipient, spinner};
use crate::config::AppContext;

/// Assemble an anonymous token mint request backed by the saved deposit
#[derive(Args, Debug)]
pub struct MintCommand {
    /// Token name
    #[arg(long)]
    pub name: String,

    /// Token symbol
    #[arg(long)]
    pub symbol: String,

    /// Initial supply
    #[arg(long, default_value = "1000000")]
    pub supply: String,

    /// Token description
    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub website: Option<String>,

    #[arg(long)]
    pub twitter: Option<String>,

    #[arg(long)]
    pub telegram: Option<String>,

    /// Owner of the minted token (will prompt if not provided)
    #[arg(long, short = 'r')]
    pub recipient: Option<String>,

    /// Index of the pool instance the deposit was made into
    #[arg(long, default_value = "0")]
    pub instance_index: u32,
}

impl MintCommand {
    fn token(&self) -> TokenInfo {
        TokenInfo {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            initial_supply: self.supply.clone(),
            description: self.description.clone(),
            website: self.website.clone(),
            twitter: self.twitter.clone(),
            telegram: self.telegram.clone(),
        }
    }

    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print_header("👻 GhostPad - Anonymous Mint");

        let token = self.token();
        token.validate()?;
        let params = WithdrawParams::new(resolve_recipient(self.recipient.as_deref())?);
        params.ensure_submittable()?;

        let pb = spinner("Requesting withdrawal proof...");
        let result = ctx.session.prepare_withdraw_data(params).await;
        pb.finish_and_clear();

        let request = MintRequest::new(token, self.instance_index, result?)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        println!();
        println!(
            "{} Submit this request to the mint contract from any wallet.",
            "💡".bright_yellow()
        );
        Ok(())
    }
}
