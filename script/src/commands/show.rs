use clap::Args;
use colored::*;

use super::{print_field, print_header};
use crate::config::AppContext;

/// Show the saved deposit data
#[derive(Args, Debug)]
pub struct ShowCommand {}

impl ShowCommand {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print_header("👻 GhostPad - Saved Deposit");

        let Some(deposit) = ctx.session.current().await else {
            println!(
                "{} No deposit data saved. Run `ghostpad generate` or `ghostpad import` first.",
                "ℹ️".bright_blue()
            );
            return Ok(());
        };

        print_field("Commitment", deposit.commitment.to_string().bright_cyan());
        print_field("Nullifier hash", deposit.nullifier_hash.to_string().bright_cyan());
        match deposit.note() {
            Some(note) => print_field("Note", note.to_string().bright_black()),
            None => print_field("Note", "not available (imported public hashes only)".yellow()),
        }
        print_field("Network", ctx.network);
        Ok(())
    }
}
