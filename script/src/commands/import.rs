use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use colored::*;
use ghostpad_lib::format_commitment;

use super::{print_field, print_header};
use crate::config::AppContext;

/// Load a previously exported commitment file
#[derive(Args, Debug)]
pub struct ImportCommand {
    /// Commitment file to import
    pub file: PathBuf,
}

impl ImportCommand {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print_header("👻 GhostPad - Import");

        let content = std::fs::read_to_string(&self.file)
            .with_context(|| format!("reading {}", self.file.display()))?;
        let deposit = ctx.session.import(&content).await?;

        println!("{} Commitment file accepted", "✅".bright_green());
        print_field(
            "Commitment",
            format_commitment(&deposit.commitment).bright_cyan(),
        );
        print_field(
            "Nullifier hash",
            format_commitment(&deposit.nullifier_hash).bright_cyan(),
        );
        Ok(())
    }
}
