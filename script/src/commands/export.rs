use std::path::PathBuf;

use clap::Args;
use colored::*;
use ghostpad_lib::PoolTier;

use super::{print_header, write_commitment_file};
use crate::config::AppContext;

/// Write the saved deposit data to a commitment file
#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Pool amount in ETH the deposit was made into
    #[arg(long, short = 'a')]
    pub amount: PoolTier,

    /// Output file or directory (defaults to the current directory)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Replace the output file if it already exists
    #[arg(long, short = 'f')]
    pub force: bool,
}

impl ExportCommand {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print_header("👻 GhostPad - Export");

        let file = ctx.session.export(self.amount).await?;
        let path = match &self.out {
            Some(out) if out.is_dir() => out.join(file.file_name()),
            Some(out) => out.clone(),
            None => PathBuf::from(file.file_name()),
        };
        write_commitment_file(&path, &file.to_json()?, self.force)?;

        println!(
            "{} Commitment file written to {}",
            "💾".bright_green(),
            path.display().to_string().bright_white()
        );
        println!(
            "{} Keep this file secure! You'll need it to withdraw your funds.",
            "🔐".bright_yellow()
        );
        Ok(())
    }
}
