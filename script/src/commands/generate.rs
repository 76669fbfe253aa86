use std::path::PathBuf;

use clap::Args;
use colored::*;
use dialoguer::Confirm;
use ghostpad_lib::{format_commitment, PoolTier};

use super::{print_field, print_header, spinner, write_commitment_file};
use crate::config::AppContext;

/// Generate a new deposit commitment and save its secret locally
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Pool amount in ETH, recorded in the exported file (0.1, 1, 10 or 100)
    #[arg(long, short = 'a', default_value = "1")]
    pub amount: PoolTier,

    /// Also write a commitment file into this directory
    #[arg(long, short = 'e')]
    pub export: Option<PathBuf>,

    /// Replace existing deposit data without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl GenerateCommand {
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print_header("👻 GhostPad - Generate Commitment");

        let prompt = if let Some(existing) = ctx.session.current().await {
            println!(
                "{} Saved deposit data found for commitment {}",
                "⚠️".bright_yellow(),
                format_commitment(&existing.commitment).bright_yellow()
            );
            Some("Replace it? Funds deposited against it need the old file")
        } else if let Some(e) = &ctx.saved_error {
            println!(
                "{} Saved deposit data in {} could not be read: {}",
                "⚠️".bright_yellow(),
                ctx.store_dir().display(),
                e.to_string().bright_yellow()
            );
            Some("Generate anyway? The unreadable data is kept as a depositData-backup-* file")
        } else {
            None
        };

        if let Some(prompt) = prompt {
            if !self.yes {
                let replace = Confirm::new()
                    .with_prompt(prompt)
                    .default(false)
                    .interact()?;
                if !replace {
                    println!("{} Operation cancelled by user", "🚫".bright_red());
                    return Ok(());
                }
            }
        }

        let pb = spinner("Generating secret and nullifier...");
        let result = ctx.session.generate_commitment().await;
        pb.finish_and_clear();
        let generated = result?;

        println!("{}", "📋 Commitment".bright_green().bold());
        println!("{}", "─".repeat(30).bright_black());
        print_field("Commitment", generated.commitment.to_string().bright_cyan());
        print_field(
            "Nullifier hash",
            generated.deposit_secret.nullifier_hash.to_string().bright_cyan(),
        );
        print_field("Pool", format!("{} ETH", self.amount));

        if let Some(dir) = &self.export {
            let file = ctx.session.export(self.amount).await?;
            std::fs::create_dir_all(dir)?;
            let path = dir.join(file.file_name());
            write_commitment_file(&path, &file.to_json()?, false)?;
            println!();
            println!(
                "{} Commitment file written to {}",
                "💾".bright_green(),
                path.display().to_string().bright_white()
            );
        }

        println!();
        println!(
            "{} {}",
            "🔐".bright_yellow(),
            "Keep your deposit data safe! Losing it forfeits the deposit.".bright_yellow()
        );
        Ok(())
    }
}
