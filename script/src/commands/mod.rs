//! CLI subcommands

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

mod deposit;
mod export;
mod generate;
mod import;
mod mint;
mod show;
mod withdraw;

pub use deposit::DepositCommand;
pub use export::ExportCommand;
pub use generate::GenerateCommand;
pub use import::ImportCommand;
pub use mint::MintCommand;
pub use show::ShowCommand;
pub use withdraw::WithdrawCommand;

fn print_header(title: &str) {
    println!("{}", title.bright_magenta().bold());
    println!("{}", "═".repeat(50).bright_black());
    println!();
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.magenta} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{} {}", format!("{label}:").bright_white(), value);
}

/// Resolve an address argument, prompting when it is missing
fn resolve_recipient(arg: Option<&str>) -> anyhow::Result<ghostpad_lib::Address> {
    let raw = match arg {
        Some(raw) => crate::config::expand_env_vars(raw)?,
        None => dialoguer::Input::<String>::new()
            .with_prompt(format!("{} Recipient address", "🎯".bright_green()))
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.starts_with("0x") && input.len() == 42 {
                    Ok(())
                } else {
                    Err("Please enter a valid Ethereum address (0x...)")
                }
            })
            .interact()?,
    };
    parse_address(&raw)
}

/// Write a commitment file, refusing to replace an existing one unless `force`
fn write_commitment_file(path: &Path, contents: &str, force: bool) -> anyhow::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options.open(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => anyhow::anyhow!(
            "{} already exists and may hold another deposit's secret, pass --force to replace it",
            path.display()
        ),
        _ => e.into(),
    })?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

fn parse_address(raw: &str) -> anyhow::Result<ghostpad_lib::Address> {
    ghostpad_lib::normalize_address(raw.trim())
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid address {raw}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_normalizes_prefix() {
        let address = parse_address("0x0xAbC0000000000000000000000000000000000123").unwrap();
        assert_eq!(
            address,
            "0xabc0000000000000000000000000000000000123"
                .parse::<ghostpad_lib::Address>()
                .unwrap()
        );
        assert!(parse_address("0x1234").is_err());
    }

    #[test]
    fn test_resolve_recipient_from_argument() {
        let address = resolve_recipient(Some("0x00000000000000000000000000000000000000aa")).unwrap();
        assert_eq!(address, ghostpad_lib::Address::with_last_byte(0xaa));
    }

    #[test]
    fn test_commitment_file_is_not_overwritten() {
        let path = std::env::temp_dir().join(format!(
            "ghostpad-commitment-test-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        write_commitment_file(&path, "first", false).unwrap();
        let err = write_commitment_file(&path, "second", false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

        write_commitment_file(&path, "third", true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "third");
        std::fs::remove_file(&path).unwrap();
    }
}
