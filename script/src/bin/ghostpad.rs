//! GhostPad CLI - anonymous token launches backed by a privacy pool
//!
//! Usage:
//! ```shell
//! # Create and back up a deposit commitment
//! cargo run --bin ghostpad -- generate --amount 1 --export ./backup
//!
//! # Prepare the deposit call for the 1 ETH pool
//! cargo run --bin ghostpad -- deposit --amount 1
//!
//! # Prepare a withdrawal through a proving service
//! cargo run --bin ghostpad -- --prover-url $PROVER_URL withdraw --recipient 0x...
//! ```

use clap::{Parser, Subcommand};
use colored::*;
use console::Term;
use std::process;
use tracing_subscriber::EnvFilter;

use ghostpad_script::commands::{
    DepositCommand, ExportCommand, GenerateCommand, ImportCommand, MintCommand, ShowCommand,
    WithdrawCommand,
};
use ghostpad_script::{AppContext, GlobalOpts};

#[derive(Parser)]
#[command(
    name = "ghostpad",
    about = "👻 GhostPad - Anonymous Token Launches",
    long_about = "GhostPad prepares privacy-pool deposits and anonymous token mints.\n\nFeatures:\n• Generate deposit commitments and keep their secrets locally\n• Export and import commitment files between devices\n• Prepare deposit, withdrawal and mint payloads",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    opts: GlobalOpts,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 🔑 Generate a new deposit commitment
    Generate(GenerateCommand),
    /// 👀 Show the saved deposit data
    Show(ShowCommand),
    /// 📥 Prepare the deposit call
    Deposit(DepositCommand),
    /// 📤 Prepare the withdrawal call
    Withdraw(WithdrawCommand),
    /// 💾 Write the saved deposit data to a file
    Export(ExportCommand),
    /// 📂 Load a commitment file
    Import(ImportCommand),
    /// 🪙 Assemble an anonymous mint request
    Mint(MintCommand),
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_banner() {
    println!(
        "{}",
        r#"
     ██████╗ ██╗  ██╗ ██████╗ ███████╗████████╗██████╗  █████╗ ██████╗
    ██╔════╝ ██║  ██║██╔═══██╗██╔════╝╚══██╔══╝██╔══██╗██╔══██╗██╔══██╗
    ██║  ███╗███████║██║   ██║███████╗   ██║   ██████╔╝███████║██║  ██║
    ██║   ██║██╔══██║██║   ██║╚════██║   ██║   ██╔═══╝ ██╔══██║██║  ██║
    ╚██████╔╝██║  ██║╚██████╔╝███████║   ██║   ██║     ██║  ██║██████╔╝
     ╚═════╝ ╚═╝  ╚═╝ ╚═════╝ ╚══════╝   ╚═╝   ╚═╝     ╚═╝  ╚═╝╚═════╝
    "#
        .bright_magenta()
        .bold()
    );
    println!("{}", "    Anonymous Token Launches".bright_cyan().italic());
    println!();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = AppContext::init(&cli.opts).await?;

    match cli.command {
        Commands::Generate(cmd) => cmd.execute(&ctx).await,
        Commands::Show(cmd) => cmd.execute(&ctx).await,
        Commands::Deposit(cmd) => cmd.execute(&ctx).await,
        Commands::Withdraw(cmd) => cmd.execute(&ctx).await,
        Commands::Export(cmd) => cmd.execute(&ctx).await,
        Commands::Import(cmd) => cmd.execute(&ctx).await,
        Commands::Mint(cmd) => cmd.execute(&ctx).await,
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let quiet = matches!(
        &cli.command,
        Commands::Deposit(DepositCommand { json: true, .. })
            | Commands::Withdraw(WithdrawCommand { json: true, .. })
    );
    if !quiet && Term::stdout().is_term() {
        print_banner();
    }

    match run(cli).await {
        Ok(()) => {
            if !quiet {
                println!();
                println!(
                    "{} {}",
                    "✨".bright_green(),
                    "Operation completed successfully!".bright_green().bold()
                );
            }
        }
        Err(e) => {
            eprintln!();
            eprintln!(
                "{} {}",
                "💥".bright_red(),
                "Operation failed!".bright_red().bold()
            );
            eprintln!("   {}", format!("{e:#}").bright_red());
            eprintln!();
            eprintln!("{} {}", "💡".bright_blue(), "Tips:".bright_blue().bold());
            eprintln!("   • Run `ghostpad generate` or `ghostpad import` before deposit/withdraw");
            eprintln!("   • Set GHOSTPAD_PROVER_URL to reach your proving service");
            eprintln!("   • Run with --verbose for detailed logs");

            process::exit(1);
        }
    }
}
