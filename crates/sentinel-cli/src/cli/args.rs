//! Command-line argument definitions using clap.

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Ransomware kill switch backed by a smart contract
///
/// Check whether a device is locked, anchor log digests on-chain and report
/// infections. Use --explain on any command to learn what it does.
#[derive(Parser, Debug)]
#[command(name = "sentinel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON-RPC endpoint of the signing node (or set SENTINEL_RPC_URL)
    #[arg(long, env = "SENTINEL_RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Kill-switch contract address (or set SENTINEL_CONTRACT_ADDRESS)
    #[arg(long, env = "SENTINEL_CONTRACT_ADDRESS", global = true)]
    pub contract: Option<String>,

    /// Device identifier (defaults to the configured device, then DEVICE_001)
    #[arg(short, long, global = true)]
    pub device: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a device's kill-switch status from the contract
    Status(StatusArgs),

    /// Anchor a log digest on-chain
    StoreLog(StoreLogArgs),

    /// Report the device as infected (activates the kill switch)
    Report(ReportArgs),

    /// Render the demo dashboard with a simulated attack timeline
    Simulate(SimulateArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Status command
// ============================================================================

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Device to check (overrides --device)
    pub device: Option<String>,
}

// ============================================================================
// Store-log command
// ============================================================================

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["hash", "file"])))]
pub struct StoreLogArgs {
    /// Digest to store as-is
    #[arg(long)]
    pub hash: Option<String>,

    /// Log file to hash with SHA-256 before storing
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Open the transaction in the block explorer once confirmed
    #[arg(long)]
    pub open: bool,
}

// ============================================================================
// Report command
// ============================================================================

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Open the transaction in the block explorer once confirmed
    #[arg(long)]
    pub open: bool,
}

// ============================================================================
// Simulate command
// ============================================================================

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Run the simulated ransomware attack
    #[arg(long)]
    pub attack: bool,

    /// Show the seeded timeline (applied after --attack)
    #[arg(long)]
    pub reset: bool,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., rpc_url, contract_address, device_id)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
