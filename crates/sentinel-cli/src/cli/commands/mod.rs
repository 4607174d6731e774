//! Command implementations.

pub mod config;
pub mod report;
pub mod simulate;
pub mod status;
pub mod store_log;

use anyhow::anyhow;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sentinelchain::demo::DEFAULT_DEVICE_ID;
use sentinelchain::{
    Address, Confirmation, ContractGateway, GatewayConfig, GatewayError, HttpProvider,
};
use serde::Serialize;
use std::time::Duration;

use super::args::Cli;
use crate::config::Config;
use crate::education::Explain;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// JSON-RPC endpoint; `None` means no wallet provider
    pub rpc_url: Option<String>,

    /// Kill-switch contract address as given
    pub contract: Option<String>,

    /// Device the command acts on
    pub device_id: String,

    /// Transaction link prefix
    pub explorer_url: String,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show educational explanations
    pub explain: bool,
}

impl Context {
    /// Merge flags (and their env vars) over the config file.
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        Self {
            explorer_url: config.explorer_url().to_string(),
            rpc_url: cli.rpc_url.clone().or(config.rpc_url),
            contract: cli.contract.clone().or(config.contract_address),
            device_id: cli
                .device
                .clone()
                .or(config.device_id)
                .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string()),
            output_format: cli.output.or(config.output_format).unwrap_or_default(),
            explain: cli.explain || config.explain_by_default,
        }
    }

    /// Build the contract gateway.
    ///
    /// Without an RPC URL the gateway has no provider, so every operation
    /// reports a missing wallet and nothing touches the network.
    pub fn gateway(&self) -> anyhow::Result<ContractGateway> {
        let contract = self
            .contract
            .as_deref()
            .map(str::parse::<Address>)
            .transpose()
            .map_err(|e| anyhow!("Invalid contract address: {e}"))?;

        let Some(url) = self.rpc_url.as_deref() else {
            // Never used for a request: there is nothing to send it through
            let config = GatewayConfig::new(contract.unwrap_or(Address::ZERO));
            return Ok(ContractGateway::builder(config).build());
        };

        let contract = contract.ok_or_else(|| {
            anyhow!(
                "Contract address required.\n\n\
                 Set it with one of:\n  \
                 1. --contract <ADDRESS>\n  \
                 2. SENTINEL_CONTRACT_ADDRESS environment variable\n  \
                 3. sentinel config set contract_address <ADDRESS>"
            )
        })?;
        let provider = HttpProvider::new(url)?;
        Ok(ContractGateway::new(GatewayConfig::new(contract), provider))
    }

    /// Show an explanation if requested, away from machine-readable stdout.
    pub fn explain(&self, explanation: &Explain) {
        if !self.explain {
            return;
        }
        match self.output_format {
            OutputFormat::Pretty => explanation.print(),
            OutputFormat::Json | OutputFormat::Yaml => explanation.eprint(),
        }
    }

    /// Spinner shown while waiting on the chain (pretty output only).
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.output_format != OutputFormat::Pretty {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// Link to `transaction_id` in the block explorer.
    pub fn explorer_link(&self, transaction_id: &str) -> String {
        format!("{}{}", self.explorer_url, transaction_id)
    }
}

/// Turn a gateway failure into a user-facing error with a hint.
pub fn gateway_failure(err: GatewayError) -> anyhow::Error {
    match err {
        GatewayError::WalletUnavailable => anyhow!(
            "Wallet unavailable: no provider is configured.\n\n\
             Set an RPC endpoint with one of:\n  \
             1. --rpc-url <URL>\n  \
             2. SENTINEL_RPC_URL environment variable\n  \
             3. sentinel config set rpc_url <URL>"
        ),
        GatewayError::UserRejected { .. } => {
            anyhow!("{err}\n\nThe request was declined in the wallet; nothing was sent.")
        }
        other => anyhow::Error::new(other),
    }
}

/// Open a transaction link in the browser; failure is only a warning.
pub fn open_explorer(url: &str) {
    if let Err(e) = open::that(url) {
        eprintln!("{} could not open browser: {}", "Warning:".yellow().bold(), e);
    }
}

/// Machine-readable shape of a confirmed write.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteReport<'a> {
    pub device_id: &'a str,
    pub operation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_hash: Option<&'a str>,
    #[serde(flatten)]
    pub confirmation: &'a Confirmation,
    pub explorer_url: String,
}

/// Print a confirmed write in the selected format.
pub fn print_write(ctx: &Context, report: &WriteReport<'_>) -> anyhow::Result<()> {
    if let Some(rendered) = ctx.output_format.render(report)? {
        println!("{rendered}");
        return Ok(());
    }

    let confirmation = report.confirmation;
    println!(
        "{} {} for {}",
        "Confirmed:".green().bold(),
        report.operation,
        report.device_id.cyan()
    );
    if let Some(hash) = report.log_hash {
        println!("  {} {}", "Log hash:".bold(), hash);
    }
    println!("  {} {}", "Transaction:".bold(), confirmation.transaction_id);
    if let Some(block) = confirmation.block_number {
        println!("  {} {}", "Block:".bold(), block);
    }
    if !confirmation.events.is_empty() {
        let events: Vec<String> = confirmation.events.iter().map(ToString::to_string).collect();
        println!("  {} {}", "Events:".bold(), events.join(", "));
    }
    println!("  {} {}", "Explorer:".bold(), report.explorer_url.underline());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use sentinelchain::GatewayErrorKind;

    fn context(args: &[&str], config: Config) -> Context {
        let mut argv = vec!["sentinel"];
        argv.extend_from_slice(args);
        argv.push("report");
        Context::resolve(&Cli::try_parse_from(argv).unwrap(), config)
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            rpc_url: Some("http://config:8545".to_string()),
            device_id: Some("DEVICE_CFG".to_string()),
            output_format: Some(OutputFormat::Yaml),
            ..Config::default()
        };

        let ctx = context(
            &["--rpc-url", "http://flag:8545", "--device", "DEVICE_FLAG", "-o", "json"],
            config.clone(),
        );
        assert_eq!(ctx.rpc_url.as_deref(), Some("http://flag:8545"));
        assert_eq!(ctx.device_id, "DEVICE_FLAG");
        assert_eq!(ctx.output_format, OutputFormat::Json);

        let ctx = context(&["--rpc-url", "http://flag:8545"], config);
        assert_eq!(ctx.device_id, "DEVICE_CFG");
        assert_eq!(ctx.output_format, OutputFormat::Yaml);
    }

    #[test]
    fn test_defaults() {
        let ctx = context(&["--rpc-url", "http://flag:8545"], Config::default());
        assert_eq!(ctx.device_id, DEFAULT_DEVICE_ID);
        assert_eq!(ctx.output_format, OutputFormat::Pretty);
        assert_eq!(
            ctx.explorer_link("0xabc"),
            "https://polygonscan.com/tx/0xabc"
        );
    }

    #[tokio::test]
    async fn test_gateway_without_rpc_reports_wallet_unavailable() {
        let mut ctx = context(&[], Config::default());
        ctx.rpc_url = None;
        ctx.contract = None;

        let gateway = ctx.gateway().unwrap();
        assert!(!gateway.has_provider());
        let err = gateway.report_infection("DEVICE_001").await.unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::WalletUnavailable);
        assert!(gateway_failure(err).to_string().contains("SENTINEL_RPC_URL"));
    }

    #[test]
    fn test_gateway_requires_contract_with_rpc() {
        let mut ctx = context(&["--rpc-url", "http://127.0.0.1:8545"], Config::default());
        ctx.contract = None;
        let err = ctx.gateway().err().unwrap();
        assert!(err.to_string().contains("Contract address required"));

        ctx.contract = Some("0x1234".to_string());
        let err = ctx.gateway().err().unwrap();
        assert!(err.to_string().contains("Invalid contract address"));

        ctx.contract = Some("0x5fbdb2315678afecb367f032d93f642f64180aa3".to_string());
        assert!(ctx.gateway().unwrap().has_provider());
    }
}
