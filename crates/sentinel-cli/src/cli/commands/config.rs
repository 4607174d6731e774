//! `sentinel config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load()?;

    if let Some(rendered) = ctx.output_format.render(&config)? {
        println!("{rendered}");
        return Ok(());
    }

    let unset = || "(not set)".dimmed().to_string();
    println!("{}", "Current Configuration:".bold());
    println!();
    println!("  {} {}", "rpc_url:".bold(), config.rpc_url.clone().unwrap_or_else(unset));
    println!(
        "  {} {}",
        "contract_address:".bold(),
        config.contract_address.clone().unwrap_or_else(unset)
    );
    println!("  {} {}", "device_id:".bold(), config.device_id.clone().unwrap_or_else(unset));
    println!("  {} {}", "explorer_url:".bold(), config.explorer_url());
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or(OutputFormat::Pretty)
    );
    println!("  {} {}", "explain_by_default:".bold(), config.explain_by_default);

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());
    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
