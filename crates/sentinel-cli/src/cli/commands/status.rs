//! `sentinel status` - Read a device's kill-switch state.

use anyhow::Result;
use colored::Colorize;
use sentinelchain::DeviceStatusCode;
use serde_json::json;

use super::{gateway_failure, Context};
use crate::cli::args::StatusArgs;
use crate::education::Explain;

pub async fn execute(ctx: Context, args: StatusArgs) -> Result<()> {
    let device_id = args.device.as_deref().unwrap_or(&ctx.device_id);
    ctx.explain(&Explain::status(device_id));

    let gateway = ctx.gateway()?;
    let status = gateway
        .get_device_status(device_id)
        .await
        .map_err(gateway_failure)?;

    let report = json!({ "deviceId": device_id, "status": status });
    if let Some(rendered) = ctx.output_format.render(&report)? {
        println!("{rendered}");
        return Ok(());
    }

    let label = match status {
        DeviceStatusCode::Safe => status.to_string().green().bold(),
        DeviceStatusCode::Locked => status.to_string().red().bold(),
    };
    println!("{} {}", format!("{device_id}:").bold(), label);
    if status.is_locked() {
        println!(
            "{}",
            "The kill switch is active: this device should stay isolated.".dimmed()
        );
    }

    Ok(())
}
