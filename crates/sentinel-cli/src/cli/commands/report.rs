//! `sentinel report` - Report the device as infected.

use anyhow::Result;

use super::{gateway_failure, open_explorer, print_write, Context, WriteReport};
use crate::cli::args::ReportArgs;
use crate::education::Explain;

pub async fn execute(ctx: Context, args: ReportArgs) -> Result<()> {
    ctx.explain(&Explain::report(&ctx.device_id));

    let gateway = ctx.gateway()?;
    let spinner = ctx.spinner("Reporting infection, waiting for confirmation...");
    let outcome = gateway.report_infection(&ctx.device_id).await;
    spinner.finish_and_clear();
    let confirmation = outcome.map_err(gateway_failure)?;

    let report = WriteReport {
        device_id: &ctx.device_id,
        operation: "reportInfection",
        log_hash: None,
        explorer_url: ctx.explorer_link(confirmation.transaction_id.as_str()),
        confirmation: &confirmation,
    };
    print_write(&ctx, &report)?;

    if args.open {
        open_explorer(&report.explorer_url);
    }

    Ok(())
}
