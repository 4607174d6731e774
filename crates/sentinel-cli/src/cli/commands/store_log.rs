//! `sentinel store-log` - Anchor a log digest on-chain.

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use super::{gateway_failure, open_explorer, print_write, Context, WriteReport};
use crate::cli::args::StoreLogArgs;
use crate::digest;
use crate::education::Explain;

pub async fn execute(ctx: Context, args: StoreLogArgs) -> Result<()> {
    ctx.explain(&Explain::store_log(&ctx.device_id));

    let log_hash = match (args.hash, args.file) {
        (Some(hash), _) => hash,
        (None, Some(file)) => {
            let path = PathBuf::from(shellexpand::tilde(&file.to_string_lossy()).into_owned());
            let hash = digest::sha256_file(&path).await?;
            debug!(path = %path.display(), %hash, "hashed log file");
            hash
        }
        (None, None) => anyhow::bail!("Provide --hash <HASH> or --file <PATH>"),
    };
    if log_hash.trim().is_empty() {
        anyhow::bail!("Log hash must not be empty");
    }

    let gateway = ctx.gateway()?;
    let spinner = ctx.spinner("Storing log hash, waiting for confirmation...");
    let outcome = gateway.store_log_hash(&ctx.device_id, &log_hash).await;
    spinner.finish_and_clear();
    let confirmation = outcome.map_err(gateway_failure)?;

    let report = WriteReport {
        device_id: &ctx.device_id,
        operation: "storeLogHash",
        log_hash: Some(&log_hash),
        explorer_url: ctx.explorer_link(confirmation.transaction_id.as_str()),
        confirmation: &confirmation,
    };
    print_write(&ctx, &report)?;

    if args.open {
        open_explorer(&report.explorer_url);
    }

    Ok(())
}
