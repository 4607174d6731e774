//! `sentinel simulate` - Render the demo dashboard.

use anyhow::Result;
use colored::Colorize;
use sentinelchain::demo::DemoSession;
use sentinelchain::{AttackStatus, DashboardStatus};
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::cli::args::SimulateArgs;
use crate::education::Explain;

#[derive(Tabled)]
struct AttackRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Entropy")]
    entropy: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Block")]
    block: u64,
    #[tabled(rename = "Hash")]
    hash: String,
    #[tabled(rename = "Transaction")]
    transaction: String,
}

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Event")]
    kind: String,
    #[tabled(rename = "Data")]
    data: String,
}

pub fn execute(ctx: Context, args: SimulateArgs) -> Result<()> {
    ctx.explain(&Explain::simulate());

    let mut session = DemoSession::new(ctx.device_id.clone());
    if args.attack && !session.simulate_attack() {
        eprintln!("{}", "Device already locked; attack skipped.".dimmed());
    }
    if args.reset {
        session.reset();
    }

    if let Some(rendered) = ctx.output_format.render(&session)? {
        println!("{rendered}");
        return Ok(());
    }

    print_session(&ctx, &session);
    Ok(())
}

fn print_session(ctx: &Context, session: &DemoSession) {
    let status = match session.status() {
        DashboardStatus::Safe => "SAFE".green().bold(),
        DashboardStatus::Warning => "WARNING".yellow().bold(),
        DashboardStatus::Locked => "LOCKED".red().bold(),
    };
    println!("{} {}  {}", "Device:".bold(), session.device_id().cyan().bold(), status);
    if session.is_locked() {
        println!(
            "{}",
            "Ransomware detected: kill switch activated, network access revoked.".red()
        );
    }

    println!();
    println!("{}", "Attack Timeline:".bold().underline());
    let rows: Vec<AttackRow> = session
        .attack_events()
        .iter()
        .map(|event| AttackRow {
            time: event.timestamp.format("%H:%M:%S").to_string(),
            file: event.file_name.clone(),
            entropy: format!("{:.2}", event.entropy),
            status: match event.status {
                AttackStatus::Safe => event.status.to_string().green().to_string(),
                AttackStatus::Warning => event.status.to_string().yellow().to_string(),
                AttackStatus::Infected => event.status.to_string().red().bold().to_string(),
            },
        })
        .collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));

    println!();
    println!("{}", "Blockchain Records:".bold().underline());
    let rows: Vec<RecordRow> = session
        .blockchain_records()
        .iter()
        .map(|record| RecordRow {
            time: record.timestamp.format("%H:%M:%S").to_string(),
            block: record.block_number,
            hash: record.hash.clone(),
            transaction: record.transaction_id.clone(),
        })
        .collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));
    if let Some(latest) = session.blockchain_records().first() {
        println!(
            "{}",
            format!("Latest: {}", latest.explorer_url(&ctx.explorer_url)).dimmed()
        );
    }

    println!();
    println!("{}", "Contract Events:".bold().underline());
    let rows: Vec<EventRow> = session
        .contract_events()
        .iter()
        .map(|event| EventRow {
            time: event.timestamp.format("%H:%M:%S").to_string(),
            kind: event.kind.to_string(),
            data: event
                .data
                .iter()
                .map(|(k, v)| match v.as_str() {
                    Some(s) => format!("{k}={s}"),
                    None => format!("{k}={v}"),
                })
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));
}
