use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::Parser;

use moneytree_invoice::{
    Branding, Error, InvoiceContext, export_all_members_report, export_member_report, ledger,
    roster,
};

#[derive(Parser)]
#[command(version, about = "Render member ledgers as PDF invoices")]
struct Args {
    /// Ledger JSON: one record or an array of records
    input: PathBuf,

    /// Directory to write reports into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Render only the member with this account number
    #[arg(short, long)]
    account: Option<u64>,

    /// Keep members whose name or account number matches
    #[arg(short, long)]
    search: Option<String>,

    /// Order the batch by account number
    #[arg(long)]
    sort: bool,

    /// Issue date printed on invoices (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// JSON file overriding company branding
    #[arg(short, long)]
    branding: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), Error> {
    let issued_on = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let branding = match &args.branding {
        Some(path) => Branding::load(path)?,
        None => Branding::default(),
    };
    let ctx = InvoiceContext::new(issued_on).with_branding(branding);

    let mut ledgers = ledger::parse(&args.input)?;

    if let Some(account) = args.account {
        let member = ledgers
            .iter()
            .find(|l| l.account_number == account)
            .ok_or_else(|| Error::InvalidLedger(format!("no member with account {account}")))?;
        let path = export_member_report(member, &ctx, &args.output)?;
        println!("{}", path.display());
        return Ok(());
    }

    if let Some(term) = &args.search {
        ledgers = roster::filter_members(&ledgers, term);
    }
    if args.sort {
        roster::sort_by_account(&mut ledgers);
    }
    if ledgers.is_empty() {
        log::warn!("no members to export, skipping report");
        return Ok(());
    }

    let path = export_all_members_report(&ledgers, &ctx, &args.output)?;
    println!("{}", path.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
