use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use firecalc_core::config::{DEFAULT_FIRST_DAY, DEFAULT_LAST_DAY, load_scenario};
use firecalc_core::model::AnalysisWindow;
use jiff::civil::Date;

mod logging;
mod report;

use logging::init_logging;
use report::Report;

#[derive(Parser, Debug)]
#[command(name = "firecalc")]
#[command(about = "Project daily account balances from recurring events")]
struct Args {
    /// Events file
    #[arg(long, default_value = "events.json")]
    events: PathBuf,

    /// Accounts file, in overdraft priority order
    #[arg(long, default_value = "accounts.json")]
    accounts: PathBuf,

    /// Auxiliary values file
    #[arg(long, default_value = "values.json")]
    values: PathBuf,

    /// First day of the analysis window (YYYY-MM-DD)
    #[arg(long, default_value_t = DEFAULT_FIRST_DAY)]
    start: Date,

    /// Last day of the analysis window, inclusive (YYYY-MM-DD)
    #[arg(long, default_value_t = DEFAULT_LAST_DAY)]
    end: Date,

    /// Print every Nth day's balance
    #[arg(long, default_value_t = 365, value_parser = clap::value_parser!(u32).range(1..))]
    sample_days: u32,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let window = AnalysisWindow::new(args.start, args.end)?;
    let scenario = load_scenario(&args.events, &args.accounts, &args.values)
        .wrap_err("failed to load scenario")?;
    tracing::info!(
        events = scenario.events.len(),
        accounts = scenario.accounts.len(),
        "scenario loaded"
    );

    let projection = firecalc_core::project(&scenario, &window).wrap_err("projection failed")?;
    let report = Report::new(&projection, args.sample_days as usize);

    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{report}")?;
    }
    Ok(())
}
