use anyhow::{Context, Result};
use buildstats::{
    cli::{Cli, OutputFormat},
    json_output::JsonOutput,
    report, stats, window,
};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let from = args.window_start();
    let to = args.window_end();
    tracing::debug!(csv = %args.csv.display(), %from, %to, "computing build statistics");

    let file = File::open(&args.csv)
        .with_context(|| format!("Error while opening the CSV ({})", args.csv.display()))?;
    let source = window::csv_source(BufReader::new(file));

    let builds = stats::compute_builds(source, from, to)
        .with_context(|| format!("Error while reading the CSV ({})", args.csv.display()))?;

    match args.format {
        OutputFormat::Text => report::print_builds(&builds),
        OutputFormat::Json => println!("{}", JsonOutput::new(&builds).to_json()?),
    }

    Ok(())
}
