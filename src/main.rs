use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use rusty_etl::process_pipeline;

#[derive(Parser)]
#[command(name = "rusty-etl", about = "Clean a CSV file and persist the result")]
struct Cli {
    /// Input CSV file (header row first)
    input: PathBuf,

    /// Output CSV file (overwritten if it exists)
    output: PathBuf,

    /// Print the post-clean dataset summary as JSON
    #[arg(long)]
    summary_json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let report = process_pipeline(&cli.input, &cli.output)?;
    println!("{}", report.summary_line());

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    }

    Ok(())
}
