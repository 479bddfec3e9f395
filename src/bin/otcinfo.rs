//! Print song selection metadata of a .tci chart as JSON

use clap::Parser;
use otcc::chart::ChartFile;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "otcinfo")]
#[command(version = "0.1.0")]
#[command(about = "Show song metadata of an Open Taiko Chart", long_about = None)]
struct Args {
    /// Input chart (.tci)
    input: PathBuf,

    /// Output compact JSON (default is pretty-printed)
    #[arg(short, long)]
    compact: bool,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    otcc::logging::init(args.verbose)?;

    let chart = ChartFile::open(&args.input)?;
    let summary = chart.summary();

    let json_string = if args.compact {
        serde_json::to_string(&summary)?
    } else {
        serde_json::to_string_pretty(&summary)?
    };
    println!("{}", json_string);

    Ok(())
}
