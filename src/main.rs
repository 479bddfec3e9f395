use clap::Parser;
use otcc::chart::Difficulty;
use otcc::compiler::{CompileOptions, FormatProfile};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "otcc")]
#[command(version = "0.1.0")]
#[command(about = "Open Taiko Chart to playback timeline compiler", long_about = None)]
struct Args {
    /// Input chart (.tci) or medley (.tcm)
    input: PathBuf,

    /// Course to compile (ignored for medleys, which name their own)
    #[arg(short, long, default_value = "oni")]
    course: Difficulty,

    /// Chart format revision (2.1 or 2.2)
    #[arg(short, long, default_value = "2.2")]
    format: FormatProfile,

    /// Hit target for balloons without a listed count
    #[arg(long, default_value_t = 5)]
    balloon: i32,

    /// Output JSON file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output compact JSON (default is pretty-printed)
    #[arg(long)]
    compact: bool,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    otcc::logging::init(args.verbose)?;

    let compiler = otcc::Compiler::with_options(CompileOptions {
        profile: args.format,
        default_balloon: args.balloon,
    });

    let extension = args
        .input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let json = match extension.as_deref() {
        Some("tci") => to_json(&compiler.compile_file(&args.input, args.course)?, args.compact)?,
        Some("tcm") => to_json(&compiler.compile_medley(&args.input)?, args.compact)?,
        _ => {
            return Err(otcc::Error::UnsupportedFile(args.input.display().to_string()).into());
        }
    };

    write_output(args.output.as_deref(), &json)?;
    Ok(())
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn write_output(path: Option<&Path>, json: &str) -> std::io::Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")
        }
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
