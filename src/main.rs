//! Cassava - evaluate a CSV spreadsheet of cell expressions

mod config;
mod error;
mod logger;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use cassava_core::Document;
use cassava_engine::engine::ReadPolicy;

use crate::config::Settings;
use crate::error::CliError;

fn print_usage() {
    eprintln!("Usage: cassava [OPTIONS] <FILE>");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <FILE>                    CSV spreadsheet to evaluate (- for stdin)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --strict              Fail on blank cells");
    eprintln!("  -f, --formatted           Print blank cells as empty fields (default)");
    eprintln!("  -p, --precision <N>       Decimal places in output (default: 2)");
    eprintln!("  -o, --output <FILE>       Write results to a file instead of stdout");
    eprintln!("  -c, --config <FILE>       Load settings from a TOML file");
    eprintln!("      --no-config           Ignore the user config file");
    eprintln!("  -v, --verbose             More logging (can be repeated)");
    eprintln!("  -q, --quiet               No logging");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    no_config: bool,
    precision: Option<usize>,
    policy: Option<ReadPolicy>,
    verbosity: i8,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Args),
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-s" | "--strict" => parsed.policy = Some(ReadPolicy::Strict),
            "-f" | "--formatted" => parsed.policy = Some(ReadPolicy::Formatted),
            "-p" | "--precision" => {
                let value = option_value(args, &mut i)?;
                let precision = value
                    .parse::<usize>()
                    .map_err(|_| CliError::InvalidPrecision(value.to_string()))?;
                parsed.precision = Some(precision);
            }
            "-o" | "--output" => {
                parsed.output = Some(PathBuf::from(option_value(args, &mut i)?));
            }
            "-c" | "--config" => {
                parsed.config = Some(PathBuf::from(option_value(args, &mut i)?));
            }
            "--no-config" => parsed.no_config = true,
            "-v" | "--verbose" => parsed.verbosity = parsed.verbosity.saturating_add(1),
            "-q" | "--quiet" => parsed.verbosity = -1,
            // Bare "-" is stdin, not an option.
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(CliError::UnknownOption(arg.to_string()));
            }
            arg => {
                if parsed.input.is_some() {
                    return Err(CliError::UnexpectedArgument(arg.to_string()));
                }
                parsed.input = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    if parsed.input.is_none() {
        return Err(CliError::MissingInput);
    }
    Ok(Command::Run(parsed))
}

fn option_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, CliError> {
    let name = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingValue(name.clone()))
}

fn run(args: Args) -> anyhow::Result<()> {
    let settings = if args.no_config && args.config.is_none() {
        Settings::resolve(&config::ConfigFile::default(), args.precision, args.policy)
    } else {
        let (file, warnings) = config::load_config(args.config.as_ref());
        for warning in warnings {
            log::warn!("{}", warning);
        }
        Settings::resolve(&file, args.precision, args.policy)
    };

    let input = args.input.ok_or(CliError::MissingInput)?;
    let document = if input.as_os_str() == "-" {
        Document::from_reader(io::stdin().lock())?
    } else {
        Document::open(&input)?
    };
    log::info!(
        "loaded {} rows x {} columns",
        document.grid.row_count(),
        document.grid.column_count()
    );

    match args.output {
        Some(path) => {
            // Render first so a failed print leaves no partial file behind.
            let rendered = document.render(settings.policy, settings.precision)?;
            std::fs::write(&path, rendered)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            document.print(&mut stdout, settings.policy, settings.precision)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() {
    let argv: Vec<String> = env::args().skip(1).collect();

    let args = match parse_args(&argv) {
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Ok(Command::Run(args)) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(error::EXIT_USAGE);
        }
    };

    logger::init(args.verbosity);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(error::exit_code(&e));
    }
}
