//! DocBot CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use docbot_runtime::{Config, Repl, Session, logging};
use tracing::info;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    config: Option<PathBuf>,
    execute: Vec<String>,
    batch: Vec<PathBuf>,
    verbosity: u8,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();
    let mut args = args.into_iter().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-c" | "--config" => {
                let path = args.next().ok_or("--config requires a path")?;
                config.config = Some(PathBuf::from(path));
            }
            "-e" | "--execute" => {
                let command = args.next().ok_or("--execute requires a command")?;
                config.execute.push(command);
            }
            "-b" | "--batch" => {
                let path = args.next().ok_or("--batch requires a file")?;
                config.batch.push(PathBuf::from(path));
            }
            flags if flags.len() > 1 && flags.starts_with('-') && flags[1..].chars().all(|c| c == 'v') => {
                let count = u8::try_from(flags.len() - 1).unwrap_or(u8::MAX);
                config.verbosity = config.verbosity.saturating_add(count);
            }
            "--verbose" => config.verbosity = config.verbosity.saturating_add(1),
            other => return Err(format!("unknown option: {other}").into()),
        }
    }

    Ok(config)
}

/// Returns `Ok(false)` when a non-interactive command failed.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(true);
    }

    if cli.show_version {
        println!("docbot {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    logging::init(cli.verbosity);

    let config = Config::locate(cli.config.as_deref())?;
    let session = Session::from_config(&config)?;
    info!(documents = %config.documents.display(), "docbot ready");

    let mut repl = Repl::new(session)?;

    if cli.execute.is_empty() && cli.batch.is_empty() {
        repl.run()?;
        return Ok(true);
    }

    let mut ok = true;
    for file in &cli.batch {
        ok &= repl.eval_file(file)?.iter().all(|reply| !reply.is_error());
    }
    for command in &cli.execute {
        ok &= !repl.eval(command).is_error();
    }
    Ok(ok)
}

fn print_help() {
    println!(
        "\x1b[1mDocBot\x1b[0m - character sheet chat commands

\x1b[1mUSAGE:\x1b[0m
    docbot [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -c, --config <FILE>    Configuration file (default: $CONFIG, then built-in)
    -e, --execute <CMD>    Handle one message and exit (repeatable)
    -b, --batch <FILE>     Handle every message in FILE and exit (repeatable)
    -v, --verbose          More logging (-vv, -vvv for more; RUST_LOG overrides)

\x1b[1mEXAMPLES:\x1b[0m
    docbot                               Start the console
    docbot -c bot.json -e 'roll 2d8 - 1' Roll once and exit
    docbot -b session.txt                Replay a file of messages

\x1b[1mCONSOLE:\x1b[0m
    help                 List bot commands
    <line ending in \\>   Continue the message on the next line
    Ctrl+D               Exit
    Ctrl+C               Cancel current input"
    );
}
