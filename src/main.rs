use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use ls8::memory::StdMem;
use ls8::processor::StdProcessor;

/// Runs an LS-8 program image
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Program image, one binary literal per line
    program: PathBuf,

    /// Log more (-v info, -vv debug, -vvv per-cycle trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    color_eyre::install()?; // rust error handling
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(level(args.verbose))
        .init()
        .map_err(|err| eyre!("Failed to initialize logging: {}", err))?;

    let mem = StdMem::from_file(&args.program)
        .wrap_err_with(|| format!("Failed to load `{}`", args.program.display()))?;
    mem.dump();

    let mut cpu = StdProcessor::new(mem);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let res = cpu.execute_until_halt(&mut out);
    out.flush()?;
    res.wrap_err_with(|| format!("Machine stopped: {}", cpu.trace()))?;

    Ok(())
}
