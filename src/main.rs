use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use simple_logger::SimpleLogger;
use smlvm::sml::{Machine, Registers, asm};
use std::io::{self, Write};
use std::path::PathBuf;

/// Translates and runs an SML program
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SML source file, one instruction per line
    file: PathBuf,
    /// Only print what the program itself outputs
    #[arg(short, long)]
    quiet: bool,
    /// More log output (-v info, -vv debug, -vvv trace)
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
    let args = Args::parse();
    SimpleLogger::new().with_level(level(args.verbose)).init()?;

    let source = asm::read_source(&args.file)?;
    let mut machine = Machine::new(Registers::new());
    asm::load(&source, &mut machine)
        .with_context(|| format!("cannot translate {}", args.file.display()))?;
    info!(
        "translated {} instructions, labels {}",
        machine.program().len(),
        machine.labels()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !args.quiet {
        writeln!(out, "Here is the program; it has {} instructions.", machine.program().len())?;
        writeln!(out, "{machine}")?;
        writeln!(out, "Beginning program execution.")?;
    }

    machine
        .execute(&mut out)
        .context("please revise your SML program before attempting to rerun")?;

    if !args.quiet {
        writeln!(out, "Ending program execution.")?;
        writeln!(
            out,
            "Values of registers at program termination: {}.",
            machine.registers()
        )?;
    }
    out.flush()?;
    Ok(())
}
