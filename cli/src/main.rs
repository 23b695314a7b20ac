// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

mod input;

use std::{
    fmt::Display,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use input::Width;
use log::{LevelFilter, debug};
use strix::{Alphabet, SuffixArray};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of little-endian bytes per input symbol
    #[arg(long, value_enum, default_value = "1", global = true)]
    width: Width,

    /// Smallest symbol of the alphabet [default: smallest symbol of the input]
    #[arg(long, global = true)]
    min: Option<u32>,

    /// Largest symbol of the alphabet [default: largest symbol of the input]
    #[arg(long, global = true)]
    max: Option<u32>,

    /// Drop one trailing line ending from the input
    #[arg(long, global = true)]
    trim: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the suffix array, one position per line
    SuffixArray {
        input: PathBuf,
        /// Also print the common prefix length with the preceding suffix in a second column
        #[arg(long)]
        lcp: bool,
    },
    /// Print the Z-array
    ZArray { input: PathBuf },
    /// Print the prefix function
    PrefixFunction { input: PathBuf },
    /// Print the linear and cyclic periods
    Period { input: PathBuf },
    /// Print the sorted order of all rotations
    Cyclic { input: PathBuf },
    /// Count the occurrences of every pattern in the input
    Count {
        input: PathBuf,
        /// File with one pattern per line
        patterns: PathBuf,
    },
    /// Print every starting position of a pattern in the input
    Search { input: PathBuf, pattern: String },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut out = BufWriter::new(io::stdout().lock());

    match &args.command {
        Command::SuffixArray { input, lcp } => {
            let text = read(&args, input)?;
            let sa = SuffixArray::new(&text, alphabet(&args, &text)?)
                .context("Failed to build suffix array")?;
            if *lcp {
                let lcp = sa.lcp();
                for (i, &position) in sa.as_slice().iter().enumerate() {
                    let common = if i == 0 { 0 } else { lcp[i - 1] };
                    writeln!(out, "{position}\t{common}").context("Failed to write output")?;
                }
            } else {
                print_all(&mut out, sa.as_slice())?;
            }
        }
        Command::ZArray { input } => {
            let text = read(&args, input)?;
            print_all(&mut out, &strix::z_array(&text))?;
        }
        Command::PrefixFunction { input } => {
            let text = read(&args, input)?;
            let p = strix::prefix_function(&text).context("Failed to compute prefix function")?;
            print_all(&mut out, &p)?;
        }
        Command::Period { input } => {
            let text = read(&args, input)?;
            let linear = strix::linear_period(&text).context("Failed to compute linear period")?;
            let cyclic = strix::cyclic_period(&text).context("Failed to compute cyclic period")?;
            writeln!(out, "linear\t{linear}\ncyclic\t{cyclic}").context("Failed to write output")?;
        }
        Command::Cyclic { input } => {
            let text = read(&args, input)?;
            let order = strix::cyclic_suffix_array(&text, alphabet(&args, &text)?)
                .context("Failed to sort rotations")?;
            print_all(&mut out, &order)?;
        }
        Command::Count { input, patterns } => {
            if args.width != Width::Byte {
                bail!("Pattern files can only be used with byte-wide symbols");
            }
            let text = read(&args, input)?;
            let patterns = input::read_patterns(patterns)?;
            // The fitted alphabet must cover the patterns as well as the text
            let symbols: Vec<u32> = text.iter().chain(patterns.iter().flatten()).copied().collect();
            let automaton = strix::aho_corasick(&patterns, alphabet(&args, &symbols)?)
                .context("Failed to build automaton from patterns")?;
            debug!("automaton has {} states", automaton.num_states());

            let count = strix::count_matches(&text, &automaton).context("Failed to scan input")?;
            writeln!(out, "{count}").context("Failed to write output")?;
        }
        Command::Search { input, pattern } => {
            if args.width != Width::Byte {
                bail!("Search patterns can only be used with byte-wide symbols");
            }
            let text = read(&args, input)?;
            let pattern: Vec<u32> = pattern.bytes().map(u32::from).collect();
            let sa = SuffixArray::new(&text, alphabet(&args, &text)?)
                .context("Failed to build suffix array")?;
            print_all(&mut out, &sa.find_all(&pattern))?;
        }
    }

    out.flush().context("Failed to write output")?;

    Ok(())
}

fn read(args: &Args, path: &Path) -> anyhow::Result<Vec<u32>> {
    input::read_symbols(path, args.width, args.trim)
}

/// Resolves the alphabet from the command line, filling in missing bounds from `text`.
fn alphabet(args: &Args, text: &[u32]) -> anyhow::Result<Alphabet> {
    let fitted = Alphabet::fit(text).context("Input is empty")?;
    let min = args.min.unwrap_or(fitted.min());
    let max = args.max.unwrap_or(fitted.max());

    Alphabet::new(min, max).context("Invalid alphabet bounds")
}

fn print_all<W, T>(out: &mut W, values: &[T]) -> anyhow::Result<()>
where
    W: Write,
    T: Display,
{
    for value in values {
        writeln!(out, "{value}").context("Failed to write output")?;
    }

    Ok(())
}
