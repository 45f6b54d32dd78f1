//! Command-line front end for the solvekit toolkit.
//!
//! Each subcommand parses plain-text input, runs one search or enumeration
//! and prints the answer. Ctrl-C aborts a running grid search.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use solvekit::geometry::{manhattan, Point};
use solvekit::{
    combinations, cost_between, logging, reachable, selections, CancelToken, Error, Grid, Result,
    UNREACHABLE,
};

/// Graph searches and subset enumerations over puzzle input.
#[derive(Parser)]
#[command(name = "solvekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search summaries to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level or filter directive; overrides --verbose.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count the cells reachable from `S` (or the top-left cell) in an ASCII map.
    Reach {
        /// Map file; reads stdin when omitted.
        map: Option<PathBuf>,
    },
    /// Fewest steps from `S` to `E` in an ASCII map.
    Cost {
        /// Map file; reads stdin when omitted.
        map: Option<PathBuf>,
    },
    /// Count the ways to pick values (one per line) that add up to TARGET.
    Combinations {
        target: i64,
        /// Values file; reads stdin when omitted.
        values: Option<PathBuf>,
    },
    /// Product of the first K values that add up to TARGET.
    Select {
        k: usize,
        target: i64,
        /// Values file; reads stdin when omitted.
        values: Option<PathBuf>,
    },
    /// Smallest product of a fewest-item first group when the values are
    /// split into GROUPS equal-weight groups.
    Balance {
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        groups: i64,
        /// Values file; reads stdin when omitted.
        values: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        tracing::warn!(error = %e, "Ctrl-C handler not installed");
    }

    match run(cli.command, &cancel) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Cancelled) => {
            eprintln!("Cancelled");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, cancel: &CancelToken) -> Result<()> {
    match command {
        Command::Reach { map } => {
            let grid: Grid = read_input(map.as_deref())?.parse()?;
            println!("{}", reach_report(&grid, cancel)?);
        }
        Command::Cost { map } => {
            let grid: Grid = read_input(map.as_deref())?.parse()?;
            match steps_between_markers(&grid, cancel)? {
                Some(steps) => println!("{} steps", steps),
                None => println!("unreachable"),
            }
        }
        Command::Combinations { target, values } => {
            let values = parse_values(&read_input(values.as_deref())?)?;
            let (total, fewest) = container_counts(target, &values)?;
            println!("{} combinations", total);
            println!("{} using the fewest values", fewest);
        }
        Command::Select { k, target, values } => {
            let values = parse_values(&read_input(values.as_deref())?)?;
            match product_of_first_selection(&values, k, target)? {
                Some(product) => println!("{}", product),
                None => println!("no {} values add up to {}", k, target),
            }
        }
        Command::Balance { groups, values } => {
            let values = parse_values(&read_input(values.as_deref())?)?;
            match smallest_first_group_product(groups, &values)? {
                Some(product) => println!("{}", product),
                None => println!("values cannot be split into {} equal groups", groups),
            }
        }
    }

    Ok(())
}

/// Reads a whole file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Parses one integer per non-blank line.
fn parse_values(text: &str) -> Result<Vec<i64>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            line.trim().parse().map_err(|source| Error::InvalidNumber {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Floods the map from `S` (or the top-left cell) and draws the region.
fn reach_report(grid: &Grid, cancel: &CancelToken) -> Result<String> {
    let start: Point = grid.marker('S').unwrap_or((0, 0));
    let region = reachable(grid, &start, Some(cancel))?;

    Ok(format!(
        "{} cells reachable\n{}",
        region.len(),
        grid.render(&region)
    ))
}

/// Cheapest walk between the `S` and `E` markers, or `None` if walled off.
fn steps_between_markers(grid: &Grid, cancel: &CancelToken) -> Result<Option<u64>> {
    let (Some(start), Some(goal)) = (grid.marker('S'), grid.marker('E')) else {
        return Err(Error::InvalidGrid("map needs both S and E markers".to_string()));
    };

    let cost = cost_between(grid, &start, &goal, |&p: &Point| manhattan(p, goal), Some(cancel))?;
    Ok((cost != UNREACHABLE).then_some(cost))
}

/// Number of combinations reaching `target`, and how many of them use the
/// fewest values.
fn container_counts(target: i64, values: &[i64]) -> Result<(usize, usize)> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let found = combinations(target, &sorted)?;
    let fewest = found.iter().map(Vec::len).min();
    let with_fewest = found
        .iter()
        .filter(|combination| Some(combination.len()) == fewest)
        .count();

    Ok((found.len(), with_fewest))
}

fn product(values: &[i64]) -> i64 {
    values.iter().fold(1, |acc, &value| acc.saturating_mul(value))
}

/// Product of the first `k` values (in selection order) whose sum is `target`.
fn product_of_first_selection(values: &[i64], k: usize, target: i64) -> Result<Option<i64>> {
    Ok(selections(values, k)?
        .find(|chosen| chosen.iter().sum::<i64>() == target)
        .map(|chosen| product(&chosen)))
}

/// Splits the total weight into `groups` equal shares and picks the first
/// group with the fewest values, breaking ties by smallest product.
fn smallest_first_group_product(groups: i64, values: &[i64]) -> Result<Option<i64>> {
    let total: i64 = values.iter().sum();
    if groups <= 0 || total % groups != 0 {
        return Ok(None);
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    Ok(combinations(total / groups, &sorted)?
        .iter()
        .map(|group| (group.len(), product(group)))
        .min()
        .map(|(_, product)| product))
}
