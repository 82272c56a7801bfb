/**
 * File: /src/config.rs
 * Created Date: Friday, January 26th 2024
 * Author: Zihan
 * -----
 * Last Modified: Saturday, 8th March 2025 2:45:03 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2025-03-08		Zihan	subcommands for the ordering harness
**/
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const USAGE: &str = "\
Usage:
  doubly_lexical bench <algorithm> <max-size> [density] [seed]
  doubly_lexical order <matrix.npy>...
  doubly_lexical help

Algorithms: dlo, doubly-lexical, doubly_lexical
<max-size> must be at least 10; sizes 10, 20, ... up to it are timed.
[density] is the probability of a 1-entry, 0.5 by default.";

/// Smallest `max-size` accepted by `bench`.
pub const MIN_BENCH_SIZE: usize = 10;
pub const BENCH_STEP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    DoublyLexical,
}

impl Algorithm {
    pub fn from_name(name: &str) -> Option<Algorithm> {
        match name {
            "dlo" | "doubly-lexical" | "doubly_lexical" => Some(Algorithm::DoublyLexical),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::DoublyLexical => "doubly_lexical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub algorithm: Algorithm,
    pub max_size: usize,
    pub density: f64,
    pub seed: Option<u64>,
}

impl BenchConfig {
    /// Sizes 10, 20, ... not exceeding `max_size`.
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (MIN_BENCH_SIZE..=self.max_size).step_by(BENCH_STEP)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Bench(BenchConfig),
    Order { paths: Vec<PathBuf> },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingArgument(&'static str),
    UnknownCommand(String),
    UnknownAlgorithm(String),
    InvalidNumber { name: &'static str, value: String },
    InvalidDensity(f64),
    SizeTooSmall(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::MissingArgument(name) => write!(f, "Missing argument <{}>", name),
            ConfigError::UnknownCommand(command) => write!(f, "Unknown command '{}'", command),
            ConfigError::UnknownAlgorithm(name) => write!(f, "Unknown algorithm '{}'", name),
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "Invalid value '{}' for <{}>", value, name)
            }
            ConfigError::InvalidDensity(density) => {
                write!(f, "Density must lie in [0, 1], got {}", density)
            }
            ConfigError::SizeTooSmall(size) => write!(
                f,
                "Max size must be at least {}, got {}",
                MIN_BENCH_SIZE, size
            ),
        }
    }
}

impl Error for ConfigError {}

pub struct Config {
    command: Command,
}

impl Config {
    /// constructor
    ///
    /// # Examples
    /// ```bash
    /// $ cargo run --release -- bench dlo 300 0.3 42
    /// $ cargo run --release -- order data/a.npy data/b.npy
    /// ```
    pub fn new(mut args: impl Iterator<Item = String>) -> Result<Config, ConfigError> {
        // 0: program name
        args.next();
        let command = match args.next() {
            None => return Err(ConfigError::MissingArgument("command")),
            Some(command) => command,
        };

        let command = match command.as_str() {
            "bench" => Command::Bench(parse_bench(args)?),
            "order" => {
                let paths: Vec<PathBuf> = args.map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err(ConfigError::MissingArgument("matrix.npy"));
                }
                Command::Order { paths }
            }
            "help" | "-h" | "--help" => Command::Help,
            _ => return Err(ConfigError::UnknownCommand(command)),
        };

        Ok(Config { command })
    }

    pub fn get_command(&self) -> &Command {
        &self.command
    }

    pub fn into_command(self) -> Command {
        self.command
    }
}

fn parse_bench(mut args: impl Iterator<Item = String>) -> Result<BenchConfig, ConfigError> {
    let name = args
        .next()
        .ok_or(ConfigError::MissingArgument("algorithm"))?;
    let algorithm = Algorithm::from_name(&name).ok_or(ConfigError::UnknownAlgorithm(name))?;

    let max_size = args
        .next()
        .ok_or(ConfigError::MissingArgument("max-size"))?;
    let max_size: usize = parse_number("max-size", max_size)?;
    if max_size < MIN_BENCH_SIZE {
        return Err(ConfigError::SizeTooSmall(max_size));
    }

    let density: f64 = match args.next() {
        Some(value) => parse_number("density", value)?,
        None => 0.5,
    };
    if !(0.0..=1.0).contains(&density) {
        return Err(ConfigError::InvalidDensity(density));
    }

    let seed = match args.next() {
        Some(value) => Some(parse_number("seed", value)?),
        None => None,
    };

    Ok(BenchConfig {
        algorithm,
        max_size,
        density,
        seed,
    })
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}
