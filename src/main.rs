/*
 * File: /main.rs
 * Created Date: Tuesday November 21st 2023
 * Author: Zihan
 * -----
 * Last Modified: Sunday, 9th March 2025 4:02:18 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */

use std::io;
use std::process::ExitCode;

use doubly_lexical::config::{Command, Config, USAGE};
use doubly_lexical::harness::{run_bench, run_order};
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

fn main() -> ExitCode {
    // RUST_LOG overrides the default level; logs go to stderr
    if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Info).env().init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = match Config::new(std::env::args()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = match config.get_command() {
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        Command::Bench(bench) => run_bench(bench, &mut out),
        Command::Order { paths } => run_order(paths, &mut out),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
