#![deny(unsafe_code)]

#[path = "cli.rs"]
mod cli;

use std::{env, process::ExitCode};

fn main() -> ExitCode {
    cli::run_with(env::args_os(), env::vars_os())
}
