//! A command line interface to the duty roster optimizer.

#[cfg(test)]
#[path = "../tests/helpers/macros.rs"]
#[macro_use]
mod macros;

mod commands;

use crate::cli::{get_app, run_subcommand};

fn main() {
    let matches = get_app().get_matches();

    run_subcommand(matches);
}

mod cli {
    use super::commands::create_write_buffer;
    use super::commands::solve::{get_solve_app, run_solve};
    use clap::{ArgMatches, Command};
    use std::process;

    pub fn get_app() -> Command {
        Command::new("Duty Roster Optimizer")
            .version(env!("CARGO_PKG_VERSION"))
            .about("A command line interface to build duty rosters for surgical trainee physicians")
            .subcommand(get_solve_app())
    }

    pub fn run_subcommand(arg_matches: ArgMatches) {
        if let Err(err) = match arg_matches.subcommand() {
            Some(("solve", solve_matches)) => run_solve(solve_matches, create_write_buffer),
            Some((name, _)) => Err(format!("unknown subcommand: '{name}'")),
            None => Err("no subcommand was used. Use -h to print help information.".to_string()),
        } {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
