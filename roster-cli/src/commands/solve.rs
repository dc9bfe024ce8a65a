#[cfg(test)]
#[path = "../../tests/unit/commands/solve_test.rs"]
mod solve_test;

use super::*;
use clap::{Arg, ArgAction, Command};
use roster_cli::extensions::config::{create_search_config, read_config};
use roster_cli::extensions::export::{write_diagnostics, write_roster};
use roster_cli::extensions::import::read_problem;
use roster_cli::extensions::interruption::create_interruption_quota;
use roster_core::prelude::*;
use std::io::BufReader;
use std::sync::Arc;

const MASTER_ARG_NAME: &str = "MASTER";
const CONFIG_ARG_NAME: &str = "CONFIG";
const PREFERENCES_ARG_NAME: &str = "preferences";
const PARTIAL_ROSTER_ARG_NAME: &str = "partial-roster";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const OUT_DIAGNOSTICS_ARG_NAME: &str = "out-diagnostics";
const ITERATIONS_ARG_NAME: &str = "max-iterations";
const TIME_ARG_NAME: &str = "max-time";
const RESTARTS_ARG_NAME: &str = "restarts";
const RANDOM_SEED_ARG_NAME: &str = "seed";
const LOG_ARG_NAME: &str = "log";
const STRICT_ARG_NAME: &str = "strict";

pub fn get_solve_app() -> Command {
    Command::new("solve")
        .about("Builds a duty roster")
        .arg(Arg::new(MASTER_ARG_NAME).help("Sets the master sheet file to use").required(true).index(1))
        .arg(Arg::new(CONFIG_ARG_NAME).help("Sets the configuration file to use").required(true).index(2))
        .arg(
            Arg::new(PREFERENCES_ARG_NAME)
                .help("Specifies path to file with physician preferences")
                .short('p')
                .long(PREFERENCES_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(PARTIAL_ROSTER_ARG_NAME)
                .help("Specifies path to file with pre-filled roster cells")
                .short('r')
                .long(PARTIAL_ROSTER_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for roster output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_DIAGNOSTICS_ARG_NAME)
                .help("Specifies path to file for diagnostics output in json format")
                .short('d')
                .long(OUT_DIAGNOSTICS_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(ITERATIONS_ARG_NAME)
                .help("Specifies maximum number of improvement iterations per restart")
                .short('n')
                .long(ITERATIONS_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(TIME_ARG_NAME)
                .help("Specifies max time of improvement phase per restart in seconds")
                .short('t')
                .long(TIME_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(RESTARTS_ARG_NAME)
                .help("Specifies amount of independent search restarts")
                .long(RESTARTS_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(RANDOM_SEED_ARG_NAME)
                .help("Specifies randomization seed to get reproducible results")
                .long(RANDOM_SEED_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether default logging is enabled")
                .long(LOG_ARG_NAME)
                .action(ArgAction::SetTrue)
                .required(false),
        )
        .arg(
            Arg::new(STRICT_ARG_NAME)
                .help("Specifies whether a roster with empty slots is treated as failure")
                .long(STRICT_ARG_NAME)
                .action(ArgAction::SetTrue)
                .required(false),
        )
}

/// Runs solver commands.
pub fn run_solve<F>(matches: &ArgMatches, out_writer_func: F) -> Result<(), String>
where
    F: Fn(Option<File>) -> BufWriter<Box<dyn Write>>,
{
    // required
    let master_path = matches.get_one::<String>(MASTER_ARG_NAME).ok_or("master sheet path is not set")?;
    let config_path = matches.get_one::<String>(CONFIG_ARG_NAME).ok_or("config path is not set")?;

    let config = read_config(BufReader::new(open_file(config_path, "config")?)).map_err(|err| err.to_string())?;
    let master_sheet = BufReader::new(open_file(master_path, "master sheet")?);

    // optional
    let preferences = matches
        .get_one::<String>(PREFERENCES_ARG_NAME)
        .map(|path| open_file(path, "preferences").map(BufReader::new))
        .transpose()?;
    let partial_roster = matches
        .get_one::<String>(PARTIAL_ROSTER_ARG_NAME)
        .map(|path| open_file(path, "partial roster").map(BufReader::new))
        .transpose()?;

    let max_iterations = parse_arg_value::<usize>(matches, ITERATIONS_ARG_NAME, "max iterations")?;
    let max_time = parse_arg_value::<f64>(matches, TIME_ARG_NAME, "max time")?;
    let restarts = parse_arg_value::<usize>(matches, RESTARTS_ARG_NAME, "restarts")?;
    let seed = parse_arg_value::<u64>(matches, RANDOM_SEED_ARG_NAME, "random seed")?
        .or_else(|| config.search.as_ref().and_then(|search| search.seed));
    let is_logging_enabled = matches.get_flag(LOG_ARG_NAME);
    let is_strict = matches.get_flag(STRICT_ARG_NAME);

    let problem = read_problem(master_sheet, preferences, partial_roster, &config)
        .map_err(|err| format!("cannot read problem: '{err}'"))?;

    let mut search_config = create_search_config(&config);
    search_config.max_iterations = max_iterations.or(search_config.max_iterations);
    search_config.max_time = max_time.or(search_config.max_time);
    search_config.restarts = restarts.unwrap_or(search_config.restarts);

    let logger: InfoLogger =
        if is_logging_enabled { Arc::new(|msg: &str| eprintln!("{msg}")) } else { Arc::new(|_: &str| {}) };
    let quota = create_interruption_quota().map_err(|err| err.to_string())?;
    let parallelism = Some(search_config.restarts.clamp(1, num_cpus::get().max(1)));
    let environment = Arc::new(Environment::new(seed, Some(quota), parallelism, logger.clone()));

    let solution = Solver::new(Arc::new(problem), environment, search_config)
        .solve()
        .map_err(|err| format!("cannot build roster: '{err}'"))?;

    solution.anchor_violations().for_each(|violation| {
        (logger)(format!("pre-filled cells break '{}': {}", violation.rule, violation.details).as_str())
    });

    let out_result = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out roster")).transpose()?;
    write_roster(&solution, out_writer_func(out_result)).map_err(|err| err.to_string())?;

    if let Some(path) = matches.get_one::<String>(OUT_DIAGNOSTICS_ARG_NAME) {
        let out_diagnostics = create_file(path, "out diagnostics")?;
        write_diagnostics(&solution, out_writer_func(Some(out_diagnostics))).map_err(|err| err.to_string())?;
    }

    if is_strict {
        solution.ensure_complete().map_err(|err| err.to_string())?;
    }

    Ok(())
}
