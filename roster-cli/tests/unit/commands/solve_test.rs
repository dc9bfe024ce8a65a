use super::*;
use crate::cli::{get_app, run_subcommand};
use std::fs;

const MASTER_SHEET_PATH: &str = "tests/data/master.tsv";
const PREFERENCES_PATH: &str = "tests/data/preferences.tsv";
const PARTIAL_ROSTER_PATH: &str = "tests/data/partial.tsv";
const CONFIG_PATH: &str = "tests/data/config.json";

struct DummyWrite {}

impl Write for DummyWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn run_solve_with_out_writer(matches: &ArgMatches) -> Result<(), String> {
    run_solve(matches, |_| BufWriter::new(Box::new(DummyWrite {})))
}

fn get_solve_matches(params: &[&str]) -> ArgMatches {
    let args = [&["solve", MASTER_SHEET_PATH, CONFIG_PATH], params].concat();

    get_solve_app().try_get_matches_from(args).unwrap()
}

#[test]
fn can_solve_roster_with_all_inputs() {
    let matches = get_solve_matches(&[
        "--preferences",
        PREFERENCES_PATH,
        "--partial-roster",
        PARTIAL_ROSTER_PATH,
        "--max-iterations",
        "100",
        "--seed",
        "3",
    ]);

    run_solve_with_out_writer(&matches).unwrap();
}

#[test]
fn can_solve_roster_with_iteration_and_time_limits() {
    let matches = get_solve_matches(&["-n", "50", "-t", "10", "--restarts", "3"]);

    run_solve_with_out_writer(&matches).unwrap();
}

#[test]
fn can_write_roster_and_diagnostics_to_files() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let roster_path = tmp_dir.path().join("roster.tsv");
    let diagnostics_path = tmp_dir.path().join("diagnostics.json");
    let args = vec![
        "roster-cli",
        "solve",
        MASTER_SHEET_PATH,
        CONFIG_PATH,
        "-r",
        PARTIAL_ROSTER_PATH,
        "-o",
        roster_path.to_str().unwrap(),
        "-d",
        diagnostics_path.to_str().unwrap(),
        "-n",
        "100",
    ];
    let matches = get_app().try_get_matches_from(args).unwrap();

    run_subcommand(matches);

    let roster = fs::read_to_string(roster_path).unwrap();
    assert!(roster.starts_with("DATE\tKRG-B\t"));
    assert_eq!(roster.lines().count(), 8);
    let diagnostics = fs::read_to_string(diagnostics_path).unwrap();
    assert!(diagnostics.contains("\"costBreakdown\""));
}

#[test]
fn can_require_master_sheet_and_config_paths() {
    get_solve_app().try_get_matches_from(vec!["solve"]).unwrap_err();
    get_solve_app().try_get_matches_from(vec!["solve", MASTER_SHEET_PATH]).unwrap_err();
}

#[test]
fn can_specify_flags() {
    let matches = get_solve_matches(&["--log", "--strict"]);

    assert!(matches.get_flag(LOG_ARG_NAME));
    assert!(matches.get_flag(STRICT_ARG_NAME));
}

parameterized_test! {can_reject_bad_numeric_arguments, (args, expected), {
    can_reject_bad_numeric_arguments_impl(args, expected);
}}

can_reject_bad_numeric_arguments! {
    case01_max_iterations: (&["--max-iterations", "many"], "max iterations"),
    case02_max_time: (&["--max-time", "1s"], "max time"),
    case03_seed: (&["--seed", "abc"], "random seed"),
    case04_restarts: (&["--restarts", "0.5"], "restarts"),
}

fn can_reject_bad_numeric_arguments_impl(args: &[&str], expected: &str) {
    let matches = get_solve_matches(args);

    let result = run_solve_with_out_writer(&matches);

    let err = result.unwrap_err();
    assert!(err.contains(expected), "unexpected error: {err}");
}

#[test]
fn can_report_missing_input_file() {
    let matches = get_solve_matches(&["--preferences", "tests/data/missing.tsv"]);

    let result = run_solve_with_out_writer(&matches);

    assert!(result.unwrap_err().starts_with("cannot open preferences file 'tests/data/missing.tsv'"));
}

#[test]
fn can_fail_in_strict_mode_when_slots_are_left_empty() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let config_path = tmp_dir.path().join("config.json");
    // nobody is eligible for abdominal day post
    let config = fs::read_to_string(CONFIG_PATH).unwrap().replace(r#""KRG-ABD": "never""#, r#""KRG-ABD": "daily""#);
    fs::write(&config_path, config).unwrap();
    let config_path = config_path.to_str().unwrap();

    let matches = get_solve_app().try_get_matches_from(vec!["solve", MASTER_SHEET_PATH, config_path, "-n", "10"]).unwrap();
    run_solve_with_out_writer(&matches).unwrap();

    let matches =
        get_solve_app().try_get_matches_from(vec!["solve", MASTER_SHEET_PATH, config_path, "-n", "10", "--strict"]).unwrap();
    let err = run_solve_with_out_writer(&matches).unwrap_err();
    assert!(err.contains("7 slot(s) cannot be assigned"), "unexpected error: {err}");
}
