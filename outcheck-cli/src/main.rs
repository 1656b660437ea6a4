//! Outcheck CLI - Command line interface
//!
//! Compares a program's output file with a reference answer file and prints
//! the verdict followed by the proofs of the first divergences.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

mod config;
mod logging;
mod platform;

use crate::config::{parse_log_level, read_policy_file, LogConfig, PolicyFile};
use crate::logging::LogFormat;
use outcheck_api::{compare_files, OutcheckError, PolicyOptions, RunConfig, ToleranceArg};

#[derive(Parser, Debug)]
#[command(
    name = "outcheck",
    about = "Compare program output with a reference answer",
    long_about = "Compare program output with a reference answer.\n\n\
                  Prints one verdict line: Completely Correct, Format Error, \
                  Incomplete Output, Incorrect Output or Empty Output, followed by \
                  up to five proofs per category.",
    version
)]
struct Cli {
    /// Output produced by the program under test
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Reference answer
    #[arg(value_name = "TEST")]
    test: PathBuf,

    /// Absolute tolerance: a real number, or '-' / 'ignore'
    #[arg(value_name = "ABS", allow_negative_numbers = true)]
    absolute: Option<String>,

    /// Relative tolerance: a real number, or '-' / 'ignore'
    #[arg(value_name = "REL", allow_negative_numbers = true)]
    relative: Option<String>,

    /// Blank-line insertion/omission is a format error
    #[arg(short = 'b', long)]
    blank_strict: bool,

    /// Token end-columns must agree (format error)
    #[arg(short = 'c', long)]
    column_strict: bool,

    /// Case differences are format errors
    #[arg(short = 'i', long)]
    case_format: bool,

    /// Case differences are incorrect output
    #[arg(short = 'I', long)]
    case_incorrect: bool,

    /// Decimal digit counts and exponents must agree
    #[arg(short = 'd', long)]
    decimal_strict: bool,

    /// Tolerance applies to every numeric pair
    #[arg(short = 'n', long)]
    number_tolerance: bool,

    /// Tolerance applies when the test token is a float
    #[arg(short = 'f', long)]
    float_tolerance: bool,

    /// Numbers are compared as exact text
    #[arg(short = 'e', long)]
    exact: bool,

    /// JSON policy file (command-line flags are added on top)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    log_level: Option<LevelFilter>,

    /// Log level for the lexer
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    log_lexer: Option<LevelFilter>,

    /// Log level for the equivalence policy
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    log_policy: Option<LevelFilter>,

    /// Log level for the comparison driver
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    log_driver: Option<LevelFilter>,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact")]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// 命令行上的比较选项
    fn policy_options(&self) -> PolicyOptions {
        PolicyOptions {
            blank_strict: self.blank_strict,
            column_strict: self.column_strict,
            case_format: self.case_format,
            case_incorrect: self.case_incorrect,
            decimal_strict: self.decimal_strict,
            number_tolerance: self.number_tolerance,
            float_tolerance: self.float_tolerance,
            exact: self.exact,
            absolute: self.absolute.as_deref().map(ToleranceArg::from),
            relative: self.relative.as_deref().map(ToleranceArg::from),
        }
    }

    /// 命令行级别优先于策略文件
    fn log_config(&self, file: &PolicyFile) -> LogConfig {
        let file_level = file
            .log_level
            .as_deref()
            .and_then(|s| parse_log_level(s).ok());
        LogConfig {
            global: self
                .log_level
                .or(file_level)
                .unwrap_or(LogConfig::default().global),
            lexer: self.log_lexer,
            policy: self.log_policy,
            driver: self.log_driver,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Read policy file
    let file = match &cli.config {
        Some(path) => read_policy_file(path).unwrap_or_else(|e| fail(&e, cli.json)),
        None => PolicyFile::default(),
    };

    let log_config = cli.log_config(&file);
    if let Err(e) = logging::init_with_file(&log_config, cli.log_format, cli.log_file.as_ref()) {
        eprintln!("Error: cannot initialise logging: {}", e);
        process::exit(1);
    }
    debug!(target: "outcheck::cli", ?cli, "Parsed arguments");

    // Build run configuration: file values first, flags on top
    let options = file.options.merge(cli.policy_options());
    let run_config = RunConfig::from_options(&options)
        .unwrap_or_else(|e| fail(&OutcheckError::from(e), cli.json));

    // Compare
    let report = compare_files(&cli.output, &cli.test, &run_config)
        .unwrap_or_else(|e| fail(&e, cli.json));
    info!(target: "outcheck::cli", verdict = %report.verdict, "Finished");

    if let Err(e) = platform::print_report(&report, cli.json) {
        eprintln!("Error: cannot serialise report: {}", e);
        process::exit(1);
    }
}

/// 打印错误并以状态 1 退出
fn fail(e: &OutcheckError, json: bool) -> ! {
    platform::print_error(e, json);
    process::exit(1);
}
