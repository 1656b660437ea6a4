//! Outcheck API - Comparison orchestration layer
//!
//! Provides the unified comparison interface, including:
//! - Policy building and validation (PolicyOptions -> RunConfig)
//! - Opening the output and test files for lazy line reads
//! - Unified error handling (OutcheckError)
//!
//! Library users call `compare_files` or `compare_readers` with an explicit
//! `RunConfig`; there is no global state.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

pub mod config;
pub use config::{PolicyOptions, RunConfig, ToleranceArg};

pub mod error;
pub mod types;
pub use error::{ConfigError, ErrorReport, OutcheckError, SourceError};
pub use types::RunReport;

// Re-export config and core types
pub use outcheck_config;
pub use outcheck_core::{
    CasePolicy, EquivalencePolicy, ErrorRecord, Limits, NumericTolerance, Phase, StreamId,
    Tolerance, ToleranceBounds, Verdict,
};

/// Compare two files with explicit configuration
///
/// Failure to open either file is reported before any line is compared.
pub fn compare_files(
    output: &Path,
    test: &Path,
    config: &RunConfig,
) -> Result<RunReport, OutcheckError> {
    info!(
        target: "outcheck::api",
        output = %output.display(),
        test = %test.display(),
        "Starting comparison"
    );

    let output_reader = open(StreamId::Output, output)?;
    let test_reader = open(StreamId::Test, test)?;

    let report = compare_readers(output_reader, test_reader, config)?.with_paths(output, test);
    info!(target: "outcheck::api", verdict = %report.verdict, "Comparison completed");
    Ok(report)
}

/// Compare two already opened streams
pub fn compare_readers<O: BufRead, T: BufRead>(
    output: O,
    test: T,
    config: &RunConfig,
) -> Result<RunReport, OutcheckError> {
    let outcome = outcheck_core::compare(output, test, config.policy, config.limits)?;
    Ok(RunReport::from(outcome))
}

/// Open one input file for buffered sequential reads
pub fn open(stream: StreamId, path: &Path) -> Result<BufReader<File>, OutcheckError> {
    debug!(target: "outcheck::api", %stream, path = %path.display(), "Opening input");
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| OutcheckError::Open {
            stream,
            path: path.to_path_buf(),
            source,
        })
}
