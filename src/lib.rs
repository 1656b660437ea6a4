//! Outcheck - Output checker for programming exercises
//!
//! Compares the output of a program with a reference answer, token by token,
//! under a configurable equivalence policy, and reports a verdict together
//! with a bounded set of proofs.
//!
//! # Architecture
//!
//! ```text
//! outcheck-config/  - Pure configuration types
//! outcheck-core/    - Lexer, policy, comparison driver (no file IO)
//! outcheck-api/     - Policy building, file orchestration, errors
//! outcheck-cli/     - `outcheck` binary
//! ```
//!
//! # Quick Start
//!
//! ```
//! use outcheck_workspace::{compare_readers, RunConfig, Verdict};
//!
//! let report = compare_readers("1 2 3\n".as_bytes(), "1 2 3\n".as_bytes(), &RunConfig::default())
//!     .unwrap();
//! assert_eq!(report.verdict, Verdict::CompletelyCorrect);
//! ```

// 重导出 API 层
pub use outcheck_api::*;
