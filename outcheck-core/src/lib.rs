//! Outcheck Core - Output comparison (pure logic, no file IO)
//!
//! Contains the line lexer, token equivalence policy, comparison driver
//! and proof reporting. Operates on any `BufRead` pair; opening files and
//! printing results are left to the API and CLI crates.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod driver;
pub mod error;
pub mod lexer;
pub mod policy;
pub mod report;
pub mod source;
pub mod verdict;

// Re-export common types
pub use driver::{compare, settle, Comparator, Exhaustion, Flow, Outcome};
pub use error::SourceError;
pub use lexer::{Lexeme, Lexer, Token, TokenKind};
pub use policy::{classify, Classification, Content, Equivalence, FormatReason, IncorrectReason};
pub use report::{render, Category, ErrorBuffer, ErrorRecord, Reporter};
pub use source::{LineContext, LineCursor, StreamId};
pub use verdict::Verdict;

// Re-export config types from outcheck-config
pub use outcheck_config::{
    CasePolicy, EquivalencePolicy, Limits, NumericTolerance, Phase, Tolerance, ToleranceBounds,
};
