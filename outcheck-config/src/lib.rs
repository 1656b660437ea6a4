//! Outcheck Config - Pure configuration data structures
//!
//! This crate contains only data structures, no validation or global state.
//! It serves as the shared configuration vocabulary across all Outcheck crates.
//! Conflicting combinations are rejected one layer up, in `outcheck-api`.

use serde::{Deserialize, Serialize};

/// How a case-only difference between two words is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePolicy {
    /// `Hello` and `hello` are equal
    #[default]
    Lenient,
    /// Equal content, but reported as a format error
    FormatOnCaseDiff,
    /// Reported as incorrect output
    IncorrectOnCaseDiff,
}

/// One tolerance threshold (absolute or relative)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tolerance {
    /// The threshold takes no part in the decision
    #[default]
    Ignored,
    /// Differences up to and including this value are accepted
    Value(f64),
}

impl Tolerance {
    /// Threshold value, if one is set
    pub fn value(&self) -> Option<f64> {
        match self {
            Tolerance::Ignored => None,
            Tolerance::Value(v) => Some(*v),
        }
    }

    /// Whether `difference` falls within this threshold
    ///
    /// An ignored threshold admits nothing.
    pub fn admits(&self, difference: f64) -> bool {
        match self {
            Tolerance::Ignored => false,
            Tolerance::Value(limit) => difference <= *limit,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Tolerance::Ignored)
    }
}

/// Absolute (A) and relative (R) closeness thresholds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToleranceBounds {
    pub absolute: Tolerance,
    pub relative: Tolerance,
}

impl ToleranceBounds {
    pub fn new(absolute: Tolerance, relative: Tolerance) -> Self {
        Self { absolute, relative }
    }
}

/// Which numeric pairs the tolerance applies to
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericTolerance {
    /// Numbers must agree exactly
    #[default]
    None,
    /// Tolerance applies to every numeric pair
    Number(ToleranceBounds),
    /// Tolerance applies only when the test token is a float
    Float(ToleranceBounds),
}

impl NumericTolerance {
    pub fn is_active(&self) -> bool {
        !matches!(self, NumericTolerance::None)
    }

    /// Thresholds of the selected mode
    pub fn bounds(&self) -> Option<ToleranceBounds> {
        match self {
            NumericTolerance::None => None,
            NumericTolerance::Number(b) | NumericTolerance::Float(b) => Some(*b),
        }
    }
}

/// Equivalence policy used to compare two token streams
///
/// Immutable once built. Field combinations are validated by
/// `outcheck_api::PolicyOptions::build`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EquivalencePolicy {
    /// Blank lines present on only one side are format errors
    pub blank_strict: bool,
    /// Token end-columns must agree
    pub column_strict: bool,
    /// Handling of case-only word differences
    pub case_policy: CasePolicy,
    /// Post-decimal digit counts must agree and exponents are not allowed
    pub decimal_strict: bool,
    /// Numeric closeness thresholds
    pub numeric_tolerance: NumericTolerance,
    /// Numbers are compared as exact text
    pub exact: bool,
}

/// Reporting limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Proofs kept per category; reaching it on the incorrect side ends the run
    pub proof_limit: usize,
    /// Characters of line text shown in a context line
    pub context_width: usize,
    /// Characters of a token shown in an excerpt line
    pub excerpt_width: usize,
    /// Upper bound on every formatted report line
    pub line_width: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            proof_limit: 5,
            context_width: 40,
            excerpt_width: 40,
            line_width: 80,
        }
    }
}

/// Comparison phase, used for phase-specific log targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lexer,
    Source,
    Policy,
    Driver,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Lexer => "lexer",
            Phase::Source => "source",
            Phase::Policy => "policy",
            Phase::Driver => "driver",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("outcheck::{}", self.as_str())
    }
}
