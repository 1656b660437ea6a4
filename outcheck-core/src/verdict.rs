//! 评测结论

use std::fmt;

use serde::Serialize;

/// 一次比较的最终结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    CompletelyCorrect,
    FormatError,
    IncompleteOutput,
    IncorrectOutput,
    /// 保留：比较逻辑本身不会产出该结论
    EmptyOutput,
}

impl Verdict {
    /// 输出的结论行
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::CompletelyCorrect => "Completely Correct",
            Verdict::FormatError => "Format Error",
            Verdict::IncompleteOutput => "Incomplete Output",
            Verdict::IncorrectOutput => "Incorrect Output",
            Verdict::EmptyOutput => "Empty Output",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
