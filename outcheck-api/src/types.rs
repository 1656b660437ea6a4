//! API 类型定义
//!
//! 一次比较的输出类型。

use std::path::Path;

use outcheck_core::{render, ErrorRecord, Outcome, Verdict};
use serde::Serialize;

/// 比较输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// 输出文件路径（从读取器比较时为空）
    pub output_path: Option<String>,
    /// 标准答案文件路径
    pub test_path: Option<String>,
    pub verdict: Verdict,
    /// 错误证据
    pub incorrect: Vec<ErrorRecord>,
    /// 格式证据
    pub format: Vec<ErrorRecord>,
    pub output_lines: usize,
    pub test_lines: usize,
}

impl RunReport {
    pub fn from_outcome(outcome: Outcome) -> Self {
        Self {
            output_path: None,
            test_path: None,
            verdict: outcome.verdict,
            incorrect: outcome.incorrect,
            format: outcome.format,
            output_lines: outcome.output_lines,
            test_lines: outcome.test_lines,
        }
    }

    /// 记录输入文件路径
    pub fn with_paths(mut self, output: &Path, test: &Path) -> Self {
        self.output_path = Some(output.display().to_string());
        self.test_path = Some(test.display().to_string());
        self
    }

    /// 文本报告
    pub fn render_text(&self) -> String {
        render(self.verdict, self.proofs())
    }

    /// 按输出顺序排列的证据：先错误，后格式
    pub fn proofs(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.incorrect.iter().chain(self.format.iter())
    }
}

impl From<Outcome> for RunReport {
    fn from(outcome: Outcome) -> Self {
        Self::from_outcome(outcome)
    }
}
