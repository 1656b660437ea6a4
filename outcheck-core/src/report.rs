//! 证据报告
//!
//! 每条证据（proof）由两行上下文、可选的两行 token 摘录和一行消息组成，
//! 每一行都不超过 `Limits::line_width` 个字符。证据按类别存入容量受限的
//! [`ErrorBuffer`]。

use outcheck_config::Limits;
use serde::Serialize;

use crate::source::{LineContext, StreamId};
use crate::verdict::Verdict;

const ELLIPSIS: &str = "...";

/// 证据类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Format,
    Incorrect,
}

/// 一条已格式化的证据
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub output_line: usize,
    pub test_line: usize,
    pub message: String,
    /// 按顺序排列的报告行
    pub lines: Vec<String>,
}

/// 一对分歧 token 的原始文本
#[derive(Debug, Clone, Copy)]
pub struct TokenPair<'a> {
    pub output: &'a [u8],
    pub test: &'a [u8],
}

/// 证据格式化器
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    limits: Limits,
}

impl Reporter {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// 生成一条证据
    pub fn record(
        &self,
        output: &LineContext,
        test: &LineContext,
        tokens: Option<TokenPair<'_>>,
        message: &str,
    ) -> ErrorRecord {
        let mut lines = vec![self.context_line(output), self.context_line(test)];
        if let Some(pair) = tokens {
            lines.push(self.excerpt_line(StreamId::Output, pair.output));
            lines.push(self.excerpt_line(StreamId::Test, pair.test));
        }
        lines.push(clip(message, self.limits.line_width));

        ErrorRecord {
            output_line: output.line_number,
            test_line: test.line_number,
            message: message.to_string(),
            lines,
        }
    }

    fn context_line(&self, context: &LineContext) -> String {
        let line = match &context.text {
            Some(text) => format!(
                "{:<6} line {:>5}: {}",
                context.stream.label(),
                context.line_number,
                shorten(&visible(text), self.limits.context_width)
            ),
            None => format!(
                "{:<6} line {:>5}: <end of file>",
                context.stream.label(),
                context.line_number + 1
            ),
        };
        clip(&line, self.limits.line_width)
    }

    fn excerpt_line(&self, stream: StreamId, text: &[u8]) -> String {
        let shown = if text.is_empty() {
            "<end of line>".to_string()
        } else {
            excerpt(
                &visible(&String::from_utf8_lossy(text)),
                self.limits.excerpt_width,
            )
        };
        clip(
            &format!("{:<6} token: {}", stream.label(), shown),
            self.limits.line_width,
        )
    }
}

/// 结论行加上证据块，证据块之间以空行分隔
pub fn render<'a>(verdict: Verdict, proofs: impl IntoIterator<Item = &'a ErrorRecord>) -> String {
    let mut out = String::from(verdict.as_str());
    out.push('\n');
    for record in proofs {
        out.push('\n');
        for line in &record.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// 控制字符显示为空格
fn visible(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// 超过 `width` 个字符时截断尾部并加省略号
pub fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// 超过 `width` 个字符时保留头尾，中间用省略号
pub fn excerpt(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let room = width.saturating_sub(ELLIPSIS.len());
    let head = room / 2;
    let tail = room - head;
    let mut out: String = text.chars().take(head).collect();
    out.push_str(ELLIPSIS);
    out.extend(text.chars().skip(count - tail));
    out
}

/// 报告行长度上限
pub fn clip(line: &str, width: usize) -> String {
    shorten(line, width)
}

/// 容量受限的证据缓冲区
#[derive(Debug, Clone)]
pub struct ErrorBuffer {
    category: Category,
    limit: usize,
    records: Vec<ErrorRecord>,
}

impl ErrorBuffer {
    pub fn new(category: Category, limit: usize) -> Self {
        Self {
            category,
            limit,
            records: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// 追加一条证据
    ///
    /// 缓冲区已满时丢弃；返回值表示这次追加是否恰好使缓冲区达到上限。
    pub fn push(&mut self, record: ErrorRecord) -> bool {
        if self.is_full() {
            return false;
        }
        self.records.push(record);
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.records
    }
}
