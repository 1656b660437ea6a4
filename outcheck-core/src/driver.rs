//! 比较驱动
//!
//! 按行推进两个游标，在非空行对上逐对取 token 交给等价判定，把分歧写入
//! 两个证据缓冲区，直到某一侧结束或错误证据达到上限。
//!
//! 每一步返回 [`Flow`]，终止条件通过返回值一路向上传递，而不是在嵌套循环
//! 中提前跳出。

use std::io::BufRead;

use outcheck_config::{EquivalencePolicy, Limits};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::lexer::Stray;
use crate::policy::{classify, Content};
use crate::report::{self, Category, ErrorBuffer, ErrorRecord, Reporter, TokenPair};
use crate::source::{LineCursor, StreamId};
use crate::verdict::Verdict;

/// 单步结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate(Verdict),
}

/// 哪一侧已到达流末尾
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    Both,
    /// 只有输出结束，标准答案还有内容
    Output,
    /// 只有标准答案结束，输出还有内容
    Test,
}

/// 流结束时的结论
///
/// 只有输出提前结束时，格式证据被丢弃，不会升级为 Format Error。
pub fn settle(exhaustion: Exhaustion, incorrect: &ErrorBuffer, format: &ErrorBuffer) -> Verdict {
    match exhaustion {
        Exhaustion::Both if !incorrect.is_empty() => Verdict::IncorrectOutput,
        Exhaustion::Both if !format.is_empty() => Verdict::FormatError,
        Exhaustion::Both => Verdict::CompletelyCorrect,
        Exhaustion::Output if !incorrect.is_empty() => Verdict::IncorrectOutput,
        Exhaustion::Output => Verdict::IncompleteOutput,
        Exhaustion::Test => Verdict::IncorrectOutput,
    }
}

/// 行级分歧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineFinding {
    SuperfluousBlankLine,
    MissingBlankLine,
    ExtraLine,
    LineEndsEarly,
    ExtraTokens,
}

impl LineFinding {
    fn message(&self) -> &'static str {
        match self {
            LineFinding::SuperfluousBlankLine => "superfluous blank line in output",
            LineFinding::MissingBlankLine => "missing blank line in output",
            LineFinding::ExtraLine => "extra line at end of output",
            LineFinding::LineEndsEarly => "output line ends early",
            LineFinding::ExtraTokens => "output line has extra tokens",
        }
    }
}

/// 一次比较的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub verdict: Verdict,
    pub incorrect: Vec<ErrorRecord>,
    pub format: Vec<ErrorRecord>,
    /// 读到的输出行数
    pub output_lines: usize,
    /// 读到的标准答案行数
    pub test_lines: usize,
}

impl Outcome {
    /// 结论行加上证据块
    pub fn render(&self) -> String {
        report::render(self.verdict, self.incorrect.iter().chain(self.format.iter()))
    }

    pub fn proof_count(&self) -> usize {
        self.incorrect.len() + self.format.len()
    }
}

/// 比较器：独占两个游标和两个证据缓冲区，处理一对输入后即丢弃
pub struct Comparator<O, T> {
    policy: EquivalencePolicy,
    reporter: Reporter,
    output: LineCursor<O>,
    test: LineCursor<T>,
    format: ErrorBuffer,
    incorrect: ErrorBuffer,
}

impl<O: BufRead, T: BufRead> Comparator<O, T> {
    pub fn new(
        policy: EquivalencePolicy,
        limits: Limits,
        output: LineCursor<O>,
        test: LineCursor<T>,
    ) -> Self {
        Self {
            policy,
            reporter: Reporter::new(limits),
            output,
            test,
            format: ErrorBuffer::new(Category::Format, limits.proof_limit),
            incorrect: ErrorBuffer::new(Category::Incorrect, limits.proof_limit),
        }
    }

    /// 从两个读取器直接构造
    pub fn from_readers(policy: EquivalencePolicy, limits: Limits, output: O, test: T) -> Self {
        Self::new(
            policy,
            limits,
            LineCursor::new(StreamId::Output, output),
            LineCursor::new(StreamId::Test, test),
        )
    }

    /// 运行到终止状态
    pub fn run(mut self) -> Result<Outcome, SourceError> {
        debug!(target: "outcheck::driver", policy = ?self.policy, "Starting comparison");
        let verdict = loop {
            if let Flow::Terminate(verdict) = self.step()? {
                break verdict;
            }
        };
        info!(
            target: "outcheck::driver",
            %verdict,
            incorrect = self.incorrect.len(),
            format = self.format.len(),
            output_lines = self.output.line_number(),
            test_lines = self.test.line_number(),
            "Comparison finished"
        );
        Ok(self.into_outcome(verdict))
    }

    /// 处理一对行
    pub fn step(&mut self) -> Result<Flow, SourceError> {
        self.output.advance()?;
        self.test.advance()?;

        let output_blank = self.output.is_blank();
        let test_blank = self.test.is_blank();
        if output_blank && test_blank {
            return Ok(Flow::Continue);
        }
        if output_blank {
            if self.policy.blank_strict {
                self.record_line_format(LineFinding::SuperfluousBlankLine);
            }
            while self.output.is_blank() {
                self.output.advance()?;
            }
        } else if test_blank {
            if self.policy.blank_strict {
                self.record_line_format(LineFinding::MissingBlankLine);
            }
            while self.test.is_blank() {
                self.test.advance()?;
            }
        }

        let flow = match (self.output.is_eof(), self.test.is_eof()) {
            (true, true) => Flow::Terminate(settle(Exhaustion::Both, &self.incorrect, &self.format)),
            (true, false) => {
                Flow::Terminate(settle(Exhaustion::Output, &self.incorrect, &self.format))
            }
            (false, true) => {
                self.record_line_incorrect(LineFinding::ExtraLine);
                Flow::Terminate(settle(Exhaustion::Test, &self.incorrect, &self.format))
            }
            (false, false) => self.compare_line(),
        };
        Ok(flow)
    }

    /// 逐对比较当前两行的 token
    fn compare_line(&mut self) -> Flow {
        loop {
            let output_token = self.output.next_token();
            let test_token = self.test.next_token();
            self.record_strays();

            match (output_token.is_end_of_line(), test_token.is_end_of_line()) {
                (true, true) => return Flow::Continue,
                (true, false) => {
                    return self.token_incorrect(LineFinding::LineEndsEarly.message());
                }
                (false, true) => {
                    return self.token_incorrect(LineFinding::ExtraTokens.message());
                }
                (false, false) => {}
            }

            let result = classify(self.output.lexeme(), self.test.lexeme(), &self.policy);
            if let Some(message) = result.format_message() {
                self.token_format(&message);
            }
            if let Content::Incorrect(reason) = result.content {
                if let Flow::Terminate(verdict) = self.token_incorrect(&reason.to_string()) {
                    return Flow::Terminate(verdict);
                }
            }
        }
    }

    fn token_record(&self, message: &str) -> ErrorRecord {
        let output = self.output.lexeme();
        let test = self.test.lexeme();
        self.reporter.record(
            &self.output.context(),
            &self.test.context(),
            Some(TokenPair {
                output: output.text,
                test: test.text,
            }),
            message,
        )
    }

    fn line_record(&self, message: &str) -> ErrorRecord {
        self.reporter
            .record(&self.output.context(), &self.test.context(), None, message)
    }

    fn token_format(&mut self, message: &str) {
        debug!(target: "outcheck::driver", line = self.output.line_number(), message, "Format mismatch");
        let record = self.token_record(message);
        self.format.push(record);
    }

    /// 记录错误证据；达到上限时终止
    fn token_incorrect(&mut self, message: &str) -> Flow {
        debug!(target: "outcheck::driver", line = self.output.line_number(), message, "Incorrect mismatch");
        let record = self.token_record(message);
        self.push_incorrect(record)
    }

    fn record_line_format(&mut self, finding: LineFinding) {
        debug!(target: "outcheck::driver", ?finding, "Line format mismatch");
        let record = self.line_record(finding.message());
        self.format.push(record);
    }

    fn record_line_incorrect(&mut self, finding: LineFinding) {
        debug!(target: "outcheck::driver", ?finding, "Line mismatch");
        let record = self.line_record(finding.message());
        self.push_incorrect(record);
    }

    fn push_incorrect(&mut self, record: ErrorRecord) -> Flow {
        if self.incorrect.push(record) {
            debug!(target: "outcheck::driver", limit = self.incorrect.len(), "Proof limit reached");
            Flow::Terminate(Verdict::IncorrectOutput)
        } else {
            Flow::Continue
        }
    }

    fn record_strays(&mut self) {
        let strays: Vec<(StreamId, Stray)> = self
            .output
            .take_strays()
            .into_iter()
            .map(|s| (StreamId::Output, s))
            .chain(self.test.take_strays().into_iter().map(|s| (StreamId::Test, s)))
            .collect();
        for (stream, stray) in strays {
            let message = format!("{} in {} line, column {}", stray.kind.name(), stream, stray.column);
            let record = self.line_record(&message);
            self.format.push(record);
        }
    }

    fn into_outcome(self, verdict: Verdict) -> Outcome {
        let incorrect = self.incorrect.into_records();
        let format = match verdict {
            Verdict::FormatError | Verdict::IncorrectOutput => self.format.into_records(),
            _ => Vec::new(),
        };
        Outcome {
            verdict,
            incorrect,
            format,
            output_lines: self.output.line_number(),
            test_lines: self.test.line_number(),
        }
    }
}

/// 比较两个输入流
pub fn compare<O: BufRead, T: BufRead>(
    output: O,
    test: T,
    policy: EquivalencePolicy,
    limits: Limits,
) -> Result<Outcome, SourceError> {
    Comparator::from_readers(policy, limits, output, test).run()
}
