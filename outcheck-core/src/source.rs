//! 行来源
//!
//! `LineCursor` 逐行读取一个输入流，保存当前行、行号、结束标志和空行标志，
//! 并通过内部的 [`Lexer`] 在当前行上逐个产出 token。游标只前进，不回退。

use std::fmt;
use std::io::BufRead;

use crate::error::SourceError;
use crate::lexer::{is_space, Lexeme, Lexer, Stray, Token};
use tracing::{debug, trace};

/// 比较的两个输入
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamId {
    /// 待评测程序的输出
    Output,
    /// 标准答案
    Test,
}

impl StreamId {
    /// 报告中使用的名称
    pub fn label(&self) -> &'static str {
        match self {
            StreamId::Output => "Output",
            StreamId::Test => "Test",
        }
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamId::Output => f.write_str("output"),
            StreamId::Test => f.write_str("test"),
        }
    }
}

/// 某一时刻游标所在行的快照，用于生成证据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext {
    pub stream: StreamId,
    pub line_number: usize,
    /// `None` 表示已到达流末尾
    pub text: Option<String>,
}

/// 单个输入流上的行游标
pub struct LineCursor<R> {
    stream: StreamId,
    reader: R,
    line: Vec<u8>,
    line_number: usize,
    eof: bool,
    blank: bool,
    lexer: Lexer,
    token: Token,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(stream: StreamId, reader: R) -> Self {
        Self {
            stream,
            reader,
            line: Vec::new(),
            line_number: 0,
            eof: false,
            blank: false,
            lexer: Lexer::new(),
            token: Token::default(),
        }
    }

    /// 读取下一行
    ///
    /// 流结束后再调用保持结束状态。行尾的 `\n` 被去掉，`\r` 保留给词法分析器跳过。
    pub fn advance(&mut self) -> Result<(), SourceError> {
        self.lexer.reset();
        self.token = Token::default();
        if self.eof {
            return Ok(());
        }

        self.line.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.line)
            .map_err(|source| SourceError {
                stream: self.stream,
                line: self.line_number + 1,
                source,
            })?;

        if read == 0 {
            self.eof = true;
            self.blank = false;
            debug!(target: "outcheck::source", stream = %self.stream, lines = self.line_number, "End of stream");
            return Ok(());
        }

        if self.line.last() == Some(&b'\n') {
            self.line.pop();
        }
        self.line_number += 1;
        self.blank = self.line.iter().all(|&b| is_space(b));
        trace!(
            target: "outcheck::source",
            stream = %self.stream,
            line = self.line_number,
            blank = self.blank,
            "Read line"
        );
        Ok(())
    }

    /// 在当前行上取下一个 token
    pub fn next_token(&mut self) -> Token {
        self.token = self.lexer.next_token(&self.line);
        self.token
    }

    /// 取出词法分析中遇到的 `\f` / `\v`
    pub fn take_strays(&mut self) -> Vec<Stray> {
        self.lexer.take_strays()
    }

    pub fn stream(&self) -> StreamId {
        self.stream
    }

    /// 当前行（不含换行符）
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// 当前行是否只包含空白（空行也算）；流结束后为 false
    pub fn is_blank(&self) -> bool {
        self.blank
    }

    pub fn token(&self) -> Token {
        self.token
    }

    /// 当前 token 及其文本
    pub fn lexeme(&self) -> Lexeme<'_> {
        Lexeme::new(
            self.token.kind,
            self.token.text(&self.line),
            self.token.column,
        )
    }

    /// 当前行的快照
    pub fn context(&self) -> LineContext {
        LineContext {
            stream: self.stream,
            line_number: self.line_number,
            text: if self.eof {
                None
            } else {
                Some(String::from_utf8_lossy(&self.line).into_owned())
            },
        }
    }
}
