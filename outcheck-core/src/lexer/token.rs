//! Token 定义

use std::fmt;

/// Token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenKind {
    /// 行内尚未取过 token
    #[default]
    None,
    /// 连续的 ASCII 字母
    Word,
    /// 非字母、非数字、非空白字符序列
    Separator,
    Integer,
    Float,
    /// 行尾（零宽）
    EndOfLine,
}

impl TokenKind {
    /// 是否为数值 token
    pub fn is_numeric(&self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::Float)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::None => "nothing",
            TokenKind::Word => "word",
            TokenKind::Separator => "separator",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::EndOfLine => "end of line",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token 结构
///
/// `start..end` 是当前行内的字节区间；`column` 是最后一个字符所在的列
/// （1-based，制表符按 8 列展开）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize, column: usize) -> Self {
        Self {
            kind,
            start,
            end,
            column,
        }
    }

    /// 行尾 token
    pub fn end_of_line(offset: usize, column: usize) -> Self {
        Self::new(TokenKind::EndOfLine, offset, offset, column)
    }

    /// 字节长度
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_end_of_line(&self) -> bool {
        self.kind == TokenKind::EndOfLine
    }

    /// 从所在行取出 token 文本
    pub fn text<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        &line[self.start..self.end]
    }
}

/// 带文本的 token 视图，供等价判定使用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub kind: TokenKind,
    pub text: &'a [u8],
    pub column: usize,
}

impl<'a> Lexeme<'a> {
    pub fn new(kind: TokenKind, text: &'a [u8], column: usize) -> Self {
        Self { kind, text, column }
    }
}
