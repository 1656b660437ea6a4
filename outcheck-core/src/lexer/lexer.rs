//! 行内词法分析器
//!
//! 每次调用 [`Lexer::next_token`] 从当前行未消费的后缀中取出一个 token，
//! 同时维护按制表符展开的列号。

use super::number::scan_number;
use super::token::{Token, TokenKind};
use tracing::trace;

/// 制表位宽度
pub const TAB_WIDTH: usize = 8;

/// 被当作空白跳过、但需要作为格式问题上报的控制字符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrayKind {
    FormFeed,
    VerticalTab,
}

impl StrayKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrayKind::FormFeed => "form feed",
            StrayKind::VerticalTab => "vertical tab",
        }
    }
}

/// 一次控制字符出现
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stray {
    pub kind: StrayKind,
    /// 字符所在列（1-based）
    pub column: usize,
}

/// 是否为空白字节（含 `\r`、`\f`、`\v`）
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// 行内词法分析器
///
/// 不持有行内容，只保存游标；行由 `LineCursor` 持有并在每次调用时传入。
#[derive(Debug, Default)]
pub struct Lexer {
    offset: usize,
    column: usize,
    strays: Vec<Stray>,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 换行时重置游标
    pub fn reset(&mut self) {
        self.offset = 0;
        self.column = 0;
        self.strays.clear();
    }

    /// 取出自上次调用以来遇到的控制字符
    pub fn take_strays(&mut self) -> Vec<Stray> {
        std::mem::take(&mut self.strays)
    }

    /// 扫描下一个 token
    ///
    /// 到达行尾后会一直返回 `EndOfLine`。
    pub fn next_token(&mut self, line: &[u8]) -> Token {
        self.skip_whitespace(line);

        let start = self.offset;
        let rest = &line[start..];
        let Some(&first) = rest.first() else {
            return Token::end_of_line(start, self.column);
        };

        let (kind, len) = if first.is_ascii_alphabetic() {
            let len = rest
                .iter()
                .take_while(|b| b.is_ascii_alphabetic())
                .count();
            (TokenKind::Word, len)
        } else {
            match separator_len(rest) {
                0 => {
                    let number = scan_number(rest);
                    if number.is_match() {
                        (number.kind, number.len)
                    } else {
                        // 文法外的单字节，按分隔符处理以保证前进
                        (TokenKind::Separator, 1)
                    }
                }
                len => (TokenKind::Separator, len),
            }
        };

        self.offset += len;
        self.column += len;
        let token = Token::new(kind, start, self.offset, self.column);
        trace!(
            target: "outcheck::lexer",
            kind = %token.kind,
            start = token.start,
            end = token.end,
            column = token.column,
            "Scanned token"
        );
        token
    }

    fn skip_whitespace(&mut self, line: &[u8]) {
        while let Some(&byte) = line.get(self.offset) {
            match byte {
                b' ' | b'\n' => self.column += 1,
                b'\t' => self.column = (self.column / TAB_WIDTH + 1) * TAB_WIDTH,
                b'\r' => {}
                0x0b | 0x0c => {
                    self.column += 1;
                    let kind = if byte == 0x0c {
                        StrayKind::FormFeed
                    } else {
                        StrayKind::VerticalTab
                    };
                    trace!(target: "outcheck::lexer", kind = kind.name(), column = self.column, "Stray control character");
                    self.strays.push(Stray {
                        kind,
                        column: self.column,
                    });
                }
                _ => break,
            }
            self.offset += 1;
        }
    }
}

/// 分隔符长度
///
/// 贪婪读取非字母、非数字、非空白字符；若紧随其后的是数字且最后一个字符是
/// `.`、`+` 或 `-`，则把该字符让给数字。
fn separator_len(rest: &[u8]) -> usize {
    let mut len = rest
        .iter()
        .take_while(|&&b| !b.is_ascii_digit() && !b.is_ascii_alphabetic() && !is_space(b))
        .count();
    let followed_by_digit = rest.get(len).is_some_and(|b| b.is_ascii_digit());
    if len > 0 && followed_by_digit && matches!(rest[len - 1], b'.' | b'+' | b'-') {
        len -= 1;
    }
    len
}
