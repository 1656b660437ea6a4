//! Outcheck 词法分析
//!
//! 把一行文本切分为单词、分隔符、整数、浮点数和行尾五类 token：
//! - 逐字节扫描，无回溯（数字状态机只在自身内部回退到最后接受位置）
//! - 列号按制表位展开，用于列严格模式
//! - `\f`、`\v` 视为空白，但会被记录下来作为格式问题

pub mod lexer;
pub mod number;
pub mod token;

pub use lexer::{is_space, Lexer, Stray, StrayKind, TAB_WIDTH};
pub use number::{scan_number, NumberScan, NumberState};
pub use token::{Lexeme, Token, TokenKind};
