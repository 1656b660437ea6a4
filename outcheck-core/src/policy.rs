//! 等价判定
//!
//! 对一对非行尾 token 给出判定：内容是否一致，以及附加的格式问题。
//! 行尾配对由比较驱动处理，不会进入这里。

use std::fmt;

use outcheck_config::{CasePolicy, EquivalencePolicy, NumericTolerance, ToleranceBounds};
use tracing::trace;

use crate::lexer::{scan_number, Lexeme, TokenKind};

/// 三值判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equivalence {
    Equal,
    FormatMismatch,
    IncorrectMismatch,
}

/// 内容错误的原因
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IncorrectReason {
    /// token 类型不同（数值与非数值，或单词与分隔符）
    KindDiffers { output: TokenKind, test: TokenKind },
    /// 同类型但文本不同
    TextDiffers(TokenKind),
    /// 仅大小写不同，且策略要求判错
    CaseDiffers,
    IntegersDiffer,
    /// 数值差超出容差（或无容差时不相等）
    NumbersDiffer { difference: f64 },
}

impl fmt::Display for IncorrectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncorrectReason::KindDiffers { output, test } => {
                write!(f, "expected {}, found {}", test, output)
            }
            IncorrectReason::TextDiffers(kind) => write!(f, "{}s differ", kind),
            IncorrectReason::CaseDiffers => write!(f, "words differ in case"),
            IncorrectReason::IntegersDiffer => write!(f, "integers differ"),
            IncorrectReason::NumbersDiffer { difference } => {
                write!(f, "numbers differ by {:.3e}", difference)
            }
        }
    }
}

/// 格式问题（内容可能仍然一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatReason {
    CaseDiffers,
    DecimalDigits { output: usize, test: usize },
    Exponent,
    Column { output: usize, test: usize },
}

impl fmt::Display for FormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatReason::CaseDiffers => write!(f, "words differ in case"),
            FormatReason::DecimalDigits { output, test } => {
                write!(f, "{} decimal digits, expected {}", output, test)
            }
            FormatReason::Exponent => write!(f, "exponent notation"),
            FormatReason::Column { output, test } => {
                write!(f, "token ends in column {}, expected {}", output, test)
            }
        }
    }
}

/// 内容判定
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Content {
    Equal,
    Incorrect(IncorrectReason),
}

/// 一对 token 的完整判定
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub content: Content,
    pub format: Vec<FormatReason>,
}

impl Classification {
    fn equal() -> Self {
        Self {
            content: Content::Equal,
            format: Vec::new(),
        }
    }

    fn incorrect(reason: IncorrectReason) -> Self {
        Self {
            content: Content::Incorrect(reason),
            format: Vec::new(),
        }
    }

    fn with_format(mut self, reason: FormatReason) -> Self {
        self.format.push(reason);
        self
    }

    /// 折叠为三值结果；内容错误优先
    pub fn equivalence(&self) -> Equivalence {
        match self.content {
            Content::Incorrect(_) => Equivalence::IncorrectMismatch,
            Content::Equal if self.format.is_empty() => Equivalence::Equal,
            Content::Equal => Equivalence::FormatMismatch,
        }
    }

    pub fn is_content_equal(&self) -> bool {
        self.content == Content::Equal
    }

    /// 格式问题合并为一条消息
    pub fn format_message(&self) -> Option<String> {
        if self.format.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.format.iter().map(|r| r.to_string()).collect();
        Some(parts.join("; "))
    }
}

/// 判定一对 token
pub fn classify(output: Lexeme<'_>, test: Lexeme<'_>, policy: &EquivalencePolicy) -> Classification {
    let mut result = if output.kind.is_numeric() && test.kind.is_numeric() {
        classify_numbers(output, test, policy)
    } else {
        classify_text(output, test, policy.case_policy)
    };

    if policy.column_strict && result.is_content_equal() && output.column != test.column {
        result = result.with_format(FormatReason::Column {
            output: output.column,
            test: test.column,
        });
    }

    trace!(
        target: "outcheck::policy",
        output_kind = %output.kind,
        test_kind = %test.kind,
        result = ?result.equivalence(),
        "Classified token pair"
    );
    result
}

fn classify_text(output: Lexeme<'_>, test: Lexeme<'_>, case_policy: CasePolicy) -> Classification {
    if output.kind != test.kind {
        return Classification::incorrect(IncorrectReason::KindDiffers {
            output: output.kind,
            test: test.kind,
        });
    }
    if output.text.len() != test.text.len() {
        return Classification::incorrect(IncorrectReason::TextDiffers(test.kind));
    }
    if output.text == test.text {
        return Classification::equal();
    }
    if test.kind == TokenKind::Word && output.text.eq_ignore_ascii_case(test.text) {
        return match case_policy {
            CasePolicy::Lenient => Classification::equal(),
            CasePolicy::FormatOnCaseDiff => {
                Classification::equal().with_format(FormatReason::CaseDiffers)
            }
            CasePolicy::IncorrectOnCaseDiff => {
                Classification::incorrect(IncorrectReason::CaseDiffers)
            }
        };
    }
    Classification::incorrect(IncorrectReason::TextDiffers(test.kind))
}

fn classify_numbers(
    output: Lexeme<'_>,
    test: Lexeme<'_>,
    policy: &EquivalencePolicy,
) -> Classification {
    // 文本相同的数值不受小数格式检查影响
    if output.text == test.text {
        return Classification::equal();
    }
    if policy.exact {
        return if output.kind != test.kind {
            Classification::incorrect(IncorrectReason::KindDiffers {
                output: output.kind,
                test: test.kind,
            })
        } else {
            Classification::incorrect(IncorrectReason::TextDiffers(test.kind))
        };
    }

    let both_integers = output.kind == TokenKind::Integer && test.kind == TokenKind::Integer;
    if both_integers && !policy.numeric_tolerance.is_active() {
        return if integers_equal(output.text, test.text) {
            Classification::equal()
        } else {
            Classification::incorrect(IncorrectReason::IntegersDiffer)
        };
    }

    let (Some(x), Some(y)) = (parse_number(output.text), parse_number(test.text)) else {
        return Classification::incorrect(IncorrectReason::TextDiffers(test.kind));
    };

    let bounds = match policy.numeric_tolerance {
        NumericTolerance::None => None,
        NumericTolerance::Number(bounds) => Some(bounds),
        NumericTolerance::Float(bounds) if test.kind == TokenKind::Float => Some(bounds),
        NumericTolerance::Float(_) => None,
    };

    let equal = match bounds {
        Some(bounds) if x.is_finite() && y.is_finite() => within_tolerance(x, y, bounds),
        // 无容差时要求位级相等：-0.0 与 0.0 不同
        _ => x.to_bits() == y.to_bits(),
    };

    let mut result = if equal {
        Classification::equal()
    } else {
        Classification::incorrect(IncorrectReason::NumbersDiffer {
            difference: (x - y).abs(),
        })
    };

    if policy.decimal_strict {
        let output_shape = scan_number(output.text);
        let test_shape = scan_number(test.text);
        if output_shape.fraction_digits != test_shape.fraction_digits {
            result = result.with_format(FormatReason::DecimalDigits {
                output: output_shape.fraction_digits,
                test: test_shape.fraction_digits,
            });
        }
        if output_shape.has_exponent || test_shape.has_exponent {
            result = result.with_format(FormatReason::Exponent);
        }
    }

    result
}

/// 整数比较：忽略前导 `+`、零值上的 `-` 和前导零
pub fn integers_equal(a: &[u8], b: &[u8]) -> bool {
    integer_parts(a) == integer_parts(b)
}

/// (是否为负, 去掉前导零后的数字)
fn integer_parts(text: &[u8]) -> (bool, &[u8]) {
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, text),
    };
    let zeros = digits.iter().take_while(|&&b| b == b'0').count();
    let magnitude = &digits[zeros..];
    (negative && !magnitude.is_empty(), magnitude)
}

/// 按 IEEE 双精度解析；超出范围的值解析为 ±∞
pub fn parse_number(text: &[u8]) -> Option<f64> {
    std::str::from_utf8(text).ok()?.parse::<f64>().ok()
}

/// 绝对差 ≤ A 或相对差 ≤ R 即视为相等
pub fn within_tolerance(x: f64, y: f64, bounds: ToleranceBounds) -> bool {
    let difference = (x - y).abs();
    if difference == 0.0 || bounds.absolute.admits(difference) {
        return true;
    }
    let scale = x.abs().max(y.abs());
    let relative = if scale == 0.0 { 0.0 } else { difference / scale };
    bounds.relative.admits(relative)
}
