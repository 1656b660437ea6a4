//! 数字状态机
//!
//! 文法：`[+-]? ( '.' digits | digits ( '.' digits )? ) ( [eE] [+-]? digits )?`
//!
//! 按最长匹配运行：记录最后一次处于接受状态时的长度，停机后回退到该位置。
//! 因此悬空的指数标记（`1e`、`1e+`）与不带小数位的点（`1.`）不会被消费，
//! 留给下一个 token。

use super::token::TokenKind;

/// 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberState {
    Start,
    /// 读到符号
    Sign,
    /// 读到前导小数点（尚无数字）
    LeadingDot,
    /// 整数部分（接受）
    Integer,
    /// 整数部分后的小数点（尚无小数位）
    Dot,
    /// 小数部分（接受）
    Fraction,
    /// `e` / `E`
    ExponentMarker,
    ExponentSign,
    /// 指数数字（接受）
    Exponent,
}

impl NumberState {
    /// 转移函数；`None` 表示停机
    pub fn next(self, byte: u8) -> Option<NumberState> {
        use NumberState::*;
        let digit = byte.is_ascii_digit();
        match (self, byte) {
            (Start, b'+' | b'-') => Some(Sign),
            (Start | Sign, b'.') => Some(LeadingDot),
            (Start | Sign | Integer, _) if digit => Some(Integer),
            (LeadingDot | Dot | Fraction, _) if digit => Some(Fraction),
            (Integer, b'.') => Some(Dot),
            (Integer | Fraction, b'e' | b'E') => Some(ExponentMarker),
            (ExponentMarker, b'+' | b'-') => Some(ExponentSign),
            (ExponentMarker | ExponentSign | Exponent, _) if digit => Some(Exponent),
            _ => None,
        }
    }

    pub fn is_accepting(self) -> bool {
        matches!(
            self,
            NumberState::Integer | NumberState::Fraction | NumberState::Exponent
        )
    }
}

/// 一次数字扫描的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberScan {
    /// 消费的字节数；0 表示输入开头不是合法数字
    pub len: usize,
    /// Integer 或 Float
    pub kind: TokenKind,
    /// 小数点后的数字个数
    pub fraction_digits: usize,
    /// 是否带指数
    pub has_exponent: bool,
}

impl NumberScan {
    fn rejected() -> Self {
        Self {
            len: 0,
            kind: TokenKind::Integer,
            fraction_digits: 0,
            has_exponent: false,
        }
    }

    pub fn is_match(&self) -> bool {
        self.len > 0
    }
}

/// 从 `input` 开头扫描最长的合法数字
pub fn scan_number(input: &[u8]) -> NumberScan {
    let mut state = NumberState::Start;
    let mut fraction_digits = 0;
    let mut accepted = NumberScan::rejected();

    for (index, &byte) in input.iter().enumerate() {
        state = match state.next(byte) {
            Some(next) => next,
            None => break,
        };
        if state == NumberState::Fraction {
            fraction_digits += 1;
        }
        if state.is_accepting() {
            let has_exponent = state == NumberState::Exponent;
            accepted = NumberScan {
                len: index + 1,
                kind: if has_exponent || fraction_digits > 0 {
                    TokenKind::Float
                } else {
                    TokenKind::Integer
                },
                fraction_digits,
                has_exponent,
            };
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> NumberScan {
        scan_number(input.as_bytes())
    }

    #[test]
    fn test_plain_integer() {
        let result = scan("12345 rest");
        assert_eq!(result.len, 5);
        assert_eq!(result.kind, TokenKind::Integer);
        assert_eq!(result.fraction_digits, 0);
        assert!(!result.has_exponent);
    }

    #[test]
    fn test_signed_integer() {
        assert_eq!(scan("-42").len, 3);
        assert_eq!(scan("+0").len, 2);
        assert_eq!(scan("-42").kind, TokenKind::Integer);
    }

    #[test]
    fn test_float_with_fraction() {
        let result = scan("3.1415,");
        assert_eq!(result.len, 6);
        assert_eq!(result.kind, TokenKind::Float);
        assert_eq!(result.fraction_digits, 4);
    }

    #[test]
    fn test_leading_dot() {
        let result = scan(".25");
        assert_eq!(result.len, 3);
        assert_eq!(result.kind, TokenKind::Float);
        assert_eq!(result.fraction_digits, 2);

        let signed = scan("-.5");
        assert_eq!(signed.len, 3);
        assert_eq!(signed.kind, TokenKind::Float);
    }

    #[test]
    fn test_no_second_dot_after_leading_dot() {
        let result = scan(".5.5");
        assert_eq!(result.len, 2);
    }

    #[test]
    fn test_trailing_dot_is_left_unconsumed() {
        let result = scan("7.");
        assert_eq!(result.len, 1);
        assert_eq!(result.kind, TokenKind::Integer);
    }

    #[test]
    fn test_exponent() {
        let result = scan("1.5e-3x");
        assert_eq!(result.len, 6);
        assert_eq!(result.kind, TokenKind::Float);
        assert_eq!(result.fraction_digits, 1);
        assert!(result.has_exponent);

        let plain = scan("2E10");
        assert_eq!(plain.len, 4);
        assert_eq!(plain.kind, TokenKind::Float);
        assert_eq!(plain.fraction_digits, 0);
    }

    #[test]
    fn test_dangling_exponent_degrades() {
        let bare = scan("5e");
        assert_eq!(bare.len, 1);
        assert_eq!(bare.kind, TokenKind::Integer);
        assert!(!bare.has_exponent);

        let signed = scan("5.0E+");
        assert_eq!(signed.len, 3);
        assert_eq!(signed.kind, TokenKind::Float);
        assert!(!signed.has_exponent);
    }

    #[test]
    fn test_sign_only_is_rejected() {
        assert!(!scan("-").is_match());
        assert!(!scan("+x").is_match());
        assert!(!scan(".").is_match());
        assert!(!scan("").is_match());
    }

    #[test]
    fn test_transitions() {
        assert_eq!(NumberState::Start.next(b'-'), Some(NumberState::Sign));
        assert_eq!(NumberState::Sign.next(b'-'), None);
        assert_eq!(NumberState::Integer.next(b'.'), Some(NumberState::Dot));
        assert_eq!(NumberState::Fraction.next(b'.'), None);
        assert!(!NumberState::Dot.is_accepting());
        assert!(NumberState::Exponent.is_accepting());
    }
}
