//! 端到端比较测试
//!
//! 覆盖结论状态机、容差、大小写、空行以及证据上限。

mod common;

use common::*;
use outcheck_core::{compare, CasePolicy, EquivalencePolicy, Limits, Verdict};

const SAMPLE: &str = "Hello World 42\n\n1.50 -3e2 .5\nx,y:=7\n\tTabbed 0.001\r\nlast line without newline";

// ==================== 结论 ====================

#[test]
fn test_identical_streams_are_correct_under_every_policy() {
    for policy in all_policies() {
        let outcome = run(SAMPLE, SAMPLE, policy);
        assert_verdict(&outcome, Verdict::CompletelyCorrect);
        assert_eq!(outcome.proof_count(), 0, "policy {:?}", policy);
    }
}

#[test]
fn test_both_empty_is_correct() {
    assert_verdict(&run_default("", ""), Verdict::CompletelyCorrect);
    assert_verdict(&run_default("\n\n", ""), Verdict::CompletelyCorrect);
}

#[test]
fn test_prefix_is_incomplete() {
    let outcome = run_default("1 2\n3 4\n", "1 2\n3 4\n5 6\n");
    assert_verdict(&outcome, Verdict::IncompleteOutput);
    assert_eq!(outcome.proof_count(), 0);

    let outcome = run_default("", "answer\n");
    assert_verdict(&outcome, Verdict::IncompleteOutput);
}

#[test]
fn test_prefix_with_blank_lines_is_incomplete() {
    let outcome = run_default("1 2\n\n", "1 2\n\n5\n");
    assert_verdict(&outcome, Verdict::IncompleteOutput);
}

#[test]
fn test_incorrect_prefix_is_incorrect() {
    let outcome = run_default("1 9\n", "1 2\n3 4\n");
    assert_verdict(&outcome, Verdict::IncorrectOutput);
    assert_eq!(outcome.incorrect.len(), 1);
}

#[test]
fn test_extra_line_is_incorrect() {
    let outcome = run_default("1\n2\n3\n", "1\n");
    assert_verdict(&outcome, Verdict::IncorrectOutput);
    assert_eq!(messages(&outcome), vec!["extra line at end of output"]);
    // 标准答案结束后不再读取输出
    assert_eq!(outcome.output_lines, 2);
}

#[test]
fn test_extra_line_proof_cites_end_of_file() {
    let outcome = run_default("1\n2\n", "1\n");
    let record = &outcome.incorrect[0];
    assert_eq!(record.lines[0], "Output line     2: 2");
    assert_eq!(record.lines[1], "Test   line     2: <end of file>");
    assert_eq!(record.lines[2], "extra line at end of output");
}

#[test]
fn test_format_proofs_discarded_when_output_ends_early() {
    let policy = case_policy(CasePolicy::FormatOnCaseDiff);
    let outcome = run("Hello\n", "hello\nworld\n", policy);
    assert_verdict(&outcome, Verdict::IncompleteOutput);
    assert!(outcome.format.is_empty());
    assert!(outcome.incorrect.is_empty());
}

#[test]
fn test_format_proofs_kept_with_incorrect_output() {
    let policy = case_policy(CasePolicy::FormatOnCaseDiff);
    let outcome = run("Hello 1\n", "hello 2\n", policy);
    assert_verdict(&outcome, Verdict::IncorrectOutput);
    assert_eq!(outcome.incorrect.len(), 1);
    assert_eq!(outcome.format.len(), 1);
}

// ==================== 整数与浮点数 ====================

#[test]
fn test_integer_formatting_is_ignored() {
    assert_verdict(
        &run_default("007 +0 0003\n", "7 -0 3\n"),
        Verdict::CompletelyCorrect,
    );
}

#[test]
fn test_integer_sign_matters() {
    let outcome = run_default("-3\n", "+3\n");
    assert_verdict(&outcome, Verdict::IncorrectOutput);
    assert_eq!(messages(&outcome), vec!["integers differ"]);
}

#[test]
fn test_absolute_tolerance() {
    let policy = number_tolerance(Some(0.01), None);
    assert_verdict(&run("1.00\n", "1.009\n", policy), Verdict::CompletelyCorrect);
    assert_verdict(&run("1.00\n", "1.02\n", policy), Verdict::IncorrectOutput);
}

#[test]
fn test_relative_tolerance_with_zero() {
    let policy = number_tolerance(None, Some(0.5));
    assert_verdict(&run("0\n", "0.0\n", policy), Verdict::CompletelyCorrect);
    assert_verdict(&run("10\n", "14\n", policy), Verdict::CompletelyCorrect);
    assert_verdict(&run("1\n", "3\n", policy), Verdict::IncorrectOutput);
}

#[test]
fn test_infinity_is_never_within_tolerance() {
    let policy = number_tolerance(Some(1e300), Some(1e300));
    assert_verdict(&run("1e999\n", "5\n", policy), Verdict::IncorrectOutput);
    assert_verdict(&run("5\n", "1e999\n", policy), Verdict::IncorrectOutput);
}

#[test]
fn test_float_tolerance_needs_float_in_test() {
    let policy = float_tolerance(Some(0.5), None);
    assert_verdict(&run("1.2\n", "1.0\n", policy), Verdict::CompletelyCorrect);
    assert_verdict(&run("1.2\n", "1\n", policy), Verdict::IncorrectOutput);
    assert_verdict(&run("2\n", "1\n", policy), Verdict::IncorrectOutput);
}

#[test]
fn test_numbers_compare_by_value_without_tolerance() {
    assert_verdict(&run_default("1\n", "1.0\n"), Verdict::CompletelyCorrect);
    assert_verdict(&run_default("0.5\n", ".5\n"), Verdict::CompletelyCorrect);
    assert_verdict(&run_default("0.1\n", "0.10001\n"), Verdict::IncorrectOutput);
}

#[test]
fn test_exact_mode_compares_number_text() {
    let policy = EquivalencePolicy {
        exact: true,
        ..Default::default()
    };
    assert_verdict(&run("1.0\n", "1\n", policy), Verdict::IncorrectOutput);
    assert_verdict(&run("007\n", "7\n", policy), Verdict::IncorrectOutput);
    assert_verdict(&run("7\n", "7\n", policy), Verdict::CompletelyCorrect);
}

#[test]
fn test_decimal_strict_flags_format() {
    let policy = EquivalencePolicy {
        decimal_strict: true,
        ..Default::default()
    };
    let outcome = run("1.50\n", "1.5\n", policy);
    assert_verdict(&outcome, Verdict::FormatError);
    assert_eq!(messages(&outcome), vec!["2 decimal digits, expected 1"]);
}

// ==================== 单词与大小写 ====================

#[test]
fn test_case_policies() {
    assert_verdict(&run_default("Hello\n", "hello\n"), Verdict::CompletelyCorrect);

    let outcome = run(
        "Hello\n",
        "hello\n",
        case_policy(CasePolicy::IncorrectOnCaseDiff),
    );
    assert_verdict(&outcome, Verdict::IncorrectOutput);

    let outcome = run("Hello\n", "hello\n", case_policy(CasePolicy::FormatOnCaseDiff));
    assert_verdict(&outcome, Verdict::FormatError);
    assert_eq!(messages(&outcome), vec!["words differ in case"]);
}

#[test]
fn test_different_words_are_incorrect() {
    let outcome = run_default("yes\n", "no\n");
    assert_verdict(&outcome, Verdict::IncorrectOutput);
}

#[test]
fn test_word_against_number_is_incorrect() {
    let outcome = run_default("seven\n", "7\n");
    assert_verdict(&outcome, Verdict::IncorrectOutput);
    assert_eq!(messages(&outcome), vec!["expected integer, found word"]);
}

// ==================== 行尾与空白 ====================

#[test]
fn test_output_line_ends_early() {
    let outcome = run_default("1 2\n", "1 2 3\n");
    assert_verdict(&outcome, Verdict::IncorrectOutput);
    assert_eq!(messages(&outcome), vec!["output line ends early"]);
    assert_eq!(outcome.incorrect[0].lines[2], "Output token: <end of line>");
    assert_eq!(outcome.incorrect[0].lines[3], "Test   token: 3");
}

#[test]
fn test_output_line_has_extra_tokens() {
    let outcome = run_default("1 2 3\n", "1 2\n");
    assert_verdict(&outcome, Verdict::IncorrectOutput);
    assert_eq!(messages(&outcome), vec!["output line has extra tokens"]);
}

#[test]
fn test_whitespace_layout_is_free_by_default() {
    let outcome = run_default("  1\t2   3  \r\n", "1 2 3\n");
    assert_verdict(&outcome, Verdict::CompletelyCorrect);
}

#[test]
fn test_column_strict() {
    let policy = EquivalencePolicy {
        column_strict: true,
        ..Default::default()
    };
    let outcome = run("1  2\n", "1 2\n", policy);
    assert_verdict(&outcome, Verdict::FormatError);
    assert_eq!(messages(&outcome), vec!["token ends in column 4, expected 3"]);

    assert_verdict(&run_default("1  2\n", "1 2\n"), Verdict::CompletelyCorrect);
}

#[test]
fn test_crlf_and_missing_final_newline() {
    let policy = EquivalencePolicy {
        column_strict: true,
        ..Default::default()
    };
    assert_verdict(&run("1 2\r\n3", "1 2\n3\n", policy), Verdict::CompletelyCorrect);
}

#[test]
fn test_form_feed_is_format_error() {
    let outcome = run_default("a\x0cb\n", "a b\n");
    assert_verdict(&outcome, Verdict::FormatError);
    assert_eq!(messages(&outcome), vec!["form feed in output line, column 2"]);
}

#[test]
fn test_vertical_tab_is_format_error() {
    let outcome = run_default("a\x0bb\n", "a b\n");
    assert_verdict(&outcome, Verdict::FormatError);
    assert_eq!(messages(&outcome), vec!["vertical tab in output line, column 2"]);
}

// ==================== 空行 ====================

#[test]
fn test_blank_lines_are_free_by_default() {
    assert_verdict(&run_default("a\n\n\nb\n", "a\nb\n"), Verdict::CompletelyCorrect);
    assert_verdict(&run_default("a\nb\n", "a\n\nb\n\n"), Verdict::CompletelyCorrect);
}

#[test]
fn test_blank_strict_superfluous_line() {
    let policy = EquivalencePolicy {
        blank_strict: true,
        ..Default::default()
    };
    let outcome = run("a\n\n\n\nb\n", "a\nb\n", policy);
    assert_verdict(&outcome, Verdict::FormatError);
    assert_eq!(messages(&outcome), vec!["superfluous blank line in output"]);
}

#[test]
fn test_blank_strict_trailing_blank_after_test_ends() {
    let policy = EquivalencePolicy {
        blank_strict: true,
        ..Default::default()
    };
    let outcome = run("a\n\n", "a\n", policy);
    assert_verdict(&outcome, Verdict::FormatError);
    assert_eq!(messages(&outcome), vec!["superfluous blank line in output"]);
    assert_verdict(&run_default("a\n\n", "a\n"), Verdict::CompletelyCorrect);
}

#[test]
fn test_blank_strict_missing_line() {
    let policy = EquivalencePolicy {
        blank_strict: true,
        ..Default::default()
    };
    let outcome = run("a\nb\n", "a\n \nb\n", policy);
    assert_verdict(&outcome, Verdict::FormatError);
    assert_eq!(messages(&outcome), vec!["missing blank line in output"]);
}

// ==================== 证据上限 ====================

#[test]
fn test_proof_limit_halts_comparison() {
    let output: String = (1..=10).map(|i| format!("{}\n", i)).collect();
    let test: String = (1..=10).map(|i| format!("{}\n", i + 100)).collect();
    let outcome = run_default(&output, &test);
    assert_verdict(&outcome, Verdict::IncorrectOutput);
    assert_eq!(outcome.incorrect.len(), 5);
    assert_eq!(outcome.output_lines, 5);
    assert_eq!(outcome.test_lines, 5);
}

#[test]
fn test_proof_limit_within_one_line() {
    let outcome = run_default("1 2 3 4 5 6 7 8 9 10\n", "0 0 0 0 0 0 0 0 0 0\n");
    assert_verdict(&outcome, Verdict::IncorrectOutput);
    assert_eq!(outcome.incorrect.len(), 5);
}

#[test]
fn test_format_buffer_caps_silently() {
    let policy = case_policy(CasePolicy::FormatOnCaseDiff);
    let output = "A B C D E F G H\n";
    let test = "a b c d e f g h\n";
    let outcome = run(output, test, policy);
    assert_verdict(&outcome, Verdict::FormatError);
    assert_eq!(outcome.format.len(), 5);
}

#[test]
fn test_custom_proof_limit() {
    let limits = Limits {
        proof_limit: 2,
        ..Default::default()
    };
    let outcome = compare(
        "1 2 3\n".as_bytes(),
        "4 5 6\n".as_bytes(),
        EquivalencePolicy::default(),
        limits,
    )
    .unwrap();
    assert_eq!(outcome.incorrect.len(), 2);
}

// ==================== 读取错误 ====================

#[test]
fn test_read_error_is_propagated() {
    struct Failing;
    impl std::io::Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device error"))
        }
    }

    let result = compare(
        "1\n".as_bytes(),
        std::io::BufReader::new(Failing),
        EquivalencePolicy::default(),
        Limits::default(),
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("cannot read test line 1"));
}
