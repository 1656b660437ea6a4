//! 测试辅助工具
//!
//! 提供端到端比较测试的辅助函数

#![allow(dead_code)]

use outcheck_core::{
    compare, CasePolicy, EquivalencePolicy, Limits, NumericTolerance, Outcome, Tolerance,
    ToleranceBounds, Verdict,
};

/// 用给定策略比较两段文本
pub fn run(output: &str, test: &str, policy: EquivalencePolicy) -> Outcome {
    compare(output.as_bytes(), test.as_bytes(), policy, Limits::default())
        .expect("in-memory comparison cannot fail")
}

/// 默认策略下比较
pub fn run_default(output: &str, test: &str) -> Outcome {
    run(output, test, EquivalencePolicy::default())
}

/// 断言结论
pub fn assert_verdict(outcome: &Outcome, expected: Verdict) {
    assert_eq!(
        outcome.verdict,
        expected,
        "unexpected verdict, report:\n{}",
        outcome.render()
    );
}

/// 所有证据的消息
pub fn messages(outcome: &Outcome) -> Vec<String> {
    outcome
        .incorrect
        .iter()
        .chain(outcome.format.iter())
        .map(|r| r.message.clone())
        .collect()
}

pub fn case_policy(case_policy: CasePolicy) -> EquivalencePolicy {
    EquivalencePolicy {
        case_policy,
        ..Default::default()
    }
}

/// Number 模式容差；`None` 表示忽略
pub fn number_tolerance(absolute: Option<f64>, relative: Option<f64>) -> EquivalencePolicy {
    EquivalencePolicy {
        numeric_tolerance: NumericTolerance::Number(bounds(absolute, relative)),
        ..Default::default()
    }
}

/// Float 模式容差；`None` 表示忽略
pub fn float_tolerance(absolute: Option<f64>, relative: Option<f64>) -> EquivalencePolicy {
    EquivalencePolicy {
        numeric_tolerance: NumericTolerance::Float(bounds(absolute, relative)),
        ..Default::default()
    }
}

fn bounds(absolute: Option<f64>, relative: Option<f64>) -> ToleranceBounds {
    let tolerance = |v: Option<f64>| v.map_or(Tolerance::Ignored, Tolerance::Value);
    ToleranceBounds::new(tolerance(absolute), tolerance(relative))
}

/// 一组覆盖每个开关的合法策略
pub fn all_policies() -> Vec<EquivalencePolicy> {
    vec![
        EquivalencePolicy::default(),
        EquivalencePolicy {
            blank_strict: true,
            ..Default::default()
        },
        EquivalencePolicy {
            column_strict: true,
            ..Default::default()
        },
        case_policy(CasePolicy::FormatOnCaseDiff),
        case_policy(CasePolicy::IncorrectOnCaseDiff),
        EquivalencePolicy {
            decimal_strict: true,
            ..Default::default()
        },
        number_tolerance(Some(0.01), None),
        float_tolerance(None, Some(0.5)),
        EquivalencePolicy {
            exact: true,
            case_policy: CasePolicy::IncorrectOnCaseDiff,
            ..Default::default()
        },
        EquivalencePolicy {
            blank_strict: true,
            column_strict: true,
            decimal_strict: true,
            case_policy: CasePolicy::FormatOnCaseDiff,
            numeric_tolerance: NumericTolerance::Number(bounds(Some(1e-6), Some(1e-6))),
            exact: false,
        },
    ]
}
