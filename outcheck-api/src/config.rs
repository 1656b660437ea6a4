//! API 层配置
//!
//! 包含比较配置 RunConfig，以及从原始选项构建并校验 `EquivalencePolicy`
//! 的 `PolicyOptions`。冲突的选项组合在这里被拒绝，比较本身不再检查。

use outcheck_config::{
    CasePolicy, EquivalencePolicy, Limits, NumericTolerance, Tolerance, ToleranceBounds,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// 表示“忽略该容差”的写法
const IGNORED: [&str; 2] = ["-", "ignore"];

/// 原始容差值：数字，或命令行/策略文件中的字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToleranceArg {
    Number(f64),
    Text(String),
}

impl From<&str> for ToleranceArg {
    fn from(text: &str) -> Self {
        ToleranceArg::Text(text.to_string())
    }
}

impl From<f64> for ToleranceArg {
    fn from(value: f64) -> Self {
        ToleranceArg::Number(value)
    }
}

impl ToleranceArg {
    /// 解析为容差；`-` 和 `ignore` 表示忽略
    pub fn parse(&self) -> Result<Tolerance, ConfigError> {
        let value = match self {
            ToleranceArg::Number(value) => *value,
            ToleranceArg::Text(text) => {
                let text = text.trim();
                if IGNORED.iter().any(|s| text.eq_ignore_ascii_case(s)) {
                    return Ok(Tolerance::Ignored);
                }
                text.parse::<f64>()
                    .map_err(|_| ConfigError::InvalidTolerance(text.to_string()))?
            }
        };
        if !value.is_finite() {
            return Err(ConfigError::InvalidTolerance(value.to_string()));
        }
        if value < 0.0 {
            return Err(ConfigError::NegativeTolerance(value));
        }
        Ok(Tolerance::Value(value))
    }
}

/// 原始比较选项
///
/// 与命令行开关一一对应，也可以从 JSON 策略文件反序列化。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyOptions {
    pub blank_strict: bool,
    pub column_strict: bool,
    /// 大小写不同记为格式错误
    pub case_format: bool,
    /// 大小写不同记为错误
    pub case_incorrect: bool,
    pub decimal_strict: bool,
    /// 容差作用于所有数值对
    pub number_tolerance: bool,
    /// 容差仅作用于标准答案为浮点数的数值对
    pub float_tolerance: bool,
    pub exact: bool,
    pub absolute: Option<ToleranceArg>,
    pub relative: Option<ToleranceArg>,
}

impl PolicyOptions {
    /// 在文件中的选项之上叠加另一组选项
    ///
    /// 开关取或；容差值以 `other` 中给出的为准。
    pub fn merge(mut self, other: PolicyOptions) -> Self {
        self.blank_strict |= other.blank_strict;
        self.column_strict |= other.column_strict;
        self.case_format |= other.case_format;
        self.case_incorrect |= other.case_incorrect;
        self.decimal_strict |= other.decimal_strict;
        self.number_tolerance |= other.number_tolerance;
        self.float_tolerance |= other.float_tolerance;
        self.exact |= other.exact;
        if other.absolute.is_some() {
            self.absolute = other.absolute;
        }
        if other.relative.is_some() {
            self.relative = other.relative;
        }
        self
    }

    /// 校验并构建比较策略
    pub fn build(&self) -> Result<EquivalencePolicy, ConfigError> {
        if self.case_format && self.case_incorrect {
            return Err(ConfigError::ConflictingCasePolicies);
        }
        if self.number_tolerance && self.float_tolerance {
            return Err(ConfigError::ConflictingToleranceModes);
        }
        if self.exact {
            if self.decimal_strict {
                return Err(ConfigError::ExactConflict("decimal-strict"));
            }
            if self.number_tolerance || self.float_tolerance {
                return Err(ConfigError::ExactConflict("a tolerance mode"));
            }
            if self.case_format {
                return Err(ConfigError::ExactConflict("case-format"));
            }
        }

        let case_policy = if self.case_format {
            CasePolicy::FormatOnCaseDiff
        } else if self.case_incorrect {
            CasePolicy::IncorrectOnCaseDiff
        } else {
            CasePolicy::Lenient
        };

        let policy = EquivalencePolicy {
            blank_strict: self.blank_strict,
            column_strict: self.column_strict,
            case_policy,
            decimal_strict: self.decimal_strict,
            numeric_tolerance: self.numeric_tolerance()?,
            exact: self.exact,
        };
        debug!(target: "outcheck::api", ?policy, "Built equivalence policy");
        Ok(policy)
    }

    fn numeric_tolerance(&self) -> Result<NumericTolerance, ConfigError> {
        let mode_selected = self.number_tolerance || self.float_tolerance;
        if !mode_selected {
            if self.absolute.is_some() || self.relative.is_some() {
                return Err(ConfigError::ToleranceWithoutMode);
            }
            return Ok(NumericTolerance::None);
        }

        if self.absolute.is_none() && self.relative.is_none() {
            return Err(ConfigError::MissingTolerance);
        }
        let parse = |arg: &Option<ToleranceArg>| {
            arg.as_ref()
                .map_or(Ok(Tolerance::Ignored), ToleranceArg::parse)
        };
        let bounds = ToleranceBounds::new(parse(&self.absolute)?, parse(&self.relative)?);
        if bounds.absolute.is_ignored() && bounds.relative.is_ignored() {
            return Err(ConfigError::BothToleranceIgnored);
        }

        Ok(if self.number_tolerance {
            NumericTolerance::Number(bounds)
        } else {
            NumericTolerance::Float(bounds)
        })
    }
}

/// Comparison configuration
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunConfig {
    /// Validated equivalence policy
    pub policy: EquivalencePolicy,
    /// Reporting limits
    pub limits: Limits,
}

impl RunConfig {
    /// Build from raw options with default limits
    pub fn from_options(options: &PolicyOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            policy: options.build()?,
            limits: Limits::default(),
        })
    }
}
