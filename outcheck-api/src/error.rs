//! API 错误类型
//!
//! 提供统一的错误类型和结构化错误报告。
//! 内容不一致不是错误，只会出现在结论和证据中。

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// 读取失败（结构化）
pub use outcheck_core::SourceError;
use outcheck_core::StreamId;

/// 配置错误：选项组合冲突或容差值非法
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("case-format and case-incorrect are mutually exclusive")]
    ConflictingCasePolicies,

    #[error("number-tolerance and float-tolerance are mutually exclusive")]
    ConflictingToleranceModes,

    /// exact 与其他数值选项同时出现
    #[error("exact cannot be combined with {0}")]
    ExactConflict(&'static str),

    #[error("a tolerance mode needs tolerance values")]
    MissingTolerance,

    #[error("absolute and relative tolerance cannot both be ignored")]
    BothToleranceIgnored,

    #[error("tolerance values given without number-tolerance or float-tolerance")]
    ToleranceWithoutMode,

    #[error("invalid tolerance value '{0}': expected a real number, '-' or 'ignore'")]
    InvalidTolerance(String),

    #[error("tolerance value {0} is negative")]
    NegativeTolerance(f64),
}

/// Outcheck 错误类型
#[derive(Error, Debug)]
pub enum OutcheckError {
    /// 选项错误
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// 无法打开输入文件
    #[error("cannot open {stream} file '{}': {source}", .path.display())]
    Open {
        stream: StreamId,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 比较过程中读取失败
    #[error("{0}")]
    Read(#[from] SourceError),

    /// 策略文件无法读取或解析
    #[error("invalid policy file '{}': {reason}", .path.display())]
    PolicyFile { path: PathBuf, reason: String },
}

impl OutcheckError {
    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            OutcheckError::Config(_) | OutcheckError::PolicyFile { .. } => "config",
            OutcheckError::Open { .. } | OutcheckError::Read(_) => "source",
        }
    }

    /// 出错的输入流（如果有）
    pub fn stream(&self) -> Option<StreamId> {
        match self {
            OutcheckError::Open { stream, .. } => Some(*stream),
            OutcheckError::Read(e) => Some(e.stream),
            _ => None,
        }
    }

    /// 出错的行号（如果有）
    pub fn line(&self) -> Option<usize> {
        match self {
            OutcheckError::Read(e) => Some(e.line),
            _ => None,
        }
    }

    /// 转换为结构化错误报告
    ///
    /// CLI 可以直接打印，上层应用可以序列化为 JSON。
    pub fn to_report(&self) -> ErrorReport {
        let error_kind = match self {
            OutcheckError::Config(e) => config_kind(e),
            OutcheckError::Open { .. } => "OpenError",
            OutcheckError::Read(_) => "ReadError",
            OutcheckError::PolicyFile { .. } => "PolicyFileError",
        };
        ErrorReport {
            phase: self.phase(),
            stream: self.stream(),
            line: self.line(),
            error_kind: error_kind.to_string(),
            message: self.to_string(),
        }
    }
}

fn config_kind(e: &ConfigError) -> &'static str {
    match e {
        ConfigError::ConflictingCasePolicies => "ConflictingCasePolicies",
        ConfigError::ConflictingToleranceModes => "ConflictingToleranceModes",
        ConfigError::ExactConflict(_) => "ExactConflict",
        ConfigError::MissingTolerance => "MissingTolerance",
        ConfigError::BothToleranceIgnored => "BothToleranceIgnored",
        ConfigError::ToleranceWithoutMode => "ToleranceWithoutMode",
        ConfigError::InvalidTolerance(_) => "InvalidTolerance",
        ConfigError::NegativeTolerance(_) => "NegativeTolerance",
    }
}

/// 结构化错误报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段: config, source
    pub phase: &'static str,
    /// 出错的输入流
    pub stream: Option<StreamId>,
    /// 出错的行号（1-based，如果有）
    pub line: Option<usize>,
    /// 错误类型（可用于程序化处理）
    pub error_kind: String,
    /// 人类可读的错误消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    /// 默认的 CLI 友好格式
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.stream, self.line) {
            (Some(stream), Some(line)) => {
                write!(f, "[{}:{}] {} error: {}", stream, line, self.phase, self.message)
            }
            _ => write!(f, "[{}] {} error: {}", self.phase, self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// 简洁格式（适合终端）
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}
