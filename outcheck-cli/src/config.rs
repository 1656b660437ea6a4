//! CLI 配置
//!
//! 包含 CLI 特有的配置：日志配置和 JSON 策略文件

use std::path::Path;

use outcheck_api::{OutcheckError, Phase, PolicyOptions};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: LevelFilter,
    pub lexer: Option<LevelFilter>,
    pub policy: Option<LevelFilter>,
    pub driver: Option<LevelFilter>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: LevelFilter::WARN,
            lexer: None,
            policy: None,
            driver: None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> LevelFilter {
        match phase {
            Phase::Lexer => self.lexer.unwrap_or(self.global),
            Phase::Policy => self.policy.unwrap_or(self.global),
            Phase::Driver => self.driver.unwrap_or(self.global),
            Phase::Source => self.global,
        }
    }
}

/// Parse log level string: silent, error, warn, info, debug, trace
pub fn parse_log_level(s: &str) -> Result<LevelFilter, String> {
    match s.to_lowercase().as_str() {
        "silent" | "off" => Ok(LevelFilter::OFF),
        "error" => Ok(LevelFilter::ERROR),
        "warn" => Ok(LevelFilter::WARN),
        "info" => Ok(LevelFilter::INFO),
        "debug" => Ok(LevelFilter::DEBUG),
        "trace" => Ok(LevelFilter::TRACE),
        other => Err(format!(
            "unknown log level '{}' (expected silent, error, warn, info, debug or trace)",
            other
        )),
    }
}

/// 策略文件结构
///
/// 字段与命令行开关同名；命令行上的开关叠加在文件之上。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PolicyFile {
    #[serde(flatten)]
    pub options: PolicyOptions,
    /// 日志级别: "silent", "error", "warn", "info", "debug", "trace"
    pub log_level: Option<String>,
}

/// Read and parse a JSON policy file
pub fn read_policy_file(path: &Path) -> Result<PolicyFile, OutcheckError> {
    let invalid = |reason: String| OutcheckError::PolicyFile {
        path: path.to_path_buf(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let file: PolicyFile = serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    if let Some(level) = &file.log_level {
        parse_log_level(level).map_err(invalid)?;
    }
    Ok(file)
}
