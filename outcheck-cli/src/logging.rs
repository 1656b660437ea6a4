//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber` 实现分阶段日志控制。
//! 日志只写到 stderr（和可选的日志文件），stdout 留给结论输出。

use std::io;
use std::path::Path;
use std::sync::Mutex;

use outcheck_api::Phase;
use tracing_subscriber::{
    filter::Targets,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

use crate::config::LogConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// 根据日志配置构建过滤器
pub fn targets(log_config: &LogConfig) -> Targets {
    [Phase::Lexer, Phase::Source, Phase::Policy, Phase::Driver]
        .into_iter()
        .fold(
            Targets::new().with_default(log_config.global),
            |targets, phase| targets.with_target(phase.target(), log_config.level_for(phase)),
        )
        .with_target("outcheck::api", log_config.global)
        .with_target("outcheck::cli", log_config.global)
}

/// 使用指定格式和日志配置初始化日志系统
///
/// 指定文件时同时输出到 stderr 和文件（追加）。
pub fn init_with_file<P: AsRef<Path>>(
    log_config: &LogConfig,
    format: LogFormat,
    file: Option<P>,
) -> io::Result<()> {
    let targets = targets(log_config);

    let mut layers: Vec<BoxedLayer> = vec![create_format_layer(format, io::stderr)
        .with_filter(targets.clone())
        .boxed()];

    if let Some(path) = file {
        let file_handle = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        layers.push(
            create_format_layer(format, Mutex::new(file_handle))
                .with_filter(targets)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(io::Error::other)
}

/// Create formatter layer based on format
fn create_format_layer<W>(format: LogFormat, make_writer: W) -> BoxedLayer
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}
