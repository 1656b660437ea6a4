//! Core 错误类型
//!
//! 只有读取失败才是错误；内容不一致记录在证据缓冲区中，不经过这里。

use crate::source::StreamId;
use thiserror::Error;

/// 从输入流读取一行失败
#[derive(Error, Debug)]
#[error("cannot read {stream} line {line}: {source}")]
pub struct SourceError {
    pub stream: StreamId,
    /// 试图读取的行号（1-based）
    pub line: usize,
    #[source]
    pub source: std::io::Error,
}
