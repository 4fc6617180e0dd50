//! 全局错误类型定义
//! 技术不存在不是错误（用 `ResultValue::Absent` 表示），这里只覆盖规则构建与探针失败

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;

#[derive(Error, Debug)]
pub enum SnifferError {
    // 规则相关错误
    #[error("规则解析失败：{0}")]
    RuleParseError(String),

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 检测相关错误
    #[error("自定义探针执行失败：技术 {tech}，原因：{message}")]
    ProbeError { tech: String, message: String },

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
}

impl SnifferError {
    /// 供自定义探针构造失败结果
    pub fn probe(tech: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProbeError {
            tech: tech.into(),
            message: message.into(),
        }
    }
}

// 全局Result类型
pub type SniffResult<T> = Result<T, SnifferError>;
