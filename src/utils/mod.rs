//! 通用工具模块
pub mod matcher;

pub use self::matcher::Matcher;
