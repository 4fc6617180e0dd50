//! 内置规则目录：JS 库、CMS、统计分析、Web 字体

use std::sync::Arc;

use super::loader::RuleLoader;
use super::model::RuleCatalog;
use crate::error::SniffResult;
use crate::extractor::GlobalScope;

/// 嵌入式内置规则文件
pub const BUILTIN_RULES: &str = include_str!("../../data/builtin_rules.json");

impl RuleCatalog {
    /// 加载内置规则，custom 测试绑定到给定的全局作用域
    pub fn builtin(globals: Arc<dyn GlobalScope>) -> SniffResult<Self> {
        RuleLoader::from_json(BUILTIN_RULES, globals)
    }
}
