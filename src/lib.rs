//! sniffer - 基于规则的页面技术嗅探引擎
//! 根据页面 HTML、meta 元素、外部脚本与宿主全局对象，识别 JS 库、CMS、统计分析与 Web 字体服务及其版本

// 导出全局错误类型
pub use self::error::{SniffResult, SnifferError};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, SnifferConfig};

// 导出规则模块核心接口
pub use self::rule::{
    DetectionGroup, GlobalProbe, Probe, ResultValue, RuleCatalog, RuleLoader, TechnologyEntry,
    TestDefinition, TestKind, BUILTIN_RULES,
};

// 导出提取模块核心接口
pub use self::extractor::{
    DocumentSnapshot, ExtractedElements, GlobalScope, HtmlExtractor, JsonGlobals, MetaElement,
};

// 导出工具模块核心接口
pub use self::utils::Matcher;

// 导出检测模块核心接口
pub use self::detector::{DetectedTechnology, GroupResults, ResultsTable, Sniffer, TestRunner};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod extractor;
pub mod utils;
pub mod detector;
