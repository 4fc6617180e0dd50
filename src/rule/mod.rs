//! 规则模块：负责规则数据模型、JSON 规则加载与内置规则
pub mod model;
pub mod loader;
pub mod builtin;

// 导出核心接口
pub use self::model::{
    DetectionGroup, Probe, ProbeFn, ResultValue, RuleCatalog, TechnologyEntry, TestDefinition, TestKind,
};
pub use self::loader::{GlobalProbe, RawGroup, RawTest, RuleLoader};
pub use self::builtin::BUILTIN_RULES;
