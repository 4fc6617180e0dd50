//! 规则数据模型定义
//! 测试定义、技术条目、检测分组、规则目录，以及单条检测结果值

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{SniffResult, SnifferError};

/// 单项检测结果：不存在 / 存在但版本未知 / 存在且版本已知
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultValue {
    #[default]
    Absent,
    Present,
    Version(String),
}

impl ResultValue {
    /// 由版本字符串构造，空串视为无版本
    pub fn from_version(version: impl Into<String>) -> Self {
        let version = version.into();
        if version.is_empty() {
            ResultValue::Present
        } else {
            ResultValue::Version(version)
        }
    }

    pub fn is_detected(&self) -> bool {
        !matches!(self, ResultValue::Absent)
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            ResultValue::Version(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for ResultValue {
    fn from(present: bool) -> Self {
        if present { ResultValue::Present } else { ResultValue::Absent }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Absent => write!(f, "false"),
            ResultValue::Present => write!(f, "true"),
            ResultValue::Version(v) => write!(f, "{}", v),
        }
    }
}

// ======== 序列化为 false / true / "版本号" ========
impl Serialize for ResultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResultValue::Absent => serializer.serialize_bool(false),
            ResultValue::Present => serializer.serialize_bool(true),
            ResultValue::Version(v) => serializer.serialize_str(v),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawResultValue {
    Flag(bool),
    Version(String),
}

impl<'de> Deserialize<'de> for ResultValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawResultValue::deserialize(deserializer)? {
            RawResultValue::Flag(flag) => ResultValue::from(flag),
            RawResultValue::Version(v) => ResultValue::from_version(v),
        })
    }
}

/// 测试类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKind {
    Custom,
    Script,
    Text,
    Meta,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::Custom => write!(f, "custom"),
            TestKind::Script => write!(f, "script"),
            TestKind::Text => write!(f, "text"),
            TestKind::Meta => write!(f, "meta"),
        }
    }
}

/// 自定义探针函数签名
pub type ProbeFn = dyn Fn() -> SniffResult<ResultValue> + Send + Sync;

/// 自定义探针：无参函数，自行决定返回 false / true / 版本号
#[derive(Clone)]
pub struct Probe(Arc<ProbeFn>);

impl Probe {
    pub fn new<F>(probe: F) -> Self
    where
        F: Fn() -> SniffResult<ResultValue> + Send + Sync + 'static,
    {
        Self(Arc::new(probe))
    }

    #[inline]
    pub fn call(&self) -> SniffResult<ResultValue> {
        (self.0)()
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Probe(..)")
    }
}

/// 单条测试定义，类型标签决定载荷形状
#[derive(Debug, Clone)]
pub enum TestDefinition {
    /// 直接调用探针函数
    Custom(Probe),
    /// 匹配 script 元素的 src
    Script(Regex),
    /// 匹配整页序列化 HTML
    Text(Regex),
    /// 匹配 name 等于引用名的 meta 元素的 content
    Meta { name: String, pattern: Regex },
}

impl TestDefinition {
    /// 不会失败的探针
    pub fn custom<F>(probe: F) -> Self
    where
        F: Fn() -> ResultValue + Send + Sync + 'static,
    {
        TestDefinition::Custom(Probe::new(move || Ok(probe())))
    }

    /// 可能失败的探针，错误会中止整次 run()
    pub fn custom_fallible<F>(probe: F) -> Self
    where
        F: Fn() -> SniffResult<ResultValue> + Send + Sync + 'static,
    {
        TestDefinition::Custom(Probe::new(probe))
    }

    pub fn script(pattern: &str) -> SniffResult<Self> {
        Ok(TestDefinition::Script(Regex::new(pattern)?))
    }

    pub fn text(pattern: &str) -> SniffResult<Self> {
        Ok(TestDefinition::Text(Regex::new(pattern)?))
    }

    pub fn meta(name: impl Into<String>, pattern: &str) -> SniffResult<Self> {
        Ok(TestDefinition::Meta {
            name: name.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn kind(&self) -> TestKind {
        match self {
            TestDefinition::Custom(_) => TestKind::Custom,
            TestDefinition::Script(_) => TestKind::Script,
            TestDefinition::Text(_) => TestKind::Text,
            TestDefinition::Meta { .. } => TestKind::Meta,
        }
    }
}

/// 技术条目：名称 + 有序、非空的测试列表（顺序即尝试顺序）
#[derive(Debug, Clone)]
pub struct TechnologyEntry {
    name: String,
    tests: Vec<TestDefinition>,
}

impl TechnologyEntry {
    pub fn new(name: impl Into<String>, tests: Vec<TestDefinition>) -> SniffResult<Self> {
        let name = name.into();
        if tests.is_empty() {
            return Err(SnifferError::RuleParseError(format!(
                "技术 {} 的测试列表为空",
                name
            )));
        }
        Ok(Self { name, tests })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[TestDefinition] {
        &self.tests
    }
}

/// 检测分组：描述标签 + 组内唯一命名的技术条目
#[derive(Debug, Clone)]
pub struct DetectionGroup {
    description: String,
    technologies: Vec<TechnologyEntry>,
}

impl DetectionGroup {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            technologies: Vec::new(),
        }
    }

    /// 链式添加技术条目
    pub fn with_technology(mut self, entry: TechnologyEntry) -> Self {
        self.insert(entry);
        self
    }

    /// 添加技术条目；同名条目原位替换并返回旧值
    pub fn insert(&mut self, entry: TechnologyEntry) -> Option<TechnologyEntry> {
        match self.technologies.iter_mut().find(|t| t.name == entry.name) {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.technologies.push(entry);
                None
            }
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn technologies(&self) -> &[TechnologyEntry] {
        &self.technologies
    }

    pub fn get(&self, name: &str) -> Option<&TechnologyEntry> {
        self.technologies.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.technologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }
}

/// 规则目录：有序的检测分组集合，构建完成后交给检测引擎只读使用
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    groups: Vec<DetectionGroup>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: DetectionGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn push_group(&mut self, group: DetectionGroup) {
        self.groups.push(group);
    }

    /// 追加另一份目录的全部分组
    pub fn merge(&mut self, other: RuleCatalog) {
        self.groups.extend(other.groups);
    }

    pub fn groups(&self) -> &[DetectionGroup] {
        &self.groups
    }

    pub fn group(&self, description: &str) -> Option<&DetectionGroup> {
        self.groups.iter().find(|g| g.description == description)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn technology_count(&self) -> usize {
        self.groups.iter().map(DetectionGroup::len).sum()
    }
}
