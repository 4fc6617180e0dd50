//! 规则加载器：JSON 规则文件 → 规则目录
//! 负责反序列化、正则编译，以及把 custom 测试绑定到宿主全局作用域

use std::fmt;
use std::sync::Arc;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use super::model::{DetectionGroup, ResultValue, RuleCatalog, TechnologyEntry, TestDefinition};
use crate::error::SniffResult;
use crate::extractor::globals::{is_truthy, version_string, GlobalScope};

/// 原始检测分组（规则文件中的一项）
#[derive(Debug, Clone, Deserialize)]
pub struct RawGroup {
    pub description: String,
    // 保留文件中的顺序与重名键，重名在编译阶段处理
    #[serde(deserialize_with = "ordered_entries")]
    pub tests: Vec<(String, Vec<RawTest>)>,
}

/// 原始测试定义
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "test", rename_all = "lowercase")]
pub enum RawTest {
    Custom(GlobalProbe),
    Script(String),
    Text(String),
    Meta(RawMetaTest),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMetaTest {
    pub name: String,
    #[serde(rename = "match")]
    pub pattern: String,
}

/// 声明式全局探针：`global` 为真值时命中，`version` 路径提供版本号
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalProbe {
    pub global: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl GlobalProbe {
    pub fn evaluate(&self, scope: &dyn GlobalScope) -> ResultValue {
        let present = scope.lookup(&self.global).is_some_and(|v| is_truthy(&v));
        if !present {
            return ResultValue::Absent;
        }

        self.version
            .as_deref()
            .and_then(|path| scope.lookup(path))
            .and_then(|v| version_string(&v))
            .map(ResultValue::Version)
            .unwrap_or(ResultValue::Present)
    }
}

/// 规则加载器
pub struct RuleLoader;

impl RuleLoader {
    /// 解析并编译 JSON 规则文件
    pub fn from_json(json: &str, globals: Arc<dyn GlobalScope>) -> SniffResult<RuleCatalog> {
        let raw_groups = Self::parse(json)?;
        Self::compile(raw_groups, globals)
    }

    /// 仅反序列化，不编译正则
    pub fn parse(json: &str) -> SniffResult<Vec<RawGroup>> {
        Ok(serde_json::from_str(json)?)
    }

    /// 编译原始分组
    pub fn compile(raw_groups: Vec<RawGroup>, globals: Arc<dyn GlobalScope>) -> SniffResult<RuleCatalog> {
        let mut catalog = RuleCatalog::new();

        for raw_group in raw_groups {
            let mut group = DetectionGroup::new(raw_group.description);

            for (tech_name, raw_tests) in raw_group.tests {
                let tests = raw_tests
                    .into_iter()
                    .map(|raw| Self::compile_test(raw, &globals))
                    .collect::<SniffResult<Vec<_>>>()?;

                let entry = TechnologyEntry::new(tech_name, tests)?;
                if let Some(old) = group.insert(entry) {
                    warn!("分组 [{}] 中技术 {} 重复定义，后者覆盖前者", group.description(), old.name());
                }
            }

            catalog.push_group(group);
        }

        debug!(
            "规则加载完成，分组数：{}，技术数：{}",
            catalog.groups().len(),
            catalog.technology_count()
        );
        Ok(catalog)
    }

    fn compile_test(raw: RawTest, globals: &Arc<dyn GlobalScope>) -> SniffResult<TestDefinition> {
        match raw {
            RawTest::Custom(probe) => {
                let scope = Arc::clone(globals);
                Ok(TestDefinition::custom(move || probe.evaluate(scope.as_ref())))
            }
            RawTest::Script(pattern) => TestDefinition::script(&pattern),
            RawTest::Text(pattern) => TestDefinition::text(&pattern),
            RawTest::Meta(meta) => TestDefinition::meta(meta.name, &meta.pattern),
        }
    }
}

/// 按文件顺序读取 JSON 对象的键值对
fn ordered_entries<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<RawTest>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, Vec<RawTest>)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("技术名称到测试列表的映射")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, tests)) = map.next_entry::<String, Vec<RawTest>>()? {
                entries.push((name, tests));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}
