//! 检测结果表与结果转换

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rule::ResultValue;

/// 分组内的结果：技术名称 → 检测结果
pub type GroupResults = IndexMap<String, ResultValue>;

/// 结果表：分组描述 → 技术名称 → 检测结果，保持规则目录的遍历顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsTable(IndexMap<String, GroupResults>);

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入单项结果，同一分组描述下的同名技术以后写入者为准，位置保持首次写入处
    pub fn insert(&mut self, description: &str, technology: &str, value: ResultValue) {
        self.0
            .entry(description.to_string())
            .or_default()
            .insert(technology.to_string(), value);
    }

    pub fn get(&self, description: &str, technology: &str) -> Option<&ResultValue> {
        self.0.get(description)?.get(technology)
    }

    pub fn group(&self, description: &str) -> Option<&GroupResults> {
        self.0.get(description)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &GroupResults)> {
        self.0.iter()
    }

    /// 分组数量
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 仅返回已检出的技术，按规则目录顺序
    pub fn detected(&self) -> Vec<DetectedTechnology> {
        self.0
            .iter()
            .flat_map(|(description, techs)| {
                techs
                    .iter()
                    .filter(|(_, value)| value.is_detected())
                    .map(move |(name, value)| DetectedTechnology {
                        category: description.clone(),
                        name: name.clone(),
                        version: value.version().map(str::to_string),
                    })
            })
            .collect()
    }
}

/// 已检出的技术（展示用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedTechnology {
    pub category: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl fmt::Display for DetectedTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) if !v.is_empty() => write!(f, "{} {}", self.name, v),
            _ => write!(f, "{}", self.name),
        }
    }
}
