//! 检测器核心：遍历规则目录、逐项执行测试、缓存结果表
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use tracing::debug;

use super::results::ResultsTable;
use super::runner::TestRunner;
use crate::config::SnifferConfig;
use crate::error::SniffResult;
use crate::extractor::DocumentSnapshot;
use crate::rule::{ResultValue, RuleCatalog, TechnologyEntry};

/// 技术嗅探器，一个实例绑定一份文档快照
#[derive(Debug)]
pub struct Sniffer {
    catalog: Arc<RuleCatalog>,
    runner: TestRunner,
    config: SnifferConfig,
    // 未运行 / 已填充
    results: OnceCell<ResultsTable>,
}

impl Sniffer {
    /// 使用默认配置创建
    pub fn new(catalog: Arc<RuleCatalog>, snapshot: DocumentSnapshot) -> Self {
        Self::with_config(catalog, snapshot, SnifferConfig::default())
    }

    pub fn with_config(catalog: Arc<RuleCatalog>, snapshot: DocumentSnapshot, config: SnifferConfig) -> Self {
        let runner = TestRunner::new(snapshot, &config);
        Self {
            catalog,
            runner,
            config,
            results: OnceCell::new(),
        }
    }

    /// 执行全部检测并返回结果表
    /// 首次成功后结果被缓存，之后的调用不再执行任何测试；
    /// 探针出错时本次结果全部丢弃，缓存保持为空
    pub fn run(&self) -> SniffResult<&ResultsTable> {
        if let Some(table) = self.results.get() {
            debug!("检测结果已缓存，直接返回");
            return Ok(table);
        }
        self.results.get_or_try_init(|| self.scan())
    }

    pub fn is_cached(&self) -> bool {
        self.results.get().is_some()
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> &DocumentSnapshot {
        self.runner.snapshot()
    }

    pub fn config(&self) -> &SnifferConfig {
        &self.config
    }

    fn scan(&self) -> SniffResult<ResultsTable> {
        let mut table = ResultsTable::new();
        let mut detected_count = 0usize;

        for group in self.catalog.groups() {
            for tech in group.technologies() {
                let value = self.evaluate(tech)?;
                if value.is_detected() {
                    detected_count += 1;
                }
                table.insert(group.description(), tech.name(), value);
            }
        }

        debug!(
            "检测完成，技术总数：{}，检出：{}",
            self.catalog.technology_count(),
            detected_count
        );
        Ok(table)
    }

    /// 按顺序执行技术的测试列表，第一个非 false 的结果即为最终结果
    fn evaluate(&self, tech: &TechnologyEntry) -> SniffResult<ResultValue> {
        for test in tech.tests() {
            let result = self.runner.run(test)?;
            if result.is_detected() {
                debug!(
                    "[{}]匹配成功 | 技术: {} | 结果: {}",
                    test.kind(),
                    tech.name(),
                    result
                );
                return Ok(result);
            }
        }
        Ok(ResultValue::Absent)
    }
}
