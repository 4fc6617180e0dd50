//! 测试执行器：按测试类型把测试定义应用到对应的数据源
//! script / meta 的空列表短路在构造时确定，而不是每次调用时判断

use tracing::trace;

use crate::config::SnifferConfig;
use crate::error::SniffResult;
use crate::extractor::DocumentSnapshot;
use crate::rule::{ResultValue, TestDefinition};
use crate::utils::Matcher;
use regex::Regex;

/// script 执行策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptRunner {
    // 页面没有脚本，恒为 false
    Empty,
    // 只检查第一个脚本的 src
    FirstOnly,
    // 按文档顺序检查所有脚本，取第一个命中
    ScanAll,
}

/// meta 执行策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaRunner {
    Empty,
    Exact,
    IgnoreAsciiCase,
}

/// 绑定到单个文档快照的测试执行器
#[derive(Debug, Clone)]
pub struct TestRunner {
    snapshot: DocumentSnapshot,
    script: ScriptRunner,
    meta: MetaRunner,
}

impl TestRunner {
    pub fn new(snapshot: DocumentSnapshot, config: &SnifferConfig) -> Self {
        let script = match (snapshot.scripts().is_empty(), config.scan_all_scripts) {
            (true, _) => ScriptRunner::Empty,
            (false, false) => ScriptRunner::FirstOnly,
            (false, true) => ScriptRunner::ScanAll,
        };
        let meta = match (snapshot.metas().is_empty(), config.meta_name_case_insensitive) {
            (true, _) => MetaRunner::Empty,
            (false, false) => MetaRunner::Exact,
            (false, true) => MetaRunner::IgnoreAsciiCase,
        };

        Self { snapshot, script, meta }
    }

    pub fn snapshot(&self) -> &DocumentSnapshot {
        &self.snapshot
    }

    /// 执行单条测试，只有 custom 探针可能返回错误
    pub fn run(&self, test: &TestDefinition) -> SniffResult<ResultValue> {
        let result = match test {
            TestDefinition::Custom(probe) => probe.call()?,
            TestDefinition::Script(pattern) => self.run_script(pattern),
            TestDefinition::Text(pattern) => Matcher::matches(self.snapshot.markup(), pattern),
            TestDefinition::Meta { name, pattern } => self.run_meta(name, pattern),
        };
        trace!("[{}]测试执行完成 | 结果: {}", test.kind(), result);
        Ok(result)
    }

    fn run_script(&self, pattern: &Regex) -> ResultValue {
        let scripts = self.snapshot.scripts();
        match self.script {
            ScriptRunner::Empty => ResultValue::Absent,
            ScriptRunner::FirstOnly => scripts
                .first()
                .map_or(ResultValue::Absent, |src| Matcher::matches(src, pattern)),
            ScriptRunner::ScanAll => scripts
                .iter()
                .map(|src| Matcher::matches(src, pattern))
                .find(ResultValue::is_detected)
                .unwrap_or_default(),
        }
    }

    fn run_meta(&self, name: &str, pattern: &Regex) -> ResultValue {
        let name_matches = |meta_name: &str| match self.meta {
            MetaRunner::IgnoreAsciiCase => meta_name.eq_ignore_ascii_case(name),
            _ => meta_name == name,
        };

        if self.meta == MetaRunner::Empty {
            return ResultValue::Absent;
        }

        self.snapshot
            .metas()
            .iter()
            .filter(|meta| name_matches(meta.name.as_str()))
            .map(|meta| Matcher::matches(&meta.content, pattern))
            .find(ResultValue::is_detected)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::error::SnifferError;
    use crate::extractor::MetaElement;

    fn snapshot_with_scripts(scripts: &[&str]) -> DocumentSnapshot {
        DocumentSnapshot::new(
            "",
            Vec::new(),
            scripts.iter().map(|s| s.to_string()),
        )
    }

    fn joomla_snapshot() -> DocumentSnapshot {
        DocumentSnapshot::new(
            "",
            vec![
                MetaElement::new("generator", "Joomla! 3.9"),
                MetaElement::new("viewport", "width=device-width"),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_script_runner_empty_list() {
        let runner = TestRunner::new(snapshot_with_scripts(&[]), &ConfigManager::get_default());
        assert_eq!(runner.script, ScriptRunner::Empty);
        let test = TestDefinition::script(".*").unwrap();
        assert_eq!(runner.run(&test).unwrap(), ResultValue::Absent);
    }

    #[test]
    fn test_script_runner_only_inspects_first_script() {
        let runner = TestRunner::new(
            snapshot_with_scripts(&["/js/app.js", "/js/jquery-1.4.2.min.js"]),
            &ConfigManager::get_default(),
        );
        let jquery = TestDefinition::script(r"jquery-([\d.]+)").unwrap();
        let app = TestDefinition::script(r"app\.js").unwrap();

        assert_eq!(runner.run(&jquery).unwrap(), ResultValue::Absent);
        assert_eq!(runner.run(&app).unwrap(), ResultValue::Present);
    }

    #[test]
    fn test_script_runner_scan_all() {
        let config = ConfigManager::custom().scan_all_scripts(true).build();
        let runner = TestRunner::new(
            snapshot_with_scripts(&["/js/app.js", "/js/jquery-1.4.2.min.js"]),
            &config,
        );
        let jquery = TestDefinition::script(r"jquery-([\d.]+[\d])").unwrap();
        assert_eq!(runner.run(&jquery).unwrap(), ResultValue::Version("1.4.2".to_string()));

        let missing = TestDefinition::script("mootools").unwrap();
        assert_eq!(runner.run(&missing).unwrap(), ResultValue::Absent);
    }

    #[test]
    fn test_text_runner_uses_full_markup() {
        let snapshot = DocumentSnapshot::new(
            r#"<link rel="stylesheet" href="/wp-content/themes/x.css">"#,
            Vec::new(),
            Vec::new(),
        );
        let runner = TestRunner::new(snapshot, &ConfigManager::get_default());
        assert_eq!(
            runner.run(&TestDefinition::text("wp-content").unwrap()).unwrap(),
            ResultValue::Present
        );
        assert_eq!(
            runner.run(&TestDefinition::text("drupal").unwrap()).unwrap(),
            ResultValue::Absent
        );
    }

    #[test]
    fn test_meta_runner_lookup() {
        let runner = TestRunner::new(joomla_snapshot(), &ConfigManager::get_default());

        let generator = TestDefinition::meta("generator", r"Joomla!\s?([\d.]*)").unwrap();
        assert_eq!(runner.run(&generator).unwrap(), ResultValue::Version("3.9".to_string()));

        let author = TestDefinition::meta("author", r"Joomla!\s?([\d.]*)").unwrap();
        assert_eq!(runner.run(&author).unwrap(), ResultValue::Absent);
    }

    #[test]
    fn test_meta_runner_continues_past_non_matching_content() {
        let snapshot = DocumentSnapshot::new(
            "",
            vec![
                MetaElement::new("generator", "Hugo 0.80"),
                MetaElement::new("generator", "WordPress 5.2"),
            ],
            Vec::new(),
        );
        let runner = TestRunner::new(snapshot, &ConfigManager::get_default());
        let test = TestDefinition::meta("generator", r"WordPress\s?([\w\d.\-_]*)").unwrap();
        assert_eq!(runner.run(&test).unwrap(), ResultValue::Version("5.2".to_string()));
    }

    #[test]
    fn test_meta_runner_name_case() {
        let snapshot = DocumentSnapshot::new(
            "",
            vec![MetaElement::new("Generator", "Joomla! 3.9")],
            Vec::new(),
        );
        let test = TestDefinition::meta("generator", r"Joomla!\s?([\d.]*)").unwrap();

        let exact = TestRunner::new(snapshot.clone(), &ConfigManager::get_default());
        assert_eq!(exact.run(&test).unwrap(), ResultValue::Absent);

        let config = ConfigManager::custom().meta_name_case_insensitive(true).build();
        let relaxed = TestRunner::new(snapshot, &config);
        assert_eq!(relaxed.run(&test).unwrap(), ResultValue::Version("3.9".to_string()));
    }

    #[test]
    fn test_meta_runner_empty_list() {
        let runner = TestRunner::new(DocumentSnapshot::default(), &ConfigManager::get_default());
        assert_eq!(runner.meta, MetaRunner::Empty);
        let test = TestDefinition::meta("generator", ".*").unwrap();
        assert_eq!(runner.run(&test).unwrap(), ResultValue::Absent);
    }

    #[test]
    fn test_custom_runner_passes_through() {
        let runner = TestRunner::new(DocumentSnapshot::default(), &ConfigManager::get_default());

        let version = TestDefinition::custom(|| ResultValue::Version("1.7".to_string()));
        assert_eq!(runner.run(&version).unwrap(), ResultValue::Version("1.7".to_string()));

        let failing = TestDefinition::custom_fallible(|| Err(SnifferError::probe("Glow", "window 不可用")));
        assert!(matches!(runner.run(&failing), Err(SnifferError::ProbeError { .. })));
    }
}
