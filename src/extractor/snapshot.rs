//! 文档快照：一次检测所需的全部页面输入
//! 过滤只在构造时执行一次，之后只读

use super::html_extractor::HtmlExtractor;

/// meta 元素（仅保留 name 与 content 均非空的）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaElement {
    pub name: String,
    pub content: String,
}

impl MetaElement {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// 页面快照：序列化 HTML + 过滤后的 meta / script 列表
#[derive(Debug, Clone, Default)]
pub struct DocumentSnapshot {
    markup: String,
    metas: Vec<MetaElement>,
    scripts: Vec<String>,
}

impl DocumentSnapshot {
    /// 由宿主提供的原始数据构造，丢弃无用的 meta 和 script
    pub fn new<M, S>(markup: impl Into<String>, metas: M, scripts: S) -> Self
    where
        M: IntoIterator<Item = MetaElement>,
        S: IntoIterator<Item = String>,
    {
        Self {
            markup: markup.into(),
            metas: metas
                .into_iter()
                .filter(|m| !m.name.is_empty() && !m.content.is_empty())
                .collect(),
            scripts: scripts.into_iter().filter(|src| !src.is_empty()).collect(),
        }
    }

    /// 从原始HTML构造，标签按文档顺序提取
    pub fn from_html(html: &str) -> Self {
        let extracted = HtmlExtractor::extract(html);
        Self::new(html, extracted.metas, extracted.scripts)
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn metas(&self) -> &[MetaElement] {
        &self.metas
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }
}
