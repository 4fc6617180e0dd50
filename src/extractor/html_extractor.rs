//! HTML标签提取器
//! 按文档顺序收集 `<script src>` 与 `<meta name content>`，
//! script/style/textarea 等元素的内容按原始文本处理，其中的标签字面量不会被当作元素

use std::cell::RefCell;

use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use markup5ever::interface::Attribute;
use tendril::StrTendril;

use super::snapshot::MetaElement;

/// 从HTML中提取到的元素，尚未过滤
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractedElements {
    pub metas: Vec<MetaElement>,
    pub scripts: Vec<String>,
}

/// 提取器
pub struct HtmlExtractor;

impl HtmlExtractor {
    /// 从HTML字符串提取 meta 与 script 元素
    pub fn extract(html: &str) -> ExtractedElements {
        let tokenizer = Tokenizer::new(ElementSink::default(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        tokenizer.sink.elements.into_inner()
    }
}

#[derive(Default)]
struct ElementSink {
    elements: RefCell<ExtractedElements>,
}

impl TokenSink for ElementSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        let Token::TagToken(Tag {
            kind: TagKind::StartTag,
            name,
            attrs,
            ..
        }) = token
        else {
            return TokenSinkResult::Continue;
        };

        match name.as_ref() {
            "script" => {
                if let Some(src) = attr_value(&attrs, "src") {
                    self.elements.borrow_mut().scripts.push(src);
                }
            }
            "meta" => {
                if let (Some(name), Some(content)) = (attr_value(&attrs, "name"), attr_value(&attrs, "content")) {
                    self.elements.borrow_mut().metas.push(MetaElement { name, content });
                }
            }
            _ => {}
        }

        // 没有树构建器，需要由 sink 切换到原始文本状态
        match raw_kind(name.as_ref()) {
            Some(kind) => TokenSinkResult::RawData(kind),
            None => TokenSinkResult::Continue,
        }
    }
}

/// 内容为原始文本的元素
fn raw_kind(tag: &str) -> Option<RawKind> {
    match tag {
        "script" => Some(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => Some(RawKind::Rawtext),
        "textarea" | "title" => Some(RawKind::Rcdata),
        _ => None,
    }
}

fn attr_value(attrs: &[Attribute], key: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| a.name.local.as_ref() == key)
        .map(|a| a.value.to_string())
}
