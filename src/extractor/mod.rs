//! 页面输入提取：HTML 标签提取、文档快照、宿主全局对象
pub mod html_extractor;
pub mod snapshot;
pub mod globals;

pub use self::html_extractor::{ExtractedElements, HtmlExtractor};
pub use self::snapshot::{DocumentSnapshot, MetaElement};
pub use self::globals::{GlobalScope, JsonGlobals};
