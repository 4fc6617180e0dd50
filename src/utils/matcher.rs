//! 匹配工具模块
//! 对字符串应用正则，第一个捕获组即版本号

use regex::Regex;

use crate::rule::ResultValue;

/// 匹配工具类
/// 提供静态方法 `matches` 用于匹配与版本提取
pub struct Matcher;

impl Matcher {
    /// 对 `subject` 应用 `pattern`
    ///
    /// # 返回值
    /// - `ResultValue::Absent`: 未匹配
    /// - `ResultValue::Version`: 匹配且第一个捕获组非空
    /// - `ResultValue::Present`: 匹配但无可用捕获
    pub fn matches(subject: &str, pattern: &Regex) -> ResultValue {
        // 无捕获组时走 is_match，省去捕获位置计算
        if pattern.captures_len() <= 1 {
            return ResultValue::from(pattern.is_match(subject));
        }

        match pattern.captures(subject) {
            None => ResultValue::Absent,
            Some(captures) => match captures.get(1) {
                Some(version) if !version.as_str().is_empty() => {
                    ResultValue::Version(version.as_str().to_string())
                }
                _ => ResultValue::Present,
            },
        }
    }
}
