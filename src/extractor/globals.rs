//! 宿主全局对象访问
//! custom 探针通过它读取页面运行环境暴露的全局变量（如 window.jQuery）

use serde_json::Value;

/// 宿主环境全局作用域
pub trait GlobalScope: Send + Sync {
    /// 按点分路径查找全局值，如 `jQuery.fn.jquery`
    fn lookup(&self, path: &str) -> Option<Value>;
}

/// 基于 JSON 快照的全局作用域
#[derive(Debug, Clone, Default)]
pub struct JsonGlobals {
    root: Value,
}

impl JsonGlobals {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// 没有任何全局变量
    pub fn empty() -> Self {
        Self::new(Value::Object(Default::default()))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl GlobalScope for JsonGlobals {
    fn lookup(&self, path: &str) -> Option<Value> {
        path.split('.')
            .try_fold(&self.root, |node, key| node.get(key))
            .cloned()
    }
}

/// JS 真值语义：null / false / 0 / "" 为假
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 把全局值转为版本字符串，仅接受非空字符串与数字
pub fn version_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
