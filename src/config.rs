//! 全局配置管理,存储检测引擎的可配置项

/// 检测引擎配置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnifferConfig {
    // script 测试是否遍历全部脚本；默认只检查第一个带 src 的脚本
    pub scan_all_scripts: bool,
    // meta name 比较是否忽略 ASCII 大小写；默认精确相等
    pub meta_name_case_insensitive: bool,
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> SnifferConfig {
        SnifferConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: SnifferConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan_all_scripts(mut self, enabled: bool) -> Self {
        self.config.scan_all_scripts = enabled;
        self
    }

    pub fn meta_name_case_insensitive(mut self, enabled: bool) -> Self {
        self.config.meta_name_case_insensitive = enabled;
        self
    }

    pub fn build(self) -> SnifferConfig {
        self.config
    }
}
