//! 检测模块：测试执行器、检测引擎与结果表
pub mod runner;
pub mod results;
pub mod detector;

// 导出核心接口
pub use self::runner::TestRunner;
pub use self::results::{DetectedTechnology, GroupResults, ResultsTable};
pub use self::detector::Sniffer;
