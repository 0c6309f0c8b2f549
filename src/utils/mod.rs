//! 工具模块
//!
//! 路径显示与 JSON 读取

pub mod format;
pub mod json;

// 重导出
pub use format::*;
pub use json::*;
