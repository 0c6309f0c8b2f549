//! 项目调度模块
//!
//! 从起始目录向上定位最近的 marker 文件，把命令转发给对应的
//! 构建/测试工具。单线程、同步、阻塞，一次调用即一次生命周期。

pub mod config;
pub mod finder;
pub mod markers;
pub mod runner;

// 重导出
pub use finder::{find_project, DispatchError, ProjectMatch, MAX_ASCENT};
pub use markers::{effective_markers, MarkerRule, BUILTIN_MARKERS};
pub use runner::run_delegated;
