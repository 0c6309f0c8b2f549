// runup - Library Root
//
// 项目感知的命令调度器 + git 工作流辅助

pub mod dispatch;
pub mod editor;
pub mod git;
pub mod utils;

// 重新导出常用类型
pub use dispatch::{
    effective_markers, find_project, run_delegated, DispatchError, MarkerRule, ProjectMatch,
};
