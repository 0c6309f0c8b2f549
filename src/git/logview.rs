//! 日志与搜索别名
//!
//! 装饰过的 graph log 以及 git grep 透传

use anyhow::Result;
use std::path::Path;

use super::git_passthrough;

/// 默认 pretty 格式：短 hash、标题、相对时间、作者
const LOG_FORMAT: &str = "%C(yellow)%h%Creset %s %C(cyan)(%cr)%Creset %C(green)<%aN>%Creset";

/// 图形化提交日志，最多 limit 条，输出直通终端
pub fn show_log(limit: usize, cwd: Option<&Path>) -> Result<i32> {
    let count = format!("-{}", limit);
    let pretty = format!("--pretty=format:{}", LOG_FORMAT);
    git_passthrough(&["log", "--graph", &count, &pretty], cwd)
}

/// git grep -n 包装，退出码原样返回（1 表示无匹配）
pub fn grep(pattern: &str, cwd: Option<&Path>) -> Result<i32> {
    git_passthrough(&["grep", "-n", "--color=auto", pattern], cwd)
}
