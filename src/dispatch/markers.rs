//! 项目标记表
//!
//! 有序的 (marker 文件名 → 工具命令) 优先级列表

use anyhow::Result;
use lazy_static::lazy_static;

use super::config::load_user_markers;

/// 一条 marker 规则
///
/// 目录里出现名为 `marker` 的普通文件，即视为 `program` 对应的项目。
/// 只看文件名是否存在，从不读取内容，误报（比如无关的 BUILD 文件）
/// 是已知的接受范围。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRule {
    /// 标记文件名
    pub marker: String,
    /// 被委托的工具程序
    pub program: String,
    /// 固定前缀参数，用户参数追加在其后
    pub prefix_args: Vec<String>,
    /// 展示用名称
    pub label: String,
}

impl MarkerRule {
    pub fn new(marker: &str, program: &str, prefix_args: &[&str], label: &str) -> Self {
        Self {
            marker: marker.to_string(),
            program: program.to_string(),
            prefix_args: prefix_args.iter().map(|s| s.to_string()).collect(),
            label: label.to_string(),
        }
    }

    /// 完整命令行：program + 前缀参数 + 用户参数（保持顺序）
    pub fn command_line(&self, args: &[String]) -> Vec<String> {
        let mut line = Vec::with_capacity(1 + self.prefix_args.len() + args.len());
        line.push(self.program.clone());
        line.extend(self.prefix_args.iter().cloned());
        line.extend(args.iter().cloned());
        line
    }
}

// ═══════════════════════════════════════════════════════════════════
// 内置优先级表
// ═══════════════════════════════════════════════════════════════════

lazy_static! {
    /// 内置 marker 表 - 顺序即优先级，同目录多个 marker 时靠前者胜出
    ///
    /// BUILD 排最前：内部构建系统的 marker 信号最强；Cargo.toml 和
    /// package.json 是一等 manifest；Makefile 与 build.sh 属于通用
    /// 脚本，放在最后兜底。
    pub static ref BUILTIN_MARKERS: Vec<MarkerRule> = vec![
        MarkerRule::new("BUILD", "blaze", &[], "blaze"),
        MarkerRule::new("Cargo.toml", "cargo", &[], "cargo"),
        MarkerRule::new("package.json", "npm", &["run"], "npm"),
        MarkerRule::new("Makefile", "make", &[], "make"),
        MarkerRule::new("build.sh", "sh", &["build.sh"], "build.sh"),
    ];
}

/// 生效的 marker 表
///
/// 用户配置的规则排在内置规则之前（优先级更高），顺序在单次
/// 调用内固定，保证重复运行的选择一致。
pub fn effective_markers() -> Result<Vec<MarkerRule>> {
    let mut rules = load_user_markers()?;
    rules.extend(BUILTIN_MARKERS.iter().cloned());
    Ok(rules)
}
