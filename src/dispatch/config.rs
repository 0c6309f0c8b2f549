//! 用户 marker 配置
//!
//! 可选的 JSON 配置文件，向内置表前面插入自定义规则

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::markers::MarkerRule;
use crate::utils::read_json;

/// 配置文件中的一条自定义规则
#[derive(Debug, Deserialize)]
pub struct UserMarker {
    pub marker: String,
    pub program: String,
    #[serde(default)]
    pub prefix_args: Vec<String>,
    /// 省略时以 program 作为展示名
    pub label: Option<String>,
}

/// 配置文件结构：{ "markers": [...] }
#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub markers: Vec<UserMarker>,
}

impl From<UserMarker> for MarkerRule {
    fn from(user: UserMarker) -> Self {
        let label = user.label.unwrap_or_else(|| user.program.clone());
        MarkerRule {
            marker: user.marker,
            program: user.program,
            prefix_args: user.prefix_args,
            label,
        }
    }
}

/// 配置文件路径：RUNUP_CONFIG 环境变量优先，其次 <config_dir>/runup/config.json
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("RUNUP_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("runup").join("config.json"))
}

/// 读取用户自定义规则
///
/// 配置文件不存在时返回空表；存在但无法解析时是硬错误，
/// 静默忽略坏配置会让优先级悄悄变化。
pub fn load_user_markers() -> Result<Vec<MarkerRule>> {
    let path = match config_path() {
        Some(path) => path,
        None => return Ok(vec![]),
    };
    load_user_markers_from(&path)
}

fn load_user_markers_from(path: &Path) -> Result<Vec<MarkerRule>> {
    if !path.is_file() {
        return Ok(vec![]);
    }

    let config: UserConfig =
        read_json(path).with_context(|| format!("Invalid runup config: {}", path.display()))?;

    Ok(config.markers.into_iter().map(MarkerRule::from).collect())
}
