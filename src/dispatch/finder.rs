//! 项目查找
//!
//! 从起始目录开始向上逐级查找 marker 文件。用显式的路径循环
//! 代替递归 + `cd ..`，有固定的深度上限和根目录终止条件。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::markers::MarkerRule;

/// 向上遍历的最大层数
///
/// 起始目录先做 canonicalize，正常路径不会触顶；上限只是
/// 符号链接环的最后一道保险。
pub const MAX_ASCENT: usize = 64;

/// 调度阶段的错误分类，全部不可重试
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 起始目录到文件系统根之间没有任何 marker
    #[error("No project marker found walking up from {}", start.display())]
    NoProjectFound { start: PathBuf },

    /// 起始目录不存在或不可访问，不做任何向上遍历
    #[error("Invalid start directory {}: {}", path.display(), source)]
    InvalidStartDirectory { path: PathBuf, source: io::Error },
}

/// 一次匹配结果：命中的规则与所在目录
#[derive(Debug, Clone)]
pub struct ProjectMatch {
    pub rule: MarkerRule,
    pub dir: PathBuf,
}

/// 向上查找最近的项目目录
///
/// 每层目录按 `rules` 的顺序逐条检查，第一个命中的规则即为
/// 结果。规则顺序就是优先级，同目录多个 marker 时的选择因此
/// 是确定的。
pub fn find_project(start: &Path, rules: &[MarkerRule]) -> Result<ProjectMatch, DispatchError> {
    let mut current =
        fs::canonicalize(start).map_err(|source| DispatchError::InvalidStartDirectory {
            path: start.to_path_buf(),
            source,
        })?;

    if !current.is_dir() {
        return Err(DispatchError::InvalidStartDirectory {
            path: start.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    for _ in 0..=MAX_ASCENT {
        for rule in rules {
            if current.join(&rule.marker).is_file() {
                return Ok(ProjectMatch {
                    rule: rule.clone(),
                    dir: current,
                });
            }
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    Err(DispatchError::NoProjectFound {
        start: start.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn rule(marker: &str, program: &str) -> MarkerRule {
        MarkerRule::new(marker, program, &[], program)
    }

    #[test]
    fn test_direct_match_in_start_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();

        let rules = vec![rule("package.json", "npm")];
        let found = find_project(temp.path(), &rules).unwrap();

        assert_eq!(found.rule.program, "npm");
        assert_eq!(found.dir, fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn test_ascends_exactly_one_level() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[package]").unwrap();
        let nested = temp.path().join("src");
        fs::create_dir(&nested).unwrap();

        let rules = vec![rule("Cargo.toml", "cargo")];
        let found = find_project(&nested, &rules).unwrap();

        assert_eq!(found.rule.program, "cargo");
        assert_eq!(found.dir, fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn test_no_marker_anywhere_is_no_project_found() {
        let temp = TempDir::new().unwrap();

        // marker 名足够独特，任何上级目录都不可能命中
        let rules = vec![rule("runup-test-marker-does-not-exist", "nope")];
        let err = find_project(temp.path(), &rules).unwrap_err();

        assert!(matches!(err, DispatchError::NoProjectFound { .. }));
    }

    #[test]
    fn test_marker_must_be_regular_file() {
        let temp = TempDir::new().unwrap();
        // 同名目录不算 marker
        fs::create_dir(temp.path().join("BUILD")).unwrap();

        let rules = vec![rule("BUILD", "blaze")];
        assert!(find_project(temp.path(), &rules).is_err());
    }

    #[test]
    fn test_tie_break_follows_rule_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("BUILD"), "").unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[package]").unwrap();

        let rules = vec![rule("BUILD", "blaze"), rule("Cargo.toml", "cargo")];
        for _ in 0..10 {
            let found = find_project(temp.path(), &rules).unwrap();
            assert_eq!(found.rule.program, "blaze");
        }
    }

    #[test]
    fn test_idempotent_selection() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Makefile"), "all:").unwrap();

        let rules = vec![rule("Makefile", "make")];
        let first = find_project(temp.path(), &rules).unwrap();
        let second = find_project(temp.path(), &rules).unwrap();

        assert_eq!(first.rule, second.rule);
        assert_eq!(first.dir, second.dir);
    }

    #[test]
    fn test_invalid_start_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let rules = vec![rule("Cargo.toml", "cargo")];
        let err = find_project(&missing, &rules).unwrap_err();

        assert!(matches!(err, DispatchError::InvalidStartDirectory { .. }));
    }
}
