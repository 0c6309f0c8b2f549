//! 作者统计
//!
//! 按提交数降序列出仓库的所有作者

use anyhow::Result;
use colored::*;
use std::collections::HashMap;
use std::path::Path;

use super::git_command;

/// 统计 (作者, 提交数)
///
/// 按提交数降序排序，同数时按名字排序，保证输出稳定。
pub fn author_counts(cwd: Option<&Path>) -> Result<Vec<(String, usize)>> {
    let output = git_command(&["log", "--format=%aN"], cwd)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for line in output.lines().filter(|l| !l.is_empty()) {
        *counts.entry(line.to_string()).or_insert(0) += 1;
    }

    let mut list: Vec<(String, usize)> = counts.into_iter().collect();
    list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(list)
}

/// 打印作者列表
pub fn print_authors(cwd: Option<&Path>) -> Result<()> {
    let list = author_counts(cwd)?;

    if list.is_empty() {
        println!("{}", "No commits yet".yellow());
        return Ok(());
    }

    let width = list
        .iter()
        .map(|(_, count)| count.to_string().len())
        .max()
        .unwrap_or(1);

    println!("{}", "👥 Commits per author:".cyan().bold());
    for (name, count) in &list {
        // 先对齐再上色，避免 ANSI 码干扰宽度计算
        let padded = format!("{:>width$}", count, width = width);
        println!("  {} {}", padded.green(), name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::{init_repo, run};
    use tempfile::TempDir;

    fn commit_as(dir: &Path, name: &str, message: &str) {
        run(
            dir,
            &[
                "-c",
                &format!("user.name={}", name),
                "-c",
                "user.email=test@example.com",
                "commit",
                "--allow-empty",
                "-m",
                message,
            ],
        );
    }

    #[test]
    fn test_author_counts_sorted_descending() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());

        commit_as(repo.path(), "Alice", "a1");
        commit_as(repo.path(), "Alice", "a2");
        commit_as(repo.path(), "Bob", "b1");

        let list = author_counts(Some(repo.path())).unwrap();

        // init_repo 的初始提交来自 Test User
        assert_eq!(list[0], ("Alice".to_string(), 2));
        assert!(list.contains(&("Bob".to_string(), 1)));
        assert!(list.contains(&("Test User".to_string(), 1)));
    }

    #[test]
    fn test_equal_counts_tie_break_by_name() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());

        commit_as(repo.path(), "Zed", "z1");
        commit_as(repo.path(), "Amy", "a1");

        let list = author_counts(Some(repo.path())).unwrap();
        let names: Vec<&str> = list.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Test User", "Zed"]);
    }
}
