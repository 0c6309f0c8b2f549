//! 批量 rebase
//!
//! 把所有其他本地分支逐个 rebase 到当前分支。每个分支独立
//! best-effort：冲突时 abort 该分支并继续下一个，最后汇总。

use anyhow::Result;
use colored::*;
use std::io::{self, Write};
use std::path::Path;

use super::{current_branch, git_command, local_branches};

/// rebase 所有其他本地分支到当前分支，结束后回到出发分支
pub fn rebase_all(cwd: Option<&Path>) -> Result<()> {
    let base = current_branch(cwd)?;
    let branches = local_branches(cwd)?;

    let others: Vec<&String> = branches.iter().filter(|b| **b != base).collect();
    if others.is_empty() {
        println!("{}", "No other local branches to rebase".yellow());
        return Ok(());
    }

    println!(
        "🔀 Rebasing {} branch(es) onto {}",
        others.len(),
        base.cyan()
    );

    let mut rebased = Vec::new();
    let mut failed = Vec::new();

    for branch in others {
        print!("   {} ... ", branch.yellow());
        io::stdout().flush().ok();

        // `git rebase <base> <branch>` 会先 checkout branch
        match git_command(&["rebase", &base, branch], cwd) {
            Ok(_) => {
                println!("{}", "✓".green());
                rebased.push(branch.clone());
            }
            Err(_) => {
                // 中断未完成的 rebase，保持工作区干净
                let _ = git_command(&["rebase", "--abort"], cwd);
                println!("{}", "✗".red());
                failed.push(branch.clone());
            }
        }
    }

    git_command(&["checkout", &base], cwd)?;

    println!();
    println!(
        "✅ {} rebased, {} with conflicts",
        rebased.len().to_string().green(),
        failed.len().to_string().red()
    );

    if !failed.is_empty() {
        println!(
            "{}",
            format!("⚠️  Resolve manually: {}", failed.join(", ")).yellow()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::{commit, init_repo, run};
    use tempfile::TempDir;

    #[test]
    fn test_rebase_all_moves_branch_onto_base() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());
        run(repo.path(), &["branch", "feature"]);
        commit(repo.path(), "advance main");

        rebase_all(Some(repo.path())).unwrap();

        // rebase 之后 main 是 feature 的祖先
        assert_eq!(current_branch(Some(repo.path())).unwrap(), "main");
        let main_head = git_command(&["rev-parse", "main"], Some(repo.path())).unwrap();
        let merge_base =
            git_command(&["merge-base", "main", "feature"], Some(repo.path())).unwrap();
        assert_eq!(main_head, merge_base);
    }

    #[test]
    fn test_rebase_all_with_single_branch_is_noop() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());

        rebase_all(Some(repo.path())).unwrap();
        assert_eq!(current_branch(Some(repo.path())).unwrap(), "main");
    }

    #[test]
    fn test_rebase_all_continues_past_conflicts() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());

        // conflicted 分支和 main 在同一文件上分叉
        std::fs::write(repo.path().join("file.txt"), "base\n").unwrap();
        run(repo.path(), &["add", "file.txt"]);
        commit(repo.path(), "add file");

        run(repo.path(), &["checkout", "-b", "conflicted"]);
        std::fs::write(repo.path().join("file.txt"), "branch side\n").unwrap();
        run(repo.path(), &["add", "file.txt"]);
        commit(repo.path(), "branch edit");

        run(repo.path(), &["checkout", "main"]);
        std::fs::write(repo.path().join("file.txt"), "main side\n").unwrap();
        run(repo.path(), &["add", "file.txt"]);
        commit(repo.path(), "main edit");

        run(repo.path(), &["branch", "clean"]);

        // 冲突分支被跳过，流程不中断，最后回到 main
        rebase_all(Some(repo.path())).unwrap();
        assert_eq!(current_branch(Some(repo.path())).unwrap(), "main");

        // 仓库没有遗留进行中的 rebase
        assert!(!repo.path().join(".git/rebase-merge").exists());
        assert!(!repo.path().join(".git/rebase-apply").exists());
    }
}
