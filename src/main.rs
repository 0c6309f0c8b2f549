use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::env;
use std::path::PathBuf;

use runup::dispatch::{
    config, effective_markers, find_project, run_delegated, DispatchError, ProjectMatch,
    BUILTIN_MARKERS,
};
use runup::utils::display_dir;

/// runup CLI
///
/// 项目感知的构建/测试调度器，附带 git 工作流辅助命令
#[derive(Parser)]
#[command(name = "runup")]
#[command(author, version = env!("APP_VERSION"), about)]
#[command(
    long_about = "Walks up from the current directory to the nearest project marker file\n\
                  (BUILD, Cargo.toml, package.json, ...) and forwards the command to the\n\
                  matching build tool. Also bundles small git workflow helpers."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 探测最近的项目并执行对应工具
    Run {
        /// 起始目录（默认当前目录）
        #[arg(short = 'C', long = "dir")]
        dir: Option<PathBuf>,

        /// 原样转发给工具的参数
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// 等价于 `run test ...`
    Test {
        /// 起始目录（默认当前目录）
        #[arg(short = 'C', long = "dir")]
        dir: Option<PathBuf>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// 等价于 `run build ...`
    Build {
        /// 起始目录（默认当前目录）
        #[arg(short = 'C', long = "dir")]
        dir: Option<PathBuf>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// 只探测不执行，打印匹配的工具和目录
    Which {
        /// 起始目录（默认当前目录）
        #[arg(short = 'C', long = "dir")]
        dir: Option<PathBuf>,
    },

    /// 列出生效的 marker 优先级表
    Markers,

    /// 暂存当前分支并切到默认分支
    StashBranch,

    /// 弹出最近暂存的分支并切回
    UnstashBranch,

    /// 把所有其他本地分支 rebase 到当前分支
    RebaseAll,

    /// 按提交数列出所有作者
    Authors,

    /// 图形化提交日志
    Log {
        /// 显示条数
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// git grep -n 包装
    Grep {
        /// 搜索模式
        pattern: String,
    },

    /// 用 $VISUAL / $EDITOR 打开修改过的文件
    Edit,

    /// 诊断环境和配置
    Doctor,
}

// ═══════════════════════════════════════════════════════════════════
// 项目调度
// ═══════════════════════════════════════════════════════════════════

/// 保留退出码：1 = 没有找到项目，2 = 起始目录无效
fn exit_dispatch_error(err: DispatchError) -> ! {
    match &err {
        DispatchError::NoProjectFound { .. } => {
            eprintln!("{}", format!("❌ {}", err).red());
            eprintln!("💡 See {} for the marker list", "runup markers".cyan());
            std::process::exit(1);
        }
        DispatchError::InvalidStartDirectory { .. } => {
            eprintln!("{}", format!("❌ {}", err).red());
            std::process::exit(2);
        }
    }
}

fn locate(dir: Option<PathBuf>) -> Result<ProjectMatch> {
    let start = match dir {
        Some(dir) => dir,
        None => env::current_dir()?,
    };
    let markers = effective_markers()?;

    match find_project(&start, &markers) {
        Ok(matched) => Ok(matched),
        Err(err) => exit_dispatch_error(err),
    }
}

fn run_project(dir: Option<PathBuf>, args: Vec<String>) -> Result<()> {
    let matched = locate(dir)?;

    println!(
        "🚀 {} project detected at {}",
        matched.rule.label.cyan().bold(),
        display_dir(&matched.dir).yellow()
    );

    // 委托命令的退出码原样透传；spawn 失败归入 2，
    // 不和 NoProjectFound 的保留码 1 混在一起
    let code = match run_delegated(&matched.rule, &matched.dir, &args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", format!("❌ {:#}", err).red());
            std::process::exit(2);
        }
    };
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn which_project(dir: Option<PathBuf>) -> Result<()> {
    let matched = locate(dir)?;

    println!(
        "🔧 Tool: {}",
        matched.rule.command_line(&[]).join(" ").cyan()
    );
    println!("📁 Directory: {}", display_dir(&matched.dir).yellow());
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════
// Marker 列表
// ═══════════════════════════════════════════════════════════════════

fn list_markers() -> Result<()> {
    println!("{}", "📦 Marker priority (first match wins):".cyan().bold());
    println!();

    for rule in config::load_user_markers()? {
        println!(
            "  {} {:<14} → {}  {}",
            "•".green(),
            rule.marker,
            rule.command_line(&[]).join(" ").yellow(),
            "(config)".blue()
        );
    }

    for rule in BUILTIN_MARKERS.iter() {
        println!(
            "  {} {:<14} → {}",
            "•".green(),
            rule.marker,
            rule.command_line(&[]).join(" ").yellow()
        );
    }

    println!();
    println!(
        "💡 Extra markers can be added in {}",
        match config::config_path() {
            Some(path) => display_dir(&path).cyan(),
            None => "a runup config file".cyan(),
        }
    );

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════
// 诊断环境
// ═══════════════════════════════════════════════════════════════════

fn doctor() -> Result<()> {
    use runup::editor::editor_program;
    use runup::git::{git_version, is_git_repo};

    println!("{}", "🔍 runup doctor".cyan().bold());
    println!();

    print!("🔧 git executable... ");
    match git_version() {
        Ok(version) => {
            println!("{}", "✓".green());
            println!("   {}", version.yellow());
        }
        Err(_) => {
            println!("{}", "✗".red());
            println!("   {}", "git not found in PATH".red());
        }
    }

    print!("✎ editor... ");
    println!("{}", editor_program().yellow());

    print!("📁 project detection... ");
    let cwd = env::current_dir()?;
    match find_project(&cwd, &effective_markers()?) {
        Ok(matched) => {
            println!("{}", "✓".green());
            println!(
                "   {} at {}",
                matched.rule.label.yellow(),
                display_dir(&matched.dir).yellow()
            );
        }
        Err(_) => {
            println!("{}", "✗".red());
            println!("   {}", "no marker found up to filesystem root".yellow());
        }
    }

    print!("🗂️  git repository... ");
    if is_git_repo(None) {
        println!("{}", "✓".green());
    } else {
        println!("{}", "− not inside a repository".yellow());
    }

    print!("⚙️  config file... ");
    match config::config_path() {
        Some(path) if path.is_file() => {
            println!("{}", "✓".green());
            println!("   {}", display_dir(&path).yellow());
        }
        Some(path) => {
            println!("{} {}", "−".yellow(), "none (using built-ins)".yellow());
            println!("   would be read from {}", display_dir(&path));
        }
        None => println!("{}", "− no config directory".yellow()),
    }

    println!();
    println!("{}", "✅ Diagnostic complete".green().bold());

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════
// Git 辅助命令
// ═══════════════════════════════════════════════════════════════════

/// 透传型命令的退出码处理
fn passthrough(result: Result<i32>) -> Result<()> {
    let code = result?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { dir, args } => run_project(dir, args),
        Commands::Test { dir, args } => {
            let mut full = vec!["test".to_string()];
            full.extend(args);
            run_project(dir, full)
        }
        Commands::Build { dir, args } => {
            let mut full = vec!["build".to_string()];
            full.extend(args);
            run_project(dir, full)
        }
        Commands::Which { dir } => which_project(dir),
        Commands::Markers => list_markers(),
        Commands::StashBranch => runup::git::stash::stash_branch(None),
        Commands::UnstashBranch => runup::git::stash::unstash_branch(None),
        Commands::RebaseAll => runup::git::rebase::rebase_all(None),
        Commands::Authors => runup::git::authors::print_authors(None),
        Commands::Log { limit } => passthrough(runup::git::logview::show_log(limit, None)),
        Commands::Grep { pattern } => passthrough(runup::git::logview::grep(&pattern, None)),
        Commands::Edit => passthrough(runup::editor::edit_changed(None)),
        Commands::Doctor => doctor(),
    }
}
