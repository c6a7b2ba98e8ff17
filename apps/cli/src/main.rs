//! # necktrack CLI
//!
//! 颈部舵机跟踪控制器的命令行工具。
//!
//! ```bash
//! # 生成默认配置文件
//! necktrack-cli config init --path necktrack.toml
//!
//! # 仿真模式运行跟踪循环（Ctrl-C 优雅退出）
//! necktrack-cli run --config necktrack.toml
//!
//! # 单步决策评估（调试用）
//! necktrack-cli step --observed-x 50 --position 94
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{ConfigCommand, RunCommand, StepCommand};

/// necktrack CLI - 舵机跟踪控制命令行工具
#[derive(Parser, Debug)]
#[command(name = "necktrack-cli")]
#[command(about = "Command-line interface for the necktrack servo tracking controller", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 运行跟踪循环（仿真后端）
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 单步决策评估
    Step {
        #[command(flatten)]
        args: StepCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("necktrack_control=info".parse().unwrap())
                .add_directive("necktrack_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),
        Commands::Run { args } => args.execute(),
        Commands::Step { args } => args.execute(),
    }
}
