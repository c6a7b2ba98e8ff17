//! 配置管理命令

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Subcommand;
use necktrack_control::TrackingConfig;

/// 配置管理子命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 生成默认配置文件
    Init {
        /// 配置文件路径
        #[arg(short, long, default_value = "necktrack.toml")]
        path: PathBuf,

        /// 覆盖已存在的文件
        #[arg(long)]
        force: bool,
    },

    /// 显示配置（文件缺省时显示默认值）
    Show {
        /// 配置文件路径
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

impl ConfigCommand {
    /// 执行配置命令
    pub fn execute(&self) -> Result<()> {
        match self {
            ConfigCommand::Init { path, force } => {
                if path.exists() && !force {
                    bail!(
                        "Config file {} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                let config = TrackingConfig::default();
                config.save_to_file(path)?;
                println!("✅ 已生成默认配置: {}", path.display());
                Ok(())
            },
            ConfigCommand::Show { path } => {
                let config = match path {
                    Some(path) => TrackingConfig::load_from_file(path)?,
                    None => TrackingConfig::default(),
                };
                println!("{}", toml_text(&config)?);
                Ok(())
            },
        }
    }
}

fn toml_text(config: &TrackingConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_text_contains_calibration() {
        let text = toml_text(&TrackingConfig::default()).unwrap();
        assert!(text.contains("center_x = 160"));
        assert!(text.contains("settle_ms = 500"));
    }
}
