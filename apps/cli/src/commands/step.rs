//! 单步决策评估命令
//!
//! 不触碰任何硬件，只打印给定观测和位置下控制器会做什么。
//! 用于调试标定参数。

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use necktrack_control::{StepDecision, StepDirection, TrackingConfig, decide};

/// 单步评估命令参数
#[derive(Args, Debug)]
pub struct StepCommand {
    /// 目标中心的水平坐标（像素）
    #[arg(long)]
    pub observed_x: i32,

    /// 当前舵机位置（刻度）
    #[arg(long)]
    pub position: i32,

    /// 配置文件路径（缺省用默认标定）
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl StepCommand {
    /// 执行单步评估
    pub fn execute(&self) -> Result<()> {
        let config = match &self.config {
            Some(path) => TrackingConfig::load_from_file(path)?,
            None => TrackingConfig::default(),
        };

        let delta = self.observed_x - config.center_x;
        println!("📊 delta = {} (observed_x={}, center_x={})", delta, self.observed_x, config.center_x);

        match decide(&config, self.observed_x, self.position) {
            StepDecision::Move {
                direction,
                step,
                target,
            } => {
                let arrow = match direction {
                    StepDirection::Increase => "增量（右转）",
                    StepDirection::Decrease => "减量（左转）",
                };
                println!("➡️  移动: {} {} 刻度, {} -> {}", arrow, step, self.position, target);
            },
            StepDecision::Hold(reason) => {
                println!("⏸️  保持不动: {:?}", reason);
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_command_uses_default_config() {
        let cmd = StepCommand {
            observed_x: 50,
            position: 94,
            config: None,
        };
        // 默认标定下不会出错
        cmd.execute().unwrap();
    }
}
