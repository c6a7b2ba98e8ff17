//! 跟踪循环运行命令（仿真后端）
//!
//! 没有真实硬件时的演示/验证模式：仿真舵机 + 脚本感知源。
//! 脚本让目标从画面左侧扫到右侧再扫回来，随后离开画面，
//! 循环进入等待状态直到 Ctrl-C。

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use necktrack_control::{StopHandle, SystemClock, TrackingConfig, TrackingLoop};
use necktrack_hal::{Observation, ScriptedPerception, SimServo};

/// 运行命令参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 配置文件路径（缺省用默认标定）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 仿真目标扫动的帧数
    #[arg(long, default_value_t = 120)]
    pub sweep_frames: usize,

    /// 停机时归位到初始位置
    #[arg(long)]
    pub park: bool,
}

impl RunCommand {
    /// 执行跟踪循环
    pub fn execute(&self) -> Result<()> {
        let mut config = match &self.config {
            Some(path) => TrackingConfig::load_from_file(path)?,
            None => TrackingConfig::default(),
        };
        if self.park {
            config.park_position = Some(config.initial_position);
        }

        println!("🤖 仿真模式: 舵机通道 {}, 范围 [{}, {}]", config.servo_channel, config.min_position, config.max_position);

        let servo = SimServo::new(
            config.servo_channel,
            config.initial_position,
            config.min_position,
            config.max_position,
        );
        let perception = ScriptedPerception::new(sweep_script(self.sweep_frames));

        // Ctrl-C -> 停止句柄，循环在周期边界优雅退出
        let stop = StopHandle::new();
        let handler = stop.clone();
        ctrlc::set_handler(move || {
            eprintln!("\nReceived interrupt signal. Shutting down...");
            handler.stop();
        })?;

        let mut tracker = TrackingLoop::new(config, servo, perception, SystemClock::new())?;
        tracker.run(&stop)?;

        let state = *tracker.state();
        info!(position = state.current_position, "Final servo position");
        println!("👋 已停止, 最终位置 {}", state.current_position);
        Ok(())
    }
}

/// 生成仿真目标的扫动脚本
///
/// 目标从 x=20 线性移动到 x=300 再返回，之后离开画面。
fn sweep_script(frames: usize) -> Vec<Observation> {
    let half = (frames / 2).max(1) as i32;
    let mut script = Vec::with_capacity(frames);
    for i in 0..frames as i32 {
        let phase = i % (2 * half);
        let x = if phase < half {
            20 + (300 - 20) * phase / half
        } else {
            300 - (300 - 20) * (phase - half) / half
        };
        script.push(Observation::tracked(x));
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_script_covers_both_sides() {
        let script = sweep_script(120);
        assert_eq!(script.len(), 120);
        // 扫动覆盖中心两侧
        assert!(script.iter().any(|o| o.center_x.unwrap() < 90));
        assert!(script.iter().any(|o| o.center_x.unwrap() > 230));
        // 全部为跟踪帧
        assert!(script.iter().all(|o| o.tracking));
    }

    #[test]
    fn test_sweep_script_stays_in_frame() {
        for frames in [1, 2, 3, 120] {
            for obs in sweep_script(frames) {
                let x = obs.center_x.unwrap();
                assert!((20..=300).contains(&x), "x={} out of sweep range", x);
            }
        }
    }
}
