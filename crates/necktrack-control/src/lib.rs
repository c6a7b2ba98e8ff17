//! 闭环单轴舵机跟踪控制器
//!
//! 本模块实现颈部舵机的闭环目标跟踪：根据相机观测到的目标
//! 水平坐标与画面中心的偏差，按固定步长调整舵机位置，带
//! 死区、机械限位钳制和稳定延迟。
//!
//! # 分层
//!
//! - [`decide`] - 纯函数单步决策（死区 / 步进方向 / 限位钳制）
//! - [`SettleGate`] - 最小命令间隔策略（替代固定 sleep）
//! - [`TrackingLoop`] - 轮询运行循环，注入执行器 / 感知源 / 时钟
//! - [`StopHandle`] - 协作式停止句柄（替代中断信号终止）
//!
//! # 使用示例
//!
//! ```rust
//! use necktrack_control::{ManualClock, StopHandle, TrackingConfig, TrackingLoop};
//! use necktrack_hal::{Observation, ScriptedPerception, SimServo};
//!
//! # fn main() -> Result<(), necktrack_control::ControlError> {
//! let config = TrackingConfig::default();
//! let servo = SimServo::new(
//!     config.servo_channel,
//!     config.initial_position,
//!     config.min_position,
//!     config.max_position,
//! );
//! let perception = ScriptedPerception::new([Observation::tracked(50)]);
//!
//! let mut tracker = TrackingLoop::new(config, servo, perception, ManualClock::new())?;
//! tracker.initialize()?;
//! tracker.cycle()?;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod runner;
pub mod settle;

// 重新导出常用类型
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TrackingConfig;
pub use controller::{HoldReason, StepDecision, StepDirection, decide};
pub use error::ControlError;
pub use runner::{CycleOutcome, StopHandle, TrackingLoop, TrackingPhase, TrackingState};
pub use settle::SettleGate;
