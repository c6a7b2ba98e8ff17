//! 跟踪运行循环
//!
//! 单线程协作式轮询循环，是 `TrackingState` 的唯一所有者和修改者。
//! 每个周期：轮询感知源 → 按需计算并发出一条移动命令 →
//! 等待稳定间隔 → 重复，直到停止句柄被触发。
//!
//! # 停止语义
//!
//! 循环不依赖语言级中断信号，而是在每个周期之间检查
//! [`StopHandle`]。CLI 把 Ctrl-C 接到句柄上，循环在周期边界
//! 观察到停止请求后优雅退出，并按配置归位舵机。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, trace};

use necktrack_hal::{PerceptionSource, ServoActuator};

use crate::clock::Clock;
use crate::config::TrackingConfig;
use crate::controller::{HoldReason, StepDecision, StepDirection, decide};
use crate::error::ControlError;
use crate::settle::SettleGate;

/// 停止句柄（Clone 共享同一标志）
///
/// # 示例
///
/// ```rust
/// use necktrack_control::StopHandle;
///
/// let stop = StopHandle::new();
/// let handle = stop.clone();
/// assert!(!stop.is_stopped());
/// handle.stop();
/// assert!(stop.is_stopped());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求停止（可从任意线程调用，如信号处理器）
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// 是否已请求停止
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// 循环阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingPhase {
    /// 等待目标出现
    #[default]
    AwaitingTarget,
    /// 正在评估/调整
    Adjusting,
    /// 移动命令已发出，等待稳定间隔
    Settling,
}

/// 跟踪状态
///
/// 不变式：初始化完成后，`current_position` 始终在
/// `[min_position, max_position]` 内。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackingState {
    /// 当前舵机位置（镜像自执行器读数）
    pub current_position: i32,
    /// 最近一次观测到的目标中心坐标
    pub target_center_x: Option<i32>,
    /// 相机是否正在跟踪目标
    pub is_tracking: bool,
    /// 当前循环阶段
    pub phase: TrackingPhase,
}

/// 单个控制周期的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 无目标，本周期空转
    Idle,
    /// 正在跟踪但观测坐标缺失，本周期不动作
    MissingObservation,
    /// 有观测但决策为保持不动
    Held(HoldReason),
    /// 发出了一条移动命令
    Moved {
        direction: StepDirection,
        /// 命令后的舵机位置
        position: i32,
    },
}

/// 跟踪运行循环
///
/// 泛型注入三个协作者：舵机执行器、感知源、时钟。
/// 测试时用仿真后端 + 手动时钟，部署时换真实实现即可。
pub struct TrackingLoop<A, P, C> {
    config: TrackingConfig,
    actuator: A,
    perception: P,
    clock: C,
    gate: SettleGate,
    state: TrackingState,
}

impl<A, P, C> TrackingLoop<A, P, C>
where
    A: ServoActuator,
    P: PerceptionSource,
    C: Clock,
{
    /// 创建运行循环
    ///
    /// # 错误
    ///
    /// 配置校验失败时返回 [`ControlError::InvalidConfig`]。
    pub fn new(
        config: TrackingConfig,
        actuator: A,
        perception: P,
        clock: C,
    ) -> Result<Self, ControlError> {
        config.validate()?;
        let gate = SettleGate::new(std::time::Duration::from_millis(config.settle_ms));
        Ok(Self {
            config,
            actuator,
            perception,
            clock,
            gate,
            state: TrackingState::default(),
        })
    }

    /// 当前跟踪状态（只读）
    pub fn state(&self) -> &TrackingState {
        &self.state
    }

    /// 初始化舵机
    ///
    /// 命令舵机到初始位置并**阻塞等待到位**，然后设置速度。
    /// 这样进入控制循环时舵机处于已知稳定状态，不会在
    /// 初始化尚未完成时叠加后续命令。
    pub fn initialize(&mut self) -> Result<(), ControlError> {
        info!(
            channel = self.config.servo_channel,
            position = self.config.initial_position,
            "Initializing neck servo"
        );
        self.actuator.set_position(self.config.initial_position)?;
        self.actuator.wait_until_position(self.config.initial_position)?;
        self.actuator.set_speed(self.config.speed)?;

        self.state.current_position = self.config.initial_position;
        self.state.phase = TrackingPhase::AwaitingTarget;
        self.gate.reset();

        info!(
            position = self.config.initial_position,
            speed = self.config.speed,
            "Neck servo initialized"
        );
        Ok(())
    }

    /// 执行一个控制周期
    ///
    /// 观测缺失和限位到达不是错误，通过 [`CycleOutcome`] 上报；
    /// 只有执行器通信失败才返回 `Err`。
    pub fn cycle(&mut self) -> Result<CycleOutcome, ControlError> {
        // 1. 轮询感知源
        let obs = self.perception.poll();
        self.state.is_tracking = obs.tracking;
        self.state.target_center_x = obs.center_x;

        if !obs.tracking {
            // 无目标：正常状态，下周期重新轮询
            self.state.phase = TrackingPhase::AwaitingTarget;
            trace!("No target tracked, idling");
            self.clock
                .sleep(std::time::Duration::from_millis(self.config.idle_poll_ms));
            return Ok(CycleOutcome::Idle);
        }

        let Some(observed_x) = obs.center_x else {
            // 跟踪中但本帧坐标缺失：不动作，不重试
            debug!("Tracking active but object position unavailable this cycle");
            self.clock
                .sleep(std::time::Duration::from_millis(self.config.idle_poll_ms));
            return Ok(CycleOutcome::MissingObservation);
        };

        // 2. 等待稳定间隔期满
        if let Some(remaining) = self.gate.remaining(self.clock.now()) {
            self.state.phase = TrackingPhase::Settling;
            trace!(remaining_ms = remaining.as_millis() as u64, "Settling");
            self.clock.sleep(remaining);
        }
        self.state.phase = TrackingPhase::Adjusting;

        // 3. 计算并执行单步决策
        let current = self.actuator.position()?;
        let delta = observed_x - self.config.center_x;

        match decide(&self.config, observed_x, current) {
            StepDecision::Move {
                direction,
                step,
                target,
            } => {
                match direction {
                    StepDirection::Increase => {
                        info!(delta, from = current, to = target, "Object left, moving neck right");
                        self.actuator.increment(step)?;
                    },
                    StepDirection::Decrease => {
                        info!(delta, from = current, to = target, "Object right, moving neck left");
                        self.actuator.decrement(step)?;
                    },
                }
                // 4. 记录命令时间，下一步进入稳定等待
                self.gate.record_command(self.clock.now());
                self.state.current_position = self.actuator.position()?;
                self.state.phase = TrackingPhase::Settling;
                Ok(CycleOutcome::Moved {
                    direction,
                    position: self.state.current_position,
                })
            },
            StepDecision::Hold(reason) => {
                self.state.current_position = current;
                match reason {
                    HoldReason::Centered => {
                        trace!(delta, position = current, "Object centered, holding");
                    },
                    HoldReason::AtUpperLimit => {
                        info!(delta, position = current, "Object left, but neck already at max limit");
                    },
                    HoldReason::AtLowerLimit => {
                        info!(delta, position = current, "Object right, but neck already at min limit");
                    },
                }
                Ok(CycleOutcome::Held(reason))
            },
        }
    }

    /// 运行直到停止句柄被触发
    ///
    /// 初始化舵机后进入轮询循环；停止请求只在周期边界被观察到。
    /// 退出前按配置归位舵机。
    pub fn run(&mut self, stop: &StopHandle) -> Result<(), ControlError> {
        self.initialize()?;
        info!("Starting tracking loop");

        while !stop.is_stopped() {
            self.cycle()?;
        }

        info!("Stop requested, shutting down tracking loop");
        self.shutdown()
    }

    /// 优雅停机：按配置归位舵机
    fn shutdown(&mut self) -> Result<(), ControlError> {
        if let Some(park) = self.config.park_position {
            info!(position = park, "Parking neck servo");
            self.actuator.set_position(park)?;
            self.actuator.wait_until_position(park)?;
            self.state.current_position = park;
        }
        self.state.phase = TrackingPhase::AwaitingTarget;
        info!("Tracking loop stopped");
        Ok(())
    }

    /// 拆出协作者（测试后检查仿真硬件状态）
    pub fn into_parts(self) -> (A, P, C) {
        (self.actuator, self.perception, self.clock)
    }
}
