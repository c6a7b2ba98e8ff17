//! 步进决策核心
//!
//! 纯函数实现的单步决策：给定目标观测坐标和当前舵机位置，
//! 输出"移动一步"或"保持不动"。不触碰硬件、不涉及时间，
//! 稳定延迟和命令下发由运行循环负责。
//!
//! # 决策规则
//!
//! 1. `delta = observed_x - center_x`
//! 2. `delta < -threshold`：目标在中心左侧 → 向上限方向步进（未到上限时）
//! 3. `delta > threshold`：目标在中心右侧 → 向下限方向步进（未到下限时）
//! 4. `|delta| <= threshold`：死区内 → 保持不动
//!
//! 移动目标位置总是钳制在 `[min_position, max_position]` 内；
//! 已在限位处时保持不动是正常稳态，不是错误。

use crate::config::TrackingConfig;

/// 步进方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// 位置增大（向机械上限）
    Increase,
    /// 位置减小（向机械下限）
    Decrease,
}

/// 保持不动的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    /// 目标在死区内，已经足够居中
    Centered,
    /// 需要增大位置但已在机械上限
    AtUpperLimit,
    /// 需要减小位置但已在机械下限
    AtLowerLimit,
}

/// 单步决策结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDecision {
    /// 发出一条固定步长的移动命令
    Move {
        direction: StepDirection,
        /// 步长（刻度）
        step: i32,
        /// 钳制后的目标位置
        target: i32,
    },
    /// 本周期不发命令
    Hold(HoldReason),
}

impl StepDecision {
    /// 是否为移动决策
    pub fn is_move(&self) -> bool {
        matches!(self, StepDecision::Move { .. })
    }
}

/// 计算单步决策
///
/// # 参数
///
/// - `config`: 跟踪配置（中心参考、死区、步长、限位）
/// - `observed_x`: 目标中心的水平坐标（像素），调用方保证有效
/// - `current_position`: 当前舵机位置（刻度）
///
/// # 示例
///
/// ```rust
/// use necktrack_control::{decide, StepDecision, StepDirection, TrackingConfig};
///
/// let config = TrackingConfig::default();
/// // 目标在画面左侧，舵机右移一步
/// let decision = decide(&config, 50, 70);
/// assert!(matches!(
///     decision,
///     StepDecision::Move { direction: StepDirection::Increase, step: 10, target: 80 }
/// ));
/// ```
pub fn decide(config: &TrackingConfig, observed_x: i32, current_position: i32) -> StepDecision {
    let delta = observed_x - config.center_x;

    if delta < -config.threshold {
        // 目标在中心左侧 → 颈部右转（位置增大）
        if current_position < config.max_position {
            StepDecision::Move {
                direction: StepDirection::Increase,
                step: config.step_size,
                target: (current_position + config.step_size).min(config.max_position),
            }
        } else {
            StepDecision::Hold(HoldReason::AtUpperLimit)
        }
    } else if delta > config.threshold {
        // 目标在中心右侧 → 颈部左转（位置减小）
        if current_position > config.min_position {
            StepDecision::Move {
                direction: StepDirection::Decrease,
                step: config.step_size,
                target: (current_position - config.step_size).max(config.min_position),
            }
        } else {
            StepDecision::Hold(HoldReason::AtLowerLimit)
        }
    } else {
        StepDecision::Hold(HoldReason::Centered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 标定常数：center_x=160, threshold=70, step=10, min=42, max=100
    fn config() -> TrackingConfig {
        TrackingConfig::default()
    }

    #[test]
    fn test_deadband_holds() {
        // delta = 0
        assert_eq!(
            decide(&config(), 160, 70),
            StepDecision::Hold(HoldReason::Centered)
        );
        // delta = ±70，恰好在死区边界上
        assert_eq!(
            decide(&config(), 90, 70),
            StepDecision::Hold(HoldReason::Centered)
        );
        assert_eq!(
            decide(&config(), 230, 70),
            StepDecision::Hold(HoldReason::Centered)
        );
    }

    #[test]
    fn test_target_left_steps_toward_max() {
        // delta = 50 - 160 = -110 < -70
        let decision = decide(&config(), 50, 70);
        assert_eq!(
            decision,
            StepDecision::Move {
                direction: StepDirection::Increase,
                step: 10,
                target: 80,
            }
        );
    }

    #[test]
    fn test_target_right_steps_toward_min() {
        // delta = 280 - 160 = 120 > 70
        let decision = decide(&config(), 280, 70);
        assert_eq!(
            decision,
            StepDecision::Move {
                direction: StepDirection::Decrease,
                step: 10,
                target: 60,
            }
        );
    }

    #[test]
    fn test_move_target_clamped_at_max() {
        // 94 + 10 = 104 > 100，目标钳制到 100
        let decision = decide(&config(), 50, 94);
        assert_eq!(
            decision,
            StepDecision::Move {
                direction: StepDirection::Increase,
                step: 10,
                target: 100,
            }
        );
    }

    #[test]
    fn test_move_target_clamped_at_min() {
        // 45 - 10 = 35 < 42，目标钳制到 42
        let decision = decide(&config(), 280, 45);
        assert_eq!(
            decision,
            StepDecision::Move {
                direction: StepDirection::Decrease,
                step: 10,
                target: 42,
            }
        );
    }

    #[test]
    fn test_at_max_holds() {
        // delta = -110，但已在上限 100
        assert_eq!(
            decide(&config(), 50, 100),
            StepDecision::Hold(HoldReason::AtUpperLimit)
        );
    }

    #[test]
    fn test_at_min_holds() {
        assert_eq!(
            decide(&config(), 280, 42),
            StepDecision::Hold(HoldReason::AtLowerLimit)
        );
    }

    #[test]
    fn test_limit_hold_is_idempotent() {
        // 同样输入重复决策，始终是 Hold，不会变成错误
        for _ in 0..10 {
            assert_eq!(
                decide(&config(), 50, 100),
                StepDecision::Hold(HoldReason::AtUpperLimit)
            );
        }
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        // delta = -71 触发移动，delta = -70 不触发
        assert!(decide(&config(), 89, 70).is_move());
        assert!(!decide(&config(), 90, 70).is_move());
        // 对称：delta = 71 触发，delta = 70 不触发
        assert!(decide(&config(), 231, 70).is_move());
        assert!(!decide(&config(), 230, 70).is_move());
    }
}
