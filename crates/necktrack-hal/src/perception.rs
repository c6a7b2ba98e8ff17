//! 视觉感知源接口
//!
//! 封装相机目标跟踪状态的轮询读取。每个控制周期读取两个值：
//! 是否正在跟踪目标，以及目标中心的水平坐标。

/// 单次感知轮询的结果快照
///
/// `center_x` 仅在 `tracking == true` 时有意义；即使正在跟踪，
/// 坐标也可能瞬时缺失（相机尚未输出本帧结果），此时为 `None`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// 相机是否正在跟踪目标
    pub tracking: bool,

    /// 目标中心的水平坐标（像素）
    pub center_x: Option<i32>,
}

impl Observation {
    /// 无目标快照
    pub const fn absent() -> Self {
        Self {
            tracking: false,
            center_x: None,
        }
    }

    /// 正在跟踪、坐标有效的快照
    pub const fn tracked(center_x: i32) -> Self {
        Self {
            tracking: true,
            center_x: Some(center_x),
        }
    }
}

/// 视觉感知源接口
///
/// 感知读取是"尽力而为"语义：缺失的观测值不是错误，
/// 控制层对缺失值的处理是本周期不动作，下周期重新轮询。
pub trait PerceptionSource {
    /// 相机当前是否在跟踪目标
    fn is_tracking(&mut self) -> bool;

    /// 被跟踪目标中心的水平坐标（像素）
    ///
    /// 未跟踪或本帧坐标尚不可用时返回 `None`。
    fn object_center_x(&mut self) -> Option<i32>;

    /// 一次轮询同时读取两个值
    fn poll(&mut self) -> Observation {
        let tracking = self.is_tracking();
        let center_x = if tracking { self.object_center_x() } else { None };
        Observation { tracking, center_x }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_constructors() {
        let obs = Observation::absent();
        assert!(!obs.tracking);
        assert!(obs.center_x.is_none());

        let obs = Observation::tracked(160);
        assert!(obs.tracking);
        assert_eq!(obs.center_x, Some(160));
    }
}
