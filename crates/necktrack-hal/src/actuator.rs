//! 舵机执行器接口
//!
//! 对应物理硬件上的单轴颈部舵机。具体实现持有自己的通道/引脚标识，
//! 控制层只通过本 trait 与硬件交互。

use crate::error::HalError;

/// 单轴舵机执行器接口
///
/// **契约**：
/// - 位置为整数刻度（舵机固件的原生单位），不做角度换算。
/// - `increment` / `decrement` 由实现方在机械限位处结构性钳制，
///   绝不允许实际位置越过限位（控制层的限位检查是第二道防线）。
/// - 所有方法失败时返回 [`HalError`]，由调用方决定如何处理。
pub trait ServoActuator {
    /// 命令舵机移动到绝对位置
    fn set_position(&mut self, position: i32) -> Result<(), HalError>;

    /// 读取当前位置
    fn position(&self) -> Result<i32, HalError>;

    /// 设置舵机运动速度
    fn set_speed(&mut self, speed: u8) -> Result<(), HalError>;

    /// 阻塞等待舵机到达指定位置
    ///
    /// 用于初始化：在进入控制循环前确保舵机已经稳定在已知位置。
    /// 实现方应在合理时间内返回 [`HalError::WaitTimeout`] 而不是永久阻塞。
    fn wait_until_position(&mut self, position: i32) -> Result<(), HalError>;

    /// 相对移动：位置增加 `step` 刻度（向机械上限方向）
    fn increment(&mut self, step: i32) -> Result<(), HalError>;

    /// 相对移动：位置减少 `step` 刻度（向机械下限方向）
    fn decrement(&mut self, step: i32) -> Result<(), HalError>;
}
