//! 硬件抽象层模块
//!
//! 本模块定义 necktrack 控制器依赖的两个外部协作者接口：
//! - [`ServoActuator`] - 单轴舵机执行器（颈部左右转动）
//! - [`PerceptionSource`] - 视觉感知源（相机目标跟踪状态）
//!
//! # 设计理念
//!
//! 控制逻辑不直接访问硬件，而是通过注入的 trait 对象访问。
//! 这样可以在没有物理硬件的情况下进行确定性单元测试。
//!
//! # 仿真后端
//!
//! [`sim`] 模块提供内存仿真实现（[`SimServo`]、[`ScriptedPerception`]），
//! 用于测试和无硬件演示。

pub mod actuator;
pub mod error;
pub mod perception;
pub mod sim;

// 重新导出常用类型
pub use actuator::ServoActuator;
pub use error::HalError;
pub use perception::{Observation, PerceptionSource};
pub use sim::{CommandJournal, ScriptedPerception, ServoCommand, SimServo};
