//! 内存仿真后端
//!
//! 提供无硬件的 [`ServoActuator`] / [`PerceptionSource`] 实现：
//! - [`SimServo`] - 瞬时到位的仿真舵机，带命令日志（供测试断言）
//! - [`ScriptedPerception`] - 按脚本逐帧回放的感知源
//!
//! 仿真舵机在机械限位处结构性钳制相对移动，与真实舵机固件行为一致。

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::actuator::ServoActuator;
use crate::error::HalError;
use crate::perception::{Observation, PerceptionSource};

/// 仿真舵机收到的一条命令记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoCommand {
    /// 绝对位置命令
    SetPosition(i32),
    /// 速度设置命令
    SetSpeed(u8),
    /// 相对增量命令（`from` -> `to`，`to` 已钳制）
    Increment { step: i32, from: i32, to: i32 },
    /// 相对减量命令（`from` -> `to`，`to` 已钳制）
    Decrement { step: i32, from: i32, to: i32 },
}

/// 命令日志句柄（Clone 是轻量的，Arc 指针）
///
/// 测试代码持有此句柄，在控制循环运行后检查舵机实际收到的命令序列。
#[derive(Debug, Clone, Default)]
pub struct CommandJournal {
    entries: Arc<Mutex<Vec<ServoCommand>>>,
}

impl CommandJournal {
    /// 记录一条命令
    fn record(&self, cmd: ServoCommand) {
        self.entries.lock().push(cmd);
    }

    /// 当前全部命令的快照
    pub fn snapshot(&self) -> Vec<ServoCommand> {
        self.entries.lock().clone()
    }

    /// 已记录的命令条数
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// 是否尚未记录任何命令
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// 仅统计相对移动命令（增量/减量）的条数
    pub fn movement_count(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|cmd| matches!(cmd, ServoCommand::Increment { .. } | ServoCommand::Decrement { .. }))
            .count()
    }
}

/// 仿真舵机
///
/// 瞬时到位（`wait_until_position` 不耗时），位置始终保持在
/// `[min, max]` 机械范围内。所有收到的命令都写入命令日志。
#[derive(Debug)]
pub struct SimServo {
    /// 通道/引脚标识（仅用于日志和错误信息）
    channel: u8,
    position: i32,
    speed: u8,
    /// 机械限位
    min: i32,
    max: i32,
    journal: CommandJournal,
}

impl SimServo {
    /// 创建仿真舵机
    ///
    /// `initial` 必须在 `[min, max]` 内，否则按限位钳制。
    pub fn new(channel: u8, initial: i32, min: i32, max: i32) -> Self {
        Self {
            channel,
            position: initial.clamp(min, max),
            speed: 0,
            min,
            max,
            journal: CommandJournal::default(),
        }
    }

    /// 获取命令日志句柄
    pub fn journal(&self) -> CommandJournal {
        self.journal.clone()
    }

    /// 当前速度设置
    pub fn speed(&self) -> u8 {
        self.speed
    }
}

impl ServoActuator for SimServo {
    fn set_position(&mut self, position: i32) -> Result<(), HalError> {
        if position < self.min || position > self.max {
            return Err(HalError::PositionOutOfRange {
                position,
                min: self.min,
                max: self.max,
            });
        }
        trace!(channel = self.channel, position, "sim servo set_position");
        self.position = position;
        self.journal.record(ServoCommand::SetPosition(position));
        Ok(())
    }

    fn position(&self) -> Result<i32, HalError> {
        Ok(self.position)
    }

    fn set_speed(&mut self, speed: u8) -> Result<(), HalError> {
        self.speed = speed;
        self.journal.record(ServoCommand::SetSpeed(speed));
        Ok(())
    }

    fn wait_until_position(&mut self, position: i32) -> Result<(), HalError> {
        // 仿真舵机瞬时到位；位置不符说明命令序列有误
        if self.position != position {
            return Err(HalError::WaitTimeout {
                target: position,
                waited_ms: 0,
            });
        }
        Ok(())
    }

    fn increment(&mut self, step: i32) -> Result<(), HalError> {
        let from = self.position;
        // 限位处结构性钳制
        let to = (from + step).min(self.max);
        self.position = to;
        self.journal.record(ServoCommand::Increment { step, from, to });
        Ok(())
    }

    fn decrement(&mut self, step: i32) -> Result<(), HalError> {
        let from = self.position;
        let to = (from - step).max(self.min);
        self.position = to;
        self.journal.record(ServoCommand::Decrement { step, from, to });
        Ok(())
    }
}

/// 按脚本回放的感知源
///
/// 每个控制周期消耗一帧脚本。脚本耗尽后，根据 `hold_last`
/// 决定是保持最后一帧还是回到"无目标"状态。
#[derive(Debug)]
pub struct ScriptedPerception {
    frames: VecDeque<Observation>,
    current: Observation,
    hold_last: bool,
}

impl ScriptedPerception {
    /// 从帧序列创建
    pub fn new(frames: impl IntoIterator<Item = Observation>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            current: Observation::absent(),
            hold_last: false,
        }
    }

    /// 脚本耗尽后保持最后一帧
    pub fn hold_last(mut self) -> Self {
        self.hold_last = true;
        self
    }

    /// 剩余未回放的帧数
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    fn advance(&mut self) {
        match self.frames.pop_front() {
            Some(frame) => self.current = frame,
            None if self.hold_last => {},
            None => self.current = Observation::absent(),
        }
    }
}

impl PerceptionSource for ScriptedPerception {
    fn is_tracking(&mut self) -> bool {
        // 每次跟踪状态查询推进一帧脚本（对应一个控制周期）
        self.advance();
        self.current.tracking
    }

    fn object_center_x(&mut self) -> Option<i32> {
        self.current.center_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_servo_initial_clamp() {
        let servo = SimServo::new(2, 120, 42, 100);
        assert_eq!(servo.position().unwrap(), 100);

        let servo = SimServo::new(2, 10, 42, 100);
        assert_eq!(servo.position().unwrap(), 42);
    }

    #[test]
    fn test_sim_servo_increment_clamps_at_max() {
        let mut servo = SimServo::new(2, 94, 42, 100);
        servo.increment(10).unwrap();
        // 94 + 10 = 104，钳制到 100
        assert_eq!(servo.position().unwrap(), 100);

        // 已在上限，再增量仍保持 100
        servo.increment(10).unwrap();
        assert_eq!(servo.position().unwrap(), 100);
    }

    #[test]
    fn test_sim_servo_decrement_clamps_at_min() {
        let mut servo = SimServo::new(2, 45, 42, 100);
        servo.decrement(10).unwrap();
        assert_eq!(servo.position().unwrap(), 42);
    }

    #[test]
    fn test_sim_servo_set_position_out_of_range() {
        let mut servo = SimServo::new(2, 94, 42, 100);
        let err = servo.set_position(120).unwrap_err();
        assert!(matches!(err, HalError::PositionOutOfRange { position: 120, .. }));
        // 位置不变
        assert_eq!(servo.position().unwrap(), 94);
    }

    #[test]
    fn test_sim_servo_journal_records_commands() {
        let mut servo = SimServo::new(2, 94, 42, 100);
        let journal = servo.journal();

        servo.set_position(94).unwrap();
        servo.set_speed(3).unwrap();
        servo.increment(10).unwrap();

        let commands = journal.snapshot();
        assert_eq!(
            commands,
            vec![
                ServoCommand::SetPosition(94),
                ServoCommand::SetSpeed(3),
                ServoCommand::Increment {
                    step: 10,
                    from: 94,
                    to: 100
                },
            ]
        );
        assert_eq!(journal.movement_count(), 1);
    }

    #[test]
    fn test_scripted_perception_playback() {
        let mut perception = ScriptedPerception::new([
            Observation::absent(),
            Observation::tracked(50),
            Observation {
                tracking: true,
                center_x: None,
            },
        ]);

        assert_eq!(perception.remaining(), 3);
        let obs = perception.poll();
        assert!(!obs.tracking);

        let obs = perception.poll();
        assert_eq!(obs.center_x, Some(50));
        assert_eq!(perception.remaining(), 1);

        // 跟踪中但坐标缺失
        let obs = perception.poll();
        assert!(obs.tracking);
        assert!(obs.center_x.is_none());

        // 脚本耗尽，回到无目标
        let obs = perception.poll();
        assert!(!obs.tracking);
    }

    #[test]
    fn test_scripted_perception_hold_last() {
        let mut perception = ScriptedPerception::new([Observation::tracked(200)]).hold_last();

        assert_eq!(perception.poll(), Observation::tracked(200));
        // 耗尽后保持最后一帧
        assert_eq!(perception.poll(), Observation::tracked(200));
        assert_eq!(perception.poll(), Observation::tracked(200));
    }
}
