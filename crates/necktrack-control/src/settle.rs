//! 稳定延迟策略
//!
//! 原始实现在每次舵机移动后固定 `sleep(500ms)`。这里把它改写为
//! 显式的**最小命令间隔**策略：记录上一条移动命令的时间戳，
//! 在间隔期满之前不允许发出下一条命令。策略本身不休眠，
//! 由运行循环决定如何消耗剩余等待时间。

use std::time::Duration;

/// 稳定门闸
///
/// # 示例
///
/// ```rust
/// use std::time::Duration;
/// use necktrack_control::SettleGate;
///
/// let mut gate = SettleGate::new(Duration::from_millis(500));
/// assert!(gate.ready(Duration::ZERO));
///
/// gate.record_command(Duration::ZERO);
/// assert!(!gate.ready(Duration::from_millis(499)));
/// assert!(gate.ready(Duration::from_millis(500)));
/// ```
#[derive(Debug, Clone)]
pub struct SettleGate {
    /// 两条移动命令之间的最小间隔
    interval: Duration,

    /// 上一条移动命令的时间戳（时钟纪元起算）
    last_command: Option<Duration>,
}

impl SettleGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_command: None,
        }
    }

    /// 配置的最小命令间隔
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 当前是否允许发出下一条移动命令
    pub fn ready(&self, now: Duration) -> bool {
        self.remaining(now).is_none()
    }

    /// 距离允许下一条命令还需等待的时长
    ///
    /// 已就绪时返回 `None`。
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        let last = self.last_command?;
        let deadline = last + self.interval;
        if now >= deadline {
            None
        } else {
            Some(deadline - now)
        }
    }

    /// 记录一条移动命令已发出
    pub fn record_command(&mut self, now: Duration) {
        self.last_command = Some(now);
    }

    /// 清除历史（初始化后从全新状态开始）
    pub fn reset(&mut self) {
        self.last_command = None;
    }
}
