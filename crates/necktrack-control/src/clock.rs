//! 时钟抽象
//!
//! 稳定延迟策略不直接调用 `std::thread::sleep`，而是通过 [`Clock`]
//! trait 读取时间和休眠。这样单元测试可以用 [`ManualClock`]
//! 以虚拟时间驱动，无需真实等待。

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// 时钟接口
///
/// `now()` 返回自时钟纪元以来的单调时长，仅用于计算间隔，
/// 不同时钟实例的读数不可互相比较。
pub trait Clock {
    /// 当前单调时间
    fn now(&self) -> Duration;

    /// 休眠指定时长
    fn sleep(&self, duration: Duration);
}

/// 系统时钟
///
/// 基于 `Instant`，休眠使用 `spin_sleep`（短间隔下比
/// `std::thread::sleep` 精确）。
#[derive(Debug)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        spin_sleep::sleep(duration);
    }
}

/// 手动时钟（测试用）
///
/// `sleep` 不真实等待，只推进虚拟时间。Clone 共享同一时间源，
/// 测试代码可以持有副本并用 [`advance`](ManualClock::advance) 推进。
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 推进虚拟时间
    pub fn advance(&self, duration: Duration) {
        *self.now.lock() += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
