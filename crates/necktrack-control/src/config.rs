//! # 跟踪配置
//!
//! 控制器的全部数值参数。启动时加载一次，运行期间不可变。
//!
//! 默认值来自实际机器人标定：颈部舵机在通道 2 上，
//! 机械范围 `[42, 100]`，初始位置 94。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ControlError;

/// 跟踪控制器配置
///
/// # 示例
///
/// ```rust
/// use necktrack_control::TrackingConfig;
///
/// let config = TrackingConfig::default();
/// assert_eq!(config.center_x, 160);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// 舵机通道/引脚标识
    pub servo_channel: u8,

    /// 启动时的初始位置（刻度）
    ///
    /// 必须在 `[min_position, max_position]` 内。
    pub initial_position: i32,

    /// 舵机运动速度设置
    pub speed: u8,

    /// 相机视野的水平中心参考坐标（像素）
    ///
    /// ⚠️ 标定备注：相机分辨率为 320x240，按此推算中心应为 160；
    /// 但原始标定记录中分辨率写作 30x240，与 160 不符。
    /// 真实意图不明，此处保留 160 作为可配置项，不做修正。
    pub center_x: i32,

    /// 死区阈值（像素）
    ///
    /// 目标偏离中心不超过此值时不动作，防止测量噪声引起的抖动。
    pub threshold: i32,

    /// 每次移动的固定步长（刻度）
    pub step_size: i32,

    /// 舵机机械下限（刻度）
    pub min_position: i32,

    /// 舵机机械上限（刻度）
    pub max_position: i32,

    /// 稳定延迟（ms）
    ///
    /// 两次移动命令之间的最小间隔，给舵机留出机械响应时间。
    pub settle_ms: u64,

    /// 无目标时的轮询间隔（ms）
    ///
    /// 避免在等待目标出现期间空转占满 CPU。
    pub idle_poll_ms: u64,

    /// 停机时的归位位置（刻度）
    ///
    /// `None` 表示停机时保持当前位置不动。
    pub park_position: Option<i32>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            servo_channel: 2,
            initial_position: 94,
            speed: 3,
            center_x: 160,
            threshold: 70,
            step_size: 10,
            min_position: 42,
            max_position: 100,
            settle_ms: 500,
            idle_poll_ms: 50,
            park_position: None,
        }
    }
}

impl TrackingConfig {
    /// 校验配置一致性
    ///
    /// # 错误
    ///
    /// - 限位顺序颠倒（`min_position >= max_position`）
    /// - 初始位置或归位位置超出限位范围
    /// - 步长非正值
    /// - 死区阈值为负值
    pub fn validate(&self) -> Result<(), ControlError> {
        if self.min_position >= self.max_position {
            return Err(ControlError::InvalidConfig {
                reason: format!(
                    "min_position ({}) must be below max_position ({})",
                    self.min_position, self.max_position
                ),
            });
        }
        if self.initial_position < self.min_position || self.initial_position > self.max_position {
            return Err(ControlError::InvalidConfig {
                reason: format!(
                    "initial_position ({}) outside [{}, {}]",
                    self.initial_position, self.min_position, self.max_position
                ),
            });
        }
        if let Some(park) = self.park_position
            && (park < self.min_position || park > self.max_position)
        {
            return Err(ControlError::InvalidConfig {
                reason: format!(
                    "park_position ({}) outside [{}, {}]",
                    park, self.min_position, self.max_position
                ),
            });
        }
        if self.step_size <= 0 {
            return Err(ControlError::InvalidConfig {
                reason: format!("step_size ({}) must be positive", self.step_size),
            });
        }
        if self.threshold < 0 {
            return Err(ControlError::InvalidConfig {
                reason: format!("threshold ({}) must not be negative", self.threshold),
            });
        }
        Ok(())
    }

    /// 从 TOML 文件加载配置
    ///
    /// 缺失的字段取默认值。加载后立即校验。
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ControlError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ControlError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
