//! 控制层错误类型定义

use necktrack_hal::HalError;
use thiserror::Error;

/// 控制层错误类型
///
/// 注意：观测缺失和限位到达**不是**错误，它们是控制循环的
/// 正常非致命状态，通过 [`CycleOutcome`](crate::runner::CycleOutcome) 上报。
#[derive(Error, Debug)]
pub enum ControlError {
    /// 执行器/HAL 错误
    #[error("HAL error: {0}")]
    Hal(#[from] HalError),

    /// 配置不一致
    #[error("Invalid tracking config: {reason}")]
    InvalidConfig { reason: String },

    /// 配置文件读写失败
    #[error("Config file I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// 配置文件解析失败
    #[error("Config file parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// 配置序列化失败
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::ControlError;
    use necktrack_hal::HalError;

    /// 测试 From<HalError> 转换
    #[test]
    fn test_from_hal_error() {
        let hal_error = HalError::ChannelClosed;
        let control_error: ControlError = hal_error.into();
        let msg = format!("{}", control_error);
        assert!(msg.contains("HAL error") && msg.contains("channel closed"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = ControlError::InvalidConfig {
            reason: "step_size (0) must be positive".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid tracking config") && msg.contains("step_size"));
    }
}
