//! HAL 层错误类型定义

use thiserror::Error;

/// HAL 层错误类型
#[derive(Error, Debug)]
pub enum HalError {
    /// 等待舵机到位超时
    #[error("Timed out waiting for servo to reach position {target} (waited {waited_ms}ms)")]
    WaitTimeout { target: i32, waited_ms: u64 },

    /// 无法读取当前位置
    #[error("Servo position unavailable on channel {channel}")]
    PositionUnavailable { channel: u8 },

    /// 目标位置超出舵机机械范围
    #[error("Position {position} outside servo range [{min}, {max}]")]
    PositionOutOfRange { position: i32, min: i32, max: i32 },

    /// 与执行器的通信通道已关闭
    #[error("Actuator channel closed")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::HalError;

    /// 测试 HalError 的 Display 实现
    #[test]
    fn test_hal_error_display() {
        let err = HalError::WaitTimeout {
            target: 94,
            waited_ms: 2000,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("94") && msg.contains("2000"));

        let err = HalError::PositionOutOfRange {
            position: 120,
            min: 42,
            max: 100,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("120") && msg.contains("[42, 100]"));

        let err = HalError::ChannelClosed;
        assert_eq!(format!("{}", err), "Actuator channel closed");
    }
}
