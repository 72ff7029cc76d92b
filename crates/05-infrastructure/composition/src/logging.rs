//! 日志初始化

use autowire_common::{DiscoveryError, DiscoveryResult, LoggingSettings};

/// 按日志设置初始化全局订阅器
///
/// 已经存在全局订阅器时返回错误，不会覆盖。
pub fn init_logging(settings: &LoggingSettings) -> DiscoveryResult<()> {
    let level = settings.max_level()?;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(settings.show_target)
        .with_thread_ids(settings.show_thread_ids)
        .with_file(settings.show_file)
        .with_line_number(settings.show_line_number);

    if settings.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| DiscoveryError::LoggingInit {
        message: e.to_string(),
    })
}
