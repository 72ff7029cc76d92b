//! 邮件服务

use autowire_macros::injectable;

/// 默认发件地址
pub const DEFAULT_SENDER: &str = "noreply@example.com";

/// 邮件服务，未声明接口，按自身注册
#[derive(Debug, Default)]
#[injectable]
pub struct Mailer;

impl Mailer {
    /// 发件地址
    pub fn sender(&self) -> &str {
        DEFAULT_SENDER
    }
}
