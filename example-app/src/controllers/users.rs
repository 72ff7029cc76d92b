use autowire_macros::controller;

/// 用户控制器
#[derive(Debug, Default)]
#[controller]
pub struct UserController;

/// 健康检查控制器
#[derive(Debug, Default)]
#[controller(name = "health")]
pub struct HealthController;
