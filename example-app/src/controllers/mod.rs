//! 示例控制器

pub mod users;
