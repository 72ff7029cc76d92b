//! # Autowire Macros
//!
//! 这个 crate 提供了标记提供者和控制器的注解宏。
//!
//! 被标记的结构体会在程序启动时（通过 `ctor`）登记到全局单元目录，
//! 记录定义所在的源文件。使用这些宏的 crate 需要依赖 `ctor` 和 `autowire-common`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use autowire_macros::{controller, injectable};
//!
//! #[derive(Default)]
//! #[injectable(provide = "UserRepository", priority = 10)]
//! pub struct PgUserRepository;
//!
//! #[derive(Default)]
//! #[controller]
//! pub struct UserController;
//! ```

use proc_macro::TokenStream;

mod controller;
mod injectable;
mod utils;

/// 提供者注解宏
///
/// # 参数
///
/// - `provide = "Name"` - 实现的接口名称，省略时绑定到自身
/// - `priority = N` - 优先级（默认为 0）
/// - `name = "custom_name"` - 自定义单元名称（默认为完整类型路径）
/// - `constructor = "path::to::fn"` - 构造函数（默认为 `Default::default`）
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default)]
/// #[injectable(provide = "Cache", priority = 5)]
/// pub struct RedisCache;
/// ```
#[proc_macro_attribute]
pub fn injectable(args: TokenStream, input: TokenStream) -> TokenStream {
    injectable::injectable_impl(args, input)
}

/// 控制器注解宏
///
/// # 参数
///
/// - `name = "custom_name"` - 自定义单元名称
/// - `constructor = "path::to::fn"` - 构造函数
#[proc_macro_attribute]
pub fn controller(args: TokenStream, input: TokenStream) -> TokenStream {
    controller::controller_impl(args, input)
}
