//! 宏工具函数

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, Expr, ExprLit, ExprUnary, Ident, ItemStruct, Lit, LitStr, Meta, Result, Token, UnOp};

/// 注解宏参数
#[derive(Debug, Default)]
pub struct UnitArgs {
    /// 自定义单元名称
    pub name: Option<LitStr>,
    /// 构造函数路径
    pub constructor: Option<syn::Path>,
    /// 实现的接口名称
    pub provide: Option<LitStr>,
    /// 优先级
    pub priority: Option<i32>,
}

impl Parse for UnitArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = UnitArgs::default();
        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            let nv = match meta {
                Meta::NameValue(nv) => nv,
                other => return Err(Error::new_spanned(other, "参数必须是 key = value 形式")),
            };

            if nv.path.is_ident("name") {
                args.name = Some(expect_str(&nv.value)?);
            } else if nv.path.is_ident("constructor") {
                let lit = expect_str(&nv.value)?;
                args.constructor = Some(lit.parse::<syn::Path>()?);
            } else if nv.path.is_ident("provide") {
                let lit = expect_str(&nv.value)?;
                if lit.value().trim().is_empty() {
                    return Err(Error::new_spanned(lit, "接口名称不能为空"));
                }
                args.provide = Some(lit);
            } else if nv.path.is_ident("priority") {
                args.priority = Some(expect_i32(&nv.value)?);
            } else {
                return Err(Error::new_spanned(nv.path, "未知参数"));
            }
        }

        Ok(args)
    }
}

impl UnitArgs {
    /// 解析宏参数，只接受给定的键
    pub fn parse_for(args: TokenStream, allowed: &[&str]) -> Result<Self> {
        let parsed: UnitArgs = if args.is_empty() {
            UnitArgs::default()
        } else {
            syn::parse2(args.clone())?
        };

        for (key, present) in [
            ("provide", parsed.provide.is_some()),
            ("priority", parsed.priority.is_some()),
        ] {
            if present && !allowed.contains(&key) {
                return Err(Error::new_spanned(args, format!("不支持参数 `{}`", key)));
            }
        }
        Ok(parsed)
    }
}

fn expect_str(expr: &Expr) -> Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.clone()),
        other => Err(Error::new_spanned(other, "需要字符串字面量")),
    }
}

fn expect_i32(expr: &Expr) -> Result<i32> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(lit), ..
        }) => lit.base10_parse(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => expect_i32(expr).map(|value| -value),
        other => Err(Error::new_spanned(other, "需要整数字面量")),
    }
}

/// 检查结构体可以作为单元登记
pub fn check_struct(item: &ItemStruct) -> Result<()> {
    if !item.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &item.generics,
            "泛型结构体无法自动登记，请为具体类型提供构造函数",
        ));
    }
    Ok(())
}

/// 生成登记代码
pub fn generate_registration(
    kind: &str,
    item: &ItemStruct,
    args: &UnitArgs,
    annotations: TokenStream,
) -> TokenStream {
    let struct_name = &item.ident;
    let registration_fn_name = Ident::new(
        &format!(
            "__autowire_register_{}_{}",
            kind,
            to_snake_case(&struct_name.to_string())
        ),
        Span::call_site(),
    );

    let unit_name = match &args.name {
        Some(name) => quote! { #name },
        None => quote! { ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#struct_name)) },
    };
    let constructor = match &args.constructor {
        Some(path) => quote! { #path },
        None => quote! { <#struct_name as ::core::default::Default>::default },
    };

    quote! {
        // 程序启动时登记到全局单元目录
        #[::ctor::ctor]
        fn #registration_fn_name() {
            ::autowire_common::global_unit_catalog().register(
                ::core::file!(),
                ::autowire_common::Export::unit(
                    ::autowire_common::Unit::new(#unit_name, #constructor),
                    #annotations,
                ),
            );
        }
    }
}

/// 可选字符串转为 `Option<&str>` 表达式
pub fn option_str(value: &Option<LitStr>) -> TokenStream {
    match value {
        Some(lit) => quote! { ::core::option::Option::Some(#lit) },
        None => quote! { ::core::option::Option::None },
    }
}

/// 可选整数转为 `Option<i32>` 表达式
pub fn option_i32(value: Option<i32>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("UserService"), "user_service");
        assert_eq!(to_snake_case("HTTPController"), "http_controller");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_parse_provider_args() {
        let args: UnitArgs =
            syn::parse2(quote!(provide = "Cache", priority = -3, name = "redis")).unwrap();
        assert_eq!(args.provide.unwrap().value(), "Cache");
        assert_eq!(args.priority, Some(-3));
        assert_eq!(args.name.unwrap().value(), "redis");
        assert!(args.constructor.is_none());
    }

    #[test]
    fn test_constructor_path() {
        let args: UnitArgs = syn::parse2(quote!(constructor = "RedisCache::connect")).unwrap();
        let path = args.constructor.unwrap();
        assert_eq!(path.segments.len(), 2);
    }

    #[test]
    fn test_invalid_args_rejected() {
        assert!(syn::parse2::<UnitArgs>(quote!(provide = "")).is_err());
        assert!(syn::parse2::<UnitArgs>(quote!(priority = "high")).is_err());
        assert!(syn::parse2::<UnitArgs>(quote!(singleton)).is_err());
        assert!(syn::parse2::<UnitArgs>(quote!(scope = "request")).is_err());
    }

    #[test]
    fn test_controller_rejects_provider_args() {
        assert!(UnitArgs::parse_for(quote!(priority = 1), &[]).is_err());
        assert!(UnitArgs::parse_for(quote!(name = "users"), &[]).is_ok());
        assert!(UnitArgs::parse_for(TokenStream::new(), &[]).is_ok());
    }

    #[test]
    fn test_generic_struct_rejected() {
        let item: ItemStruct = syn::parse2(quote!(struct Repo<T> { inner: T })).unwrap();
        assert!(check_struct(&item).is_err());

        let item: ItemStruct = syn::parse2(quote!(struct Repo;)).unwrap();
        assert!(check_struct(&item).is_ok());
    }
}
