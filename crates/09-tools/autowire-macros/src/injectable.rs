//! 提供者注解宏实现

use crate::utils::{check_struct, generate_registration, option_i32, option_str, UnitArgs};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemStruct};

/// 实现 #[injectable] 宏
pub fn injectable_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = match UnitArgs::parse_for(args.into(), &["provide", "priority"]) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    if let Err(e) = check_struct(&input_struct) {
        return e.to_compile_error().into();
    }

    let provide = option_str(&args.provide);
    let priority = option_i32(args.priority);
    let annotations = quote! {
        ::autowire_common::UnitAnnotations::provider(#provide, #priority)
    };
    let registration_code = generate_registration("injectable", &input_struct, &args, annotations);

    let expanded = quote! {
        #input_struct

        #registration_code
    };

    TokenStream::from(expanded)
}
