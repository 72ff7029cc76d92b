//! 控制器注解宏实现

use crate::utils::{check_struct, generate_registration, UnitArgs};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemStruct};

/// 实现 #[controller] 宏
pub fn controller_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = match UnitArgs::parse_for(args.into(), &[]) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    if let Err(e) = check_struct(&input_struct) {
        return e.to_compile_error().into();
    }

    let annotations = quote! { ::autowire_common::UnitAnnotations::controller() };
    let registration_code = generate_registration("controller", &input_struct, &args, annotations);

    let expanded = quote! {
        #input_struct

        #registration_code
    };

    TokenStream::from(expanded)
}
