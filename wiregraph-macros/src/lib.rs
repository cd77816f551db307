use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use std::env::var_os;
use syn::parse::Parse;

mod reflect;

/// Implements `wiregraph::Reflect` for a struct, enum or union.
///
/// The shape is taken from the kind of item: `Shape::Struct`, `Shape::Enum` or `Shape::Union`.
/// Type parameters get a `'static` bound, items with lifetime parameters are rejected.
#[proc_macro_derive(Reflect)]
pub fn derive_reflect(item: TokenStream) -> TokenStream {
    expand_with(item, reflect::expand)
}

fn expand_with<F, I, K>(input: TokenStream, f: F) -> TokenStream
where
    F: FnOnce(I) -> syn::Result<K>,
    I: Parse,
    K: ToTokens,
{
    expand(syn::parse(input).and_then(f))
}

fn expand<T>(result: syn::Result<T>) -> TokenStream
where
    T: ToTokens,
{
    match result {
        Ok(tokens) => {
            let tokens = (quote! { #tokens }).into();
            if var_os("MACROS_DEBUG").is_some() {
                eprintln!("{tokens}");
            }
            tokens
        }
        Err(err) => err.into_compile_error().into(),
    }
}
