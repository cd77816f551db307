use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Data, DeriveInput};

pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let DeriveInput {
        ident, generics, data, ..
    } = input;

    if let Some(lifetime) = generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "`Reflect` can't be derived for types with lifetime parameters, they must be `'static`",
        ));
    }

    let shape = match data {
        Data::Struct(_) => quote! { Struct },
        Data::Enum(_) => quote! { Enum },
        Data::Union(_) => quote! { Union },
    };

    let mut bounded = generics.clone();
    let where_clause = bounded.make_where_clause();
    for param in generics.type_params() {
        let param = &param.ident;
        where_clause.predicates.push(parse_quote! { #param: 'static });
    }
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::wiregraph::Reflect for #ident #ty_generics #where_clause {
            const SHAPE: ::wiregraph::Shape = ::wiregraph::Shape::#shape;
        }
    })
}
