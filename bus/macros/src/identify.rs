use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Index, Member, parse_macro_input};

pub fn derive_identify(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    match expand(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(ast: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &ast.ident;
    let member = identity_member(ast)?;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    // Use ::rusty_bus::Identify which works both inside and outside the crate.
    // Inside the crate, this works because of `extern crate self as rusty_bus;` in lib.rs
    // Outside the crate, this naturally resolves to the rusty_bus dependency.
    Ok(quote! {
        impl #impl_generics ::rusty_bus::Identify for #struct_name #ty_generics #where_clause {
            #[inline]
            fn identity(&self) -> &::rusty_bus::Key {
                &self.#member
            }
        }
    })
}

/// Find the single field marked `#[identity]`.
fn identity_member(ast: &DeriveInput) -> syn::Result<Member> {
    let Data::Struct(data) = &ast.data else {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "Identify can only be derived for structs",
        ));
    };

    let fields = match &data.fields {
        Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
        Fields::Unnamed(unnamed) => unnamed.unnamed.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
    };

    let mut marked = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.attrs.iter().any(|attr| attr.path().is_ident("identity")));

    let Some((index, field)) = marked.next() else {
        return Err(syn::Error::new(
            Span::call_site(),
            "Identify requires exactly one field marked #[identity]",
        ));
    };

    if let Some((_, extra)) = marked.next() {
        return Err(syn::Error::new_spanned(
            extra,
            "only one field may be marked #[identity]",
        ));
    }

    Ok(match &field.ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(Index::from(index)),
    })
}
