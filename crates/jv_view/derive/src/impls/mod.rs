//! Code generation for `#[derive(View)]`.

// -----------------------------------------------------------------------------
// Modules

mod trait_typed;
mod trait_view;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::ViewStruct;

/// Generates `Typed` and `View` for a named or unit struct.
pub(crate) fn derive_view_impls(ast: DeriveInput) -> TokenStream {
    let view_struct = match ViewStruct::from_ast(&ast) {
        Ok(view_struct) => view_struct,
        Err(err) => return err.into_compile_error().into(),
    };

    let typed_impl = trait_typed::impl_trait_typed(&view_struct);
    let view_impl = trait_view::impl_trait_view(&view_struct);

    quote! {
        #typed_impl

        #view_impl
    }
    .into()
}
