use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ViewStruct;

/// Generate implementation code for `View`: every derived type is an object.
pub(crate) fn impl_trait_view(view_struct: &ViewStruct) -> TokenStream {
    let jv_view_path = view_struct.jv_view_path();
    let view_ = crate::path::view_(jv_view_path);
    let view_ref_ = crate::path::view_ref_(jv_view_path);
    let object_ref_ = crate::path::object_ref_(jv_view_path);
    let typed_ = crate::path::typed_(jv_view_path);

    let ident = view_struct.ident();
    let (impl_generics, ty_generics, _) = view_struct.ast.generics.split_for_impl();
    let where_clause = view_struct.where_clause();

    quote! {
        impl #impl_generics #view_ for #ident #ty_generics #where_clause {
            #[inline]
            fn view_ref(&self) -> #view_ref_<'_> {
                #view_ref_::Object(#object_ref_::new(<Self as #typed_>::type_info(), self))
            }
        }
    }
}
