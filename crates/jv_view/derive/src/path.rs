//! Paths of the `jv_view` items named by generated code.
//!
//! Kept in one place so that moving an item in `jv_view` only touches
//! this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `jv_view` crate from the caller's crate.
///
/// 1. For crates that depend on `jv_view`, `::jv_view` is returned.
/// 2. For crates that depend on `jv_core`, `::jv_core::view` is returned.
/// 3. For crates that depend on `jv`, `::jv::view` is returned.
/// 4. Otherwise `::jv_view` is returned, which may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so it is called once per
/// derive and the result is passed around.
pub(crate) fn jv_view() -> syn::Path {
    jv_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("jv_view"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn view_(jv_view_path: &syn::Path) -> TokenStream {
    quote! {
        #jv_view_path::View
    }
}

#[inline(always)]
pub(crate) fn view_ref_(jv_view_path: &syn::Path) -> TokenStream {
    quote! {
        #jv_view_path::ViewRef
    }
}

#[inline(always)]
pub(crate) fn object_ref_(jv_view_path: &syn::Path) -> TokenStream {
    quote! {
        #jv_view_path::ObjectRef
    }
}

#[inline(always)]
pub(crate) fn typed_(jv_view_path: &syn::Path) -> TokenStream {
    quote! {
        #jv_view_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(jv_view_path: &syn::Path) -> TokenStream {
    quote! {
        #jv_view_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn named_field_(jv_view_path: &syn::Path) -> TokenStream {
    quote! {
        #jv_view_path::info::NamedField
    }
}

#[inline(always)]
pub(crate) fn parent_info_(jv_view_path: &syn::Path) -> TokenStream {
    quote! {
        #jv_view_path::info::ParentInfo
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(jv_view_path: &syn::Path) -> TokenStream {
    quote! {
        #jv_view_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(jv_view_path: &syn::Path) -> TokenStream {
    quote! {
        #jv_view_path::impls::GenericTypeInfoCell
    }
}
