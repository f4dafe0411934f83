use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ViewStruct;

/// Generates the `TypeInfo` expression: fields, parent link and
/// class-level ignore list.
fn type_info_tokens(view_struct: &ViewStruct) -> TokenStream {
    let jv_view_path = view_struct.jv_view_path();
    let type_info_ = crate::path::type_info_(jv_view_path);
    let named_field_ = crate::path::named_field_(jv_view_path);
    let parent_info_ = crate::path::parent_info_(jv_view_path);

    let fields = view_struct.fields.iter().map(|field| {
        let name = field.name();
        let ident = field.ident();
        let ty = field.ty();
        let ignored = field.attrs.ignore.map(|_| quote! { .ignored() });
        quote! {
            #named_field_::new::<Self, #ty>(#name, |value| &value.#ident) #ignored
        }
    });

    let parent = view_struct.parent.as_ref().map(|parent| {
        let ident = parent.ident();
        let ty = parent.ty();
        quote! {
            .with_parent(#parent_info_::new::<Self, #ty>(|value| &value.#ident))
        }
    });

    let ignore_properties = &view_struct.type_attributes.ignore_properties;
    let ignore_properties = (!ignore_properties.is_empty()).then(|| {
        quote! {
            .with_ignore_properties([#(#ignore_properties),*])
        }
    });

    let fields = (!view_struct.fields.is_empty()).then(|| {
        quote! {
            .with_fields([#(#fields),*])
        }
    });

    quote! {
        #type_info_::new::<Self>()
            #parent
            #fields
            #ignore_properties
    }
}

/// Generate implementation code for `Typed`.
///
/// Generic structs store one descriptor per instantiation in a
/// `GenericTypeInfoCell`.
pub(crate) fn impl_trait_typed(view_struct: &ViewStruct) -> TokenStream {
    let jv_view_path = view_struct.jv_view_path();
    let typed_ = crate::path::typed_(jv_view_path);
    let type_info_ = crate::path::type_info_(jv_view_path);

    let type_info_tokens = type_info_tokens(view_struct);

    let inner_cell_tokens = if view_struct.is_generic() {
        let info_cell = crate::path::generic_type_info_cell_(jv_view_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(jv_view_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = view_struct.ident();
    let (impl_generics, ty_generics, _) = view_struct.ast.generics.split_for_impl();
    let where_clause = view_struct.where_clause();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
