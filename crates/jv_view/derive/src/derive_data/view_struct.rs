use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, GenericParam, Ident, LitStr, Type, WhereClause};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// StructField

/// A named field with its parsed attributes.
pub(crate) struct StructField<'a> {
    pub field: &'a Field,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    pub fn ident(&self) -> &Ident {
        // Only named fields are collected.
        self.field.ident.as_ref().unwrap()
    }

    pub fn ty(&self) -> &Type {
        &self.field.ty
    }

    /// The name the field is addressed by in rules and output.
    pub fn name(&self) -> LitStr {
        let ident = self.ident();
        LitStr::new(&ident.unraw().to_string(), ident.span())
    }
}

// -----------------------------------------------------------------------------
// ViewStruct

/// A struct accepted by `#[derive(View)]`.
pub(crate) struct ViewStruct<'a> {
    pub ast: &'a DeriveInput,
    pub jv_view_path: syn::Path,
    pub type_attributes: TypeAttributes,
    /// Fields in declaration order, without the parent and skipped ones.
    pub fields: Vec<StructField<'a>>,
    pub parent: Option<StructField<'a>>,
}

impl<'a> ViewStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Some(&fields.named),
                Fields::Unit => None,
                Fields::Unnamed(fields) => {
                    return Err(syn::Error::new_spanned(
                        fields,
                        "`#[derive(View)]` does not support tuple structs, fields need names to be addressed by rules",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new_spanned(
                    data.enum_token,
                    "`#[derive(View)]` does not support enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "`#[derive(View)]` does not support unions",
                ));
            }
        };

        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "`#[derive(View)]` does not support lifetime parameters, `View` types are `'static`",
            ));
        }

        let type_attributes = TypeAttributes::parse_attrs(&ast.attrs)?;

        let mut fields = Vec::new();
        let mut parent: Option<StructField<'a>> = None;

        for field in named.into_iter().flatten() {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;

            if let Some(span) = attrs.parent {
                if parent.is_some() {
                    return Err(syn::Error::new(span, "only one field can be the `parent`"));
                }
                parent = Some(StructField { field, attrs });
            } else if attrs.skip.is_none() {
                fields.push(StructField { field, attrs });
            }
        }

        Ok(Self {
            ast,
            jv_view_path: crate::path::jv_view(),
            type_attributes,
            fields,
            parent,
        })
    }

    #[inline]
    pub fn jv_view_path(&self) -> &syn::Path {
        &self.jv_view_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        &self.ast.ident
    }

    /// Returns `true` if the descriptor must be stored per instantiation.
    pub fn is_generic(&self) -> bool {
        self.ast.generics.type_params().next().is_some()
            || self.ast.generics.const_params().next().is_some()
    }

    /// The where clause shared by the generated impls.
    ///
    /// Generic structs get `T: 'static` for each type parameter and the
    /// trait bound each emitted field needs.
    pub fn where_clause(&self) -> TokenStream {
        let generics = &self.ast.generics;
        let mut where_clause = generics.where_clause.clone().unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });

        if generics.type_params().next().is_some() {
            let view_ = crate::path::view_(self.jv_view_path());
            let typed_ = crate::path::typed_(self.jv_view_path());

            for param in &generics.params {
                if let GenericParam::Type(param) = param {
                    let ident = &param.ident;
                    where_clause.predicates.push(syn::parse_quote!(#ident: 'static));
                }
            }
            for field in &self.fields {
                let ty = field.ty();
                where_clause.predicates.push(syn::parse_quote!(#ty: #view_));
            }
            if let Some(parent) = &self.parent {
                let ty = parent.ty();
                where_clause.predicates.push(syn::parse_quote!(#ty: #typed_));
            }
        }

        if where_clause.predicates.is_empty() {
            crate::utils::empty()
        } else {
            quote! { #where_clause }
        }
    }
}
