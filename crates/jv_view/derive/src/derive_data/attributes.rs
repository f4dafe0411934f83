use proc_macro2::Span;
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Ident, LitStr, Token, parenthesized};

use crate::VIEW_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes on the type itself.
///
/// - `#[view(ignore_properties("a", "b"))]`
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub ignore_properties: Vec<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(VIEW_ATTRIBUTE_NAME)) {
            attr.parse_args_with(|input: ParseStream| this.parse_inner_stream(input))?;
        }
        Ok(this)
    }

    fn parse_inner_stream(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            if ident != "ignore_properties" {
                return Err(syn::Error::new(
                    ident.span(),
                    "unknown type attribute, expected `ignore_properties(\"name\", ...)`",
                ));
            }

            let content;
            parenthesized!(content in input);
            let names = content.parse_terminated(<LitStr as Parse>::parse, Token![,])?;
            self.ignore_properties.extend(names);

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes on one named field.
///
/// - `#[view(ignore)]`: statically excluded, rules may include it again.
/// - `#[view(skip)]`: not part of the descriptor at all.
/// - `#[view(parent)]`: the embedded parent, its fields are inherited.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub ignore: Option<Span>,
    pub skip: Option<Span>,
    pub parent: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(VIEW_ATTRIBUTE_NAME)) {
            attr.parse_args_with(|input: ParseStream| this.parse_inner_stream(input))?;
        }
        this.validate()?;
        Ok(this)
    }

    fn parse_inner_stream(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            let slot = if ident == "ignore" {
                &mut self.ignore
            } else if ident == "skip" {
                &mut self.skip
            } else if ident == "parent" {
                &mut self.parent
            } else {
                return Err(syn::Error::new(
                    ident.span(),
                    "unknown field attribute, expected `ignore`, `skip` or `parent`",
                ));
            };

            if slot.is_some() {
                return Err(syn::Error::new(ident.span(), format!("duplicate `{ident}`")));
            }
            *slot = Some(ident.span());

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }
        Ok(())
    }

    fn validate(&self) -> syn::Result<()> {
        let conflict = match (self.ignore, self.skip, self.parent) {
            (Some(_), Some(span), _) => Some((span, "`skip` and `ignore`")),
            (_, Some(_), Some(span)) => Some((span, "`parent` and `skip`")),
            (Some(_), _, Some(span)) => Some((span, "`parent` and `ignore`")),
            _ => None,
        };

        match conflict {
            Some((span, pair)) => Err(syn::Error::new(span, format!("{pair} cannot be combined"))),
            None => Ok(()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
