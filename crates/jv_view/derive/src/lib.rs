//! See [`View`](derive_view).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static VIEW_ATTRIBUTE_NAME: &str = "view";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Derive `View`
///
/// `#[derive(View)]` implements `Typed` and `View` for a struct with named
/// fields (or a unit struct, which becomes an object without fields).
///
/// Every field must implement `View`, except the ones marked `skip` or
/// `parent`. Field names in rules and in the output are the Rust names,
/// without a raw identifier prefix.
///
/// ## Field attributes
///
/// ### `ignore`
///
/// The field is statically excluded: it is hidden unless a rule includes
/// it explicitly.
///
/// ```rust, ignore
/// #[derive(View)]
/// struct Account {
///     id: u64,
///     #[view(ignore)]
///     password_hash: String,
/// }
/// ```
///
/// ### `skip`
///
/// The field is not described at all and no rule can reach it. Use it for
/// fields that do not implement `View`, such as `PhantomData`.
///
/// ### `parent`
///
/// The field holds the parent type. Its fields, and the fields of its own
/// parent, are inherited; the field itself is not emitted. The type must
/// implement `Typed`. At most one field can be the parent.
///
/// ```rust, ignore
/// #[derive(View)]
/// struct Base {
///     int1: i32,
/// }
///
/// #[derive(View)]
/// struct Child {
///     #[view(parent)]
///     base: Base,
///     child_field: String,
/// }
/// // `Child` is emitted as `{ "int1": ..., "child_field": ... }`
/// ```
///
/// A field of the child with the same name as a parent field shadows it.
///
/// ## Type attributes
///
/// ### `ignore_properties`
///
/// Statically excludes the named fields, wherever they are declared. The
/// list is inherited by every type using this one as a parent.
///
/// ```rust, ignore
/// #[derive(View)]
/// #[view(ignore_properties("ignore_indirect"))]
/// struct TestObject {
///     int1: i32,
///     ignore_indirect: String,
/// }
/// ```
///
/// ## Generics
///
/// Type and const parameters are supported. Each instantiation gets its
/// own descriptor, and the generated impls require `T: 'static` and every
/// field type to implement `View`. Lifetime parameters are rejected.
///
/// ## Unsupported inputs
///
/// Enums, unions and tuple structs are rejected with a compile error.
#[proc_macro_derive(View, attributes(view))]
pub fn derive_view(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::derive_view_impls(ast)
}
