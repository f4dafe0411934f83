//! Provide some utilities for implementing the view traits, and the
//! implementations for standard types.
//!
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - scalars:
//!     - `bool`, `char`
//!     - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `String`, `&'static str`, `Box<str>`, `Cow<'static, str>`
//! - null: `()`, `Option<T>` when `None`
//! - pointers: `Box<T>`, `Arc<T>`, `Rc<T>` (also for `T = dyn View`)
//! - sequences: `[T; N]`, `Vec<T>`, `VecDeque<T>`, `BTreeSet<T>`, `HashSet<T>`
//! - mappings: `BTreeMap<K, V>`, `HashMap<K, V>` with a [`MapKey`] key
//!
//! [`Typed`]: crate::info::Typed
//! [`MapKey`]: crate::MapKey

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod collections;
mod scalars;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
