//! Compile-time dependency injection macros for bookgraph.
//!
//! - `#[derive(Context)]` turns every field of a root struct into something
//!   resolvable through `FromRef`.
//! - `#[derive(FromContext)]` builds a repository or service out of a root
//!   context by resolving each of its fields.
//!
//! Generated code references `crate::FromRef`, so the consuming crate must
//! expose the trait at its root.

use proc_macro::TokenStream;

mod context;
mod fields;
mod from_context;

/// Derive macro for a DI root.
///
/// Generates `impl FromRef<Root> for FieldType` for every named field. A
/// field marked `#[context(skip)]` gets no impl, which is how two fields of
/// the same type can coexist on one root.
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub graph: Graph,
///     pub allocator: IdAllocator,
///     #[context(skip)]
///     pub started_at: Instant,
/// }
/// ```
#[proc_macro_derive(Context, attributes(context))]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for types assembled from a DI root.
///
/// Every field is resolved with `<FieldType as FromRef<Root>>::from_ref`.
/// Fields marked `#[from_context(default)]` (typically `PhantomData`
/// markers on generic repositories) are filled with `Default::default()`.
/// The root defaults to `Context` and can be overridden with
/// `#[from_context(Context = "path::To::Root")]` on the struct.
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// pub struct EntityRepository<S: EntitySchema> {
///     graph: Graph,
///     allocator: IdAllocator,
///     #[from_context(default)]
///     schema: PhantomData<S>,
/// }
/// ```
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}
