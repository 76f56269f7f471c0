use proc_macro::TokenStream;

mod field;
mod recordable;

/// Derive `Recordable` for a struct with named fields or for an enum.
///
/// Structs become navigable entities and get a `<Name>Accessors` trait
/// implemented for `Proxy<Name>`; enums become leaf values.
///
/// Container attributes: `#[recordable(sealed)]`.
/// Field attributes: `#[recordable(skip)]`.
#[proc_macro_derive(Recordable, attributes(recordable))]
pub fn derive_recordable(input: TokenStream) -> TokenStream {
    recordable::derive_recordable(input.into()).into()
}
