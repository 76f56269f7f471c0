use darling::FromField;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{GenericArgument, Ident, PathArguments, Type, ext::IdentExt};

///
/// RecordableField
///

#[derive(Debug, FromField)]
#[darling(attributes(recordable))]
pub struct RecordableField {
    pub ident: Option<Ident>,
    pub ty: Type,

    #[darling(default)]
    pub skip: bool,
}

///
/// FieldShape
/// How a declared field type maps onto the proxy it navigates to.
///

enum FieldShape<'a> {
    /// Navigates as the declared type itself.
    Plain(&'a Type),

    /// `Box<X>`: navigates as `X`, declared as `X`.
    Boxed(&'a Type),

    /// `Option<X>`: navigates as `X`, declared as `Option<X>`.
    Optional(&'a Type),

    /// `Option<Box<X>>`: navigates as `X`, declared as a nullable `X`.
    OptionalBoxed(&'a Type),
}

///
/// Accessor
/// Everything generated for one non-skipped field.
///

pub struct Accessor {
    pub method: Ident,
    pub property: String,
    pub target: TokenStream,
    pub declared: TokenStream,
    pub navigates_as_declared: bool,
}

impl RecordableField {
    pub fn accessor(&self) -> Option<Accessor> {
        let ident = self.ident.as_ref()?;
        let property = ident.unraw().to_string();
        let prefix = if is_path_ident(&self.ty, "bool") {
            "is"
        } else {
            "get"
        };
        let method = format_ident!("{}_{}", prefix, property);

        let full = &self.ty;
        let (target, declared, navigates_as_declared) = match classify(full) {
            FieldShape::Plain(ty) => (
                quote!(#ty),
                quote!(<#ty as ::fluentpath::traits::Recordable>::descriptor()),
                true,
            ),
            FieldShape::Boxed(inner) => (
                quote!(#inner),
                quote!(<#inner as ::fluentpath::traits::Recordable>::descriptor()),
                true,
            ),
            FieldShape::Optional(inner) => (
                quote!(#inner),
                quote!(<#full as ::fluentpath::traits::Recordable>::descriptor()),
                false,
            ),
            FieldShape::OptionalBoxed(inner) => (
                quote!(#inner),
                quote! {
                    <#inner as ::fluentpath::traits::Recordable>::descriptor()
                        .into_nullable(::core::any::type_name::<#full>())
                },
                false,
            ),
        };

        Some(Accessor {
            method,
            property,
            target,
            declared,
            navigates_as_declared,
        })
    }
}

fn classify(ty: &Type) -> FieldShape<'_> {
    if let Some(inner) = single_arg(ty, "Option") {
        return match single_arg(inner, "Box") {
            Some(boxed) if !is_trait_object(boxed) => FieldShape::OptionalBoxed(boxed),
            _ => FieldShape::Optional(inner),
        };
    }

    match single_arg(ty, "Box") {
        Some(inner) if !is_trait_object(inner) => FieldShape::Boxed(inner),
        _ => FieldShape::Plain(ty),
    }
}

// `Wrapper<T>` -> `T`, matched on the last path segment.
fn single_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }

    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn is_trait_object(ty: &Type) -> bool {
    matches!(ty, Type::TraitObject(_))
}

fn is_path_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.qself.is_none() && path.path.is_ident(ident)
}

///
/// TESTS
///
