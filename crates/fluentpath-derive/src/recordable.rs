use crate::field::{Accessor, RecordableField};
use darling::{FromDeriveInput, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Error, Generics, Ident, Visibility};

///
/// RecordableInput
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(recordable), supports(struct_named, enum_any))]
struct RecordableInput {
    ident: Ident,
    vis: Visibility,
    generics: Generics,
    data: Data<Ignored, RecordableField>,

    #[darling(default)]
    sealed: bool,
}

// derive_recordable
pub fn derive_recordable(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };
    let input = match RecordableInput::from_derive_input(&input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };

    if !input.generics.params.is_empty() {
        return Error::new_spanned(
            &input.generics,
            "Recordable cannot be derived for generic types; resolved paths are cached per concrete type",
        )
        .to_compile_error();
    }

    match &input.data {
        Data::Struct(fields) => {
            let accessors = fields
                .iter()
                .filter(|field| !field.skip)
                .filter_map(RecordableField::accessor)
                .collect::<Vec<_>>();

            derive_entity(&input, &accessors)
        }
        Data::Enum(_) if input.sealed => Error::new_spanned(
            &input.ident,
            "`#[recordable(sealed)]` only applies to structs; enums are always leaf values",
        )
        .to_compile_error(),
        Data::Enum(_) => derive_enum(&input),
    }
}

fn derive_entity(input: &RecordableInput, accessors: &[Accessor]) -> TokenStream {
    let ident = &input.ident;
    let vis = &input.vis;
    let trait_ident = format_ident!("{}Accessors", ident);
    let kind = if input.sealed {
        quote!(Sealed)
    } else {
        quote!(Entity)
    };
    let stand_in = stand_in_body();

    let model_entries = accessors.iter().map(|accessor| {
        let method = accessor.method.to_string();
        let property = &accessor.property;
        let declared = &accessor.declared;

        quote! {
            ::fluentpath::model::AccessorModel {
                method: #method,
                property: #property,
                returns: || #declared,
            }
        }
    });

    let trait_methods = accessors.iter().map(|accessor| {
        let method = &accessor.method;
        let target = &accessor.target;

        quote! {
            fn #method(&self) -> ::fluentpath::Proxy<#target>;
        }
    });

    let impl_methods = accessors.iter().map(|accessor| {
        let method = &accessor.method;
        let name = method.to_string();
        let target = &accessor.target;
        let declared = &accessor.declared;
        let body = if accessor.navigates_as_declared {
            quote!(self.accessor::<#target>(#name))
        } else {
            quote!(self.accessor_declared::<#target>(#name, #declared))
        };

        quote! {
            fn #method(&self) -> ::fluentpath::Proxy<#target> {
                #body
            }
        }
    });

    let trait_doc = format!("Property accessors of [`{ident}`], recorded on `Proxy<{ident}>`.");

    quote! {
        impl ::fluentpath::traits::Recordable for #ident {
            fn descriptor() -> ::fluentpath::model::TypeDescriptor {
                ::fluentpath::model::TypeDescriptor::new(
                    ::core::any::type_name::<Self>(),
                    ::fluentpath::model::TypeKind::#kind,
                )
            }

            fn stand_in() -> ::core::option::Option<Self> {
                #stand_in
            }

            fn model() -> ::core::option::Option<&'static ::fluentpath::model::EntityModel> {
                static MODEL: ::fluentpath::model::EntityModel = ::fluentpath::model::EntityModel {
                    path: ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident)),
                    accessors: &[#(#model_entries),*],
                };

                ::core::option::Option::Some(&MODEL)
            }
        }

        #[doc = #trait_doc]
        #vis trait #trait_ident {
            #(#trait_methods)*
        }

        impl #trait_ident for ::fluentpath::Proxy<#ident> {
            #(#impl_methods)*
        }
    }
}

fn derive_enum(input: &RecordableInput) -> TokenStream {
    let ident = &input.ident;
    let stand_in = stand_in_body();

    quote! {
        impl ::fluentpath::traits::Recordable for #ident {
            fn descriptor() -> ::fluentpath::model::TypeDescriptor {
                ::fluentpath::model::TypeDescriptor::new(
                    ::core::any::type_name::<Self>(),
                    ::fluentpath::model::TypeKind::Enum,
                )
            }

            fn stand_in() -> ::core::option::Option<Self> {
                #stand_in
            }
        }
    }
}

// `Default` when the type implements it, `None` otherwise.
fn stand_in_body() -> TokenStream {
    quote! {
        #[allow(unused_imports)]
        use ::fluentpath::__private::{ViaDefault as _, ViaNone as _};

        (&::fluentpath::__private::StandInProbe::<Self>::new()).probe_stand_in()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: TokenStream) -> String {
        derive_recordable(input).to_string()
    }

    #[test]
    fn structs_expand_to_entity_with_accessor_trait() {
        let out = expand(quote! {
            pub struct Member {
                name: String,
                active: bool,
                team: Option<Team>,
                #[recordable(skip)]
                cache: Vec<u8>,
            }
        });

        assert!(out.contains("pub trait MemberAccessors"), "{out}");
        assert!(out.contains("fn get_name"), "{out}");
        assert!(out.contains("fn is_active"), "{out}");
        assert!(out.contains("accessor_declared :: < Team >"), "{out}");
        assert!(!out.contains("get_cache"), "{out}");
        assert!(out.contains("TypeKind :: Entity"), "{out}");
    }

    #[test]
    fn sealed_structs_get_sealed_kind() {
        let out = expand(quote! {
            #[recordable(sealed)]
            struct Badge { code: u32 }
        });

        assert!(out.contains("TypeKind :: Sealed"), "{out}");
    }

    #[test]
    fn enums_expand_to_leaf_without_model() {
        let out = expand(quote! {
            enum Status { Active, Retired }
        });

        assert!(out.contains("TypeKind :: Enum"), "{out}");
        assert!(!out.contains("Accessors"), "{out}");
    }

    #[test]
    fn unsupported_shapes_are_compile_errors() {
        for input in [
            quote!(struct Pair(u8, u8);),
            quote!(struct Wrapper<T> { inner: T }),
            quote!(union Bits { a: u32, b: f32 }),
            quote!(#[recordable(sealed)] enum Status { Active }),
        ] {
            let out = expand(input);
            assert!(out.contains("compile_error"), "{out}");
        }
    }
}
