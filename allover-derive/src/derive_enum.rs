// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::attrs::{parse_variant_rename, TypeAttrs};
use crate::object::gen_constructor;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields};

/// Unit-only enums. The ordinal of a variant is its declaration index.
pub fn derive_enum(ast: &DeriveInput, data: &DataEnum, attrs: TypeAttrs) -> syn::Result<TokenStream> {
    let mut idents = Vec::with_capacity(data.variants.len());
    let mut names = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Reflect can only be derived for enums whose variants carry no data",
            ));
        }
        names.push(parse_variant_rename(variant)?.unwrap_or_else(|| variant.ident.to_string()));
        idents.push(&variant.ident);
    }
    let ordinals: Vec<u32> = (0..idents.len() as u32).collect();

    let name = &ast.ident;
    let generics = crate::reflect_generics(ast, attrs);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let constructor = gen_constructor(attrs);
    let describe_ts = quote! {
        fn describe() -> ::allover_core::reflect::TypeDescriptor {
            ::allover_core::reflect::TypeDescriptor {
                constructor: #constructor,
                ..::allover_core::reflect::TypeDescriptor::leaf::<Self>()
            }
        }
    };

    let reflect_ref_ts = if idents.is_empty() {
        quote!(match *self {})
    } else {
        quote! {
            let (ordinal, variant) = match self {
                #(Self::#idents => (#ordinals, #names),)*
            };
            ::allover_core::reflect::ReflectRef::Enum(::allover_core::reflect::EnumValue::new(
                ::std::any::type_name::<Self>(),
                ordinal,
                variant,
            ))
        }
    };

    Ok(quote! {
        impl #impl_generics ::allover_core::reflect::Reflect for #name #ty_generics #where_clause {
            #describe_ts

            fn shape() -> ::allover_core::reflect::Shape {
                ::allover_core::reflect::Shape::Enum(::std::any::type_name::<Self>())
            }

            fn from_value(
                value: ::allover_core::reflect::Value,
            ) -> ::std::result::Result<Self, ::allover_core::error::Error> {
                const VARIANTS: &[&str] = &[#(#names),*];
                match value.into_enum_ordinal(::std::any::type_name::<Self>(), VARIANTS)? {
                    #(#ordinals => ::std::result::Result::Ok(Self::#idents),)*
                    ordinal => ::std::result::Result::Err(::allover_core::error::Error::unknown_enum(
                        ::std::format!(
                            "{} has no variant with ordinal {}",
                            ::std::any::type_name::<Self>(),
                            ordinal
                        ),
                    )),
                }
            }

            fn reflect_type_name(&self) -> &'static str {
                ::std::any::type_name::<Self>()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }

            fn clone_reflect(&self) -> ::std::boxed::Box<dyn ::allover_core::reflect::Reflect> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn reflect_ref(&self) -> ::allover_core::reflect::ReflectRef<'_> {
                #reflect_ref_ts
            }
        }
    })
}
