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

use crate::attrs::{parse_field_attrs, visibility_tokens, FieldAttrs, TypeAttrs};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Fields, Member, Type};

/// One member of the struct as the generated code sees it.
struct SourceField<'a> {
    member: Member,
    ty: &'a Type,
    vis: &'a syn::Visibility,
    /// Name under which the member is reflected.
    name: String,
    attrs: FieldAttrs,
    binding: syn::Ident,
}

fn source_fields(fields: &Fields) -> syn::Result<Vec<SourceField<'_>>> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let attrs = parse_field_attrs(field)?;
            let (member, default_name) = match &field.ident {
                Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
                None => (Member::Unnamed(syn::Index::from(i)), i.to_string()),
            };
            Ok(SourceField {
                member,
                ty: &field.ty,
                vis: &field.vis,
                name: attrs.rename.clone().unwrap_or(default_name),
                attrs,
                binding: format_ident!("__field{}", i),
            })
        })
        .collect()
}

pub fn derive_struct(
    ast: &DeriveInput,
    data: &syn::DataStruct,
    attrs: TypeAttrs,
) -> syn::Result<TokenStream> {
    let fields = source_fields(&data.fields)?;
    let reflected: Vec<&SourceField> = fields.iter().filter(|f| !f.attrs.skip).collect();

    let describe_ts = gen_describe(&reflected, attrs);
    let from_value_ts = gen_from_value(&data.fields, &fields, attrs);
    let reflect_ref_ts = gen_reflect_ref(&reflected);
    let field_at_ts = gen_field_at(&reflected);
    let set_field_at_ts = gen_set_field_at(&reflected);

    let name = &ast.ident;
    let generics = crate::reflect_generics(ast, attrs);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::allover_core::reflect::Reflect for #name #ty_generics #where_clause {
            #describe_ts

            fn shape() -> ::allover_core::reflect::Shape {
                ::allover_core::reflect::Shape::Object(::std::any::type_name::<Self>())
            }

            #from_value_ts

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

            #reflect_ref_ts

            #field_at_ts

            #set_field_at_ts
        }
    })
}

/// Resolves `Self: Default` in the expanded code, where the compiler can see it.
fn slot_call(method: TokenStream) -> TokenStream {
    quote! {
        {
            #[allow(unused_imports)]
            use ::allover_core::__private::{ViaDefault as _, WithoutDefault as _};
            (&::allover_core::__private::DefaultSlot::<Self>::new()).#method()
        }
    }
}

pub(crate) fn gen_constructor(attrs: TypeAttrs) -> TokenStream {
    if attrs.has_default {
        quote! {
            ::std::option::Option::Some(
                (|| -> ::std::boxed::Box<dyn ::allover_core::reflect::Reflect> {
                    ::std::boxed::Box::new(<Self as ::std::default::Default>::default())
                }) as ::allover_core::reflect::Constructor,
            )
        }
    } else {
        slot_call(quote!(constructor))
    }
}

fn gen_describe(fields: &[&SourceField], attrs: TypeAttrs) -> TokenStream {
    let properties = fields.iter().enumerate().map(|(index, f)| {
        let ty = f.ty;
        let name = &f.name;
        let vis = visibility_tokens(f.vis);
        let readable = f.attrs.readable();
        let writable = f.attrs.writable();
        quote! {
            ::allover_core::reflect::PropertyDescriptor::new::<#ty>(#index, #name, #vis)
                .with_access(#readable, #writable)
        }
    });
    let constructor = gen_constructor(attrs);
    quote! {
        fn describe() -> ::allover_core::reflect::TypeDescriptor {
            ::allover_core::reflect::TypeDescriptor::object::<Self>(
                ::std::vec![#(#properties),*],
                #constructor,
            )
        }
    }
}

/// With `Default` known, members missing from the object keep their default.
/// Otherwise every member must be present or have an `absent` value.
fn gen_from_value(data_fields: &Fields, fields: &[SourceField], attrs: TypeAttrs) -> TokenStream {
    let assigns: Vec<TokenStream> = fields
        .iter()
        .filter(|f| !f.attrs.skip)
        .map(|f| {
            let ty = f.ty;
            let name = &f.name;
            let member = &f.member;
            quote! {
                if let ::std::option::Option::Some(value) = object.take(#name) {
                    out.#member = <#ty as ::allover_core::reflect::Reflect>::from_value(value)
                        .map_err(|e| e.with_property(#name))?;
                }
            }
        })
        .collect();
    if attrs.has_default {
        return quote! {
            #[allow(unused_mut, unused_variables)]
            fn from_value(
                value: ::allover_core::reflect::Value,
            ) -> ::std::result::Result<Self, ::allover_core::error::Error> {
                let mut object = value.into_object()?;
                let mut out = <Self as ::std::default::Default>::default();
                #(#assigns)*
                ::std::result::Result::Ok(out)
            }
        };
    }

    let reads = fields.iter().map(|f| {
        let binding = &f.binding;
        let ty = f.ty;
        if f.attrs.skip {
            return quote! {
                let #binding: #ty = ::std::default::Default::default();
            };
        }
        let name = &f.name;
        quote! {
            let #binding: #ty = match object.take(#name) {
                ::std::option::Option::Some(value) => {
                    <#ty as ::allover_core::reflect::Reflect>::from_value(value)
                        .map_err(|e| e.with_property(#name))?
                }
                ::std::option::Option::None => {
                    <#ty as ::allover_core::reflect::Reflect>::absent().ok_or_else(|| {
                        ::allover_core::error::Error::conversion(::std::format!(
                            "missing property {} of {}",
                            #name,
                            ::std::any::type_name::<Self>()
                        ))
                    })?
                }
            };
        }
    });
    let bindings = fields.iter().map(|f| &f.binding);
    let members = fields.iter().map(|f| &f.member);
    let construct = match data_fields {
        Fields::Named(_) => quote!(Self { #(#members: #bindings),* }),
        Fields::Unnamed(_) => quote!(Self(#(#bindings),*)),
        Fields::Unit => quote!(Self),
    };
    let default_fn = slot_call(quote!(default_fn));
    quote! {
        #[allow(unused_mut, unused_variables)]
        fn from_value(
            value: ::allover_core::reflect::Value,
        ) -> ::std::result::Result<Self, ::allover_core::error::Error> {
            let mut object = value.into_object()?;
            let default_fn: ::std::option::Option<fn() -> Self> = #default_fn;
            if let ::std::option::Option::Some(default) = default_fn {
                let mut out = default();
                #(#assigns)*
                return ::std::result::Result::Ok(out);
            }
            #(#reads)*
            ::std::result::Result::Ok(#construct)
        }
    }
}

fn gen_reflect_ref(fields: &[&SourceField]) -> TokenStream {
    let entries = fields.iter().map(|f| {
        let name = &f.name;
        let member = &f.member;
        quote! {
            (#name, &self.#member as &dyn ::allover_core::reflect::Reflect)
        }
    });
    quote! {
        fn reflect_ref(&self) -> ::allover_core::reflect::ReflectRef<'_> {
            ::allover_core::reflect::ReflectRef::Struct {
                type_name: ::std::any::type_name::<Self>(),
                fields: ::std::vec![#(#entries),*],
            }
        }
    }
}

fn gen_field_at(fields: &[&SourceField]) -> TokenStream {
    let arms = fields.iter().enumerate().map(|(index, f)| {
        let member = &f.member;
        quote! {
            #index => ::std::option::Option::Some(&self.#member),
        }
    });
    quote! {
        fn field_at(&self, index: usize) -> ::std::option::Option<&dyn ::allover_core::reflect::Reflect> {
            match index {
                #(#arms)*
                _ => ::std::option::Option::None,
            }
        }
    }
}

fn gen_set_field_at(fields: &[&SourceField]) -> TokenStream {
    let arms = fields.iter().enumerate().map(|(index, f)| {
        let member = &f.member;
        let ty = f.ty;
        quote! {
            #index => {
                self.#member = ::allover_core::reflect::assign::<#ty>(value)?;
                ::std::result::Result::Ok(())
            }
        }
    });
    quote! {
        #[allow(unused_variables)]
        fn set_field_at(
            &mut self,
            index: usize,
            value: ::allover_core::reflect::FieldValue,
        ) -> ::std::result::Result<(), ::allover_core::error::Error> {
            match index {
                #(#arms)*
                _ => ::std::result::Result::Err(::allover_core::error::Error::conversion(
                    ::std::format!(
                        "{} has no writable member at index {}",
                        ::std::any::type_name::<Self>(),
                        index
                    ),
                )),
            }
        }
    }
}
