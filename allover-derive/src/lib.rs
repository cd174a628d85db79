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

//! # Allover Derive Macros
//!
//! Procedural macro implementing `Reflect` for user types, which makes them
//! visible to the object mapper and to the dynamic binary writer.
//!
//! ## Supported Types
//!
//! - Structs with named fields, tuple structs (members named `"0"`, `"1"`, ...)
//!   and unit structs
//! - Enums whose variants carry no data; the ordinal of a variant is its
//!   declaration index
//!
//! Derived types must also implement `Clone`. Type parameters get a
//! `Reflect + Clone` bound.
//!
//! ## Attributes
//!
//! - `#[reflect(default)]` on the type: bound the generated impl on
//!   `Self: Default` and call it directly. Without the attribute the impl
//!   still finds a `Default` impl, derived or written by hand, whenever its
//!   own bounds prove it; a generic type whose `Default` needs bounds on its
//!   parameters uses the attribute. Known defaults give the type a
//!   constructor, and members missing from a dynamic value keep their
//!   default.
//! - `#[reflect(skip)]` on a field: not reflected, rebuilt with `Default::default()`
//! - `#[reflect(rename = "Name")]` on a field or variant
//! - `#[reflect(read_only)]` / `#[reflect(write_only)]` on a field
//!
//! Field visibility decides the binding scope: `pub` fields are public,
//! `pub(crate)` and other restricted forms are restricted, the rest private.
//!
//! ## Example
//!
//! ```rust
//! use allover_derive::Reflect;
//!
//! #[derive(Reflect, Clone, Default, Debug, PartialEq)]
//! pub struct Person {
//!     pub name: String,
//!     pub age: u32,
//!     #[reflect(skip)]
//!     pub cache: Vec<u8>,
//! }
//!
//! #[derive(Reflect, Clone, Copy, Debug, PartialEq)]
//! pub enum Color {
//!     Red,
//!     Green,
//! }
//! ```

mod attrs;
mod derive_enum;
mod object;

use proc_macro::TokenStream;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Generics};

/// Derive macro for runtime reflection.
///
/// Generates the member descriptors, the borrowed structural view, indexed
/// member access and construction from a dynamic value.
///
/// # Example
///
/// ```rust
/// use allover_derive::Reflect;
///
/// #[derive(Reflect, Clone)]
/// struct Point(i32, i32);
///
/// #[derive(Reflect, Clone, Default)]
/// struct Shape {
///     #[reflect(rename = "Origin")]
///     origin: Option<Box<Shape>>,
///     #[reflect(read_only)]
///     id: u64,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn proc_macro_derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_reflect(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn derive_reflect(ast: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let attrs = attrs::parse_type_attrs(ast)?;
    match &ast.data {
        Data::Struct(s) => object::derive_struct(ast, s, attrs),
        Data::Enum(e) => derive_enum::derive_enum(ast, e, attrs),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "Reflect cannot be derived for unions",
        )),
    }
}

/// Generics of the generated impl. `#[reflect(default)]` also bounds the
/// impl on `Self: Default`.
pub(crate) fn reflect_generics(ast: &DeriveInput, attrs: attrs::TypeAttrs) -> Generics {
    let mut generics = add_reflect_bounds(&ast.generics);
    if attrs.has_default {
        let name = &ast.ident;
        let (_, ty_generics, _) = ast.generics.split_for_impl();
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#name #ty_generics: ::std::default::Default));
    }
    generics
}

pub(crate) fn add_reflect_bounds(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param
            .bounds
            .push(parse_quote!(::allover_core::reflect::Reflect));
        param.bounds.push(parse_quote!(::std::clone::Clone));
    }
    generics
}
