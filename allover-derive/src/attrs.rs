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

//! Parsing of `#[reflect(...)]` attributes.
//!
//! Type level:
//! - `default`: use `Default` directly instead of resolving it per impl
//!
//! Field level:
//! - `skip`: not reflected; rebuilt with `Default::default()`
//! - `rename = "name"`: reflected under another name
//! - `read_only` / `write_only`: restricts which side of a mapping the member takes
//!
//! Variants accept `rename` only.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, Field, Variant};

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeAttrs {
    /// `#[reflect(default)]`: `Self: Default` holds even where the generated
    /// impl's own bounds cannot show it.
    pub has_default: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FieldAttrs {
    pub skip: bool,
    pub rename: Option<String>,
    pub read_only: bool,
    pub write_only: bool,
}

impl FieldAttrs {
    pub fn readable(&self) -> bool {
        !self.write_only
    }

    pub fn writable(&self) -> bool {
        !self.read_only
    }
}

fn reflect_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|a| a.path().is_ident("reflect"))
}

pub fn parse_type_attrs(ast: &DeriveInput) -> syn::Result<TypeAttrs> {
    let mut attrs = TypeAttrs::default();
    for attr in reflect_attrs(&ast.attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                attrs.has_default = true;
                Ok(())
            } else {
                Err(meta.error("unsupported type attribute, expected `default`"))
            }
        })?;
    }
    Ok(attrs)
}

pub fn parse_field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in reflect_attrs(&field.attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = true;
            } else if meta.path.is_ident("rename") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                attrs.rename = Some(lit.value());
            } else if meta.path.is_ident("read_only") {
                attrs.read_only = true;
            } else if meta.path.is_ident("write_only") {
                attrs.write_only = true;
            } else {
                return Err(meta.error(
                    "unsupported field attribute, expected one of `skip`, `rename`, `read_only`, `write_only`",
                ));
            }
            Ok(())
        })?;
    }
    if attrs.read_only && attrs.write_only {
        return Err(syn::Error::new_spanned(
            field,
            "a member cannot be both `read_only` and `write_only`",
        ));
    }
    Ok(attrs)
}

pub fn parse_variant_rename(variant: &Variant) -> syn::Result<Option<String>> {
    let mut rename = None;
    for attr in reflect_attrs(&variant.attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported variant attribute, expected `rename`"))
            }
        })?;
    }
    Ok(rename)
}

/// Maps Rust visibility onto the binding scopes the mapper filters on.
pub fn visibility_tokens(vis: &syn::Visibility) -> TokenStream {
    match vis {
        syn::Visibility::Public(_) => quote!(::allover_core::reflect::Visibility::Public),
        syn::Visibility::Restricted(_) => quote!(::allover_core::reflect::Visibility::Restricted),
        syn::Visibility::Inherited => quote!(::allover_core::reflect::Visibility::Private),
    }
}
