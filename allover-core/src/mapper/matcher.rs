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

use crate::config::MapperOptions;
use crate::reflect::{PropertyDescriptor, Shape, TypeDescriptor, Visibility};
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::ops::BitOr;
use tracing::trace;

/// Set of member visibilities eligible for matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BindingScope(u8);

impl BindingScope {
    pub const PUBLIC: BindingScope = BindingScope(0b001);
    pub const RESTRICTED: BindingScope = BindingScope(0b010);
    pub const PRIVATE: BindingScope = BindingScope(0b100);
    pub const ALL: BindingScope = BindingScope(0b111);
    pub const DEFAULT: BindingScope = BindingScope(0b011);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: BindingScope) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn includes(self, visibility: Visibility) -> bool {
        let flag = match visibility {
            Visibility::Public => BindingScope::PUBLIC,
            Visibility::Restricted => BindingScope::RESTRICTED,
            Visibility::Private => BindingScope::PRIVATE,
        };
        self.contains(flag)
    }
}

impl Default for BindingScope {
    fn default() -> Self {
        BindingScope::DEFAULT
    }
}

impl BitOr for BindingScope {
    type Output = BindingScope;

    fn bitor(self, rhs: BindingScope) -> BindingScope {
        BindingScope(self.0 | rhs.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NameComparison {
    #[default]
    CaseSensitive,
    IgnoreCase,
}

impl NameComparison {
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            NameComparison::CaseSensitive => a == b,
            NameComparison::IgnoreCase => a.eq_ignore_ascii_case(b),
        }
    }
}

/// How a matched member value travels from source to target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Same Rust type; the value is cloned.
    Exact,
    /// Different but compatible shapes; the value is coerced.
    Coerce,
    /// Objects of another type, bare or as the elements of options, lists,
    /// maps or pointers.
    Nested,
    /// A converter is configured for the target member.
    Converted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyRef {
    pub index: usize,
    pub name: &'static str,
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub shape: Shape,
}

impl From<&PropertyDescriptor> for PropertyRef {
    fn from(p: &PropertyDescriptor) -> Self {
        PropertyRef {
            index: p.index,
            name: p.name,
            type_id: p.type_id,
            type_name: p.type_name,
            shape: p.shape.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyMatch {
    pub source: PropertyRef,
    pub target: PropertyRef,
    pub kind: MatchKind,
    pub deep_copy: bool,
}

/// Per type-pair matching rules. Names refer to target members.
#[derive(Clone, Debug, Default)]
pub struct PropertyOptions {
    pub binding: BindingScope,
    pub name_comparison: NameComparison,
    pub excluded: HashSet<String>,
    /// target member name -> source member name
    pub aliases: HashMap<String, String>,
    pub deep_copy: HashSet<String>,
    pub converted: HashSet<String>,
}

impl From<&MapperOptions> for PropertyOptions {
    fn from(options: &MapperOptions) -> Self {
        PropertyOptions {
            binding: options.get_binding(),
            name_comparison: options.get_name_comparison(),
            ..Default::default()
        }
    }
}

impl PropertyOptions {
    /// Name of the source member feeding `target`.
    pub fn source_name<'a>(&'a self, target: &'a str) -> &'a str {
        self.aliases.get(target).map(String::as_str).unwrap_or(target)
    }
}

pub struct PropertyMatcher;

impl PropertyMatcher {
    /// Pairs every writable, in-scope target member with a readable, in-scope
    /// source member of the same name.
    ///
    /// Results follow target declaration order. Members present on one side
    /// only and pairs whose types cannot be coerced are left out without error.
    pub fn match_properties(
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        options: &PropertyOptions,
    ) -> Vec<PropertyMatch> {
        let mut matches = Vec::new();
        for target_prop in target.writable() {
            if !options.binding.includes(target_prop.visibility)
                || options.excluded.contains(target_prop.name)
            {
                continue;
            }
            let wanted = options.source_name(target_prop.name);
            // first in declaration order wins
            let Some(source_prop) = source.readable().find(|p| {
                options.binding.includes(p.visibility)
                    && options.name_comparison.matches(p.name, wanted)
            }) else {
                continue;
            };
            let kind = if options.converted.contains(target_prop.name) {
                MatchKind::Converted
            } else if source_prop.type_id == target_prop.type_id {
                MatchKind::Exact
            } else if source_prop.shape.contains_object()
                && target_prop.shape.contains_object()
                && source_prop.shape.is_compatible_with(&target_prop.shape)
            {
                MatchKind::Nested
            } else if source_prop.shape.is_compatible_with(&target_prop.shape) {
                MatchKind::Coerce
            } else {
                trace!(
                    source = source_prop.type_name,
                    target = target_prop.type_name,
                    property = target_prop.name,
                    "skipping incompatible member"
                );
                continue;
            };
            matches.push(PropertyMatch {
                source: source_prop.into(),
                target: target_prop.into(),
                kind,
                deep_copy: options.deep_copy.contains(target_prop.name),
            });
        }
        matches
    }
}
