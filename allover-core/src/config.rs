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

use crate::mapper::{BindingScope, NameComparison};

/// Configuration for enriched binary reading and writing.
///
/// Shared between [`BinarySerializer`](crate::serializer::BinarySerializer)
/// and the [`EnrichedBinaryWriter`](crate::serializer::EnrichedBinaryWriter) /
/// [`EnrichedBinaryReader`](crate::serializer::EnrichedBinaryReader) it
/// creates so both sides agree on the format.
///
/// ```rust
/// use allover_core::config::SerializerConfig;
///
/// let config = SerializerConfig::default()
///     .max_depth(16)
///     .dynamic_fallback(false);
/// assert_eq!(config.get_max_depth(), 16);
/// ```
#[derive(Clone, Debug)]
pub struct SerializerConfig {
    /// Maximum nesting of tagged values accepted while reading.
    pub max_depth: u32,
    /// Whether types without a registered writer/reader fall back to the
    /// tagged dynamic encoding.
    pub dynamic_fallback: bool,
    /// Whether `BinarySerializer` prefixes streams with magic and version.
    pub write_header: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        SerializerConfig {
            max_depth: 64,
            dynamic_fallback: true,
            write_header: true,
        }
    }
}

impl SerializerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn dynamic_fallback(mut self, dynamic_fallback: bool) -> Self {
        self.dynamic_fallback = dynamic_fallback;
        self
    }

    pub fn write_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    #[inline(always)]
    pub fn get_max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline(always)]
    pub fn is_dynamic_fallback(&self) -> bool {
        self.dynamic_fallback
    }

    #[inline(always)]
    pub fn is_write_header(&self) -> bool {
        self.write_header
    }
}

/// Default matching rules of an [`ObjectMapper`](crate::mapper::ObjectMapper).
///
/// ```rust
/// use allover_core::config::MapperOptions;
/// use allover_core::mapper::{BindingScope, NameComparison};
///
/// let options = MapperOptions::default()
///     .binding(BindingScope::ALL)
///     .name_comparison(NameComparison::IgnoreCase);
/// assert_eq!(options.get_binding(), BindingScope::ALL);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapperOptions {
    pub binding: BindingScope,
    pub name_comparison: NameComparison,
}

impl MapperOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(mut self, binding: BindingScope) -> Self {
        self.binding = binding;
        self
    }

    pub fn name_comparison(mut self, name_comparison: NameComparison) -> Self {
        self.name_comparison = name_comparison;
        self
    }

    #[inline(always)]
    pub fn get_binding(&self) -> BindingScope {
        self.binding
    }

    #[inline(always)]
    pub fn get_name_comparison(&self) -> NameComparison {
        self.name_comparison
    }
}
