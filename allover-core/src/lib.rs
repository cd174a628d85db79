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

//! # AllOver Core
//!
//! Core of the AllOver object mapper and enriched binary serializer.
//!
//! ## Architecture
//!
//! - **`reflect`**: the `Reflect` trait, dynamic `Value`s and type descriptors
//! - **`mapper`**: reflection cache, property matcher and `ObjectMapper`
//! - **`serializer`**: per-type binary writers/readers with a tagged dynamic fallback
//! - **`buffer`**: little-endian byte `Writer`/`Reader`
//! - **`types`**: wire type tags and header constants
//! - **`config`**: `SerializerConfig` and `MapperOptions`
//! - **`error`**: the shared `Error` type
//!
//! Most users depend on the `allover` crate, which re-exports this crate
//! together with `#[derive(Reflect)]`.
//!
//! ```rust
//! use allover_core::serializer::BinarySerializer;
//! use allover_core::reflect::{Reflect, Value};
//!
//! let serializer = BinarySerializer::default();
//! let bytes = serializer.serialize(&Some(String::from("hi"))).unwrap();
//! let back: Option<String> = serializer.deserialize(&bytes).unwrap();
//! assert_eq!(back.to_value(), Value::from("hi"));
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod mapper;
pub mod reflect;
pub mod serializer;
pub mod types;

#[doc(hidden)]
pub mod __private {
    pub use crate::reflect::default_slot::{DefaultSlot, ViaDefault, WithoutDefault};
}

pub use config::{MapperOptions, SerializerConfig};
pub use error::Error;
pub use mapper::{map_properties, ObjectMapper, ReflectionCache};
pub use reflect::{FieldValue, Reflect, Value};
pub use serializer::{BinarySerializer, EnrichedBinaryReader, EnrichedBinaryWriter};
