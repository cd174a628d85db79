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

//! # AllOver
//!
//! Object-to-object mapping driven by runtime reflection, and a binary
//! serializer that combines hand-written per-type writers with a tagged
//! dynamic encoding for everything else.
//!
//! ## Object Mapping
//!
//! Members are matched by name (exact or case-insensitive), filtered by
//! visibility, and copied when their types are the same or coercible.
//! Pairs of types can be configured with exclusions, aliases, converters,
//! deep copies and factories.
//!
//! ```rust
//! use allover::{ObjectMapper, Reflect};
//!
//! #[derive(Reflect, Clone, Default, Debug)]
//! pub struct Customer {
//!     pub first_name: String,
//!     pub last_name: String,
//!     pub age: u8,
//! }
//!
//! #[derive(Reflect, Clone, Default, Debug, PartialEq)]
//! pub struct CustomerDto {
//!     pub full_name: String,
//!     pub age: i64,
//! }
//!
//! # fn main() -> Result<(), allover::Error> {
//! let mut mapper = ObjectMapper::new();
//! mapper.configure::<Customer, CustomerDto, _>(|pair| {
//!     pair.alias("first_name", "full_name");
//! })?;
//!
//! let customer = Customer {
//!     first_name: "Ada".into(),
//!     last_name: "Lovelace".into(),
//!     age: 36,
//! };
//! let dto: CustomerDto = mapper.map(&customer)?;
//! assert_eq!(dto, CustomerDto { full_name: "Ada".into(), age: 36 });
//! # Ok(())
//! # }
//! ```
//!
//! ## Enriched Binary Serialization
//!
//! Types with a registered writer/reader pair are written compactly and
//! without tags. Any other `Reflect` value is written with type tags so it
//! can be read back without knowing its type up front.
//!
//! ```rust
//! use allover::{BinarySerializer, EnrichedBinaryReader, EnrichedBinaryWriter, Reflect};
//!
//! #[derive(Reflect, Clone, Debug, PartialEq)]
//! pub struct Point {
//!     pub x: i32,
//!     pub y: i32,
//! }
//!
//! # fn main() -> Result<(), allover::Error> {
//! let mut serializer = BinarySerializer::default();
//! serializer
//!     .register_writer_fn(|w: &mut EnrichedBinaryWriter, p: &Point| {
//!         w.write_i32(p.x);
//!         w.write_i32(p.y);
//!         Ok(())
//!     })
//!     .register_reader_fn(|r: &mut EnrichedBinaryReader<'_>| {
//!         Ok(Point { x: r.read_i32()?, y: r.read_i32()? })
//!     });
//!
//! let points = vec![Point { x: 1, y: 2 }, Point { x: -3, y: 4 }];
//! let bytes = serializer.serialize(&points)?;
//! let back: Vec<Point> = serializer.deserialize(&bytes)?;
//! assert_eq!(back, points);
//! # Ok(())
//! # }
//! ```

pub use allover_core::{
    config::{MapperOptions, SerializerConfig},
    error::Error,
    mapper::{
        map_properties, BindingScope, MatchKind, NameComparison, ObjectMapper, PairConfiguration,
        PropertyMatch, ReflectionCache,
    },
    reflect::{FieldValue, Reflect, Shape, TypeDescriptor, Value},
    serializer::{
        BinarySerializer, BinaryValueReader, BinaryValueWriter, EnrichedBinaryReader,
        EnrichedBinaryWriter, ValueReader, ValueWriter,
    },
};
pub use allover_derive::Reflect;
