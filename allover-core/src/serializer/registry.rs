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

//! Strategy registries keyed by exact Rust type.
//!
//! Registries are populated up front and then shared read-only (behind
//! `Arc`) by every writer or reader created from them.

use super::reader::EnrichedBinaryReader;
use super::strategy::{
    BinaryValueReader, BinaryValueWriter, FnStrategy, TypedReader, TypedWriter, ValueReader,
    ValueWriter,
};
use super::writer::EnrichedBinaryWriter;
use crate::error::Error;
use crate::reflect::Reflect;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Default)]
pub struct WriterRegistry {
    writers: HashMap<TypeId, Arc<dyn BinaryValueWriter>>,
}

impl WriterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `writer` for `T`, replacing any earlier writer for `T`.
    pub fn register<T: Reflect, W: ValueWriter<T>>(&mut self, writer: W) -> &mut Self {
        self.register_strategy(Arc::new(TypedWriter::<T, W>::new(writer)))
    }

    pub fn register_fn<T, F>(&mut self, f: F) -> &mut Self
    where
        T: Reflect,
        F: Fn(&mut EnrichedBinaryWriter, &T) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.register::<T, _>(FnStrategy(f))
    }

    pub fn register_strategy(&mut self, writer: Arc<dyn BinaryValueWriter>) -> &mut Self {
        debug!(type_name = writer.type_name(), "registered binary writer");
        self.writers.insert(writer.value_type(), writer);
        self
    }

    #[inline(always)]
    pub fn get(&self, type_id: TypeId) -> Option<&Arc<dyn BinaryValueWriter>> {
        self.writers.get(&type_id)
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.writers.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

#[derive(Clone, Default)]
pub struct ReaderRegistry {
    readers: HashMap<TypeId, Arc<dyn BinaryValueReader>>,
    // tagged custom payloads name their type
    by_name: HashMap<&'static str, Arc<dyn BinaryValueReader>>,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `reader` for `T`, replacing any earlier reader for `T`.
    pub fn register<T: Reflect, R: ValueReader<T>>(&mut self, reader: R) -> &mut Self {
        self.register_strategy(Arc::new(TypedReader::<T, R>::new(reader)))
    }

    pub fn register_fn<T, F>(&mut self, f: F) -> &mut Self
    where
        T: Reflect,
        F: Fn(&mut EnrichedBinaryReader<'_>) -> Result<T, Error> + Send + Sync + 'static,
    {
        self.register::<T, _>(FnStrategy(f))
    }

    pub fn register_strategy(&mut self, reader: Arc<dyn BinaryValueReader>) -> &mut Self {
        debug!(type_name = reader.type_name(), "registered binary reader");
        self.by_name.insert(reader.type_name(), reader.clone());
        self.readers.insert(reader.value_type(), reader);
        self
    }

    #[inline(always)]
    pub fn get(&self, type_id: TypeId) -> Option<&Arc<dyn BinaryValueReader>> {
        self.readers.get(&type_id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Arc<dyn BinaryValueReader>> {
        self.by_name.get(name)
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.readers.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl std::fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.writers.values().map(|w| w.type_name()))
            .finish()
    }
}

impl std::fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.readers.values().map(|r| r.type_name()))
            .finish()
    }
}

/// Name under which [`ReaderRegistry::get_by_name`] finds the reader for `T`.
pub fn registered_name<T: 'static>() -> &'static str {
    type_name::<T>()
}
