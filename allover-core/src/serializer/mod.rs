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

//! Enriched binary serialization.
//!
//! Types with a registered [`ValueWriter`]/[`ValueReader`] pair are written
//! untagged through it. Everything else reachable through [`Reflect`] goes
//! through the tagged dynamic encoding. Both sides must hold the same
//! registrations.

mod dynamic;
mod reader;
mod registry;
mod strategy;
mod writer;

pub use dynamic::{DynamicBinaryValueReader, DynamicBinaryValueWriter};
pub use reader::EnrichedBinaryReader;
pub use registry::{registered_name, ReaderRegistry, WriterRegistry};
pub use strategy::{BinaryValueReader, BinaryValueWriter, FnStrategy, ValueReader, ValueWriter};
pub use writer::EnrichedBinaryWriter;

use crate::config::SerializerConfig;
use crate::ensure;
use crate::error::Error;
use crate::reflect::Reflect;
use crate::types::{FORMAT_VERSION, MAGIC_NUMBER};
use std::io::Write;
use std::sync::Arc;

/// Entry point owning the configuration and both registries.
///
/// A `BinarySerializer` is `Send + Sync`; every call works on its own
/// writer or reader. Register strategies before sharing it.
///
/// ```rust
/// use allover_core::serializer::BinarySerializer;
///
/// let serializer = BinarySerializer::default().max_depth(8);
/// let bytes = serializer.serialize(&vec![1u32, 2, 3]).unwrap();
/// let back: Vec<u32> = serializer.deserialize(&bytes).unwrap();
/// assert_eq!(back, vec![1, 2, 3]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BinarySerializer {
    config: SerializerConfig,
    writers: Arc<WriterRegistry>,
    readers: Arc<ReaderRegistry>,
}

impl BinarySerializer {
    pub fn new(config: SerializerConfig) -> Self {
        BinarySerializer {
            config,
            ..Default::default()
        }
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn dynamic_fallback(mut self, dynamic_fallback: bool) -> Self {
        self.config.dynamic_fallback = dynamic_fallback;
        self
    }

    pub fn write_header(mut self, write_header: bool) -> Self {
        self.config.write_header = write_header;
        self
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn register_writer<T: Reflect, W: ValueWriter<T>>(&mut self, writer: W) -> &mut Self {
        Arc::make_mut(&mut self.writers).register::<T, W>(writer);
        self
    }

    pub fn register_reader<T: Reflect, R: ValueReader<T>>(&mut self, reader: R) -> &mut Self {
        Arc::make_mut(&mut self.readers).register::<T, R>(reader);
        self
    }

    pub fn register_writer_fn<T, F>(&mut self, f: F) -> &mut Self
    where
        T: Reflect,
        F: Fn(&mut EnrichedBinaryWriter, &T) -> Result<(), Error> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.writers).register_fn(f);
        self
    }

    pub fn register_reader_fn<T, F>(&mut self, f: F) -> &mut Self
    where
        T: Reflect,
        F: Fn(&mut EnrichedBinaryReader<'_>) -> Result<T, Error> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.readers).register_fn(f);
        self
    }

    pub fn writers(&self) -> &WriterRegistry {
        &self.writers
    }

    pub fn readers(&self) -> &ReaderRegistry {
        &self.readers
    }

    /// Fresh writer sharing this serializer's registrations, without header.
    pub fn writer(&self) -> EnrichedBinaryWriter {
        EnrichedBinaryWriter::new(self.writers.clone(), self.config.clone())
    }

    /// Reader over `bf` sharing this serializer's registrations; expects no header.
    pub fn reader<'a>(&self, bf: &'a [u8]) -> EnrichedBinaryReader<'a> {
        EnrichedBinaryReader::new(bf, self.readers.clone(), self.config.clone())
    }

    pub fn serialize<T: Reflect>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let mut writer = self.writer();
        if self.config.write_header {
            writer.write_u16(MAGIC_NUMBER);
            writer.write_u8(FORMAT_VERSION);
        }
        writer.write_value(value)?;
        Ok(writer.into_bytes())
    }

    pub fn serialize_to<T: Reflect, W: Write>(&self, value: &T, sink: &mut W) -> Result<(), Error> {
        let bytes = self.serialize(value)?;
        sink.write_all(&bytes)?;
        Ok(())
    }

    /// Reads a `T` that must span the whole of `bf`.
    pub fn deserialize<T: Reflect>(&self, bf: &[u8]) -> Result<T, Error> {
        let mut reader = self.reader(bf);
        if self.config.write_header {
            let magic = reader.read_u16()?;
            ensure!(
                magic == MAGIC_NUMBER,
                Error::invalid_data(format!("bad magic number {:#06x}", magic))
            );
            let version = reader.read_u8()?;
            ensure!(
                version == FORMAT_VERSION,
                Error::invalid_data(format!("unsupported format version {}", version))
            );
        }
        let value = reader.read_value::<T>()?;
        ensure!(
            reader.remaining() == 0,
            Error::invalid_data(format!(
                "{} trailing bytes after value",
                reader.remaining()
            ))
        );
        Ok(value)
    }
}
