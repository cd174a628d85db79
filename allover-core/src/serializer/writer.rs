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

use super::dynamic::DynamicBinaryValueWriter;
use super::registry::WriterRegistry;
use super::strategy::BinaryValueWriter;
use crate::buffer::Writer;
use crate::config::SerializerConfig;
use crate::error::Error;
use crate::reflect::{Reflect, ReflectRef, Value};
use crate::types::TypeTag;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::any::{type_name, TypeId};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::Arc;
use tracing::trace;
use uuid::Uuid;

/// Identity of a value being written: address plus concrete type, so a
/// struct and its first member (same address) are told apart.
type Identity = (usize, TypeId);

#[inline(always)]
fn identity_of(value: &dyn Reflect) -> Identity {
    (
        value as *const dyn Reflect as *const () as usize,
        value.as_any().type_id(),
    )
}

macro_rules! delegate_write {
    ($($ty:ident),*) => {
        paste::paste! {
            $(
                #[inline(always)]
                pub fn [<write_ $ty>](&mut self, value: $ty) {
                    self.writer.[<write_ $ty>](value)
                }
            )*
        }
    };
}

/// Binary writer that knows the registered per-type writers.
///
/// [`write_value`](Self::write_value) uses the writer registered for the
/// static type and writes no tag; without one it falls back to
/// [`write_object`](Self::write_object), which prefixes every value with a
/// [`TypeTag`] so the reader can rebuild it without knowing its type.
///
/// A value whose writer, directly or through nested writes, writes that same
/// value again fails with [`Error::SelfReference`].
pub struct EnrichedBinaryWriter {
    writer: Writer,
    writers: Arc<WriterRegistry>,
    config: SerializerConfig,
    type_names: HashMap<String, u32>,
    active: HashSet<Identity>,
}

impl Default for EnrichedBinaryWriter {
    fn default() -> Self {
        EnrichedBinaryWriter::new(Arc::new(WriterRegistry::default()), SerializerConfig::default())
    }
}

impl EnrichedBinaryWriter {
    pub fn new(writers: Arc<WriterRegistry>, config: SerializerConfig) -> EnrichedBinaryWriter {
        EnrichedBinaryWriter {
            writer: Writer::default(),
            writers,
            config,
            type_names: HashMap::new(),
            active: HashSet::new(),
        }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub(crate) fn registered(&self, type_id: TypeId) -> Option<Arc<dyn BinaryValueWriter>> {
        self.writers.get(type_id).cloned()
    }

    /// Writes `value` with the writer registered for `T`, or tagged when
    /// none is registered and the dynamic fallback is enabled.
    pub fn write_value<T: Reflect>(&mut self, value: &T) -> Result<(), Error> {
        match self.registered(TypeId::of::<T>()) {
            Some(strategy) => self.guarded(identity_of(value), type_name::<T>(), |w| {
                strategy.write_value(w, value)
            }),
            None if self.config.dynamic_fallback => {
                trace!(type_name = type_name::<T>(), "no exact writer, writing tagged");
                self.write_object(value)
            }
            None => Err(Error::writer_not_found(format!(
                "no binary writer registered for {}",
                type_name::<T>()
            ))),
        }
    }

    /// Writes `value` tagged, whatever its type.
    pub fn write_object(&mut self, value: &dyn Reflect) -> Result<(), Error> {
        self.guarded(identity_of(value), value.reflect_type_name(), |w| {
            DynamicBinaryValueWriter.write_tagged(w, value)
        })
    }

    /// Writes a dynamic value tagged.
    pub fn write_dynamic(&mut self, value: &Value) -> Result<(), Error> {
        DynamicBinaryValueWriter.write_dynamic(self, value)
    }

    fn guarded<F>(&mut self, identity: Identity, name: &str, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        if !self.active.insert(identity) {
            return Err(Error::self_reference(format!(
                "{} writes itself while it is being written",
                name
            )));
        }
        let result = f(self);
        self.active.remove(&identity);
        result
    }

    /// Presence byte, then the value when present.
    pub fn write_nullable<T: Reflect>(&mut self, value: Option<&T>) -> Result<(), Error> {
        match value {
            Some(v) => {
                self.writer.write_bool(true);
                self.write_value(v)
            }
            None => {
                self.writer.write_bool(false);
                Ok(())
            }
        }
    }

    /// Element count, then every element through [`write_value`](Self::write_value).
    pub fn write_enumerable<'a, T, I>(&mut self, items: I) -> Result<(), Error>
    where
        T: Reflect,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        self.writer.write_varuint32(items.len() as u32);
        for item in items {
            self.write_value(item)?;
        }
        Ok(())
    }

    /// Entry count, then key and value of every entry.
    pub fn write_dictionary<'a, K, V, I>(&mut self, entries: I) -> Result<(), Error>
    where
        K: Reflect,
        V: Reflect,
        I: IntoIterator<Item = (&'a K, &'a V)>,
        I::IntoIter: ExactSizeIterator,
    {
        let entries = entries.into_iter();
        self.writer.write_varuint32(entries.len() as u32);
        for (k, v) in entries {
            self.write_value(k)?;
            self.write_value(v)?;
        }
        Ok(())
    }

    /// Declaration-order ordinal of an enum whose type the reader knows.
    pub fn write_enum<E: Reflect>(&mut self, value: &E) -> Result<(), Error> {
        match value.reflect_ref() {
            ReflectRef::Enum(e) => {
                self.writer.write_varuint32(e.ordinal);
                Ok(())
            }
            _ => Err(Error::type_mismatch("enum", type_name::<E>())),
        }
    }

    /// Writes a type-name reference: a cached index, or `0` and the name.
    pub fn write_type_name(&mut self, name: &str) {
        if let Some(index) = self.type_names.get(name) {
            self.writer.write_varuint32(index + 1);
            return;
        }
        let index = self.type_names.len() as u32;
        self.type_names.insert(name.to_string(), index);
        self.writer.write_varuint32(0);
        self.writer.write_utf8_string(name);
    }

    #[inline(always)]
    pub fn write_tag(&mut self, tag: TypeTag) {
        self.writer.write_u8(tag.into());
    }

    pub fn write_guid(&mut self, value: &Uuid) {
        self.writer.write_bytes(value.as_bytes());
    }

    pub fn write_string(&mut self, value: &str) {
        self.writer.write_utf8_string(value);
    }

    pub fn write_char(&mut self, value: char) {
        self.writer.write_u32(value as u32);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.writer.write_bool(value);
    }

    delegate_write!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);

    pub fn write_varuint32(&mut self, value: u32) {
        self.writer.write_varuint32(value);
    }

    pub fn write_varint64(&mut self, value: i64) {
        self.writer.write_varint64(value);
    }

    /// Seconds since the Unix epoch and sub-second nanoseconds.
    pub fn write_date_time(&mut self, value: &NaiveDateTime) {
        let utc = value.and_utc();
        self.writer.write_i64(utc.timestamp());
        self.writer.write_u32(utc.timestamp_subsec_nanos());
    }

    /// Days since 0001-01-01 (day 1).
    pub fn write_date(&mut self, value: &NaiveDate) {
        self.writer.write_i32(value.num_days_from_ce());
    }

    pub fn write_duration(&mut self, value: &Duration) {
        self.writer.write_i64(value.num_seconds());
        self.writer.write_i32(value.subsec_nanos());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.writer.write_bytes(bytes);
    }

    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.writer.as_slice()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    pub fn flush_to<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        self.writer.flush_to(sink)
    }

    /// Clears written bytes and the type-name cache, keeping registrations.
    pub fn reset(&mut self) {
        self.writer.reset();
        self.type_names.clear();
        self.active.clear();
    }
}
