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

use super::dynamic::DynamicBinaryValueReader;
use super::registry::ReaderRegistry;
use super::strategy::BinaryValueReader;
use crate::buffer::Reader;
use crate::config::SerializerConfig;
use crate::error::Error;
use crate::reflect::{assign, unbox, EnumValue, FieldValue, Reflect, Value};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use std::any::{type_name, TypeId};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::trace;
use uuid::Uuid;

macro_rules! delegate_read {
    ($($ty:ident),*) => {
        paste::paste! {
            $(
                #[inline(always)]
                pub fn [<read_ $ty>](&mut self) -> Result<$ty, Error> {
                    self.reader.[<read_ $ty>]()
                }
            )*
        }
    };
}

/// Mirror of [`EnrichedBinaryWriter`](super::EnrichedBinaryWriter).
///
/// Values must be read back in the order and through the same path (exact
/// or tagged) they were written. After any error the reader position is
/// unspecified and the reader should be dropped.
pub struct EnrichedBinaryReader<'a> {
    reader: Reader<'a>,
    readers: Arc<ReaderRegistry>,
    config: SerializerConfig,
    type_names: Vec<String>,
    depth: u32,
}

impl<'a> EnrichedBinaryReader<'a> {
    pub fn new(
        bf: &'a [u8],
        readers: Arc<ReaderRegistry>,
        config: SerializerConfig,
    ) -> EnrichedBinaryReader<'a> {
        EnrichedBinaryReader {
            reader: Reader::new(bf),
            readers,
            config,
            type_names: Vec::new(),
            depth: 0,
        }
    }

    /// Reader without registrations that decodes tagged values only.
    pub fn dynamic(bf: &'a [u8]) -> EnrichedBinaryReader<'a> {
        EnrichedBinaryReader::new(bf, Arc::new(ReaderRegistry::default()), SerializerConfig::default())
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub(crate) fn registered_by_name(&self, name: &str) -> Option<Arc<dyn BinaryValueReader>> {
        self.readers.get_by_name(name).cloned()
    }

    /// Reads a `T` with the reader registered for it, or from a tagged
    /// value when none is registered.
    pub fn read_value<T: Reflect>(&mut self) -> Result<T, Error> {
        if let Some(strategy) = self.readers.get(TypeId::of::<T>()).cloned() {
            return unbox::<T>(strategy.read_value(self)?);
        }
        if !self.config.dynamic_fallback {
            return Err(Error::reader_not_found(format!(
                "no binary reader registered for {}",
                type_name::<T>()
            )));
        }
        trace!(type_name = type_name::<T>(), "no exact reader, reading tagged");
        assign::<T>(self.read_field()?)
    }

    /// Reads one tagged value as a [`Value`].
    pub fn read_object(&mut self) -> Result<Value, Error> {
        Ok(match self.read_field()? {
            FieldValue::Boxed(boxed) => boxed.to_value(),
            FieldValue::Value(value) => value,
        })
    }

    pub(crate) fn read_field(&mut self) -> Result<FieldValue, Error> {
        if self.depth >= self.config.max_depth {
            return Err(Error::depth_exceed(format!(
                "maximum nesting depth ({}) exceeded",
                self.config.max_depth
            )));
        }
        self.depth += 1;
        let result = DynamicBinaryValueReader.read_tagged(self);
        self.depth -= 1;
        result
    }

    pub fn read_nullable<T: Reflect>(&mut self) -> Result<Option<T>, Error> {
        if self.reader.read_bool()? {
            self.read_value().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn read_enumerable<T: Reflect, C: FromIterator<T>>(&mut self) -> Result<C, Error> {
        let count = self.read_length()?;
        (0..count).map(|_| self.read_value::<T>()).collect()
    }

    pub fn read_dictionary<K, V, C>(&mut self) -> Result<C, Error>
    where
        K: Reflect,
        V: Reflect,
        C: FromIterator<(K, V)>,
    {
        let count = self.read_length()?;
        (0..count)
            .map(|_| Ok((self.read_value::<K>()?, self.read_value::<V>()?)))
            .collect()
    }

    pub fn read_enum<E: Reflect>(&mut self) -> Result<E, Error> {
        let ordinal = self.reader.read_varuint32()?;
        E::from_value(Value::Enum(EnumValue {
            type_name: Cow::Borrowed(type_name::<E>()),
            ordinal,
            variant: None,
        }))
    }

    /// Resolves a type-name reference written by `write_type_name`.
    pub fn read_type_name(&mut self) -> Result<String, Error> {
        let reference = self.reader.read_varuint32()?;
        if reference == 0 {
            let name = self.reader.read_utf8_string()?;
            self.type_names.push(name.clone());
            return Ok(name);
        }
        self.type_names
            .get(reference as usize - 1)
            .cloned()
            .ok_or_else(|| {
                Error::invalid_data(format!("unknown type-name reference {}", reference))
            })
    }

    /// Reads a `varuint32` element count and checks it against the bytes left,
    /// each element taking at least one byte.
    pub fn read_length(&mut self) -> Result<usize, Error> {
        let count = self.reader.read_varuint32()? as usize;
        if count > self.reader.remaining() {
            return Err(Error::buffer_out_of_bound(
                self.reader.get_cursor(),
                count,
                self.reader.len(),
            ));
        }
        Ok(count)
    }

    pub fn read_guid(&mut self) -> Result<Uuid, Error> {
        let bytes = self.reader.read_bytes(16)?;
        Uuid::from_slice(bytes).map_err(|e| Error::invalid_data(format!("invalid guid: {}", e)))
    }

    pub fn read_string(&mut self) -> Result<String, Error> {
        self.reader.read_utf8_string()
    }

    pub fn read_char(&mut self) -> Result<char, Error> {
        let code = self.reader.read_u32()?;
        char::from_u32(code)
            .ok_or_else(|| Error::invalid_data(format!("invalid char code point {:#x}", code)))
    }

    pub fn read_bool(&mut self) -> Result<bool, Error> {
        self.reader.read_bool()
    }

    delegate_read!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        self.reader.read_varuint32()
    }

    pub fn read_varint64(&mut self) -> Result<i64, Error> {
        self.reader.read_varint64()
    }

    pub fn read_date_time(&mut self) -> Result<NaiveDateTime, Error> {
        let secs = self.reader.read_i64()?;
        let nanos = self.reader.read_u32()?;
        DateTime::from_timestamp(secs, nanos)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| Error::invalid_data(format!("invalid timestamp {}.{}", secs, nanos)))
    }

    pub fn read_date(&mut self) -> Result<NaiveDate, Error> {
        let days = self.reader.read_i32()?;
        NaiveDate::from_num_days_from_ce_opt(days)
            .ok_or_else(|| Error::invalid_data(format!("invalid day number {}", days)))
    }

    pub fn read_duration(&mut self) -> Result<Duration, Error> {
        let secs = self.reader.read_i64()?;
        let nanos = self.reader.read_i32()?;
        Duration::try_seconds(secs)
            .and_then(|d| d.checked_add(&Duration::nanoseconds(nanos as i64)))
            .ok_or_else(|| Error::invalid_data(format!("invalid duration {}s {}ns", secs, nanos)))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.reader.read_bytes(len)
    }

    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    pub fn position(&self) -> usize {
        self.reader.get_cursor()
    }
}
