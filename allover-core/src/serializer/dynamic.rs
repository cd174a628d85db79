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

//! Tagged encoding used when no exact strategy is registered.
//!
//! Every value starts with a [`TypeTag`] byte. Enums, objects and custom
//! payloads then carry a type-name reference (see
//! [`EnrichedBinaryWriter::write_type_name`]), collections carry a
//! `varuint32` count, and each element is tagged again.

use super::reader::EnrichedBinaryReader;
use super::strategy::{BinaryValueReader, BinaryValueWriter};
use super::writer::EnrichedBinaryWriter;
use crate::error::Error;
use crate::reflect::{EnumValue, FieldValue, ObjectValue, Reflect, ReflectRef, Value};
use crate::types::TypeTag;
use std::any::TypeId;
use std::borrow::Cow;

/// Writes any [`Reflect`] value with type tags.
#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicBinaryValueWriter;

impl DynamicBinaryValueWriter {
    pub(crate) fn write_tagged(
        self,
        w: &mut EnrichedBinaryWriter,
        value: &dyn Reflect,
    ) -> Result<(), Error> {
        if let Some(strategy) = w.registered(value.as_any().type_id()) {
            w.write_tag(TypeTag::Custom);
            w.write_type_name(strategy.type_name());
            return strategy.write_value(w, value);
        }
        if let Some(inner) = value.pointee() {
            return w.write_object(inner);
        }
        match value.reflect_ref() {
            ReflectRef::Scalar(v) => self.write_dynamic(w, &v),
            ReflectRef::Dynamic(v) => self.write_dynamic(w, v),
            ReflectRef::Option(None) => {
                w.write_tag(TypeTag::Null);
                Ok(())
            }
            ReflectRef::Option(Some(inner)) => w.write_object(inner),
            ReflectRef::List(items) => {
                w.write_tag(TypeTag::List);
                w.write_varuint32(items.len() as u32);
                for item in items {
                    w.write_object(item)?;
                }
                Ok(())
            }
            ReflectRef::Map(entries) => {
                w.write_tag(TypeTag::Map);
                w.write_varuint32(entries.len() as u32);
                for (k, v) in entries {
                    w.write_object(k)?;
                    w.write_object(v)?;
                }
                Ok(())
            }
            ReflectRef::Struct { type_name, fields } => {
                if !w.config().is_dynamic_fallback() {
                    return Err(Error::writer_not_found(format!(
                        "no binary writer registered for {}",
                        type_name
                    )));
                }
                w.write_tag(TypeTag::Object);
                w.write_type_name(type_name);
                w.write_varuint32(fields.len() as u32);
                for (name, field) in fields {
                    w.write_string(name);
                    w.write_object(field)?;
                }
                Ok(())
            }
            ReflectRef::Enum(e) => {
                self.write_enum(w, &e);
                Ok(())
            }
        }
    }

    fn write_enum(self, w: &mut EnrichedBinaryWriter, e: &EnumValue) {
        w.write_tag(TypeTag::Enum);
        w.write_type_name(&e.type_name);
        w.write_varuint32(e.ordinal);
    }

    pub(crate) fn write_dynamic(self, w: &mut EnrichedBinaryWriter, value: &Value) -> Result<(), Error> {
        w.write_tag(value.tag());
        match value {
            Value::Null => {}
            Value::Bool(v) => w.write_bool(*v),
            Value::Char(v) => w.write_char(*v),
            Value::I8(v) => w.write_i8(*v),
            Value::I16(v) => w.write_i16(*v),
            Value::I32(v) => w.write_i32(*v),
            Value::I64(v) => w.write_i64(*v),
            Value::I128(v) => w.write_i128(*v),
            Value::U8(v) => w.write_u8(*v),
            Value::U16(v) => w.write_u16(*v),
            Value::U32(v) => w.write_u32(*v),
            Value::U64(v) => w.write_u64(*v),
            Value::U128(v) => w.write_u128(*v),
            Value::F32(v) => w.write_f32(*v),
            Value::F64(v) => w.write_f64(*v),
            Value::String(v) => w.write_string(v),
            Value::Guid(v) => w.write_guid(v),
            Value::DateTime(v) => w.write_date_time(v),
            Value::Date(v) => w.write_date(v),
            Value::Duration(v) => w.write_duration(v),
            Value::Enum(e) => {
                w.write_type_name(&e.type_name);
                w.write_varuint32(e.ordinal);
            }
            Value::List(items) => {
                w.write_varuint32(items.len() as u32);
                for item in items {
                    self.write_dynamic(w, item)?;
                }
            }
            Value::Map(entries) => {
                w.write_varuint32(entries.len() as u32);
                for (k, v) in entries {
                    self.write_dynamic(w, k)?;
                    self.write_dynamic(w, v)?;
                }
            }
            Value::Object(obj) => {
                w.write_type_name(&obj.type_name);
                w.write_varuint32(obj.len() as u32);
                for (name, field) in &obj.fields {
                    w.write_string(name);
                    self.write_dynamic(w, field)?;
                }
            }
        }
        Ok(())
    }
}

impl BinaryValueWriter for DynamicBinaryValueWriter {
    fn value_type(&self) -> TypeId {
        TypeId::of::<dyn Reflect>()
    }

    fn type_name(&self) -> &'static str {
        "dynamic"
    }

    fn write_value(&self, writer: &mut EnrichedBinaryWriter, value: &dyn Reflect) -> Result<(), Error> {
        writer.write_object(value)
    }
}

/// Reads values written by [`DynamicBinaryValueWriter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicBinaryValueReader;

impl DynamicBinaryValueReader {
    /// Reads one tagged value. Custom payloads come back as the value built
    /// by their registered reader, everything else as a [`Value`].
    pub(crate) fn read_tagged(self, r: &mut EnrichedBinaryReader<'_>) -> Result<FieldValue, Error> {
        let tag = TypeTag::from_byte(r.read_u8()?)?;
        if tag == TypeTag::Custom {
            let name = r.read_type_name()?;
            let strategy = r.registered_by_name(&name).ok_or_else(|| {
                Error::reader_not_found(format!("no binary reader registered for {}", name))
            })?;
            return Ok(FieldValue::Boxed(strategy.read_value(r)?));
        }
        self.read_payload(r, tag).map(FieldValue::Value)
    }

    fn read_payload(self, r: &mut EnrichedBinaryReader<'_>, tag: TypeTag) -> Result<Value, Error> {
        Ok(match tag {
            TypeTag::Null => Value::Null,
            TypeTag::Bool => Value::Bool(r.read_bool()?),
            TypeTag::I8 => Value::I8(r.read_i8()?),
            TypeTag::I16 => Value::I16(r.read_i16()?),
            TypeTag::I32 => Value::I32(r.read_i32()?),
            TypeTag::I64 => Value::I64(r.read_i64()?),
            TypeTag::I128 => Value::I128(r.read_i128()?),
            TypeTag::U8 => Value::U8(r.read_u8()?),
            TypeTag::U16 => Value::U16(r.read_u16()?),
            TypeTag::U32 => Value::U32(r.read_u32()?),
            TypeTag::U64 => Value::U64(r.read_u64()?),
            TypeTag::U128 => Value::U128(r.read_u128()?),
            TypeTag::F32 => Value::F32(r.read_f32()?),
            TypeTag::F64 => Value::F64(r.read_f64()?),
            TypeTag::Char => Value::Char(r.read_char()?),
            TypeTag::String => Value::String(r.read_string()?),
            TypeTag::Guid => Value::Guid(r.read_guid()?),
            TypeTag::DateTime => Value::DateTime(r.read_date_time()?),
            TypeTag::Date => Value::Date(r.read_date()?),
            TypeTag::Duration => Value::Duration(r.read_duration()?),
            TypeTag::Enum => {
                let type_name = r.read_type_name()?;
                Value::Enum(EnumValue {
                    type_name: Cow::Owned(type_name),
                    ordinal: r.read_varuint32()?,
                    variant: None,
                })
            }
            TypeTag::List => {
                let count = r.read_length()?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(r.read_object()?);
                }
                Value::List(items)
            }
            TypeTag::Map => {
                let count = r.read_length()?;
                let mut entries = Vec::with_capacity(count);
                for _ in 0..count {
                    let k = r.read_object()?;
                    let v = r.read_object()?;
                    entries.push((k, v));
                }
                Value::Map(entries)
            }
            TypeTag::Object => {
                let mut obj = ObjectValue::new(r.read_type_name()?);
                let count = r.read_length()?;
                for _ in 0..count {
                    let name = r.read_string()?;
                    let field = r.read_object()?;
                    obj.push(name, field);
                }
                Value::Object(obj)
            }
            TypeTag::Custom => {
                return Err(Error::invalid_data("custom payload outside of a tagged read"));
            }
        })
    }
}

impl BinaryValueReader for DynamicBinaryValueReader {
    fn value_type(&self) -> TypeId {
        TypeId::of::<dyn Reflect>()
    }

    fn type_name(&self) -> &'static str {
        "dynamic"
    }

    fn read_value(&self, reader: &mut EnrichedBinaryReader<'_>) -> Result<Box<dyn Reflect>, Error> {
        Ok(match reader.read_field()? {
            FieldValue::Boxed(boxed) => boxed,
            FieldValue::Value(value) => Box::new(value),
        })
    }
}
