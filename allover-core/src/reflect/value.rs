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

use crate::error::Error;
use crate::types::TypeTag;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::any::type_name;
use std::borrow::Cow;
use uuid::Uuid;

/// Owned, dynamically typed snapshot of a reflected value.
///
/// `Value` is what flows between types that do not share a Rust type: the
/// mapper coerces through it and the dynamic reader produces it from tagged
/// bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    String(String),
    Guid(Uuid),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Duration(Duration),
    Enum(EnumValue),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Object(ObjectValue),
}

/// An enum variant identified by its declaration-order ordinal.
///
/// `variant` is known when the value comes from a live Rust enum; values
/// decoded from the wire carry only the type name and ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: Cow<'static, str>,
    pub ordinal: u32,
    pub variant: Option<Cow<'static, str>>,
}

impl EnumValue {
    pub fn new(type_name: &'static str, ordinal: u32, variant: &'static str) -> EnumValue {
        EnumValue {
            type_name: Cow::Borrowed(type_name),
            ordinal,
            variant: Some(Cow::Borrowed(variant)),
        }
    }
}

/// Named members of a user type, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectValue {
    pub type_name: Cow<'static, str>,
    pub fields: Vec<(Cow<'static, str>, Value)>,
}

impl ObjectValue {
    pub fn new<S: Into<Cow<'static, str>>>(type_name: S) -> ObjectValue {
        ObjectValue {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field<S: Into<Cow<'static, str>>>(mut self, name: S, value: Value) -> Self {
        self.push(name, value);
        self
    }

    pub fn push<S: Into<Cow<'static, str>>>(&mut self, name: S, value: Value) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, v)| v)
    }

    /// Removes and returns the member called `name`.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let pos = self.fields.iter().position(|(field, _)| field == name)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Value {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool, char => Char,
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128,
    f32 => F32, f64 => F64,
    String => String, Uuid => Guid,
    NaiveDateTime => DateTime, NaiveDate => Date, Duration => Duration,
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::String(v.to_string())
    }
}

impl Value {
    /// Tag written ahead of this value by the dynamic writer.
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Bool,
            Value::Char(_) => TypeTag::Char,
            Value::I8(_) => TypeTag::I8,
            Value::I16(_) => TypeTag::I16,
            Value::I32(_) => TypeTag::I32,
            Value::I64(_) => TypeTag::I64,
            Value::I128(_) => TypeTag::I128,
            Value::U8(_) => TypeTag::U8,
            Value::U16(_) => TypeTag::U16,
            Value::U32(_) => TypeTag::U32,
            Value::U64(_) => TypeTag::U64,
            Value::U128(_) => TypeTag::U128,
            Value::F32(_) => TypeTag::F32,
            Value::F64(_) => TypeTag::F64,
            Value::String(_) => TypeTag::String,
            Value::Guid(_) => TypeTag::Guid,
            Value::DateTime(_) => TypeTag::DateTime,
            Value::Date(_) => TypeTag::Date,
            Value::Duration(_) => TypeTag::Duration,
            Value::Enum(_) => TypeTag::Enum,
            Value::List(_) => TypeTag::List,
            Value::Map(_) => TypeTag::Map,
            Value::Object(_) => TypeTag::Object,
        }
    }

    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::I128(_) => "i128",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U128(_) => "u128",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::String(_) => "string",
            Value::Guid(_) => "guid",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Duration(_) => "duration",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[cold]
    fn cannot_convert<T: ?Sized>(&self) -> Error {
        Error::conversion(format!(
            "cannot convert {} to {}",
            self.kind(),
            type_name::<T>()
        ))
    }

    /// Converts any integer value into `T`, failing when it is out of range.
    pub fn to_integer<T>(&self) -> Result<T, Error>
    where
        T: TryFrom<i128> + TryFrom<u128>,
    {
        let signed = |v: i128| {
            <T as TryFrom<i128>>::try_from(v).map_err(|_| {
                Error::conversion(format!("{} is out of range for {}", v, type_name::<T>()))
            })
        };
        match *self {
            Value::I8(v) => signed(v as i128),
            Value::I16(v) => signed(v as i128),
            Value::I32(v) => signed(v as i128),
            Value::I64(v) => signed(v as i128),
            Value::I128(v) => signed(v),
            Value::U8(v) => signed(v as i128),
            Value::U16(v) => signed(v as i128),
            Value::U32(v) => signed(v as i128),
            Value::U64(v) => signed(v as i128),
            Value::U128(v) => <T as TryFrom<u128>>::try_from(v).map_err(|_| {
                Error::conversion(format!("{} is out of range for {}", v, type_name::<T>()))
            }),
            _ => Err(self.cannot_convert::<T>()),
        }
    }

    /// Widens any numeric value to `f64`.
    pub fn to_f64(&self) -> Result<f64, Error> {
        Ok(match *self {
            Value::F32(v) => v as f64,
            Value::F64(v) => v,
            Value::I8(v) => v as f64,
            Value::I16(v) => v as f64,
            Value::I32(v) => v as f64,
            Value::I64(v) => v as f64,
            Value::I128(v) => v as f64,
            Value::U8(v) => v as f64,
            Value::U16(v) => v as f64,
            Value::U32(v) => v as f64,
            Value::U64(v) => v as f64,
            Value::U128(v) => v as f64,
            _ => return Err(self.cannot_convert::<f64>()),
        })
    }

    /// Like [`Value::to_f64`], but finite values beyond `f32` fail instead
    /// of becoming infinite.
    pub fn to_f32(&self) -> Result<f32, Error> {
        let wide = self.to_f64()?;
        if wide.is_finite() && wide.abs() > f32::MAX as f64 {
            return Err(Error::conversion(format!("{} is out of range for f32", wide)));
        }
        Ok(wide as f32)
    }

    pub fn into_bool(self) -> Result<bool, Error> {
        match self {
            Value::Bool(v) => Ok(v),
            other => Err(other.cannot_convert::<bool>()),
        }
    }

    pub fn into_char(self) -> Result<char, Error> {
        match self {
            Value::Char(c) => Ok(c),
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(Error::conversion(format!(
                        "string {:?} is not a single character",
                        s
                    ))),
                }
            }
            other => Err(other.cannot_convert::<char>()),
        }
    }

    pub fn into_string(self) -> Result<String, Error> {
        match self {
            Value::String(s) => Ok(s),
            Value::Char(c) => Ok(c.to_string()),
            Value::Guid(g) => Ok(g.to_string()),
            Value::Enum(EnumValue {
                variant: Some(name),
                ..
            }) => Ok(name.into_owned()),
            other => Err(other.cannot_convert::<String>()),
        }
    }

    pub fn into_guid(self) -> Result<Uuid, Error> {
        match self {
            Value::Guid(g) => Ok(g),
            Value::String(s) => Uuid::parse_str(&s)
                .map_err(|e| Error::conversion(format!("invalid guid {:?}: {}", s, e))),
            other => Err(other.cannot_convert::<Uuid>()),
        }
    }

    pub fn into_date_time(self) -> Result<NaiveDateTime, Error> {
        match self {
            Value::DateTime(v) => Ok(v),
            other => Err(other.cannot_convert::<NaiveDateTime>()),
        }
    }

    pub fn into_date(self) -> Result<NaiveDate, Error> {
        match self {
            Value::Date(v) => Ok(v),
            other => Err(other.cannot_convert::<NaiveDate>()),
        }
    }

    pub fn into_duration(self) -> Result<Duration, Error> {
        match self {
            Value::Duration(v) => Ok(v),
            other => Err(other.cannot_convert::<Duration>()),
        }
    }

    pub fn into_list(self) -> Result<Vec<Value>, Error> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(Error::conversion(format!(
                "cannot convert {} to list",
                other.kind()
            ))),
        }
    }

    pub fn into_map(self) -> Result<Vec<(Value, Value)>, Error> {
        match self {
            Value::Map(entries) => Ok(entries),
            other => Err(Error::conversion(format!(
                "cannot convert {} to map",
                other.kind()
            ))),
        }
    }

    pub fn into_object(self) -> Result<ObjectValue, Error> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(Error::conversion(format!(
                "cannot convert {} to object",
                other.kind()
            ))),
        }
    }

    /// Resolves the declaration-order ordinal of an enum variant.
    ///
    /// An enum value of the same type (or one decoded without a variant name)
    /// is taken by ordinal, an enum of another type and a string are taken by
    /// variant name, integers are taken as ordinals.
    pub fn into_enum_ordinal(
        self,
        type_name: &str,
        variants: &[&'static str],
    ) -> Result<u32, Error> {
        let by_name = |name: &str| {
            variants
                .iter()
                .position(|v| *v == name)
                .map(|p| p as u32)
                .ok_or_else(|| {
                    Error::unknown_enum(format!("{} has no variant named {}", type_name, name))
                })
        };
        let ordinal = match self {
            Value::Enum(e) => match e.variant {
                Some(name) if e.type_name != type_name => by_name(&name)?,
                _ => e.ordinal,
            },
            Value::String(s) => by_name(&s)?,
            other => other.to_integer::<u32>()?,
        };
        if (ordinal as usize) < variants.len() {
            Ok(ordinal)
        } else {
            Err(Error::unknown_enum(format!(
                "{} has no variant with ordinal {}",
                type_name, ordinal
            )))
        }
    }
}
