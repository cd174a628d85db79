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

//! Opt-in runtime reflection.
//!
//! A type becomes visible to the mapper and to the dynamic binary writer by
//! implementing [`Reflect`]. The library implements it for primitives,
//! strings, `uuid`/`chrono` types and the std containers; user structs and
//! unit enums get it from `#[derive(Reflect)]`.
//!
//! Two views are offered. [`Reflect::reflect_ref`] borrows the value and
//! exposes its structure without copying, which the writer uses to walk
//! object graphs. [`Reflect::to_value`] produces an owned [`Value`] that can
//! be turned into a different Rust type with [`Reflect::from_value`].

pub(crate) mod default_slot;
mod descriptor;
mod impls;
mod value;

pub use descriptor::{Constructor, PropertyDescriptor, Shape, TypeDescriptor, Visibility};
pub use value::{EnumValue, ObjectValue, Value};

use crate::error::Error;
use std::any::Any;

pub trait Reflect: 'static {
    /// Reflected metadata of the type. Leaf types describe no members.
    fn describe() -> TypeDescriptor
    where
        Self: Sized,
    {
        TypeDescriptor::leaf::<Self>()
    }

    fn shape() -> Shape
    where
        Self: Sized;

    /// Builds a value of this type from a dynamic value, coercing where the
    /// kinds are compatible.
    fn from_value(value: Value) -> Result<Self, Error>
    where
        Self: Sized;

    /// Value used for a member missing from an object value, if any.
    fn absent() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }

    fn reflect_type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Clones the value behind a trait object. Shared pointers clone the
    /// pointer, not the pointee.
    fn clone_reflect(&self) -> Box<dyn Reflect>;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn to_value(&self) -> Value {
        self.reflect_ref().into_value()
    }

    /// The value behind a smart pointer (`Box`, `Rc`, `Arc`).
    fn pointee(&self) -> Option<&dyn Reflect> {
        None
    }

    fn field_at(&self, _index: usize) -> Option<&dyn Reflect> {
        None
    }

    fn set_field_at(&mut self, index: usize, _value: FieldValue) -> Result<(), Error> {
        Err(Error::conversion(format!(
            "{} has no writable member at index {}",
            self.reflect_type_name(),
            index
        )))
    }
}

impl std::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dyn Reflect<{}>", self.reflect_type_name())
    }
}

/// Borrowed structural view of a reflected value.
pub enum ReflectRef<'a> {
    /// Primitive leaf.
    Scalar(Value),
    Option(Option<&'a dyn Reflect>),
    List(Vec<&'a dyn Reflect>),
    Map(Vec<(&'a dyn Reflect, &'a dyn Reflect)>),
    Struct {
        type_name: &'static str,
        fields: Vec<(&'static str, &'a dyn Reflect)>,
    },
    Enum(EnumValue),
    /// An embedded dynamic value.
    Dynamic(&'a Value),
}

impl ReflectRef<'_> {
    pub fn into_value(self) -> Value {
        match self {
            ReflectRef::Scalar(v) => v,
            ReflectRef::Option(None) => Value::Null,
            ReflectRef::Option(Some(inner)) => inner.to_value(),
            ReflectRef::List(items) => {
                Value::List(items.into_iter().map(|i| i.to_value()).collect())
            }
            ReflectRef::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.to_value(), v.to_value()))
                    .collect(),
            ),
            ReflectRef::Struct { type_name, fields } => {
                let mut obj = ObjectValue::new(type_name);
                for (name, field) in fields {
                    obj.push(name, field.to_value());
                }
                Value::Object(obj)
            }
            ReflectRef::Enum(e) => Value::Enum(e),
            ReflectRef::Dynamic(v) => v.clone(),
        }
    }
}

/// Value handed to [`Reflect::set_field_at`].
pub enum FieldValue {
    /// A live value, moved in as is when its type matches the member exactly.
    Boxed(Box<dyn Reflect>),
    /// A dynamic value that goes through [`Reflect::from_value`].
    Value(Value),
}

impl std::fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Boxed(b) => write!(f, "Boxed({})", b.reflect_type_name()),
            FieldValue::Value(v) => write!(f, "Value({:?})", v),
        }
    }
}

/// Turns a [`FieldValue`] into a member of type `T`.
pub fn assign<T: Reflect>(value: FieldValue) -> Result<T, Error> {
    match value {
        FieldValue::Boxed(boxed) => {
            if boxed.as_any().is::<T>() {
                unbox(boxed)
            } else {
                T::from_value(boxed.to_value())
            }
        }
        FieldValue::Value(value) => T::from_value(value),
    }
}

/// Unboxes a reflected value that must be exactly `T`.
pub fn unbox<T: Reflect>(value: Box<dyn Reflect>) -> Result<T, Error> {
    let found = value.reflect_type_name();
    value
        .into_any()
        .downcast::<T>()
        .map(|b| *b)
        .map_err(|_| Error::type_mismatch(std::any::type_name::<T>(), found))
}

/// Downcasts a reflected trait object to a concrete type.
pub fn downcast_ref<T: Reflect>(value: &dyn Reflect) -> Result<&T, Error> {
    value
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::type_mismatch(std::any::type_name::<T>(), value.reflect_type_name()))
}
