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

use super::Reflect;
use std::any::TypeId;

/// Structural kind of a reflected type.
///
/// The property matcher compares shapes to decide whether a source member
/// can be copied into a target member of a different Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Bool,
    Char,
    Integer,
    Float,
    String,
    Guid,
    DateTime,
    Date,
    Duration,
    Enum(&'static str),
    Option(Box<Shape>),
    List(Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
    Object(&'static str),
    /// A [`Value`](super::Value) of any kind.
    Dynamic,
}

impl Shape {
    /// Whether a value of shape `self` can be coerced into `target`.
    pub fn is_compatible_with(&self, target: &Shape) -> bool {
        use Shape::*;
        if self == target {
            return true;
        }
        match (self, target) {
            (Dynamic, _) | (_, Dynamic) => true,
            (Option(a), Option(b)) => a.is_compatible_with(b),
            (Option(a), b) => a.is_compatible_with(b),
            (a, Option(b)) => a.is_compatible_with(b),
            (Integer, Integer) | (Integer, Float) | (Float, Float) => true,
            (Char, String) | (String, Char) => true,
            (Guid, String) | (String, Guid) => true,
            (Enum(_), Enum(_)) | (Enum(_), String) | (String, Enum(_)) => true,
            (List(a), List(b)) => a.is_compatible_with(b),
            (Map(ka, va), Map(kb, vb)) => ka.is_compatible_with(kb) && va.is_compatible_with(vb),
            (Object(_), Object(_)) => true,
            _ => false,
        }
    }

    /// Whether an object sits anywhere in this shape, directly or as the
    /// element of an option, list or map.
    pub fn contains_object(&self) -> bool {
        match self {
            Shape::Object(_) => true,
            Shape::Option(inner) | Shape::List(inner) => inner.contains_object(),
            Shape::Map(key, value) => key.contains_object() || value.contains_object(),
            _ => false,
        }
    }
}

/// Visibility of a reflected member, as declared in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `pub`
    Public,
    /// `pub(crate)`, `pub(super)`, `pub(in path)`
    Restricted,
    /// inherited (no modifier)
    Private,
}

#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    /// Position understood by [`Reflect::field_at`] and [`Reflect::set_field_at`].
    pub index: usize,
    pub name: &'static str,
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub shape: Shape,
    pub visibility: Visibility,
    pub readable: bool,
    pub writable: bool,
}

impl PropertyDescriptor {
    pub fn new<F: Reflect>(index: usize, name: &'static str, visibility: Visibility) -> Self {
        PropertyDescriptor {
            index,
            name,
            type_id: TypeId::of::<F>(),
            type_name: std::any::type_name::<F>(),
            shape: F::shape(),
            visibility,
            readable: true,
            writable: true,
        }
    }

    pub fn with_access(mut self, readable: bool, writable: bool) -> Self {
        self.readable = readable;
        self.writable = writable;
        self
    }
}

pub type Constructor = fn() -> Box<dyn Reflect>;

/// Reflected metadata of one type: its shape, ordered members and, when the
/// type is default-constructible, a constructor.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub shape: Shape,
    pub properties: Vec<PropertyDescriptor>,
    pub constructor: Option<Constructor>,
}

impl TypeDescriptor {
    /// Descriptor of a type without members (primitives, collections, enums).
    pub fn leaf<T: Reflect>() -> Self {
        TypeDescriptor {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            shape: T::shape(),
            properties: Vec::new(),
            constructor: None,
        }
    }

    pub fn object<T: Reflect>(
        properties: Vec<PropertyDescriptor>,
        constructor: Option<Constructor>,
    ) -> Self {
        TypeDescriptor {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            shape: T::shape(),
            properties,
            constructor,
        }
    }

    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn readable(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.readable)
    }

    pub fn writable(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.writable)
    }

    pub fn construct(&self) -> Option<Box<dyn Reflect>> {
        self.constructor.map(|ctor| ctor())
    }
}
