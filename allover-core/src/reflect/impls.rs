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

use super::{Reflect, ReflectRef, Shape, Value};
use crate::error::Error;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::any::{type_name, Any};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

macro_rules! impl_any {
    () => {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }
    };
}

macro_rules! impl_reflect_scalar {
    ($($ty:ty => $shape:ident, $variant:ident, $from:expr;)*) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::$shape
                }

                fn from_value(value: Value) -> Result<Self, Error> {
                    ($from)(value)
                }

                fn reflect_type_name(&self) -> &'static str {
                    type_name::<$ty>()
                }

                impl_any!();

                fn clone_reflect(&self) -> Box<dyn Reflect> {
                    Box::new(self.clone())
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Scalar(Value::$variant(self.clone()))
                }
            }
        )*
    };
}

impl_reflect_scalar! {
    bool => Bool, Bool, Value::into_bool;
    char => Char, Char, Value::into_char;
    i8 => Integer, I8, |v: Value| v.to_integer::<i8>();
    i16 => Integer, I16, |v: Value| v.to_integer::<i16>();
    i32 => Integer, I32, |v: Value| v.to_integer::<i32>();
    i64 => Integer, I64, |v: Value| v.to_integer::<i64>();
    i128 => Integer, I128, |v: Value| v.to_integer::<i128>();
    u8 => Integer, U8, |v: Value| v.to_integer::<u8>();
    u16 => Integer, U16, |v: Value| v.to_integer::<u16>();
    u32 => Integer, U32, |v: Value| v.to_integer::<u32>();
    u64 => Integer, U64, |v: Value| v.to_integer::<u64>();
    u128 => Integer, U128, |v: Value| v.to_integer::<u128>();
    f32 => Float, F32, |v: Value| v.to_f32();
    f64 => Float, F64, |v: Value| v.to_f64();
    String => String, String, Value::into_string;
    Uuid => Guid, Guid, Value::into_guid;
    NaiveDateTime => DateTime, DateTime, Value::into_date_time;
    NaiveDate => Date, Date, Value::into_date;
    Duration => Duration, Duration, Value::into_duration;
}

// pointer-sized integers travel as their 64-bit counterparts
macro_rules! impl_reflect_pointer_sized {
    ($($ty:ty => $variant:ident as $wide:ty;)*) => {
        $(
            impl Reflect for $ty {
                fn shape() -> Shape {
                    Shape::Integer
                }

                fn from_value(value: Value) -> Result<Self, Error> {
                    value.to_integer::<$ty>()
                }

                fn reflect_type_name(&self) -> &'static str {
                    type_name::<$ty>()
                }

                impl_any!();

                fn clone_reflect(&self) -> Box<dyn Reflect> {
                    Box::new(*self)
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Scalar(Value::$variant(*self as $wide))
                }
            }
        )*
    };
}

impl_reflect_pointer_sized! {
    usize => U64 as u64;
    isize => I64 as i64;
}

impl<T: Reflect + Clone> Reflect for Option<T> {
    fn shape() -> Shape {
        Shape::Option(Box::new(T::shape()))
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }

    fn absent() -> Option<Self> {
        Some(None)
    }

    fn reflect_type_name(&self) -> &'static str {
        type_name::<Self>()
    }

    impl_any!();

    fn clone_reflect(&self) -> Box<dyn Reflect> {
        Box::new(self.clone())
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self.as_ref().map(|v| v as &dyn Reflect))
    }
}

macro_rules! impl_reflect_list {
    ($($container:ident<T: $($bound:path),*>;)*) => {
        $(
            impl<T: Reflect + Clone $(+ $bound)*> Reflect for $container<T> {
                fn shape() -> Shape {
                    Shape::List(Box::new(T::shape()))
                }

                fn from_value(value: Value) -> Result<Self, Error> {
                    value.into_list()?.into_iter().map(T::from_value).collect()
                }

                fn reflect_type_name(&self) -> &'static str {
                    type_name::<Self>()
                }

                impl_any!();

                fn clone_reflect(&self) -> Box<dyn Reflect> {
                    Box::new(self.clone())
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::List(self.iter().map(|v| v as &dyn Reflect).collect())
                }
            }
        )*
    };
}

impl_reflect_list! {
    Vec<T: >;
    HashSet<T: Eq, Hash>;
    BTreeSet<T: Ord>;
}

macro_rules! impl_reflect_map {
    ($($container:ident<K: $($bound:path),*>;)*) => {
        $(
            impl<K, V> Reflect for $container<K, V>
            where
                K: Reflect + Clone $(+ $bound)*,
                V: Reflect + Clone,
            {
                fn shape() -> Shape {
                    Shape::Map(Box::new(K::shape()), Box::new(V::shape()))
                }

                fn from_value(value: Value) -> Result<Self, Error> {
                    value
                        .into_map()?
                        .into_iter()
                        .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
                        .collect()
                }

                fn reflect_type_name(&self) -> &'static str {
                    type_name::<Self>()
                }

                impl_any!();

                fn clone_reflect(&self) -> Box<dyn Reflect> {
                    Box::new(self.clone())
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Map(
                        self.iter()
                            .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                            .collect(),
                    )
                }
            }
        )*
    };
}

impl_reflect_map! {
    HashMap<K: Eq, Hash>;
    BTreeMap<K: Ord>;
}

impl<T: Reflect + Clone> Reflect for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        T::from_value(value).map(Box::new)
    }

    fn reflect_type_name(&self) -> &'static str {
        type_name::<Self>()
    }

    impl_any!();

    fn clone_reflect(&self) -> Box<dyn Reflect> {
        Box::new(self.clone())
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        (**self).reflect_ref()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }
}

macro_rules! impl_reflect_shared {
    ($($ptr:ident),*) => {
        $(
            impl<T: Reflect> Reflect for $ptr<T> {
                fn shape() -> Shape {
                    T::shape()
                }

                fn from_value(value: Value) -> Result<Self, Error> {
                    T::from_value(value).map($ptr::new)
                }

                fn reflect_type_name(&self) -> &'static str {
                    type_name::<Self>()
                }

                impl_any!();

                fn clone_reflect(&self) -> Box<dyn Reflect> {
                    Box::new($ptr::clone(self))
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    (**self).reflect_ref()
                }

                fn to_value(&self) -> Value {
                    (**self).to_value()
                }

                fn pointee(&self) -> Option<&dyn Reflect> {
                    Some(&**self)
                }
            }
        )*
    };
}

impl_reflect_shared!(Rc, Arc);

impl Reflect for Value {
    fn shape() -> Shape {
        Shape::Dynamic
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value)
    }

    fn reflect_type_name(&self) -> &'static str {
        type_name::<Value>()
    }

    impl_any!();

    fn clone_reflect(&self) -> Box<dyn Reflect> {
        Box::new(self.clone())
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dynamic(self)
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}
