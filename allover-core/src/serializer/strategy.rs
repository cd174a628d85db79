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

use super::reader::EnrichedBinaryReader;
use super::writer::EnrichedBinaryWriter;
use crate::error::Error;
use crate::reflect::{downcast_ref, Reflect};
use std::any::{type_name, TypeId};
use std::marker::PhantomData;

/// Encoder bound to exactly one Rust type.
pub trait BinaryValueWriter: Send + Sync {
    fn value_type(&self) -> TypeId;

    fn type_name(&self) -> &'static str;

    fn write_value(&self, writer: &mut EnrichedBinaryWriter, value: &dyn Reflect)
        -> Result<(), Error>;
}

/// Decoder bound to exactly one Rust type.
pub trait BinaryValueReader: Send + Sync {
    fn value_type(&self) -> TypeId;

    fn type_name(&self) -> &'static str;

    fn read_value(&self, reader: &mut EnrichedBinaryReader<'_>) -> Result<Box<dyn Reflect>, Error>;
}

/// Typed encoder for `T`, erased into a [`BinaryValueWriter`] on registration.
///
/// A writer and its paired [`ValueReader`] must produce and consume the same
/// sequence of primitives.
pub trait ValueWriter<T>: Send + Sync + 'static {
    fn write(&self, writer: &mut EnrichedBinaryWriter, value: &T) -> Result<(), Error>;
}

/// Typed decoder for `T`, erased into a [`BinaryValueReader`] on registration.
pub trait ValueReader<T>: Send + Sync + 'static {
    fn read(&self, reader: &mut EnrichedBinaryReader<'_>) -> Result<T, Error>;
}

/// Closure-backed strategy, see `WriterRegistry::register_fn`.
pub struct FnStrategy<F>(pub F);

impl<T, F> ValueWriter<T> for FnStrategy<F>
where
    F: Fn(&mut EnrichedBinaryWriter, &T) -> Result<(), Error> + Send + Sync + 'static,
{
    fn write(&self, writer: &mut EnrichedBinaryWriter, value: &T) -> Result<(), Error> {
        (self.0)(writer, value)
    }
}

impl<T, F> ValueReader<T> for FnStrategy<F>
where
    F: Fn(&mut EnrichedBinaryReader<'_>) -> Result<T, Error> + Send + Sync + 'static,
{
    fn read(&self, reader: &mut EnrichedBinaryReader<'_>) -> Result<T, Error> {
        (self.0)(reader)
    }
}

pub(crate) struct TypedWriter<T, W> {
    inner: W,
    _marker: PhantomData<fn(&T)>,
}

impl<T, W> TypedWriter<T, W> {
    pub(crate) fn new(inner: W) -> Self {
        TypedWriter {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T: Reflect, W: ValueWriter<T>> BinaryValueWriter for TypedWriter<T, W> {
    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn write_value(
        &self,
        writer: &mut EnrichedBinaryWriter,
        value: &dyn Reflect,
    ) -> Result<(), Error> {
        self.inner.write(writer, downcast_ref::<T>(value)?)
    }
}

pub(crate) struct TypedReader<T, R> {
    inner: R,
    _marker: PhantomData<fn() -> T>,
}

impl<T, R> TypedReader<T, R> {
    pub(crate) fn new(inner: R) -> Self {
        TypedReader {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T: Reflect, R: ValueReader<T>> BinaryValueReader for TypedReader<T, R> {
    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn read_value(&self, reader: &mut EnrichedBinaryReader<'_>) -> Result<Box<dyn Reflect>, Error> {
        Ok(Box::new(self.inner.read(reader)?))
    }
}
