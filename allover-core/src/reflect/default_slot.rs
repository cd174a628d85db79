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

//! Compile-time lookup of a `Default` impl from derived code.
//!
//! A derive macro only sees the item it is attached to, never the other
//! derives, so whether `T: Default` holds is left to method resolution:
//! `(&DefaultSlot::<T>::new()).default_fn()` picks [`ViaDefault`] when the
//! bound holds and falls back to [`WithoutDefault`] through an extra
//! auto-ref otherwise. Inside generic impls the bound is judged against the
//! impl's own where-clauses.

use super::{Constructor, Reflect};
use std::marker::PhantomData;

pub struct DefaultSlot<T>(PhantomData<T>);

impl<T> DefaultSlot<T> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        DefaultSlot(PhantomData)
    }
}

fn construct_default<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

pub trait ViaDefault<T> {
    fn default_fn(&self) -> Option<fn() -> T>;

    fn constructor(&self) -> Option<Constructor>;
}

impl<T: Reflect + Default> ViaDefault<T> for DefaultSlot<T> {
    fn default_fn(&self) -> Option<fn() -> T> {
        Some(T::default)
    }

    fn constructor(&self) -> Option<Constructor> {
        Some(construct_default::<T>)
    }
}

pub trait WithoutDefault<T> {
    fn default_fn(&self) -> Option<fn() -> T>;

    fn constructor(&self) -> Option<Constructor>;
}

impl<T> WithoutDefault<T> for &DefaultSlot<T> {
    fn default_fn(&self) -> Option<fn() -> T> {
        None
    }

    fn constructor(&self) -> Option<Constructor> {
        None
    }
}
