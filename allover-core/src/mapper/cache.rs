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

use crate::reflect::{Reflect, TypeDescriptor};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

/// Per-type cache of reflected metadata.
///
/// Entries are shared through `Rc`, so the cache is neither `Send` nor
/// `Sync`: it belongs to a single owner. Wrap it in a lock, or use
/// [`map_properties`](super::map_properties) which keeps no state, when
/// several threads map concurrently.
#[derive(Default)]
pub struct ReflectionCache {
    descriptors: HashMap<TypeId, Rc<TypeDescriptor>>,
}

impl ReflectionCache {
    pub fn new() -> ReflectionCache {
        ReflectionCache::default()
    }

    /// Returns the descriptor of `T`, describing and inserting it on first use.
    pub fn get_or_add<T: Reflect>(&mut self) -> Rc<TypeDescriptor> {
        self.descriptors
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                trace!(type_name = type_name::<T>(), "reflection cache miss");
                Rc::new(T::describe())
            })
            .clone()
    }

    pub fn get(&self, type_id: TypeId) -> Option<Rc<TypeDescriptor>> {
        self.descriptors.get(&type_id).cloned()
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn clear(&mut self) {
        self.descriptors.clear();
    }
}
