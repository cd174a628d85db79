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

use super::matcher::PropertyOptions;
use crate::error::Error;
use crate::reflect::{downcast_ref, Reflect, TypeDescriptor};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

pub(crate) type ErasedConvert = Box<dyn Fn(&dyn Reflect) -> Result<Box<dyn Reflect>, Error>>;

pub(crate) struct Converter {
    pub(crate) source_type: TypeId,
    pub(crate) source_type_name: &'static str,
    pub(crate) convert: ErasedConvert,
}

pub(crate) type PairFactory<S, T> = Box<dyn Fn(&S) -> T>;

/// Mapping rules for one `(S, T)` pair, filled in by the closure passed to
/// [`ObjectMapper::configure`](super::ObjectMapper::configure).
///
/// All member names refer to the target type, except the source side of
/// [`alias`](Self::alias). Mistakes such as an unknown member name are
/// collected and reported by `configure` as [`Error::Configuration`].
pub struct PairConfiguration<S, T> {
    source: Rc<TypeDescriptor>,
    target: Rc<TypeDescriptor>,
    pub(crate) options: PropertyOptions,
    pub(crate) converters: HashMap<String, Converter>,
    pub(crate) factory: Option<PairFactory<S, T>>,
    error: Option<Error>,
    _marker: PhantomData<fn(&S) -> T>,
}

impl<S: Reflect, T: Reflect> PairConfiguration<S, T> {
    pub(crate) fn new(
        source: Rc<TypeDescriptor>,
        target: Rc<TypeDescriptor>,
        options: PropertyOptions,
    ) -> Self {
        PairConfiguration {
            source,
            target,
            options,
            converters: HashMap::new(),
            factory: None,
            error: None,
            _marker: PhantomData,
        }
    }

    fn fail(&mut self, message: String) {
        if self.error.is_none() {
            self.error = Some(Error::configuration(message));
        }
    }

    fn check(&mut self, descriptor_is_target: bool, name: &str) -> bool {
        let descriptor = if descriptor_is_target {
            &self.target
        } else {
            &self.source
        };
        if descriptor.property(name).is_some() {
            return true;
        }
        let message = format!("{} has no member named {}", descriptor.type_name, name);
        self.fail(message);
        false
    }

    /// Leaves `target_name` untouched when mapping.
    pub fn exclude(&mut self, target_name: &str) -> &mut Self {
        if self.check(true, target_name) {
            self.options.excluded.insert(target_name.to_string());
        }
        self
    }

    /// Feeds `target_name` from the source member `source_name`.
    pub fn alias(&mut self, source_name: &str, target_name: &str) -> &mut Self {
        if self.check(false, source_name) && self.check(true, target_name) {
            self.options
                .aliases
                .insert(target_name.to_string(), source_name.to_string());
        }
        self
    }

    /// Copies `target_name` into fresh allocations instead of sharing
    /// `Rc`/`Arc` pointees with the source.
    pub fn deep_copy(&mut self, target_name: &str) -> &mut Self {
        if self.check(true, target_name) {
            self.options.deep_copy.insert(target_name.to_string());
        }
        self
    }

    /// Computes `target_name` from its source member with `convert`.
    pub fn convert<SF, TF, F>(&mut self, target_name: &str, convert: F) -> &mut Self
    where
        SF: Reflect,
        TF: Reflect,
        F: Fn(&SF) -> Result<TF, Error> + 'static,
    {
        if !self.check(true, target_name) {
            return self;
        }
        let member = self.target.property(target_name).map(|p| (p.type_id, p.type_name));
        if let Some((type_id, member_type)) = member {
            if type_id != TypeId::of::<TF>() {
                self.fail(format!(
                    "converter for {}.{} produces {} but the member is {}",
                    self.target.type_name,
                    target_name,
                    type_name::<TF>(),
                    member_type
                ));
                return self;
            }
        }
        let erased: ErasedConvert = Box::new(move |value: &dyn Reflect| {
            let value = downcast_ref::<SF>(value)?;
            Ok(Box::new(convert(value)?) as Box<dyn Reflect>)
        });
        self.converters.insert(
            target_name.to_string(),
            Converter {
                source_type: TypeId::of::<SF>(),
                source_type_name: type_name::<SF>(),
                convert: erased,
            },
        );
        self.options.converted.insert(target_name.to_string());
        self
    }

    /// Builds targets for this pair with `factory` instead of the type's
    /// registered factory or default constructor.
    pub fn construct_using<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn(&S) -> T + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Checks that every converter reads a source member of its declared type.
    pub(crate) fn finish(mut self) -> Result<Self, Error> {
        let mut problems = Vec::new();
        for (target_name, converter) in &self.converters {
            let wanted = self.options.source_name(target_name);
            let comparison = self.options.name_comparison;
            let Some(member) = self
                .source
                .readable()
                .find(|p| comparison.matches(p.name, wanted))
            else {
                problems.push(format!(
                    "converter for {}.{} has no source member {} on {}",
                    self.target.type_name, target_name, wanted, self.source.type_name
                ));
                continue;
            };
            if member.type_id != converter.source_type {
                problems.push(format!(
                    "converter for {}.{} reads {} but {}.{} is {}",
                    self.target.type_name,
                    target_name,
                    converter.source_type_name,
                    self.source.type_name,
                    member.name,
                    member.type_name
                ));
            }
        }
        problems.sort();
        if let Some(problem) = problems.into_iter().next() {
            self.fail(problem);
        }
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}
