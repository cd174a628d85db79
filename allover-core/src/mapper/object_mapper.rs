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

use super::cache::ReflectionCache;
use super::configuration::{Converter, PairConfiguration, PairFactory};
use super::matcher::{MatchKind, PropertyMatch, PropertyMatcher, PropertyOptions};
use crate::config::MapperOptions;
use crate::error::Error;
use crate::reflect::{
    assign, downcast_ref, FieldValue, Reflect, ReflectRef, Shape, TypeDescriptor, Value,
};
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

type PairKey = (TypeId, TypeId);

type NestedMap = fn(&ObjectMapper, &dyn Reflect) -> Result<Box<dyn Reflect>, Error>;

type TypeFactory<T> = Box<dyn Fn() -> T>;

struct PairEntry {
    options: PropertyOptions,
    converters: HashMap<String, Converter>,
    // PairFactory<S, T>
    factory: Option<Box<dyn Any>>,
    nested: NestedMap,
}

#[inline(always)]
fn pair_key<S: 'static, T: 'static>() -> PairKey {
    (TypeId::of::<S>(), TypeId::of::<T>())
}

fn map_erased<S: Reflect, T: Reflect>(
    mapper: &ObjectMapper,
    source: &dyn Reflect,
) -> Result<Box<dyn Reflect>, Error> {
    let source = downcast_ref::<S>(source)?;
    Ok(Box::new(mapper.map::<S, T>(source)?))
}

fn read_member<'a>(source: &'a dyn Reflect, m: &PropertyMatch) -> Result<&'a dyn Reflect, Error> {
    source.field_at(m.source.index).ok_or_else(|| {
        Error::conversion(format!(
            "{} has no readable member {}",
            source.reflect_type_name(),
            m.source.name
        ))
    })
}

fn plain_field(value: &dyn Reflect, m: &PropertyMatch) -> FieldValue {
    match m.kind {
        MatchKind::Exact if !m.deep_copy => FieldValue::Boxed(value.clone_reflect()),
        _ => FieldValue::Value(value.to_value()),
    }
}

/// Copies matched members from `source` into `target` without caching or
/// configuration.
///
/// Descriptors and matches are computed on every call and nothing is shared
/// between calls, so this function can be used from any number of threads.
/// Nested objects of different types are matched by member name.
pub fn map_properties<S: Reflect, T: Reflect>(
    source: &S,
    target: &mut T,
    options: &MapperOptions,
) -> Result<(), Error> {
    let matches = PropertyMatcher::match_properties(
        &S::describe(),
        &T::describe(),
        &PropertyOptions::from(options),
    );
    let mut scratch = target.clone_reflect();
    for m in &matches {
        let field = plain_field(read_member(source, m)?, m);
        scratch
            .set_field_at(m.target.index, field)
            .map_err(|e| e.with_property(m.target.name))?;
    }
    *target = assign::<T>(FieldValue::Boxed(scratch))?;
    Ok(())
}

/// Object-to-object mapper with per type-pair configuration and caches.
///
/// The mapper caches type descriptors and property matches in interior
/// cells, so it is `!Sync`; give each thread its own mapper or use
/// [`map_properties`].
///
/// ```rust
/// use allover_core::mapper::ObjectMapper;
/// use allover_derive::Reflect;
///
/// #[derive(Reflect, Clone, Default)]
/// struct Person { pub name: String, pub age: u8 }
///
/// #[derive(Reflect, Clone, Default, Debug, PartialEq)]
/// struct PersonDto { pub name: String, pub age: i32 }
///
/// let mapper = ObjectMapper::new();
/// let dto: PersonDto = mapper.map(&Person { name: "ann".into(), age: 30 }).unwrap();
/// assert_eq!(dto, PersonDto { name: "ann".into(), age: 30 });
/// ```
pub struct ObjectMapper {
    options: MapperOptions,
    cache: RefCell<ReflectionCache>,
    matches: RefCell<HashMap<PairKey, Rc<[PropertyMatch]>>>,
    pairs: HashMap<PairKey, PairEntry>,
    // (type_name::<S>(), type_name::<T>()) of every configured pair
    pairs_by_name: HashMap<(&'static str, &'static str), PairKey>,
    // TypeFactory<T>
    factories: HashMap<TypeId, Box<dyn Any>>,
}

impl Default for ObjectMapper {
    fn default() -> Self {
        ObjectMapper::new()
    }
}

impl ObjectMapper {
    pub fn new() -> ObjectMapper {
        ObjectMapper::with_options(MapperOptions::default())
    }

    pub fn with_options(options: MapperOptions) -> ObjectMapper {
        ObjectMapper {
            options,
            cache: RefCell::new(ReflectionCache::new()),
            matches: RefCell::new(HashMap::new()),
            pairs: HashMap::new(),
            pairs_by_name: HashMap::new(),
            factories: HashMap::new(),
        }
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Cached descriptor of `T`.
    pub fn descriptor<T: Reflect>(&self) -> Rc<TypeDescriptor> {
        self.cache.borrow_mut().get_or_add::<T>()
    }

    /// Number of types whose descriptors are cached.
    pub fn cached_types(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Declares how `S` maps onto `T`.
    ///
    /// A pair can be configured once; a second call, or any unknown member
    /// name or mistyped converter inside `f`, fails with
    /// [`Error::Configuration`] and leaves the mapper unchanged.
    pub fn configure<S, T, F>(&mut self, f: F) -> Result<(), Error>
    where
        S: Reflect,
        T: Reflect,
        F: FnOnce(&mut PairConfiguration<S, T>),
    {
        let key = pair_key::<S, T>();
        if self.pairs.contains_key(&key) {
            return Err(Error::configuration(format!(
                "mapping from {} to {} is already configured",
                type_name::<S>(),
                type_name::<T>()
            )));
        }
        let mut cfg = PairConfiguration::new(
            self.descriptor::<S>(),
            self.descriptor::<T>(),
            PropertyOptions::from(&self.options),
        );
        f(&mut cfg);
        let cfg = cfg.finish()?;
        debug!(
            source = type_name::<S>(),
            target = type_name::<T>(),
            excluded = cfg.options.excluded.len(),
            aliases = cfg.options.aliases.len(),
            converters = cfg.converters.len(),
            "configured mapping"
        );
        let factory = cfg
            .factory
            .map(|f: PairFactory<S, T>| Box::new(f) as Box<dyn Any>);
        self.pairs.insert(
            key,
            PairEntry {
                options: cfg.options,
                converters: cfg.converters,
                factory,
                nested: map_erased::<S, T>,
            },
        );
        self.pairs_by_name
            .insert((type_name::<S>(), type_name::<T>()), key);
        self.matches.get_mut().remove(&key);
        Ok(())
    }

    /// Registers a parameterless factory for targets of type `T`.
    pub fn register<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Reflect,
        F: Fn() -> T + 'static,
    {
        debug!(target_type = type_name::<T>(), "registered factory");
        let factory: TypeFactory<T> = Box::new(factory);
        self.factories.insert(TypeId::of::<T>(), Box::new(factory));
        self
    }

    /// Resolved matches for `(S, T)`; every call returns the same `Rc`.
    pub fn matches<S: Reflect, T: Reflect>(&self) -> Rc<[PropertyMatch]> {
        let key = pair_key::<S, T>();
        if let Some(found) = self.matches.borrow().get(&key) {
            return found.clone();
        }
        let source = self.descriptor::<S>();
        let target = self.descriptor::<T>();
        let computed: Rc<[PropertyMatch]> = match self.pairs.get(&key) {
            Some(entry) => PropertyMatcher::match_properties(&source, &target, &entry.options),
            None => PropertyMatcher::match_properties(
                &source,
                &target,
                &PropertyOptions::from(&self.options),
            ),
        }
        .into();
        trace!(
            source = source.type_name,
            target = target.type_name,
            matched = computed.len(),
            "computed property matches"
        );
        self.matches.borrow_mut().insert(key, computed.clone());
        computed
    }

    /// Builds a `T` and copies the matched members of `source` into it.
    pub fn map<S: Reflect, T: Reflect>(&self, source: &S) -> Result<T, Error> {
        let mut target = self.create::<S, T>(source)?;
        self.map_into(source, &mut target)?;
        Ok(target)
    }

    /// Copies the matched members of `source` into an existing `target`.
    ///
    /// Either every member is written or, on error, `target` is left as it was.
    pub fn map_into<S: Reflect, T: Reflect>(&self, source: &S, target: &mut T) -> Result<(), Error> {
        let matches = self.matches::<S, T>();
        if matches.is_empty() {
            return Ok(());
        }
        let entry = self.pairs.get(&pair_key::<S, T>());
        let mut scratch = target.clone_reflect();
        for m in matches.iter() {
            let value = read_member(source, m)?;
            let field = match m.kind {
                MatchKind::Converted => {
                    let converter = entry
                        .and_then(|e| e.converters.get(m.target.name))
                        .ok_or_else(|| {
                            Error::configuration(format!(
                                "no converter registered for {}",
                                m.target.name
                            ))
                        })?;
                    let converted =
                        (converter.convert)(value).map_err(|e| e.with_property(m.target.name))?;
                    FieldValue::Boxed(converted)
                }
                MatchKind::Nested => match self.pairs.get(&(m.source.type_id, m.target.type_id)) {
                    Some(nested) => FieldValue::Boxed(
                        (nested.nested)(self, value).map_err(|e| e.with_property(m.target.name))?,
                    ),
                    None => FieldValue::Value(
                        self.project(value, &m.target.shape)
                            .map_err(|e| e.with_property(m.target.name))?,
                    ),
                },
                MatchKind::Exact | MatchKind::Coerce => plain_field(value, m),
            };
            scratch
                .set_field_at(m.target.index, field)
                .map_err(|e| e.with_property(m.target.name))?;
        }
        *target = assign::<T>(FieldValue::Boxed(scratch))?;
        Ok(())
    }

    /// Maps every element of `sources`, stopping at the first failure.
    pub fn map_many<'a, S, T, I>(&self, sources: I) -> Result<Vec<T>, Error>
    where
        S: Reflect,
        T: Reflect,
        I: IntoIterator<Item = &'a S>,
    {
        sources.into_iter().map(|s| self.map::<S, T>(s)).collect()
    }

    /// Snapshot of `value` laid out for a member of shape `target`. Objects
    /// whose type pair is configured are mapped through that pair, wherever
    /// they sit inside options, lists, maps and pointers.
    fn project(&self, value: &dyn Reflect, target: &Shape) -> Result<Value, Error> {
        let mut value = value;
        while let Some(inner) = value.pointee() {
            value = inner;
        }
        if self.pairs_by_name.is_empty() {
            return Ok(value.to_value());
        }
        Ok(match (value.reflect_ref(), target) {
            (ReflectRef::Struct { type_name, .. }, Shape::Object(target_name)) => {
                let pair = self
                    .pairs_by_name
                    .get(&(type_name, *target_name))
                    .and_then(|key| self.pairs.get(key));
                match pair {
                    Some(pair) => (pair.nested)(self, value)?.to_value(),
                    None => value.to_value(),
                }
            }
            (ReflectRef::Option(None), _) => Value::Null,
            (ReflectRef::Option(Some(inner)), _) => {
                let shape = match target {
                    Shape::Option(shape) => shape.as_ref(),
                    shape => shape,
                };
                self.project(inner, shape)?
            }
            (_, Shape::Option(shape)) => self.project(value, shape)?,
            (ReflectRef::List(items), Shape::List(shape)) => Value::List(
                items
                    .into_iter()
                    .map(|item| self.project(item, shape))
                    .collect::<Result<_, _>>()?,
            ),
            (ReflectRef::Map(entries), Shape::Map(key_shape, value_shape)) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| {
                        Ok((self.project(k, key_shape)?, self.project(v, value_shape)?))
                    })
                    .collect::<Result<_, Error>>()?,
            ),
            _ => value.to_value(),
        })
    }

    fn create<S: Reflect, T: Reflect>(&self, source: &S) -> Result<T, Error> {
        let pair_factory = self
            .pairs
            .get(&pair_key::<S, T>())
            .and_then(|e| e.factory.as_ref())
            .and_then(|f| f.downcast_ref::<PairFactory<S, T>>());
        if let Some(factory) = pair_factory {
            return Ok(factory(source));
        }
        let type_factory = self
            .factories
            .get(&TypeId::of::<T>())
            .and_then(|f| f.downcast_ref::<TypeFactory<T>>());
        if let Some(factory) = type_factory {
            return Ok(factory());
        }
        let descriptor = self.descriptor::<T>();
        match descriptor.construct() {
            Some(instance) => assign::<T>(FieldValue::Boxed(instance)),
            None => Err(Error::missing_factory(format!(
                "{} has no registered factory and no default constructor",
                descriptor.type_name
            ))),
        }
    }
}
