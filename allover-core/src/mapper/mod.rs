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

//! Object-to-object mapping.
//!
//! [`PropertyMatcher`] pairs the members of two reflected types by name and
//! decides how each value travels. [`ObjectMapper`] caches those matches per
//! type pair, applies per-pair configuration and constructs targets.

mod cache;
mod configuration;
mod matcher;
mod object_mapper;

pub use cache::ReflectionCache;
pub use configuration::PairConfiguration;
pub use matcher::{
    BindingScope, MatchKind, NameComparison, PropertyMatch, PropertyMatcher, PropertyOptions,
    PropertyRef,
};
pub use object_mapper::{map_properties, ObjectMapper};
