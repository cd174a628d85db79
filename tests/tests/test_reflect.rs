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

use allover_core::error::Error;
use allover_core::mapper::ReflectionCache;
use allover_core::reflect::{
    EnumValue, FieldValue, ObjectValue, Reflect, ReflectRef, Shape, Value, Visibility,
};
use allover_derive::Reflect;
use std::rc::Rc;

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub name: String,
    pub(crate) score: u32,
    email: Option<String>,
    #[reflect(skip)]
    pub cache: Vec<u8>,
    #[reflect(rename = "Age")]
    pub age: u8,
}

#[derive(Reflect, Clone, Debug, PartialEq)]
pub struct Strict {
    pub id: u64,
    pub note: Option<String>,
}

#[derive(Reflect, Clone, Debug, PartialEq)]
pub struct Meters(pub f64);

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct Marker;

#[derive(Reflect, Clone, Debug, PartialEq)]
pub struct Wrapper<T> {
    pub inner: T,
}

#[derive(Reflect, Clone, Copy, Debug, PartialEq)]
pub enum Level {
    Low,
    #[reflect(rename = "MID")]
    Medium,
    High,
}

#[test]
fn descriptor_lists_reflected_members() {
    let descriptor = Profile::describe();
    let names: Vec<_> = descriptor.properties.iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["name", "score", "email", "Age"]);

    let visibility: Vec<_> = descriptor.properties.iter().map(|p| p.visibility).collect();
    assert_eq!(
        visibility,
        vec![
            Visibility::Public,
            Visibility::Restricted,
            Visibility::Private,
            Visibility::Public
        ]
    );
    assert_eq!(
        descriptor.property("email").unwrap().shape,
        Shape::Option(Box::new(Shape::String))
    );
    assert_eq!(descriptor.shape, Shape::Object(std::any::type_name::<Profile>()));
    assert!(descriptor.constructor.is_some());
    assert!(Strict::describe().constructor.is_none());
}

#[test]
fn constructor_builds_default_instance() {
    let instance = Profile::describe().construct().unwrap();
    let profile = instance.as_any().downcast_ref::<Profile>().unwrap();
    assert_eq!(profile, &Profile::default());
}

#[test]
fn indexed_access_follows_descriptor() {
    let mut profile = Profile {
        name: "zoe".into(),
        score: 10,
        email: None,
        cache: vec![1],
        age: 30,
    };
    let index = Profile::describe().property("Age").unwrap().index;
    let age = profile.field_at(index).unwrap();
    assert_eq!(age.to_value(), Value::U8(30));
    assert!(profile.field_at(4).is_none());

    profile
        .set_field_at(index, FieldValue::Value(Value::I64(31)))
        .unwrap();
    assert_eq!(profile.age, 31);
    profile
        .set_field_at(0, FieldValue::Boxed(Box::new(String::from("amy"))))
        .unwrap();
    assert_eq!(profile.name, "amy");
    assert!(profile
        .set_field_at(9, FieldValue::Value(Value::Null))
        .is_err());
}

#[test]
fn snapshot_skips_skipped_members() {
    let profile = Profile {
        name: "n".into(),
        score: 1,
        email: Some("e@x".into()),
        cache: vec![9, 9],
        age: 2,
    };
    let object = profile.to_value().into_object().unwrap();
    assert_eq!(object.len(), 4);
    assert!(object.get("cache").is_none());
    assert_eq!(object.get("Age"), Some(&Value::U8(2)));

    let back = Profile::from_value(Value::Object(object)).unwrap();
    assert_eq!(back.cache, Vec::<u8>::new());
    assert_eq!(back.email.as_deref(), Some("e@x"));
}

#[test]
fn from_value_defaults_and_errors() {
    // lenient when Default is known
    let partial = ObjectValue::new("anything").with_field("name", Value::from("p"));
    let profile = Profile::from_value(Value::Object(partial)).unwrap();
    assert_eq!(profile.name, "p");
    assert_eq!(profile.age, 0);

    // optional members may be absent, others may not
    let strict = Strict::from_value(Value::Object(
        ObjectValue::new("s").with_field("id", Value::U32(5)),
    ))
    .unwrap();
    assert_eq!(strict, Strict { id: 5, note: None });
    let missing = Strict::from_value(Value::Object(ObjectValue::new("s"))).unwrap_err();
    assert!(matches!(missing, Error::Conversion(_)));

    let wrong = Strict::from_value(Value::Object(
        ObjectValue::new("s").with_field("id", Value::from("five")),
    ))
    .unwrap_err();
    match wrong {
        Error::Conversion(msg) => assert!(msg.contains("id"), "{}", msg),
        other => panic!("unexpected {:?}", other),
    }

    assert!(Strict::from_value(Value::I32(1)).is_err());
}

#[test]
fn tuple_and_unit_structs() {
    let meters = Meters(2.5);
    match meters.reflect_ref() {
        ReflectRef::Struct { fields, .. } => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].0, "0");
        }
        _ => panic!("expected struct view"),
    }
    assert_eq!(Meters::from_value(meters.to_value()).unwrap(), meters);

    assert!(Marker::describe().properties.is_empty());
    assert_eq!(Marker::from_value(Marker.to_value()).unwrap(), Marker);
}

#[test]
fn generic_structs_reflect_their_parameter() {
    let wrapped = Wrapper { inner: 7i16 };
    let descriptor = Wrapper::<i16>::describe();
    assert_eq!(descriptor.properties[0].shape, Shape::Integer);
    assert_eq!(
        Wrapper::<i64>::from_value(wrapped.to_value()).unwrap(),
        Wrapper { inner: 7i64 }
    );
}

#[test]
fn unit_enums_by_ordinal_and_name() {
    assert_eq!(Level::shape(), Shape::Enum(std::any::type_name::<Level>()));
    assert_eq!(
        Level::Medium.to_value(),
        Value::Enum(EnumValue::new(std::any::type_name::<Level>(), 1, "MID"))
    );
    assert_eq!(Level::from_value(Value::from("MID")).unwrap(), Level::Medium);
    assert_eq!(Level::from_value(Value::U8(2)).unwrap(), Level::High);
    assert!(matches!(
        Level::from_value(Value::U8(3)),
        Err(Error::UnknownEnum(_))
    ));
    assert!(matches!(
        Level::from_value(Value::from("Medium")),
        Err(Error::UnknownEnum(_))
    ));
}

#[test]
fn clone_reflect_is_independent() {
    let profile = Profile {
        name: "a".into(),
        ..Default::default()
    };
    let mut copy = profile.clone_reflect();
    copy.set_field_at(0, FieldValue::Value(Value::from("b")))
        .unwrap();
    assert_eq!(profile.name, "a");
    assert_eq!(
        copy.as_any().downcast_ref::<Profile>().unwrap().name,
        "b"
    );
}

#[test]
fn reflection_cache_reuses_descriptors() {
    let mut cache = ReflectionCache::new();
    assert!(cache.is_empty());
    let first = cache.get_or_add::<Profile>();
    let second = cache.get_or_add::<Profile>();
    assert!(Rc::ptr_eq(&first, &second));
    cache.get_or_add::<Level>();
    assert_eq!(cache.len(), 2);
    assert!(cache.contains(std::any::TypeId::of::<Level>()));

    cache.clear();
    assert!(cache.is_empty());
    let third = cache.get_or_add::<Profile>();
    assert!(!Rc::ptr_eq(&first, &third));
    assert_eq!(first.properties.len(), third.properties.len());
}
