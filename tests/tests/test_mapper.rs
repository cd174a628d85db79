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

use allover_core::config::MapperOptions;
use allover_core::error::Error;
use allover_core::mapper::{map_properties, BindingScope, MatchKind, NameComparison, ObjectMapper};
use allover_core::reflect::{ObjectValue, Reflect, Value};
use allover_derive::Reflect;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct SimpleSource {
    #[reflect(rename = "Prop1")]
    pub prop1: i32,
    #[reflect(rename = "Prop2")]
    pub prop2: String,
}

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct SimpleTarget {
    #[reflect(rename = "Prop1")]
    pub prop1: i64,
    #[reflect(rename = "Prop2")]
    pub prop2: String,
    #[reflect(rename = "Prop3")]
    pub prop3: bool,
}

#[test]
fn maps_same_named_members() {
    let mapper = ObjectMapper::new();
    let source = SimpleSource {
        prop1: 1,
        prop2: "x".to_string(),
    };
    let target: SimpleTarget = mapper.map(&source).unwrap();
    assert_eq!(
        target,
        SimpleTarget {
            prop1: 1,
            prop2: "x".to_string(),
            prop3: false,
        }
    );
    // source untouched
    assert_eq!(source.prop2, "x");
}

#[test]
fn match_kinds_follow_target_order() {
    let mapper = ObjectMapper::new();
    let matches = mapper.matches::<SimpleSource, SimpleTarget>();
    let kinds: Vec<_> = matches.iter().map(|m| (m.target.name, m.kind)).collect();
    assert_eq!(
        kinds,
        vec![("Prop1", MatchKind::Coerce), ("Prop2", MatchKind::Exact)]
    );
}

#[test]
fn no_common_members_leaves_target_default() {
    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Unrelated {
        pub other: u8,
    }

    let mapper = ObjectMapper::new();
    assert!(mapper.matches::<SimpleSource, Unrelated>().is_empty());
    let target: Unrelated = mapper.map(&SimpleSource::default()).unwrap();
    assert_eq!(target, Unrelated::default());
}

#[test]
fn map_into_overwrites_only_matched_members() {
    let mapper = ObjectMapper::new();
    let mut target = SimpleTarget {
        prop1: 9,
        prop2: "old".into(),
        prop3: true,
    };
    mapper
        .map_into(
            &SimpleSource {
                prop1: 2,
                prop2: "new".into(),
            },
            &mut target,
        )
        .unwrap();
    assert_eq!(target.prop1, 2);
    assert_eq!(target.prop2, "new");
    assert!(target.prop3);
}

#[test]
fn private_members_need_private_binding() {
    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Account {
        pub owner: String,
        secret: String,
    }

    let source = Account {
        owner: "ann".into(),
        secret: "s3cr3t".into(),
    };

    let mapper = ObjectMapper::new();
    let copy: Account = mapper.map(&source).unwrap();
    assert_eq!(copy.owner, "ann");
    assert_eq!(copy.secret, "");

    let mapper = ObjectMapper::with_options(MapperOptions::default().binding(BindingScope::ALL));
    let copy: Account = mapper.map(&source).unwrap();
    assert_eq!(copy, source);
}

#[test]
fn restricted_members_are_bound_by_default() {
    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Internal {
        pub(crate) code: u32,
    }

    let mapper = ObjectMapper::new();
    let copy: Internal = mapper.map(&Internal { code: 7 }).unwrap();
    assert_eq!(copy.code, 7);

    let mapper =
        ObjectMapper::with_options(MapperOptions::default().binding(BindingScope::PUBLIC));
    let copy: Internal = mapper.map(&Internal { code: 7 }).unwrap();
    assert_eq!(copy.code, 0);
}

#[test]
fn names_can_match_ignoring_case() {
    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Upper {
        #[reflect(rename = "NAME")]
        pub name: String,
    }

    let options = MapperOptions::default().name_comparison(NameComparison::IgnoreCase);
    let mapper = ObjectMapper::with_options(options);
    let upper: Upper = mapper
        .map(&SimpleSource {
            prop1: 0,
            prop2: String::new(),
        })
        .unwrap();
    assert_eq!(upper, Upper::default());

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Lower {
        pub name: String,
    }
    let lower: Lower = mapper.map(&Upper { name: "z".into() }).unwrap();
    assert_eq!(lower.name, "z");
    assert!(ObjectMapper::new().matches::<Upper, Lower>().is_empty());
}

#[test]
fn access_flags_limit_matching() {
    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Flags {
        #[reflect(read_only)]
        pub id: u32,
        #[reflect(write_only)]
        pub password: String,
        pub label: String,
    }

    let mapper = ObjectMapper::new();
    let source = Flags {
        id: 4,
        password: "pw".into(),
        label: "l".into(),
    };
    let mut target = Flags::default();
    mapper.map_into(&source, &mut target).unwrap();
    assert_eq!(
        target,
        Flags {
            id: 0,
            password: String::new(),
            label: "l".into(),
        }
    );
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub internal_id: u64,
    pub tags: Vec<String>,
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
pub struct CustomerDto {
    pub name: String,
    pub last_name: String,
    pub internal_id: u64,
    pub tag_count: usize,
}

#[test]
fn configured_alias_exclusion_and_converter() {
    let mut mapper = ObjectMapper::new();
    mapper
        .configure::<Customer, CustomerDto, _>(|pair| {
            pair.alias("first_name", "name")
                .exclude("internal_id")
                .alias("tags", "tag_count")
                .convert::<Vec<String>, usize, _>("tag_count", |tags| Ok(tags.len()));
        })
        .unwrap();

    let customer = Customer {
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        internal_id: 42,
        tags: vec!["navy".into(), "cobol".into()],
    };
    let dto: CustomerDto = mapper.map(&customer).unwrap();
    assert_eq!(
        dto,
        CustomerDto {
            name: "Grace".into(),
            last_name: "Hopper".into(),
            internal_id: 0,
            tag_count: 2,
        }
    );

    let kinds: Vec<_> = mapper
        .matches::<Customer, CustomerDto>()
        .iter()
        .map(|m| (m.source.name, m.target.name, m.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("first_name", "name", MatchKind::Exact),
            ("last_name", "last_name", MatchKind::Exact),
            ("tags", "tag_count", MatchKind::Converted),
        ]
    );
}

#[test]
fn converter_errors_carry_member_name() {
    let mut mapper = ObjectMapper::new();
    mapper
        .configure::<Customer, CustomerDto, _>(|pair| {
            pair.alias("tags", "tag_count")
                .convert::<Vec<String>, usize, _>("tag_count", |_| {
                    Err(Error::conversion("too many tags"))
                });
        })
        .unwrap();
    let err = mapper.map::<Customer, CustomerDto>(&Customer::default()).unwrap_err();
    match err {
        Error::Conversion(msg) => assert!(msg.contains("tag_count"), "{}", msg),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn configuration_mistakes_are_reported() {
    let mut mapper = ObjectMapper::new();

    let unknown = mapper.configure::<Customer, CustomerDto, _>(|pair| {
        pair.exclude("no_such_member");
    });
    assert!(matches!(unknown, Err(Error::Configuration(_))));

    let bad_alias = mapper.configure::<Customer, CustomerDto, _>(|pair| {
        pair.alias("nickname", "name");
    });
    assert!(matches!(bad_alias, Err(Error::Configuration(_))));

    let wrong_output = mapper.configure::<Customer, CustomerDto, _>(|pair| {
        pair.convert::<String, String, _>("tag_count", |s| Ok(s.clone()));
    });
    assert!(matches!(wrong_output, Err(Error::Configuration(_))));

    let wrong_input = mapper.configure::<Customer, CustomerDto, _>(|pair| {
        pair.alias("tags", "tag_count")
            .convert::<String, usize, _>("tag_count", |s| Ok(s.len()));
    });
    assert!(matches!(wrong_input, Err(Error::Configuration(_))));

    // failed attempts leave the pair unconfigured
    mapper
        .configure::<Customer, CustomerDto, _>(|pair| {
            pair.exclude("internal_id");
        })
        .unwrap();
    let again = mapper.configure::<Customer, CustomerDto, _>(|_| {});
    assert!(matches!(again, Err(Error::Configuration(_))));
}

#[test]
fn configure_invalidates_cached_matches() {
    let mut mapper = ObjectMapper::new();
    assert_eq!(mapper.matches::<Customer, CustomerDto>().len(), 2);
    mapper
        .configure::<Customer, CustomerDto, _>(|pair| {
            pair.alias("first_name", "name");
        })
        .unwrap();
    assert_eq!(mapper.matches::<Customer, CustomerDto>().len(), 3);
}

#[test]
fn matches_and_descriptors_are_cached() {
    let mapper = ObjectMapper::new();
    let first = mapper.matches::<SimpleSource, SimpleTarget>();
    let second = mapper.matches::<SimpleSource, SimpleTarget>();
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(mapper.cached_types(), 2);
    assert!(Rc::ptr_eq(
        &mapper.descriptor::<SimpleSource>(),
        &mapper.descriptor::<SimpleSource>()
    ));
}

#[derive(Reflect, Clone, Debug, PartialEq)]
pub struct Settings {
    pub retries: u32,
}

#[derive(Reflect, Clone, Default, Debug)]
pub struct Holder {
    pub settings: Arc<Settings>,
}

#[derive(Reflect, Clone, Default, Debug)]
pub struct HolderCopy {
    pub settings: Arc<Settings>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { retries: 3 }
    }
}

#[test]
fn shared_members_are_shared_unless_deep_copied() {
    let holder = Holder {
        settings: Arc::new(Settings { retries: 5 }),
    };

    let mapper = ObjectMapper::new();
    let shallow: HolderCopy = mapper.map(&holder).unwrap();
    assert!(Arc::ptr_eq(&holder.settings, &shallow.settings));

    let mut mapper = ObjectMapper::new();
    mapper
        .configure::<Holder, HolderCopy, _>(|pair| {
            pair.deep_copy("settings");
        })
        .unwrap();
    let deep: HolderCopy = mapper.map(&holder).unwrap();
    assert!(!Arc::ptr_eq(&holder.settings, &deep.settings));
    assert_eq!(*deep.settings, Settings { retries: 5 });
}

#[test]
fn targets_without_constructor_need_a_factory() {
    let source = SimpleSource {
        prop1: 1,
        prop2: "x".into(),
    };

    #[derive(Reflect, Clone, Debug, PartialEq)]
    pub struct Bare {
        #[reflect(rename = "Prop1")]
        pub prop1: i32,
    }

    let mut mapper = ObjectMapper::new();
    assert!(matches!(
        mapper.map::<SimpleSource, Bare>(&source),
        Err(Error::MissingFactory(_))
    ));

    mapper.register(|| Bare { prop1: -1 });
    assert_eq!(mapper.map::<SimpleSource, Bare>(&source).unwrap(), Bare { prop1: 1 });
}

#[derive(Reflect, Clone, Debug)]
pub struct OnlyCount {
    pub count: i32,
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
pub struct DerivedDefault {
    pub count: i64,
    pub note: String,
}

#[derive(Reflect, Clone, Debug, PartialEq)]
pub struct ManualDefault {
    pub count: i64,
    pub note: String,
}

impl Default for ManualDefault {
    fn default() -> Self {
        ManualDefault {
            count: -1,
            note: "manual".into(),
        }
    }
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
#[reflect(default)]
pub struct Tagged<T> {
    pub count: T,
    pub note: String,
}

#[test]
fn default_impls_construct_targets_without_factories() {
    let mapper = ObjectMapper::new();
    assert!(mapper.descriptor::<DerivedDefault>().constructor.is_some());
    assert!(mapper.descriptor::<ManualDefault>().constructor.is_some());
    assert!(mapper.descriptor::<OnlyCount>().constructor.is_none());

    let derived: DerivedDefault = mapper.map(&OnlyCount { count: 6 }).unwrap();
    assert_eq!(
        derived,
        DerivedDefault {
            count: 6,
            note: String::new(),
        }
    );
    let manual: ManualDefault = mapper.map(&OnlyCount { count: 5 }).unwrap();
    assert_eq!(
        manual,
        ManualDefault {
            count: 5,
            note: "manual".into(),
        }
    );
    let tagged: Tagged<u16> = mapper.map(&OnlyCount { count: 4 }).unwrap();
    assert_eq!(
        tagged,
        Tagged {
            count: 4u16,
            note: String::new(),
        }
    );

    // members missing from a dynamic value keep the type's own default
    let partial = ObjectValue::new("partial").with_field("count", Value::I32(2));
    let manual = ManualDefault::from_value(Value::Object(partial)).unwrap();
    assert_eq!(manual.note, "manual");
}

#[test]
fn pair_factory_wins_over_type_factory() {
    #[derive(Reflect, Clone, Debug, PartialEq)]
    pub struct Labelled {
        #[reflect(rename = "Prop1")]
        pub prop1: i64,
        pub label: String,
    }

    let mut mapper = ObjectMapper::new();
    mapper.register(|| Labelled {
        prop1: 0,
        label: "generic".into(),
    });
    mapper
        .configure::<SimpleSource, Labelled, _>(|pair| {
            pair.construct_using(|s: &SimpleSource| Labelled {
                prop1: 0,
                label: format!("from {}", s.prop2),
            });
        })
        .unwrap();

    let out: Labelled = mapper
        .map(&SimpleSource {
            prop1: 8,
            prop2: "pair".into(),
        })
        .unwrap();
    assert_eq!(
        out,
        Labelled {
            prop1: 8,
            label: "from pair".into(),
        }
    );

    let mut other = ObjectMapper::new();
    other.register(|| Labelled {
        prop1: 0,
        label: "generic".into(),
    });
    let out: Labelled = other.map(&SimpleSource::default()).unwrap();
    assert_eq!(out.label, "generic");
}

#[test]
fn failed_mapping_leaves_target_unchanged() {
    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Wide {
        pub a: i32,
        pub b: i64,
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Narrow {
        pub a: i32,
        pub b: u8,
    }

    let mapper = ObjectMapper::new();
    let mut target = Narrow { a: 1, b: 2 };
    let err = mapper
        .map_into(&Wide { a: 10, b: 300 }, &mut target)
        .unwrap_err();
    assert!(matches!(err, Error::Conversion(_)));
    assert_eq!(target, Narrow { a: 1, b: 2 });

    mapper.map_into(&Wide { a: 10, b: 30 }, &mut target).unwrap();
    assert_eq!(target, Narrow { a: 10, b: 30 });
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
pub struct AddressDto {
    pub city: String,
    pub town: String,
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
pub struct Person {
    pub name: String,
    pub address: Address,
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
pub struct PersonDto {
    pub name: String,
    pub address: AddressDto,
}

#[test]
fn nested_objects_map_by_member_name() {
    let person = Person {
        name: "Ann".into(),
        address: Address {
            street: "Main".into(),
            city: "Perth".into(),
        },
    };
    let mapper = ObjectMapper::new();
    assert_eq!(
        mapper.matches::<Person, PersonDto>()[1].kind,
        MatchKind::Nested
    );
    let dto: PersonDto = mapper.map(&person).unwrap();
    assert_eq!(dto.address.city, "Perth");
    assert_eq!(dto.address.town, "");
}

#[test]
fn nested_objects_use_their_pair_configuration() {
    let mut mapper = ObjectMapper::new();
    mapper
        .configure::<Address, AddressDto, _>(|pair| {
            pair.alias("street", "town");
        })
        .unwrap();
    let dto: PersonDto = mapper
        .map(&Person {
            name: "Bo".into(),
            address: Address {
                street: "High".into(),
                city: "Leeds".into(),
            },
        })
        .unwrap();
    assert_eq!(
        dto.address,
        AddressDto {
            city: "Leeds".into(),
            town: "High".into(),
        }
    );
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
pub struct Household {
    pub home: Address,
    pub work: Option<Address>,
    pub past: Vec<Address>,
    pub boxed: Box<Address>,
    pub shared: Arc<Address>,
    pub by_label: BTreeMap<String, Address>,
    pub nested: Option<Vec<Address>>,
}

#[derive(Reflect, Clone, Default, Debug, PartialEq)]
pub struct HouseholdDto {
    pub home: AddressDto,
    pub work: Option<AddressDto>,
    pub past: Vec<AddressDto>,
    pub boxed: Box<AddressDto>,
    pub shared: Arc<AddressDto>,
    pub by_label: BTreeMap<String, AddressDto>,
    pub nested: Option<Vec<AddressDto>>,
}

fn address(street: &str) -> Address {
    Address {
        street: street.into(),
        city: "Oslo".into(),
    }
}

fn address_dto(town: &str) -> AddressDto {
    AddressDto {
        city: "Oslo".into(),
        town: town.into(),
    }
}

#[test]
fn wrapped_nested_objects_use_their_pair_configuration() {
    let mut mapper = ObjectMapper::new();
    mapper
        .configure::<Address, AddressDto, _>(|pair| {
            pair.alias("street", "town");
        })
        .unwrap();

    let kinds: Vec<_> = mapper
        .matches::<Household, HouseholdDto>()
        .iter()
        .map(|m| m.kind)
        .collect();
    assert_eq!(kinds, vec![MatchKind::Nested; 7]);

    let household = Household {
        home: address("Main"),
        work: Some(address("Dock")),
        past: vec![address("Old"), address("Older")],
        boxed: Box::new(address("Boxed")),
        shared: Arc::new(address("Shared")),
        by_label: BTreeMap::from([("cabin".to_string(), address("Lake"))]),
        nested: Some(vec![address("Deep")]),
    };
    let dto: HouseholdDto = mapper.map(&household).unwrap();
    assert_eq!(
        dto,
        HouseholdDto {
            home: address_dto("Main"),
            work: Some(address_dto("Dock")),
            past: vec![address_dto("Old"), address_dto("Older")],
            boxed: Box::new(address_dto("Boxed")),
            shared: Arc::new(address_dto("Shared")),
            by_label: BTreeMap::from([("cabin".to_string(), address_dto("Lake"))]),
            nested: Some(vec![address_dto("Deep")]),
        }
    );

    let empty: HouseholdDto = mapper.map(&Household::default()).unwrap();
    assert_eq!(empty.work, None);
    assert!(empty.past.is_empty());
    assert_eq!(empty.nested, None);
}

#[test]
fn wrapped_nested_errors_name_the_member() {
    let mut mapper = ObjectMapper::new();
    mapper
        .configure::<Address, AddressDto, _>(|pair| {
            pair.alias("street", "town")
                .convert::<String, String, _>("town", |street| {
                    if street.is_empty() {
                        Err(Error::conversion("street required"))
                    } else {
                        Ok(street.to_uppercase())
                    }
                });
        })
        .unwrap();

    // defaulted addresses have no street, so every bare one is filled in
    let household = Household {
        home: address("ok"),
        past: vec![address("ok"), address("")],
        boxed: Box::new(address("ok")),
        shared: Arc::new(address("ok")),
        ..Default::default()
    };
    match mapper.map::<Household, HouseholdDto>(&household).unwrap_err() {
        Error::Conversion(msg) => assert!(msg.contains("past"), "{}", msg),
        other => panic!("unexpected error {:?}", other),
    }

    let fine = Household {
        past: vec![address("ok")],
        ..household
    };
    let dto: HouseholdDto = mapper.map(&fine).unwrap();
    assert_eq!(dto.past, vec![address_dto("OK")]);
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq)]
pub enum Status {
    #[default]
    Active,
    Suspended,
    Closed,
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq)]
pub enum StatusDto {
    #[default]
    Closed,
    Active,
    Suspended,
}

#[test]
fn enums_map_by_variant_name() {
    #[derive(Reflect, Clone, Default, Debug)]
    pub struct WithStatus {
        pub status: Status,
        pub code: Status,
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct WithStatusDto {
        pub status: StatusDto,
        pub code: String,
    }

    let mapper = ObjectMapper::new();
    let dto: WithStatusDto = mapper
        .map(&WithStatus {
            status: Status::Suspended,
            code: Status::Closed,
        })
        .unwrap();
    assert_eq!(dto.status, StatusDto::Suspended);
    assert_eq!(dto.code, "Closed");

    let back: WithStatus = mapper.map(&dto).unwrap();
    assert_eq!(back.status, Status::Suspended);
    assert_eq!(back.code, Status::Closed);
}

#[test]
fn unknown_enum_names_fail() {
    #[derive(Reflect, Clone, Default, Debug)]
    pub struct Raw {
        pub status: String,
    }

    #[derive(Reflect, Clone, Default, Debug)]
    pub struct Typed {
        pub status: Status,
    }

    let mapper = ObjectMapper::new();
    let err = mapper
        .map::<Raw, Typed>(&Raw {
            status: "Deleted".into(),
        })
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEnum(_)));
}

#[test]
fn map_many_stops_at_first_failure() {
    #[derive(Reflect, Clone, Default, Debug)]
    pub struct Big {
        pub n: i64,
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Small {
        pub n: i8,
    }

    let mapper = ObjectMapper::new();
    let ok: Vec<Small> = mapper
        .map_many(&[Big { n: 1 }, Big { n: -2 }])
        .unwrap();
    assert_eq!(ok, vec![Small { n: 1 }, Small { n: -2 }]);

    let sources = vec![Big { n: 1 }, Big { n: 1000 }];
    assert!(mapper.map_many::<Big, Small, _>(&sources).is_err());
}

#[test]
fn map_properties_needs_no_mapper() {
    let mut target = SimpleTarget::default();
    map_properties(
        &SimpleSource {
            prop1: 3,
            prop2: "free".into(),
        },
        &mut target,
        &MapperOptions::default(),
    )
    .unwrap();
    assert_eq!(target.prop1, 3);
    assert_eq!(target.prop2, "free");
}

#[test]
fn tuple_structs_match_by_position_name() {
    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct Pair(pub i32, pub String);

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    pub struct WidePair(pub i64, pub String, pub bool);

    let mapper = ObjectMapper::new();
    let wide: WidePair = mapper.map(&Pair(4, "four".into())).unwrap();
    assert_eq!(wide, WidePair(4, "four".into(), false));
}

mod idempotence {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mapping_twice_gives_same_target(prop1 in any::<i32>(), prop2 in ".*") {
            let mapper = ObjectMapper::new();
            let source = SimpleSource { prop1, prop2 };
            let first: SimpleTarget = mapper.map(&source).unwrap();
            let mut second = first.clone();
            mapper.map_into(&source, &mut second).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.prop1, prop1 as i64);
        }
    }
}
