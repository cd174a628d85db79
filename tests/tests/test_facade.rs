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

use allover::{
    BinarySerializer, BindingScope, EnrichedBinaryReader, EnrichedBinaryWriter, Error,
    MapperOptions, MatchKind, ObjectMapper, Reflect, Value,
};

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct Order {
    pub id: u64,
    pub customer: String,
    pub lines: Vec<OrderLine>,
    internal_note: String,
}

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: u32,
}

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct OrderView {
    pub id: i64,
    pub customer: String,
    pub lines: Vec<OrderLineView>,
    pub total_quantity: u64,
}

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct OrderLineView {
    pub code: String,
    pub quantity: u64,
}

fn order() -> Order {
    Order {
        id: 12,
        customer: "ACME".into(),
        lines: vec![
            OrderLine {
                sku: "A-1".into(),
                quantity: 2,
            },
            OrderLine {
                sku: "B-7".into(),
                quantity: 5,
            },
        ],
        internal_note: "fragile".into(),
    }
}

#[test]
fn map_then_serialize_through_the_facade() -> Result<(), Error> {
    let options = MapperOptions::default().binding(BindingScope::PUBLIC);
    let mut mapper = ObjectMapper::with_options(options);
    mapper.configure::<OrderLine, OrderLineView, _>(|pair| {
        pair.alias("sku", "code");
    })?;
    mapper.configure::<Order, OrderView, _>(|pair| {
        pair.alias("lines", "total_quantity")
            .convert::<Vec<OrderLine>, u64, _>("total_quantity", |lines| {
                Ok(lines.iter().map(|l| l.quantity as u64).sum())
            });
    })?;

    let kinds: Vec<_> = mapper
        .matches::<Order, OrderView>()
        .iter()
        .map(|m| (m.target.name, m.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("id", MatchKind::Coerce),
            ("customer", MatchKind::Exact),
            ("lines", MatchKind::Nested),
            ("total_quantity", MatchKind::Converted),
        ]
    );

    let view: OrderView = mapper.map(&order())?;
    assert_eq!(view.id, 12);
    assert_eq!(view.total_quantity, 7);
    assert_eq!(view.lines[1].code, "B-7");

    let mut serializer = BinarySerializer::default();
    serializer
        .register_writer_fn(|w: &mut EnrichedBinaryWriter, line: &OrderLineView| {
            w.write_string(&line.code);
            w.write_u64(line.quantity);
            Ok(())
        })
        .register_reader_fn(|r: &mut EnrichedBinaryReader<'_>| {
            Ok(OrderLineView {
                code: r.read_string()?,
                quantity: r.read_u64()?,
            })
        });
    let bytes = serializer.serialize(&view)?;
    let back: OrderView = serializer.deserialize(&bytes)?;
    assert_eq!(back, view);

    let snapshot = serializer.deserialize::<Value>(&bytes)?.into_object()?;
    assert_eq!(snapshot.get("customer"), Some(&Value::from("ACME")));
    Ok(())
}
