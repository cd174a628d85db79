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

use crate::error::Error;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Leading bytes of a stream produced by `BinarySerializer` with headers on.
pub const MAGIC_NUMBER: u16 = 0xA110;
pub const FORMAT_VERSION: u8 = 1;

/// Marker written ahead of every dynamically encoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TypeTag {
    Null = 0,
    Bool = 1,
    I8 = 2,
    I16 = 3,
    I32 = 4,
    I64 = 5,
    I128 = 6,
    U8 = 7,
    U16 = 8,
    U32 = 9,
    U64 = 10,
    U128 = 11,
    F32 = 12,
    F64 = 13,
    Char = 14,
    String = 15,
    Guid = 16,
    DateTime = 17,
    Date = 18,
    Duration = 19,
    Enum = 20,
    List = 21,
    Map = 22,
    // user type encoded field by field
    Object = 23,
    // user type encoded by its registered writer
    Custom = 24,
}

impl TypeTag {
    pub fn from_byte(b: u8) -> Result<TypeTag, Error> {
        TypeTag::try_from(b).map_err(|_| Error::unknown_type_tag(b))
    }

    /// Whether the payload starts with a type-name reference.
    pub fn is_named(self) -> bool {
        matches!(self, TypeTag::Enum | TypeTag::Object | TypeTag::Custom)
    }
}
