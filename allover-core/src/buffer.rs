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

//! Sequential byte buffers.
//!
//! [`Writer`] appends fixed-width little-endian primitives, LEB128 varints
//! and length-prefixed UTF-8 strings to a `Vec<u8>`. [`Reader`] walks a byte
//! slice with a cursor; every read is bounds checked so a truncated input
//! surfaces as [`Error::BufferOutOfBound`] instead of a garbage value.

use crate::error::Error;
use byteorder::{ByteOrder, LittleEndian};
use std::io::Write;

macro_rules! impl_fixed_write {
    ($($name:ident: $ty:ty => $bo:ident, $size:expr;)*) => {
        $(
            #[inline(always)]
            pub fn $name(&mut self, value: $ty) {
                let mut bytes = [0u8; $size];
                LittleEndian::$bo(&mut bytes, value);
                self.bf.extend_from_slice(&bytes);
            }
        )*
    };
}

macro_rules! impl_fixed_read {
    ($($name:ident: $ty:ty => $bo:ident, $size:expr;)*) => {
        $(
            #[inline(always)]
            pub fn $name(&mut self) -> Result<$ty, Error> {
                let bytes = self.read_bytes($size)?;
                Ok(LittleEndian::$bo(bytes))
            }
        )*
    };
}

#[derive(Default, Debug, Clone)]
pub struct Writer {
    pub(crate) bf: Vec<u8>,
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Writer {
        Writer {
            bf: Vec::with_capacity(capacity),
        }
    }

    pub fn reset(&mut self) {
        // keep capacity and reset len to 0
        self.bf.clear();
    }

    pub fn dump(&self) -> Vec<u8> {
        self.bf.clone()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bf
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.bf.reserve(additional);
    }

    /// Copies the buffered bytes into `sink`.
    pub fn flush_to<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        sink.write_all(&self.bf)?;
        Ok(())
    }

    pub fn write_bytes(&mut self, v: &[u8]) -> usize {
        self.bf.extend_from_slice(v);
        v.len()
    }

    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) {
        self.bf.push(value);
    }

    #[inline(always)]
    pub fn write_i8(&mut self, value: i8) {
        self.bf.push(value as u8);
    }

    #[inline(always)]
    pub fn write_bool(&mut self, value: bool) {
        self.bf.push(value as u8);
    }

    impl_fixed_write! {
        write_u16: u16 => write_u16, 2;
        write_i16: i16 => write_i16, 2;
        write_u32: u32 => write_u32, 4;
        write_i32: i32 => write_i32, 4;
        write_u64: u64 => write_u64, 8;
        write_i64: i64 => write_i64, 8;
        write_u128: u128 => write_u128, 16;
        write_i128: i128 => write_i128, 16;
        write_f32: f32 => write_f32, 4;
        write_f64: f64 => write_f64, 8;
    }

    pub fn write_varuint32(&mut self, value: u32) {
        self.write_varuint64(value as u64)
    }

    pub fn write_varint32(&mut self, value: i32) {
        let zigzag = ((value << 1) ^ (value >> 31)) as u32;
        self.write_varuint32(zigzag)
    }

    pub fn write_varuint64(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.bf.push(((value as u8) & 0x7F) | 0x80);
            value >>= 7;
        }
        self.bf.push(value as u8);
    }

    pub fn write_varint64(&mut self, value: i64) {
        let zigzag = ((value << 1) ^ (value >> 63)) as u64;
        self.write_varuint64(zigzag)
    }

    /// Writes the byte length as `varuint32` followed by the UTF-8 bytes.
    pub fn write_utf8_string(&mut self, s: &str) {
        self.write_varuint32(s.len() as u32);
        self.bf.extend_from_slice(s.as_bytes());
    }
}

#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    pub fn init(&mut self, bf: &'a [u8]) {
        self.bf = bf;
        self.cursor = 0;
    }

    pub fn get_cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.bf.len() - self.cursor
    }

    pub fn slice_after_cursor(&self) -> &'a [u8] {
        let bf = self.bf;
        &bf[self.cursor..]
    }

    #[inline(always)]
    fn check_bound(&self, n: usize) -> Result<(), Error> {
        if self.cursor + n > self.bf.len() {
            return Err(Error::buffer_out_of_bound(self.cursor, n, self.bf.len()));
        }
        Ok(())
    }

    pub fn skip(&mut self, len: usize) -> Result<(), Error> {
        self.check_bound(len)?;
        self.cursor += len;
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.check_bound(len)?;
        let bf = self.bf;
        let s = &bf[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(s)
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.check_bound(1)?;
        let result = self.bf[self.cursor];
        self.cursor += 1;
        Ok(result)
    }

    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_bool(&mut self) -> Result<bool, Error> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::invalid_data(format!(
                "invalid bool byte {} at offset {}",
                other,
                self.cursor - 1
            ))),
        }
    }

    impl_fixed_read! {
        read_u16: u16 => read_u16, 2;
        read_i16: i16 => read_i16, 2;
        read_u32: u32 => read_u32, 4;
        read_i32: i32 => read_i32, 4;
        read_u64: u64 => read_u64, 8;
        read_i64: i64 => read_i64, 8;
        read_u128: u128 => read_u128, 16;
        read_i128: i128 => read_i128, 16;
        read_f32: f32 => read_f32, 4;
        read_f64: f64 => read_f64, 8;
    }

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        let value = self.read_varuint64()?;
        u32::try_from(value)
            .map_err(|_| Error::invalid_data(format!("varuint32 overflow: {}", value)))
    }

    pub fn read_varint32(&mut self) -> Result<i32, Error> {
        let encoded = self.read_varuint32()?;
        Ok(((encoded >> 1) as i32) ^ -((encoded & 1) as i32))
    }

    pub fn read_varuint64(&mut self) -> Result<u64, Error> {
        let mut result = 0u64;
        let mut shift = 0u32;
        loop {
            let b = self.read_u8()?;
            if shift == 63 && b > 1 {
                return Err(Error::invalid_data("varuint64 overflow"));
            }
            result |= ((b & 0x7F) as u64) << shift;
            if b & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
    }

    pub fn read_varint64(&mut self) -> Result<i64, Error> {
        let encoded = self.read_varuint64()?;
        Ok(((encoded >> 1) as i64) ^ -((encoded & 1) as i64))
    }

    pub fn read_utf8_string(&mut self) -> Result<String, Error> {
        let len = self.read_varuint32()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::invalid_data(format!("invalid utf-8 string: {}", e)))
    }
}
