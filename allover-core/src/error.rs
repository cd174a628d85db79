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

//! Error type shared by the mapper and the binary reader/writer.

use std::borrow::Cow;

use thiserror::Error;

/// Set `ALLOVER_PANIC_ON_ERROR=1` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("ALLOVER_PANIC_ON_ERROR").is_some();

#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for mapping, reading and writing operations.
///
/// # Always Use Static Constructor Functions
///
/// Do not build variants with the enum syntax, use the constructor functions
/// (`Error::conversion(..)`, `Error::self_reference(..)`, ...). They accept
/// anything convertible into `Cow<'static, str>` and honour
/// `ALLOVER_PANIC_ON_ERROR`, which makes the program panic at the exact place
/// an error is created:
///
/// ```bash
/// RUST_BACKTRACE=1 ALLOVER_PANIC_ON_ERROR=1 cargo test
/// ```
///
/// ```rust
/// use allover_core::error::Error;
///
/// let err = Error::conversion("cannot assign null to i32");
/// let err = Error::unknown_type_tag(200);
/// let err = Error::buffer_out_of_bound(10, 4, 12);
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A read needed more bytes than the input holds.
    ///
    /// Do not construct this variant directly; use [`Error::buffer_out_of_bound`] instead.
    #[error("Buffer out of bound: {0} + {1} > {2}")]
    BufferOutOfBound(usize, usize, usize),

    /// Malformed payload: invalid UTF-8, bool or char encoding, bad header.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_data`] instead.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// A type tag byte that does not name any known tag.
    ///
    /// Do not construct this variant directly; use [`Error::unknown_type_tag`] instead.
    #[error("Unknown type tag: {0}")]
    UnknownTypeTag(u8),

    /// A value did not have the expected concrete type.
    ///
    /// Do not construct this variant directly; use [`Error::type_mismatch`] instead.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },

    /// A value attempted to write itself while it was already being written.
    ///
    /// Do not construct this variant directly; use [`Error::self_reference`] instead.
    #[error("{0}")]
    SelfReference(Cow<'static, str>),

    /// No writer is registered for a type and the dynamic fallback is disabled.
    ///
    /// Do not construct this variant directly; use [`Error::writer_not_found`] instead.
    #[error("{0}")]
    WriterNotFound(Cow<'static, str>),

    /// The stream names a custom type that has no registered reader.
    ///
    /// Do not construct this variant directly; use [`Error::reader_not_found`] instead.
    #[error("{0}")]
    ReaderNotFound(Cow<'static, str>),

    /// Maximum nesting depth exceeded while reading.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// Unknown enum ordinal or variant name.
    ///
    /// Do not construct this variant directly; use [`Error::unknown_enum`] instead.
    #[error("{0}")]
    UnknownEnum(Cow<'static, str>),

    /// A value could not be coerced into the requested type.
    ///
    /// Do not construct this variant directly; use [`Error::conversion`] instead.
    #[error("{0}")]
    Conversion(Cow<'static, str>),

    /// The mapper configuration refers to unknown members or mismatched types.
    ///
    /// Do not construct this variant directly; use [`Error::configuration`] instead.
    #[error("{0}")]
    Configuration(Cow<'static, str>),

    /// No factory can construct the requested target type.
    ///
    /// Do not construct this variant directly; use [`Error::missing_factory`] instead.
    #[error("{0}")]
    MissingFactory(Cow<'static, str>),

    /// Failure of the sink passed to `flush_to`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic unknown error.
    ///
    /// Do not construct this variant directly; use [`Error::unknown`] instead.
    #[error("{0}")]
    Unknown(Cow<'static, str>),
}

macro_rules! message_constructors {
    ($($(#[$doc:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            ///
            /// If `ALLOVER_PANIC_ON_ERROR` is set at compile time, this panics with the message.
            #[inline(always)]
            #[cold]
            #[track_caller]
            pub fn $fn_name<S: Into<Cow<'static, str>>>(s: S) -> Self {
                let err = Error::$variant(s.into());
                if PANIC_ON_ERROR {
                    panic!("ALLOVER_PANIC_ON_ERROR: {}", err);
                }
                err
            }
        )*
    };
}

impl Error {
    /// Creates a new [`Error::BufferOutOfBound`] with the given bounds.
    ///
    /// If `ALLOVER_PANIC_ON_ERROR` is set at compile time, this panics with the message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn buffer_out_of_bound(offset: usize, length: usize, capacity: usize) -> Self {
        let err = Error::BufferOutOfBound(offset, length, capacity);
        if PANIC_ON_ERROR {
            panic!("ALLOVER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnknownTypeTag`] for the offending byte.
    ///
    /// If `ALLOVER_PANIC_ON_ERROR` is set at compile time, this panics with the message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown_type_tag(tag: u8) -> Self {
        let err = Error::UnknownTypeTag(tag);
        if PANIC_ON_ERROR {
            panic!("ALLOVER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::TypeMismatch`].
    ///
    /// If `ALLOVER_PANIC_ON_ERROR` is set at compile time, this panics with the message.
    ///
    /// # Example
    /// ```
    /// use allover_core::error::Error;
    ///
    /// let err = Error::type_mismatch("i32", "alloc::string::String");
    /// assert_eq!(err.to_string(), "Type mismatch: expected i32, found alloc::string::String");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_mismatch<E, F>(expected: E, found: F) -> Self
    where
        E: Into<Cow<'static, str>>,
        F: Into<Cow<'static, str>>,
    {
        let err = Error::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        };
        if PANIC_ON_ERROR {
            panic!("ALLOVER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    message_constructors! {
        /// Creates a new [`Error::InvalidData`].
        invalid_data => InvalidData,
        /// Creates a new [`Error::SelfReference`].
        self_reference => SelfReference,
        /// Creates a new [`Error::WriterNotFound`].
        writer_not_found => WriterNotFound,
        /// Creates a new [`Error::ReaderNotFound`].
        reader_not_found => ReaderNotFound,
        /// Creates a new [`Error::DepthExceed`].
        depth_exceed => DepthExceed,
        /// Creates a new [`Error::UnknownEnum`].
        unknown_enum => UnknownEnum,
        /// Creates a new [`Error::Conversion`].
        conversion => Conversion,
        /// Creates a new [`Error::Configuration`].
        configuration => Configuration,
        /// Creates a new [`Error::MissingFactory`].
        missing_factory => MissingFactory,
        /// Creates a new [`Error::Unknown`].
        unknown => Unknown,
    }

    /// Appends the offending property name to a [`Error::Conversion`] message.
    ///
    /// Other variants are returned unchanged.
    #[inline(never)]
    pub fn with_property(self, property: &str) -> Error {
        if let Error::Conversion(s) = self {
            Error::conversion(format!("{} (property: {})", s, property))
        } else {
            self
        }
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use allover_core::ensure;
/// use allover_core::error::Error;
///
/// fn check_len(n: usize) -> Result<(), Error> {
///     ensure!(n > 0, "length must be positive");
///     ensure!(n < 10, "length {} too large", n);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::unknown($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`enum@Error`].
///
/// # Examples
/// ```
/// use allover_core::bail;
/// use allover_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!("something went wrong");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::unknown($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)))
    };
}
