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

//! Error type shared by every tangle session.
//!
//! Constructors are `#[cold]` and `#[track_caller]` so that the happy path of
//! every channel read and handle lookup stays small after inlining.

use std::borrow::Cow;

use thiserror::Error;

/// Set `TANGLE_PANIC_ON_ERROR` at compile time to panic where an error is created.
pub const PANIC_ON_ERROR: bool = option_env!("TANGLE_PANIC_ON_ERROR").is_some();

/// Check if `TANGLE_PANIC_ON_ERROR` was set at compile time.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for tangle serialization and deserialization.
///
/// Always build errors through the static constructor functions
/// ([`Error::truncated_input`], [`Error::unknown_type`], ...) rather than the
/// enum syntax, so the panic-on-error switch sees every error.
///
/// ```rust
/// use tangle_core::error::Error;
///
/// let err = Error::unknown_type("app::Circle");
/// assert!(matches!(err, Error::UnknownType(_)));
///
/// let err = Error::truncated_input(8, 3);
/// assert_eq!(err.to_string(), "Truncated input: needed 8 bytes, 3 available");
/// ```
///
/// ## Debug Mode: TANGLE_PANIC_ON_ERROR
///
/// ```bash
/// RUST_BACKTRACE=1 TANGLE_PANIC_ON_ERROR=1 cargo test
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The byte source ran out before a value was complete.
    ///
    /// Do not construct this variant directly; use [`Error::truncated_input`] instead.
    #[error("Truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    /// A pointer payload names a type the registry cannot construct.
    ///
    /// Do not construct this variant directly; use [`Error::unknown_type`] instead.
    #[error("Unknown type: {0}")]
    UnknownType(Cow<'static, str>),

    /// A back-reference names a handle id that was never written as a first occurrence.
    ///
    /// Do not construct this variant directly; use [`Error::unknown_handle`] instead.
    #[error("Unknown handle: {0}")]
    UnknownHandle(u32),

    /// One handle id is claimed by incompatible owners.
    ///
    /// Do not construct this variant directly; use [`Error::ownership_conflict`] instead.
    #[error("Ownership conflict: {0}")]
    OwnershipConflict(Cow<'static, str>),

    /// A statically known pointee was encoded under another type name.
    ///
    /// Do not construct this variant directly; use [`Error::type_mismatch`] instead.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },

    /// Invalid or corrupted data encountered.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_data`] instead.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),

    /// Maximum nesting depth exceeded.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// Operation not allowed in current context.
    ///
    /// Do not construct this variant directly; use [`Error::not_allowed`] instead.
    #[error("{0}")]
    NotAllowed(Cow<'static, str>),

    /// Failure reported by an `std::io` backed channel.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic unknown error.
    ///
    /// Do not construct this variant directly; use [`Error::unknown`] instead.
    #[error("{0}")]
    Unknown(Cow<'static, str>),
}

impl Error {
    /// Creates a new [`Error::TruncatedInput`].
    ///
    /// If `TANGLE_PANIC_ON_ERROR` was set at compile time, this panics with the error message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn truncated_input(needed: usize, available: usize) -> Self {
        let err = Error::TruncatedInput { needed, available };
        if PANIC_ON_ERROR {
            panic!("TANGLE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnknownType`] for the given type name.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown_type<S: Into<Cow<'static, str>>>(name: S) -> Self {
        let err = Error::UnknownType(name.into());
        if PANIC_ON_ERROR {
            panic!("TANGLE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnknownHandle`] for the given handle id.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown_handle(id: u32) -> Self {
        let err = Error::UnknownHandle(id);
        if PANIC_ON_ERROR {
            panic!("TANGLE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::OwnershipConflict`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn ownership_conflict<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::OwnershipConflict(s.into());
        if PANIC_ON_ERROR {
            panic!("TANGLE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::TypeMismatch`].
    ///
    /// ```
    /// use tangle_core::error::Error;
    ///
    /// let err = Error::type_mismatch("app::Circle", "app::Square");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Type mismatch: expected app::Circle, found app::Square"
    /// );
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
            panic!("TANGLE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidData`] from a string or static message.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidData(s.into());
        if PANIC_ON_ERROR {
            panic!("TANGLE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DepthExceed`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn depth_exceed<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DepthExceed(s.into());
        if PANIC_ON_ERROR {
            panic!("TANGLE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::NotAllowed`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn not_allowed<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::NotAllowed(s.into());
        if PANIC_ON_ERROR {
            panic!("TANGLE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Unknown`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unknown<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Unknown(s.into());
        if PANIC_ON_ERROR {
            panic!("TANGLE_PANIC_ON_ERROR: {}", err);
        }
        err
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use tangle_core::ensure;
/// use tangle_core::error::Error;
///
/// fn checked_len(len: usize) -> Result<u32, Error> {
///     ensure!(len <= u32::MAX as usize, Error::invalid_data("length overflows u32"));
///     Ok(len as u32)
/// }
///
/// assert_eq!(checked_len(3).unwrap(), 3);
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
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::unknown($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::unknown(format!($fmt, $($arg)*)))
    };
}

/// Returns early with a [`Error::NotAllowed`].
///
/// # Examples
/// ```
/// use tangle_core::not_allowed;
/// use tangle_core::error::Error;
///
/// fn frozen(name: &str) -> Result<(), Error> {
///     not_allowed!("registry is frozen, cannot add {}", name);
/// }
///
/// assert!(matches!(frozen("Circle"), Err(Error::NotAllowed(_))));
/// ```
#[macro_export]
macro_rules! not_allowed {
    ($err:expr) => {
        return Err($crate::error::Error::not_allowed($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::not_allowed(format!($fmt, $($arg)*)))
    };
}
