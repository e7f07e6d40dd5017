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

//! # Tangle Derive Macros
//!
//! This crate provides the `#[derive(Object)]` procedural macro for the
//! tangle object-graph serializer.
//!
//! ## `#[derive(Object)]`
//!
//! Implements both `tangle_core::codec::Object` and
//! `tangle_core::codec::Codec` for the annotated type.
//!
//! **Supported Types:**
//! - Structs with named fields
//! - Structs with unnamed fields (tuple structs)
//! - Unit structs
//! - Enums with unit, tuple and struct variants
//!
//! Fields are written in declaration order. Enums write the variant index as
//! a `u32`, then the variant's fields.
//!
//! **Attributes:**
//! - `#[tangle(skip)]` on a field: not written; restored as `Default::default()`.
//!
//! **Example:**
//! ```rust
//! use tangle_core::Tangle;
//! use tangle_derive::Object;
//! use std::rc::Rc;
//!
//! #[derive(Object, Debug, PartialEq, Default)]
//! struct Person {
//!     name: String,
//!     age: i32,
//!     friends: Vec<Rc<Person>>,
//!     #[tangle(skip)]
//!     cached_score: Option<f64>,
//! }
//!
//! #[derive(Object, Debug, PartialEq, Default)]
//! enum Status {
//!     #[default]
//!     Active,
//!     Suspended { days: u32 },
//! }
//!
//! let tangle = Tangle::default();
//! let bob = Person { name: "Bob".into(), age: 40, ..Default::default() };
//! let bytes = tangle.serialize(&bob).unwrap();
//! assert_eq!(tangle.deserialize::<Person>(&bytes).unwrap(), bob);
//!
//! let status = Status::Suspended { days: 3 };
//! let bytes = tangle.serialize(&status).unwrap();
//! assert_eq!(tangle.deserialize::<Status>(&bytes).unwrap(), status);
//! ```
//!
//! Pointees (`Box<T>`, `Rc<T>`, `Arc<T>`) are default-constructed and then
//! filled, so a derived type used behind a pointer must also implement
//! `Default`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod object;
mod util;

/// Derive macro for object-graph serialization.
///
/// # Example
///
/// ```rust
/// use tangle_derive::Object;
///
/// #[derive(Object, Default)]
/// struct Node {
///     value: i64,
///     children: Vec<Box<Node>>,
/// }
/// ```
#[proc_macro_derive(Object, attributes(tangle))]
pub fn proc_macro_derive_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive_object(&input)
}
