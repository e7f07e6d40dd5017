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

//! # Tangle
//!
//! Tangle serializes object graphs: values, containers and pointers that
//! may be shared, cyclic or polymorphic. It writes each pointed-to allocation
//! once and rebuilds the same sharing structure on read.
//!
//! ## Key Features
//!
//! - **Pointer identity**: two `Rc`s to one allocation decode as two `Rc`s to
//!   one allocation
//! - **Cycles**: `Rc<RefCell<T>>` and `Arc<Mutex<T>>` graphs may point back
//!   into themselves
//! - **Polymorphism**: `Box<dyn Trait>` decodes to the concrete type that was
//!   written, looked up by name in a type registry
//! - **Compact**: native-endian raw bytes, no header, plain arrays copied as
//!   one block
//!
//! ## Quick Start
//!
//! Derive `Object` for your types, then serialize through a [`Tangle`]:
//!
//! ```rust
//! use tangle::{Object, Tangle};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! #[derive(Object, Default)]
//! struct Node {
//!     value: i32,
//!     next: Option<Rc<RefCell<Node>>>,
//! }
//!
//! let tangle = Tangle::default();
//!
//! // a node pointing at itself
//! let node = Rc::new(RefCell::new(Node { value: 7, next: None }));
//! node.borrow_mut().next = Some(node.clone());
//!
//! let bytes = tangle.serialize(&node).unwrap();
//! let back: Rc<RefCell<Node>> = tangle.deserialize(&bytes).unwrap();
//! let next = back.borrow().next.clone().unwrap();
//! assert!(Rc::ptr_eq(&back, &next));
//! assert_eq!(next.borrow().value, 7);
//!
//! // break the cycles so both graphs are freed
//! node.borrow_mut().next = None;
//! back.borrow_mut().next = None;
//! ```
//!
//! ## Polymorphic pointers
//!
//! ```rust
//! use tangle::{polymorphic, register_impls, Object, Tangle};
//!
//! trait Shape: Object {
//!     fn area(&self) -> f64;
//! }
//! polymorphic!(Shape);
//!
//! #[derive(Object, Default)]
//! struct Square {
//!     side: f64,
//! }
//!
//! impl Shape for Square {
//!     fn area(&self) -> f64 {
//!         self.side * self.side
//!     }
//! }
//!
//! let mut tangle = Tangle::default();
//! register_impls!(tangle, Shape, Square).unwrap();
//!
//! let shape: Box<dyn Shape> = Box::new(Square { side: 3.0 });
//! let bytes = tangle.serialize(&shape).unwrap();
//! let back: Box<dyn Shape> = tangle.deserialize(&bytes).unwrap();
//! assert_eq!(back.area(), 9.0);
//! assert!(back.as_any().is::<Square>());
//! ```

pub use tangle_core::{
    error::Error, polymorphic, pod, register_impls, types::Category, types::Handle, AsObject,
    ByteSink, ByteSource, Codec, Config, Deserializer, IoSink, IoSource, Pointee, Serializer,
    Tangle, TypeRegistry,
};
pub use tangle_core::codec::Object;
pub use tangle_derive::Object;
