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

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use tangle_core::Tangle;
use tangle_derive::Object;
use tangle_tests::{init_logger, u32_bytes};

#[derive(Object, Debug, PartialEq, Default)]
struct Foo {
    value: i32,
}

#[derive(Object, Default)]
struct Pair {
    first: Rc<Foo>,
    second: Rc<Foo>,
}

#[derive(Object, Default)]
struct Counter {
    hits: u64,
}

#[derive(Object, Default)]
struct Dashboard {
    left: Rc<RefCell<Counter>>,
    right: Rc<RefCell<Counter>>,
}

#[test]
fn test_shared_pointer_written_once() {
    init_logger();
    let mut tangle = Tangle::default();
    tangle.register_by_name::<Foo>("Foo").unwrap();

    let foo = Rc::new(Foo { value: 42 });
    let pair = Pair {
        first: foo.clone(),
        second: foo,
    };
    let bytes = tangle.serialize(&pair).unwrap();

    let mut expected = vec![1u8];
    expected.extend_from_slice(&u32_bytes(1));
    expected.extend_from_slice(&u32_bytes(3));
    expected.extend_from_slice(b"Foo");
    expected.extend_from_slice(&42i32.to_ne_bytes());
    expected.push(2);
    expected.extend_from_slice(&u32_bytes(1));
    assert_eq!(bytes, expected);

    let back: Pair = tangle.deserialize(&bytes).unwrap();
    assert!(Rc::ptr_eq(&back.first, &back.second));
    assert_eq!(back.first.value, 42);
    assert_eq!(Rc::strong_count(&back.first), 2);
}

#[test]
fn test_distinct_pointers_stay_distinct() {
    let tangle = Tangle::default();
    let pair = Pair {
        first: Rc::new(Foo { value: 1 }),
        second: Rc::new(Foo { value: 1 }),
    };
    let back: Pair = tangle.deserialize(&tangle.serialize(&pair).unwrap()).unwrap();
    assert!(!Rc::ptr_eq(&back.first, &back.second));
    assert_eq!(back.first, back.second);
}

#[test]
fn test_sessions_do_not_share_handles() {
    let tangle = Tangle::default();
    let foo = Rc::new(Foo { value: 9 });
    let first = tangle.serialize(&foo).unwrap();
    let second = tangle.serialize(&foo).unwrap();
    // each call starts a new session, so both begin with the full pointee
    assert_eq!(first, second);
    assert_eq!(first[0], 1);
}

#[test]
fn test_shared_aliasing_survives_mutation() {
    let tangle = Tangle::default();
    let counter = Rc::new(RefCell::new(Counter { hits: 3 }));
    let dashboard = Dashboard {
        left: counter.clone(),
        right: counter,
    };

    let back: Dashboard = tangle
        .deserialize(&tangle.serialize(&dashboard).unwrap())
        .unwrap();
    back.left.borrow_mut().hits += 1;
    assert_eq!(back.right.borrow().hits, 4);
}

#[test]
fn test_shared_values_in_containers() {
    let tangle = Tangle::default();
    let a = Rc::new("alpha".to_string());
    let b = Rc::new("beta".to_string());
    let list = vec![a.clone(), b.clone(), a.clone(), a, b];

    let back: Vec<Rc<String>> = tangle.deserialize(&tangle.serialize(&list).unwrap()).unwrap();
    assert_eq!(back.len(), 5);
    assert!(Rc::ptr_eq(&back[0], &back[2]));
    assert!(Rc::ptr_eq(&back[0], &back[3]));
    assert!(Rc::ptr_eq(&back[1], &back[4]));
    assert!(!Rc::ptr_eq(&back[0], &back[1]));
    assert_eq!(Rc::strong_count(&back[0]), 3);
}

#[test]
fn test_shared_map_values() {
    let tangle = Tangle::default();
    let shared = Arc::new(vec![1u32, 2, 3]);
    let mut map = HashMap::new();
    map.insert(1u8, shared.clone());
    map.insert(2u8, shared);

    let back: HashMap<u8, Arc<Vec<u32>>> =
        tangle.deserialize(&tangle.serialize(&map).unwrap()).unwrap();
    assert!(Arc::ptr_eq(&back[&1], &back[&2]));
    assert_eq!(*back[&1], vec![1, 2, 3]);
}

#[test]
fn test_optional_pointers() {
    let tangle = Tangle::default();
    let shared = Rc::new(Foo { value: 5 });
    let value: Vec<Option<Rc<Foo>>> = vec![None, Some(shared.clone()), None, Some(shared)];

    let bytes = tangle.serialize(&value).unwrap();
    // an absent pointer is a single null tag
    assert_eq!(bytes[4], 0);

    let back: Vec<Option<Rc<Foo>>> = tangle.deserialize(&bytes).unwrap();
    assert!(back[0].is_none());
    assert!(back[2].is_none());
    assert!(Rc::ptr_eq(
        back[1].as_ref().unwrap(),
        back[3].as_ref().unwrap()
    ));
}

#[test]
fn test_box_is_never_shared() {
    let tangle = Tangle::default();
    let value = (Box::new(Foo { value: 1 }), Box::new(Foo { value: 2 }));
    let bytes = tangle.serialize(&value).unwrap();
    let back: (Box<Foo>, Box<Foo>) = tangle.deserialize(&bytes).unwrap();
    assert_eq!(back.0.value, 1);
    assert_eq!(back.1.value, 2);
}
