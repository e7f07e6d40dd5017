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
use std::rc::Rc;
use std::sync::{Arc, Mutex, RwLock};
use tangle_core::{Error, Tangle};
use tangle_derive::Object;
use tangle_tests::init_logger;

#[derive(Object, Default)]
struct Node {
    value: i32,
    next: Option<Rc<RefCell<Node>>>,
}

#[derive(Object, Default)]
struct SyncNode {
    label: String,
    peers: Vec<Arc<Mutex<SyncNode>>>,
}

#[derive(Object, Default)]
struct Doc {
    title: String,
    parent: Option<Arc<RwLock<Doc>>>,
    children: Vec<Arc<RwLock<Doc>>>,
}

#[derive(Object, Default)]
struct Plain {
    value: i32,
    me: Option<Rc<Plain>>,
}

fn ring(len: i32) -> Rc<RefCell<Node>> {
    let head = Rc::new(RefCell::new(Node {
        value: 0,
        next: None,
    }));
    let mut tail = head.clone();
    for value in 1..len {
        let node = Rc::new(RefCell::new(Node { value, next: None }));
        tail.borrow_mut().next = Some(node.clone());
        tail = node;
    }
    tail.borrow_mut().next = Some(head.clone());
    head
}

fn break_ring(head: &Rc<RefCell<Node>>) {
    let mut cursor = head.borrow_mut().next.take();
    while let Some(node) = cursor {
        cursor = node.borrow_mut().next.take();
    }
}

#[test]
fn test_self_cycle() {
    init_logger();
    let tangle = Tangle::default();
    let node = Rc::new(RefCell::new(Node {
        value: 7,
        next: None,
    }));
    node.borrow_mut().next = Some(node.clone());

    let bytes = tangle.serialize(&node).unwrap();
    let back: Rc<RefCell<Node>> = tangle.deserialize(&bytes).unwrap();
    let next = back.borrow().next.clone().unwrap();
    assert!(Rc::ptr_eq(&back, &next));
    assert_eq!(back.borrow().value, 7);

    node.borrow_mut().next = None;
    back.borrow_mut().next = None;
}

#[test]
fn test_ring_of_nodes() {
    let tangle = Tangle::default();
    let head = ring(5);
    let bytes = tangle.serialize(&head).unwrap();
    let back: Rc<RefCell<Node>> = tangle.deserialize(&bytes).unwrap();

    let mut cursor = back.clone();
    let mut seen = Vec::new();
    for _ in 0..5 {
        seen.push(cursor.borrow().value);
        let next = cursor.borrow().next.clone().unwrap();
        cursor = next;
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    assert!(Rc::ptr_eq(&cursor, &back));

    break_ring(&head);
    break_ring(&back);
}

#[test]
fn test_mutex_graph() {
    let tangle = Tangle::default();
    let a = Arc::new(Mutex::new(SyncNode {
        label: "a".to_string(),
        peers: vec![],
    }));
    let b = Arc::new(Mutex::new(SyncNode {
        label: "b".to_string(),
        peers: vec![a.clone()],
    }));
    a.lock().unwrap().peers.push(b.clone());
    a.lock().unwrap().peers.push(a.clone());

    let bytes = tangle.serialize(&a).unwrap();
    let back: Arc<Mutex<SyncNode>> = tangle.deserialize(&bytes).unwrap();
    let (back_b, back_self) = {
        let guard = back.lock().unwrap();
        assert_eq!(guard.label, "a");
        (guard.peers[0].clone(), guard.peers[1].clone())
    };
    assert!(Arc::ptr_eq(&back_self, &back));
    assert_eq!(back_b.lock().unwrap().label, "b");
    assert!(Arc::ptr_eq(&back_b.lock().unwrap().peers[0], &back));

    for node in [&a, &b, &back, &back_b] {
        node.lock().unwrap().peers.clear();
    }
}

#[test]
fn test_rwlock_tree_with_parent_links() {
    let tangle = Tangle::default();
    let root = Arc::new(RwLock::new(Doc {
        title: "root".to_string(),
        ..Default::default()
    }));
    for title in ["intro", "body"] {
        let child = Arc::new(RwLock::new(Doc {
            title: title.to_string(),
            parent: Some(root.clone()),
            children: vec![],
        }));
        root.write().unwrap().children.push(child);
    }

    let back: Arc<RwLock<Doc>> = tangle.deserialize(&tangle.serialize(&root).unwrap()).unwrap();
    let children = back.read().unwrap().children.clone();
    assert_eq!(children.len(), 2);
    for child in &children {
        let parent = child.read().unwrap().parent.clone().unwrap();
        assert!(Arc::ptr_eq(&parent, &back));
    }
    assert_eq!(children[1].read().unwrap().title, "body");

    for doc in [&root, &back] {
        let kids = std::mem::take(&mut doc.write().unwrap().children);
        for kid in kids {
            kid.write().unwrap().parent = None;
        }
    }
}

#[test]
fn test_cycle_through_plain_rc_is_refused() {
    // Rc<Plain> has no interior mutability, so the loop is forged by hand:
    // Flesh(1) "Plain" { value, me: Reference(1) }
    let tangle = Tangle::default();
    let mut bytes = tangle
        .serialize(&Rc::new(Plain {
            value: 1,
            me: None,
        }))
        .unwrap();
    let null_at = bytes.len() - 1;
    assert_eq!(bytes[null_at], 0);
    bytes.truncate(null_at);
    bytes.push(2);
    bytes.extend_from_slice(&1u32.to_ne_bytes());

    let result = tangle.deserialize::<Rc<Plain>>(&bytes);
    assert!(matches!(result, Err(Error::NotAllowed(_))));
}
