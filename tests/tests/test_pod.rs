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

use bytemuck::{Pod, Zeroable};
use std::rc::Rc;
use tangle_core::codec::category_of;
use tangle_core::{pod, Category, Tangle};
use tangle_derive::Object;

#[derive(Clone, Copy, Debug, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

pod!(Vec3);

#[derive(Object, Debug, PartialEq, Default)]
struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    bounds: [Vec3; 2],
}

#[test]
fn test_scalars_round_trip_byte_for_byte() {
    let tangle = Tangle::default();

    let bytes = tangle.serialize(&-123_456_789i64).unwrap();
    assert_eq!(bytes, (-123_456_789i64).to_ne_bytes());
    assert_eq!(tangle.deserialize::<i64>(&bytes).unwrap(), -123_456_789);

    let bytes = tangle.serialize(&u128::MAX).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(tangle.deserialize::<u128>(&bytes).unwrap(), u128::MAX);

    let bytes = tangle.serialize(&f32::MIN_POSITIVE).unwrap();
    assert_eq!(bytes, f32::MIN_POSITIVE.to_ne_bytes());

    let bytes = tangle.serialize(&'🦀').unwrap();
    assert_eq!(tangle.deserialize::<char>(&bytes).unwrap(), '🦀');
}

#[test]
fn test_user_pod_type() {
    let tangle = Tangle::default();
    let v = Vec3 {
        x: 1.0,
        y: -2.5,
        z: 3.25,
    };
    let bytes = tangle.serialize(&v).unwrap();
    assert_eq!(bytes, bytemuck::bytes_of(&v));
    assert_eq!(tangle.deserialize::<Vec3>(&bytes).unwrap(), v);
}

#[test]
fn test_pod_array_is_one_block() {
    let tangle = Tangle::default();
    let vertices = vec![
        Vec3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
        Vec3 {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        },
    ];
    let bytes = tangle.serialize(&vertices).unwrap();
    let mut expected = 2u32.to_ne_bytes().to_vec();
    expected.extend_from_slice(bytemuck::cast_slice(&vertices));
    assert_eq!(bytes, expected);
}

#[test]
fn test_pod_inside_object() {
    let tangle = Tangle::default();
    let mesh = Mesh {
        name: "tri".to_string(),
        vertices: vec![
            Vec3 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            Vec3 {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            },
            Vec3 {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            },
        ],
        bounds: [
            Vec3 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            Vec3 {
                x: 1.0,
                y: 1.0,
                z: 0.0,
            },
        ],
    };
    let bytes = tangle.serialize(&mesh).unwrap();
    // name + vertices + fixed bounds (no length)
    assert_eq!(bytes.len(), (4 + 3) + (4 + 3 * 12) + 2 * 12);
    let back: Mesh = tangle.deserialize(&bytes).unwrap();
    assert_eq!(mesh, back);
}

#[test]
fn test_categories() {
    assert_eq!(category_of::<i32>(), Category::Pod);
    assert_eq!(category_of::<bool>(), Category::Pod);
    assert_eq!(category_of::<Vec3>(), Category::Pod);
    assert_eq!(category_of::<Mesh>(), Category::Object);
    assert_eq!(category_of::<Vec<i32>>(), Category::Object);
    assert_eq!(category_of::<Option<i32>>(), Category::Object);
    assert_eq!(category_of::<Box<Mesh>>(), Category::Pointer);
    assert_eq!(category_of::<Rc<Mesh>>(), Category::Pointer);
    assert_eq!(category_of::<Option<Rc<Mesh>>>(), Category::Pointer);
    assert_eq!(category_of::<std::rc::Weak<Mesh>>(), Category::Pointer);
}
