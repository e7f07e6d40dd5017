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

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use tangle_core::{polymorphic, register_impls, AsObject, Error, Object, Tangle};
use tangle_derive::Object;

trait Shape: Object {
    fn area(&self) -> f64;
}

trait Animal: Object {
    fn speak(&self) -> String;
}

polymorphic!(Shape, Animal);

#[derive(Object, Default, Debug, PartialEq)]
struct Circle {
    radius: f64,
}

#[derive(Object, Default, Debug, PartialEq)]
struct Rect {
    width: f64,
    height: f64,
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        3.0 * self.radius * self.radius
    }
}

impl Shape for Rect {
    fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Object, Default)]
struct Dog {
    name: String,
}

impl Animal for Dog {
    fn speak(&self) -> String {
        format!("{} says woof", self.name)
    }
}

#[derive(Object, Default)]
struct Zoo {
    star: Option<Box<dyn Animal>>,
    shapes: Vec<Box<dyn Shape>>,
}

fn shapes_tangle() -> Tangle {
    let mut tangle = Tangle::default();
    register_impls!(tangle, Shape, Circle, Rect).unwrap();
    register_impls!(tangle, Animal, Dog).unwrap();
    tangle
}

#[test]
fn test_box_dyn_keeps_concrete_type() {
    let tangle = shapes_tangle();
    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(Circle { radius: 1.0 }),
        Box::new(Rect {
            width: 2.0,
            height: 5.0,
        }),
    ];
    let bytes = tangle.serialize(&shapes).unwrap();
    let back: Vec<Box<dyn Shape>> = tangle.deserialize(&bytes).unwrap();

    assert_eq!(back.len(), 2);
    assert_eq!(
        back[0].as_any().downcast_ref::<Circle>(),
        Some(&Circle { radius: 1.0 })
    );
    assert!(back[1].as_any().is::<Rect>());
    assert_eq!(back[1].area(), 10.0);
}

#[test]
fn test_rc_dyn_shared() {
    let tangle = shapes_tangle();
    let circle: Rc<dyn Shape> = Rc::new(Circle { radius: 2.0 });
    let list = vec![circle.clone(), circle];

    let back: Vec<Rc<dyn Shape>> = tangle.deserialize(&tangle.serialize(&list).unwrap()).unwrap();
    assert!(Rc::ptr_eq(&back[0], &back[1]));
    assert_eq!(back[0].area(), 12.0);
}

#[test]
fn test_arc_dyn_in_map() {
    let tangle = shapes_tangle();
    let rect: Arc<dyn Shape> = Arc::new(Rect {
        width: 1.5,
        height: 2.0,
    });
    let mut map: HashMap<String, Arc<dyn Shape>> = HashMap::new();
    map.insert("a".to_string(), rect.clone());
    map.insert("b".to_string(), rect);

    let back: HashMap<String, Arc<dyn Shape>> =
        tangle.deserialize(&tangle.serialize(&map).unwrap()).unwrap();
    assert!(Arc::ptr_eq(&back["a"], &back["b"]));
    assert_eq!(back["a"].area(), 3.0);
}

#[test]
fn test_trait_objects_as_fields() {
    let tangle = shapes_tangle();
    let zoo = Zoo {
        star: Some(Box::new(Dog {
            name: "Rex".to_string(),
        })),
        shapes: vec![Box::new(Circle { radius: 0.5 })],
    };
    let back: Zoo = tangle.deserialize(&tangle.serialize(&zoo).unwrap()).unwrap();
    assert_eq!(back.star.unwrap().speak(), "Rex says woof");
    assert_eq!(back.shapes[0].area(), 0.75);
}

#[test]
fn test_box_dyn_object() {
    let mut tangle = Tangle::default();
    tangle.register::<Circle>().unwrap();
    tangle.register_by_name::<Vec<i32>>("ints").unwrap();

    let values: Vec<Box<dyn Object>> = vec![
        Box::new(Circle { radius: 4.0 }),
        Box::new(vec![1i32, 2, 3]),
    ];
    let back: Vec<Box<dyn Object>> = tangle
        .deserialize(&tangle.serialize(&values).unwrap())
        .unwrap();
    assert_eq!(
        back[0].as_any().downcast_ref::<Circle>(),
        Some(&Circle { radius: 4.0 })
    );
    assert_eq!(
        back[1].as_any().downcast_ref::<Vec<i32>>(),
        Some(&vec![1, 2, 3])
    );
}

#[test]
fn test_unregistered_name_is_unknown_type() {
    let writer = shapes_tangle();
    let shape: Box<dyn Shape> = Box::new(Circle { radius: 1.0 });
    let bytes = writer.serialize(&shape).unwrap();

    let reader = Tangle::default();
    let result = reader.deserialize::<Box<dyn Shape>>(&bytes);
    assert!(matches!(result, Err(Error::UnknownType(_))));
}

#[test]
fn test_registered_without_trait_view_is_unknown_type() {
    let writer = shapes_tangle();
    let shape: Box<dyn Shape> = Box::new(Circle { radius: 1.0 });
    let bytes = writer.serialize(&shape).unwrap();

    let mut reader = Tangle::default();
    reader.register::<Circle>().unwrap();
    let result = reader.deserialize::<Box<dyn Shape>>(&bytes);
    assert!(matches!(result, Err(Error::UnknownType(_))));

    // the plain object view still works
    let back: Box<dyn Object> = reader.deserialize(&bytes).unwrap();
    assert!(back.as_any().is::<Circle>());
}

#[test]
fn test_name_clash_is_refused() {
    let mut tangle = Tangle::default();
    tangle.register_by_name::<Circle>("shape").unwrap();
    // registering the same pair again is fine
    tangle.register_by_name::<Circle>("shape").unwrap();
    assert!(matches!(
        tangle.register_by_name::<Rect>("shape"),
        Err(Error::NotAllowed(_))
    ));
    assert!(matches!(
        tangle.register_by_name::<Circle>("circle"),
        Err(Error::NotAllowed(_))
    ));
}

#[test]
fn test_concrete_rc_aliased_as_dyn_object() {
    let tangle = shapes_tangle();
    let circle = Rc::new(Circle { radius: 2.0 });
    let value: (Rc<Circle>, Rc<dyn Object>) = (circle.clone(), circle);

    let bytes = tangle.serialize(&value).unwrap();
    let back: (Rc<Circle>, Rc<dyn Object>) = tangle.deserialize(&bytes).unwrap();
    assert_eq!(
        Rc::as_ptr(&back.0) as *const (),
        Rc::as_ptr(&back.1) as *const ()
    );
    assert_eq!(
        back.1.as_any().downcast_ref::<Circle>(),
        Some(&Circle { radius: 2.0 })
    );
    assert_eq!(Rc::strong_count(&back.0), 2);
}

#[test]
fn test_trait_arc_aliased_as_dyn_object() {
    let tangle = shapes_tangle();
    let shape: Arc<dyn Shape> = Arc::new(Rect {
        width: 2.0,
        height: 5.0,
    });
    let value: (Arc<dyn Shape>, Arc<dyn Object>) = (shape.clone(), shape.into_object_arc());

    let back: (Arc<dyn Shape>, Arc<dyn Object>) =
        tangle.deserialize(&tangle.serialize(&value).unwrap()).unwrap();
    assert_eq!(back.0.area(), 10.0);
    assert_eq!(
        Arc::as_ptr(&back.0) as *const (),
        Arc::as_ptr(&back.1) as *const ()
    );
    assert!(back.1.as_any().is::<Rect>());
}
