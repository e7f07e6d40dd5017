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

// The global registry is process-wide, so this binary holds a single test.

use tangle_core::{polymorphic, register_impls, AsObject, Error, Object, Tangle, TypeRegistry};
use tangle_derive::Object;

trait Plugin: Object {
    fn id(&self) -> u32;
}

polymorphic!(Plugin);

#[derive(Object, Default)]
struct Echo {
    id: u32,
}

impl Plugin for Echo {
    fn id(&self) -> u32 {
        self.id
    }
}

#[test]
fn test_global_registry_lifecycle() {
    tangle_tests::init_logger();
    assert!(TypeRegistry::global().is_none());
    assert!(matches!(Tangle::global(), Err(Error::NotAllowed(_))));

    let mut registry = TypeRegistry::new();
    registry.register_by_name::<Echo>("echo").unwrap();
    register_impls!(registry, Plugin, Echo).unwrap();
    let installed = registry.install().unwrap();
    assert!(installed.contains("echo"));

    // a second install is refused and the first one stays
    let mut other = TypeRegistry::new();
    other.register_by_name::<Echo>("other").unwrap();
    assert!(matches!(other.install(), Err(Error::NotAllowed(_))));
    assert!(TypeRegistry::global().unwrap().contains("echo"));
    assert!(!TypeRegistry::global().unwrap().contains("other"));

    let mut tangle = Tangle::global().unwrap();
    assert!(matches!(
        tangle.register::<String>(),
        Err(Error::NotAllowed(_))
    ));

    let plugin: Box<dyn Plugin> = Box::new(Echo { id: 8 });
    let bytes = tangle.serialize(&plugin).unwrap();
    assert_eq!(&bytes[5..9], &4u32.to_ne_bytes());
    assert_eq!(&bytes[9..13], b"echo");

    let back: Box<dyn Plugin> = tangle.deserialize(&bytes).unwrap();
    assert_eq!(back.id(), 8);
    assert!(back.as_any().is::<Echo>());
}
