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

use std::sync::Arc;
use tangle::{polymorphic, register_impls, Error, Object, Tangle};

trait Sensor: Object {
    fn measure(&self) -> f32;
}

polymorphic!(Sensor);

#[derive(Object, Default)]
struct Thermometer {
    celsius: f32,
}

impl Sensor for Thermometer {
    fn measure(&self) -> f32 {
        self.celsius
    }
}

#[derive(Object, Default)]
struct Station {
    name: String,
    sensors: Vec<Arc<dyn Sensor>>,
}

#[test]
fn test_umbrella_reexports() {
    let mut tangle = Tangle::default();
    register_impls!(tangle, Sensor, Thermometer).unwrap();

    let probe: Arc<dyn Sensor> = Arc::new(Thermometer { celsius: 21.5 });
    let station = Station {
        name: "roof".to_string(),
        sensors: vec![probe.clone(), probe],
    };
    let bytes = tangle.serialize(&station).unwrap();
    let back: Station = tangle.deserialize(&bytes).unwrap();
    assert_eq!(back.name, "roof");
    assert!(Arc::ptr_eq(&back.sensors[0], &back.sensors[1]));
    assert_eq!(back.sensors[0].measure(), 21.5);

    let result: Result<Station, Error> = tangle.deserialize(&bytes[..bytes.len() - 1]);
    assert!(result.is_err());
}
