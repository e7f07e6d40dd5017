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

//! Data models shared by the benchmarks.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tangle_derive::Object;

#[derive(Object, Default, Clone)]
pub struct Sample {
    pub id: u64,
    pub name: String,
    pub readings: Vec<f64>,
    pub attributes: HashMap<String, i32>,
}

#[derive(Object, Default)]
pub struct Catalog {
    pub samples: Vec<Rc<Sample>>,
    pub featured: Vec<Rc<Sample>>,
}

#[derive(Object, Default)]
pub struct GraphNode {
    pub id: u32,
    pub edges: Vec<Rc<RefCell<GraphNode>>>,
}

pub fn sample(id: u64) -> Sample {
    let mut attributes = HashMap::new();
    attributes.insert("weight".to_string(), id as i32 * 3);
    attributes.insert("rank".to_string(), -(id as i32));
    Sample {
        id,
        name: format!("sample-{}", id),
        readings: (0..64).map(|i| i as f64 * 0.5 + id as f64).collect(),
        attributes,
    }
}

/// `len` samples, every fourth one also referenced from `featured`.
pub fn catalog(len: u64) -> Catalog {
    let samples: Vec<Rc<Sample>> = (0..len).map(|id| Rc::new(sample(id))).collect();
    let featured = samples.iter().step_by(4).cloned().collect();
    Catalog { samples, featured }
}

/// A ring of `len` nodes where each node also links two steps ahead.
pub fn ring_graph(len: u32) -> Vec<Rc<RefCell<GraphNode>>> {
    let nodes: Vec<Rc<RefCell<GraphNode>>> = (0..len)
        .map(|id| {
            Rc::new(RefCell::new(GraphNode {
                id,
                edges: Vec::new(),
            }))
        })
        .collect();
    let n = nodes.len();
    for (i, node) in nodes.iter().enumerate() {
        let mut node = node.borrow_mut();
        node.edges.push(nodes[(i + 1) % n].clone());
        node.edges.push(nodes[(i + 2) % n].clone());
    }
    nodes
}

/// Drop the edges of a graph built by [`ring_graph`] so it can be freed.
pub fn unlink(nodes: &[Rc<RefCell<GraphNode>>]) {
    for node in nodes {
        node.borrow_mut().edges.clear();
    }
}
