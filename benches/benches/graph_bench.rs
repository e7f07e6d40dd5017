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

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::cell::RefCell;
use std::rc::Rc;
use tangle_benchmarks::{catalog, ring_graph, sample, unlink, Catalog, GraphNode, Sample};
use tangle_core::Tangle;

// stays below the default nesting limit, every edge chain is walked depth-first
const RING_LEN: u32 = 200;

fn bench_pod_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("pod_block");
    let tangle = Tangle::default();
    let values: Vec<f64> = (0..4096).map(|i| i as f64 * 1.25).collect();
    group.throughput(Throughput::Bytes((values.len() * 8) as u64));

    let bytes = tangle.serialize(&values).unwrap();
    group.bench_function("serialize", |b| {
        b.iter(|| black_box(tangle.serialize(black_box(&values)).unwrap()))
    });
    group.bench_function("deserialize", |b| {
        b.iter(|| black_box(tangle.deserialize::<Vec<f64>>(black_box(&bytes)).unwrap()))
    });
    group.finish();
}

fn bench_object(c: &mut Criterion) {
    let mut group = c.benchmark_group("object");
    let tangle = Tangle::default();
    let value = sample(7);
    let bytes = tangle.serialize(&value).unwrap();

    group.bench_function("serialize", |b| {
        b.iter(|| black_box(tangle.serialize(black_box(&value)).unwrap()))
    });
    group.bench_function("deserialize", |b| {
        b.iter(|| black_box(tangle.deserialize::<Sample>(black_box(&bytes)).unwrap()))
    });
    group.finish();
}

fn bench_shared_pointers(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_pointers");
    let tangle = Tangle::default();
    let value = catalog(256);
    group.throughput(Throughput::Elements(
        (value.samples.len() + value.featured.len()) as u64,
    ));
    let bytes = tangle.serialize(&value).unwrap();

    group.bench_function("serialize", |b| {
        b.iter(|| black_box(tangle.serialize(black_box(&value)).unwrap()))
    });
    group.bench_function("deserialize", |b| {
        b.iter(|| black_box(tangle.deserialize::<Catalog>(black_box(&bytes)).unwrap()))
    });
    group.finish();
}

fn bench_cyclic_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("cyclic_graph");
    let tangle = Tangle::default();
    let nodes = ring_graph(RING_LEN);
    group.throughput(Throughput::Elements(RING_LEN as u64));
    let bytes = tangle.serialize(&nodes).unwrap();

    group.bench_function("serialize", |b| {
        b.iter(|| black_box(tangle.serialize(black_box(&nodes)).unwrap()))
    });
    group.bench_function("deserialize", |b| {
        b.iter(|| {
            let back: Vec<Rc<RefCell<GraphNode>>> =
                tangle.deserialize(black_box(&bytes)).unwrap();
            unlink(&back);
        })
    });
    group.finish();
    unlink(&nodes);
}

criterion_group!(
    benches,
    bench_pod_block,
    bench_object,
    bench_shared_pointers,
    bench_cyclic_graph
);
criterion_main!(benches);
