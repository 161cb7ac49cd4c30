use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use dashkit::{MemorySource, NewTodo, ResourceStore, Store, Todo};

fn todos(count: i64) -> Vec<Todo> {
    (1..=count)
        .map(|id| Todo {
            id,
            user_id: Some(1),
            title: format!("todo {id}"),
            completed: id % 2 == 0,
        })
        .collect()
}

fn store_update_benchmark(c: &mut Criterion) {
    #[derive(Clone)]
    struct State {
        counter: usize,
        name: String,
    }

    let store = Store::new(State {
        counter: 0,
        name: "test".to_string(),
    });

    c.bench_function("store_update", |b| {
        let mut i = 0;
        b.iter(|| {
            store.update(|state| {
                state.counter = black_box(i);
            });
            i += 1;
        });
    });
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    #[derive(Clone)]
    struct State {
        value: usize,
    }

    let mut group = c.benchmark_group("store_subscribe");

    for subscriber_count in [1, 10, 100].iter() {
        let store = Store::new(State { value: 0 });

        let _subs: Vec<_> = (0..*subscriber_count)
            .map(|_| {
                store.subscribe(|_| {
                    // Empty subscriber
                })
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                let mut i = 0;
                b.iter(|| {
                    store.update(|state| state.value = black_box(i));
                    i += 1;
                });
            },
        );
    }
    group.finish();
}

fn resource_add_delete_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resource_add_delete");

    for size in [10, 200, 5000].iter() {
        let store = ResourceStore::with_items(Arc::new(MemorySource::new()), todos(*size));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let added = store.add(NewTodo {
                    title: black_box("bench").to_string(),
                });
                store.delete(black_box(added.id));
            });
        });
    }
    group.finish();
}

fn resource_toggle_benchmark(c: &mut Criterion) {
    let store = ResourceStore::with_items(Arc::new(MemorySource::new()), todos(200));

    c.bench_function("resource_toggle", |b| {
        b.iter(|| {
            store.toggle(black_box(150));
        });
    });
}

criterion_group!(
    benches,
    store_update_benchmark,
    store_subscribe_benchmark,
    resource_add_delete_benchmark,
    resource_toggle_benchmark,
);
criterion_main!(benches);
