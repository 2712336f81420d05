// Dispatch, List and Property Engine Benchmarks
//
// Measures predicate-ordered dispatch, trampolined list algorithms and the
// cost of a full for_all run over the standard environment.
//
// cargo bench --bench dispatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lambdata::data::list::{self, range};
use lambdata::models::predicates::is_int;
use lambdata::{Environment, Function, Shape, Value};

// ============================================================================
// Helper Functions
// ============================================================================

/// Environment with `n` non-matching registrations ahead of the one that matches
fn shadowed_environment(n: usize) -> Environment {
    let mut env = Environment::new();
    for _ in 0..n {
        env = env
            .register_method("op", |_: &Value| false, |_, _| Ok(Value::Null))
            .unwrap();
    }
    env.register_method("op", is_int, |_, args| Ok(args[0].clone()))
        .unwrap()
}

fn add() -> Function {
    Function::new("add", |_, args| {
        Ok(Value::Int(args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0)))
    })
}

// ============================================================================
// Benchmark 1: Dispatch depth
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for depth in [0usize, 10, 100] {
        let env = shadowed_environment(depth);
        group.bench_with_input(BenchmarkId::new("call1", depth), &env, |b, env| {
            b.iter(|| env.call1("op", black_box(Value::Int(7))).unwrap())
        });
    }
    group.finish();
}

// ============================================================================
// Benchmark 2: Registration (new environment per call)
// ============================================================================

fn bench_registration(c: &mut Criterion) {
    let env = lambdata::standard().unwrap();
    c.bench_function("register_method_on_standard", |b| {
        b.iter(|| {
            black_box(&env)
                .register_method("extra", is_int, |_, args| Ok(args[0].clone()))
                .unwrap()
        })
    });
}

// ============================================================================
// Benchmark 3: Trampolined list algorithms
// ============================================================================

fn bench_list(c: &mut Criterion) {
    let env = lambdata::standard().unwrap();
    let sum = add();
    let mut group = c.benchmark_group("list");
    for n in [1_000i64, 100_000] {
        let items = range(0, n);
        group.bench_with_input(BenchmarkId::new("fold", n), &items, |b, items| {
            b.iter(|| list::fold(&env, items, Value::Int(0), &sum).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("reverse", n), &items, |b, items| {
            b.iter(|| list::reverse(black_box(items)))
        });
    }
    group.finish();
}

// ============================================================================
// Benchmark 4: for_all over 100 trials
// ============================================================================

fn bench_for_all(c: &mut Criterion) {
    let env = lambdata::standard().unwrap().with_seed(7);
    c.bench_function("for_all_number_concat_commutes", |b| {
        b.iter(|| {
            env.for_all(
                |env, args| {
                    let ab = env.call2("concat", args[0].clone(), args[1].clone())?;
                    let ba = env.call2("concat", args[1].clone(), args[0].clone())?;
                    Ok(ab == ba)
                },
                &[Shape::Number, Shape::Number],
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_dispatch, bench_registration, bench_list, bench_for_all);
criterion_main!(benches);
