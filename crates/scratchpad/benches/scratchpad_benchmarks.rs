//! Scratchpad benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use js_engine::{BufferedSink, JsEngine, ScriptExecutor};
use scratchpad::{build_scratchpad, ScratchpadConfig};
use std::cell::RefCell;
use std::rc::Rc;

/// Benchmark script execution on the engine alone.
fn bench_execution(c: &mut Criterion) {
    let simple_script = "1 + 1";
    let loop_script = "let sum = 0; for (let i = 0; i < 1000; i++) { sum += i; } console.log(sum)";
    let throwing_script = "console.log('a'); throw new Error('b')";

    let mut group = c.benchmark_group("execution");

    for (name, script) in [
        ("simple_arithmetic", simple_script),
        ("loop", loop_script),
        ("uncaught_error", throwing_script),
    ] {
        group.bench_function(name, |b| {
            let mut engine = JsEngine::new();
            b.iter(|| {
                let sink = Rc::new(RefCell::new(BufferedSink::new()));
                let _ = black_box(engine.execute(black_box(script), sink));
            })
        });
    }

    group.finish();
}

/// Benchmark console argument flattening.
fn bench_console(c: &mut Criterion) {
    let mut group = c.benchmark_group("console");

    for calls in [10, 100, 1000].iter() {
        let script = format!(
            "for (let i = 0; i < {calls}; i++) console.log('row', i, {{ id: i, tags: ['a', 'b'] }})"
        );
        group.bench_with_input(BenchmarkId::new("structured_calls", calls), &script, |b, script| {
            let mut engine = JsEngine::new();
            b.iter(|| {
                let sink = Rc::new(RefCell::new(BufferedSink::new()));
                let _ = engine.execute(script, sink.clone());
                black_box(sink.borrow().lines().len())
            })
        });
    }

    group.finish();
}

/// Benchmark a full run through the session state.
fn bench_session(c: &mut Criterion) {
    let config = ScratchpadConfig::default();

    c.bench_function("session_run_and_clear", |b| {
        b.iter(|| {
            let mut pad = build_scratchpad(&config, &config.initial_source);
            let summary = pad.run();
            pad.clear();
            black_box(summary)
        })
    });
}

criterion_group!(benches, bench_execution, bench_console, bench_session);
criterion_main!(benches);
