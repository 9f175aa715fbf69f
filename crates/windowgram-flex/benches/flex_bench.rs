//! Benchmarks for the flex cores and full command strings.
//!
//! Run with: cargo bench -p windowgram-flex

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use windowgram_core::{PANE_CHARACTERS, PaneSet, Windowgram};
use windowgram_flex::cores::{edgecore, scalecore};
use windowgram_flex::{CommandTable, DispatchConfig, Dispatcher};

/// An `n` by `n` grid of panes, each `cell` characters square.
fn make_grid(n: usize, cell: usize) -> Windowgram {
    let ids: Vec<char> = PANE_CHARACTERS.chars().collect();
    let mut text = String::new();
    for row in 0..n * cell {
        for col in 0..n * cell {
            text.push(ids[(row / cell) * n + col / cell]);
        }
        text.push('\n');
    }
    Windowgram::new(&text)
}

fn bench_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowgram/scalecore");
    for n in [2, 4, 7] {
        let wg = make_grid(n, 4);
        group.bench_with_input(BenchmarkId::new("double", n), &wg, |b, wg| {
            let (w, h) = wg.width_height();
            b.iter(|| black_box(scalecore(wg, w * 2, h * 2)))
        });
    }
    group.finish();
}

fn bench_edge(c: &mut Criterion) {
    let mut group = c.benchmark_group("windowgram/edgecore");
    for n in [2, 4, 7] {
        let wg = make_grid(n, 4);
        let column = PaneSet::from_chars(&PANE_CHARACTERS[..2]);
        group.bench_with_input(BenchmarkId::new("pair", n), &wg, |b, wg| {
            b.iter(|| black_box(edgecore(wg, column, None)))
        });
    }
    group.finish();
}

fn bench_commands(c: &mut Criterion) {
    let table = CommandTable::standard();
    let dispatcher = Dispatcher::new(&table, DispatchConfig::default());
    let mut group = c.benchmark_group("windowgram/flex");
    group.bench_function("readme", |b| {
        b.iter(|| {
            let mut wg = Windowgram::new("1\n");
            black_box(dispatcher.run(
                &mut wg,
                "scale 25x10 ; add right 50% ; break 0 3x5 A ; \
                 join ABC.z DG.B EH.L FI.N JM.b KN.l LO.n",
            ))
        })
    });
    group.bench_function("drag_limit", |b| {
        let start = make_grid(4, 6);
        b.iter(|| {
            let mut wg = start.clone();
            black_box(dispatcher.run(&mut wg, "drag v 01 r 20 limit"))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_scale, bench_edge, bench_commands);
criterion_main!(benches);
