//! Benchmark: operations that run at pointer-move cadence.
//!
//! Divider drags call `ratio_at` + `resize_pane` on every mouse move, and tab
//! drags classify the pointer with `resolve_drop_zone`. Layouts of 4, 16 and
//! 64 leaves stand in for realistic and pathological workspaces.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dock_core::{DropZone, LayoutEngine, PaneId, Rect, SplitDirection, TabKind, TabOptions, Vec2};
use dock_layout::{resolve_drop_zone, PaneLayout, EDGE_THRESHOLD};

const AREA: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1920.0,
    height: 1080.0,
};

// ── Helpers ──

/// Grow a layout to `leaves` leaves by repeatedly splitting the active pane,
/// alternating direction.
fn build_layout(leaves: usize) -> PaneLayout {
    let mut layout = PaneLayout::with_initial_tab(TabKind::Query, TabOptions::default());
    for i in 1..leaves {
        let pane = layout.active_pane();
        let Some(tab) = layout.create_tab(pane, TabKind::Query, TabOptions::default()) else {
            break;
        };
        let direction = if i % 2 == 0 {
            SplitDirection::Vertical
        } else {
            SplitDirection::Horizontal
        };
        layout.split_pane(pane, direction, tab);
    }
    layout
}

/// Every split id in the layout, in no particular order.
fn split_ids(layout: &PaneLayout) -> Vec<PaneId> {
    layout
        .panes()
        .iter()
        .filter(|(_, node)| !node.is_leaf())
        .map(|(id, _)| id)
        .collect()
}

// ── Benchmarks ──

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize_pane");
    for &n in &[4, 16, 64] {
        let layout = build_layout(n);
        let splits = split_ids(&layout);

        group.bench_with_input(BenchmarkId::new("direct", n), &n, |b, _| {
            let mut layout = layout.clone();
            let mut step = 0u32;
            b.iter(|| {
                step = step.wrapping_add(1);
                let split = splits[step as usize % splits.len()];
                let ratio = 0.2 + (step % 60) as f32 / 100.0;
                black_box(layout.resize_pane(split, ratio));
            });
        });

        group.bench_with_input(BenchmarkId::new("pointer_drag", n), &n, |b, _| {
            let mut layout = layout.clone();
            let split = layout.root();
            let mut x = 0.0f32;
            b.iter(|| {
                x = (x + 7.0) % AREA.width;
                if let Some(ratio) = layout.ratio_at(AREA, split, Vec2::new(x, 10.0)) {
                    black_box(layout.resize_pane(split, ratio));
                }
            });
        });
    }
    group.finish();
}

fn bench_drop_zone(c: &mut Criterion) {
    let mut group = c.benchmark_group("drop_zone");

    group.bench_function("resolve_drop_zone", |b| {
        b.iter(|| {
            for i in 0..100 {
                let x = (i * 9) as f32;
                let y = (i * 5) as f32;
                black_box(resolve_drop_zone(x, y, 900.0, 500.0, EDGE_THRESHOLD));
            }
        });
    });

    for &n in &[4, 16, 64] {
        let layout = build_layout(n);
        group.bench_with_input(BenchmarkId::new("drop_target_at", n), &n, |b, _| {
            b.iter(|| {
                for i in 0..20 {
                    let point = Vec2::new((i * 96) as f32, (i * 54) as f32);
                    black_box(layout.drop_target_at(AREA, point, EDGE_THRESHOLD));
                }
            });
        });
    }
    group.finish();
}

fn bench_move_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_tab_churn");
    for &n in &[4, 16, 64] {
        let layout = build_layout(n);

        // Shuttle a tab between the first and last leaf, alternating between
        // a merge and an edge split so the tree keeps reshaping.
        group.bench_with_input(BenchmarkId::new("center_and_edge", n), &n, |b, _| {
            let mut layout = layout.clone();
            let mut step = 0u32;
            b.iter(|| {
                step = step.wrapping_add(1);
                let leaves: Vec<_> = layout.leaves().map(|leaf| leaf.id()).collect();
                let (from, to) = (leaves[0], leaves[leaves.len() - 1]);
                let Some(tab) = layout.leaf(from).and_then(|leaf| leaf.active_tab()) else {
                    return;
                };
                let zone = if step % 2 == 0 { DropZone::Center } else { DropZone::Right };
                black_box(layout.move_tab_to_pane(from, tab, to, zone));
                layout.create_tab(from, TabKind::Query, TabOptions::default());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resize, bench_drop_zone, bench_move_churn);
criterion_main!(benches);
