use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fb_core::{Matrix, Owner, Unchecked, View};

fn bench_strided_sum(c: &mut Criterion) {
    let data: Vec<f64> = (0..1 << 16).map(|i| (i % 97) as f64).collect();

    c.bench_function("view_sum_step1_64k", |b| {
        let view: View<'_, f64> = View::from_slice(&data);
        b.iter(|| {
            let s: f64 = black_box(&view).iter().sum();
            black_box(s);
        });
    });

    c.bench_function("view_sum_step_minus3_unchecked", |b| {
        let view: View<'_, f64, Unchecked> =
            View::from_strided(&data, data.len() / 3, -3).expect("valid layout");
        b.iter(|| {
            let s: f64 = black_box(&view).iter().sum();
            black_box(s);
        });
    });
}

fn bench_matrix_columns(c: &mut Criterion) {
    let m = Matrix::from_fn(512, 512, |i, j| (i ^ j) as f32);
    let view = m.as_view();

    c.bench_function("matrix_column_walk_512x512", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for j in 0..view.cols() {
                acc += view.col(j).iter().sum::<f32>();
            }
            black_box(acc);
        });
    });
}

fn bench_owner_realloc(c: &mut Criterion) {
    let mut owner: Owner<f64> = Owner::new();
    let mut n = 1000usize;

    c.bench_function("owner_realloc_alternating", |b| {
        b.iter(|| {
            n = if n == 1000 { 1001 } else { 1000 };
            owner.realloc(black_box(n)).expect("alloc");
            black_box(owner.len());
        });
    });
}

criterion_group!(
    benches,
    bench_strided_sum,
    bench_matrix_columns,
    bench_owner_realloc
);
criterion_main!(benches);
