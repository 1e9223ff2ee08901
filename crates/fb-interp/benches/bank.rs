use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fb_core::{Matrix, View};
use fb_interp::{UniversalInterpolator, UniversalInterpolator2D, registry};
use fb_kernel::{Bessel, Sinc};

fn bench_build(c: &mut Criterion) {
    let sinc = Sinc::new(8).expect("valid order");
    let mut bank = UniversalInterpolator::new();

    c.bench_function("build_sinc8_128_divisions", |b| {
        b.iter(|| {
            bank.init_filters(black_box(128), &sinc).expect("build");
            black_box(bank.n_filters());
        });
    });

    let bessel = Bessel::isotropic(8).expect("valid order");
    let mut bank2d = UniversalInterpolator2D::new();
    c.bench_function("build_bessel8_32x32_divisions", |b| {
        b.iter(|| {
            bank2d.init_filters(32, 32, &bessel).expect("build");
            black_box(bank2d.n_filters());
        });
    });
}

fn bench_resample(c: &mut Criterion) {
    let data: Vec<f64> = (0..8192).map(|i| (i as f64 * 0.013).sin()).collect();
    let signal: View<'_, f64> = View::from_slice(&data);
    let bank = registry::sinc8().expect("registry bank");

    c.bench_function("sinc8_resample_8192_by_0_37", |b| {
        b.iter(|| {
            let mut x = 4.0;
            let mut acc = 0.0;
            while x < 8188.0 {
                acc += bank.interpolate(black_box(&signal), x).expect("interior");
                x += 0.37;
            }
            black_box(acc);
        });
    });

    let m = Matrix::from_fn(128, 128, |i, j| ((i as f64) * 0.1).sin() * ((j as f64) * 0.07).cos());
    let view = m.as_view();
    let bank2d = registry::bessel_isotropic8().expect("registry bank");
    c.bench_function("bessel8_resample_64x64_grid", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..64 {
                for j in 0..64 {
                    let v = 20.0 + i as f64 * 1.3;
                    let h = 20.0 + j as f64 * 1.3;
                    acc += bank2d.interpolate(black_box(&view), v, h).expect("interior");
                }
            }
            black_box(acc);
        });
    });
}

criterion_group!(benches, bench_build, bench_resample);
criterion_main!(benches);
