use criterion::{Criterion, black_box, criterion_group, criterion_main};
use atwt_conv::{IntKernel, Taps, smooth_separable};
use atwt_core::{BorderMode, Image};

fn build_ramp_u16(width: usize, height: usize) -> Image<u16> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(((x * 131 + y * 71) % 65536) as u16);
        }
    }
    Image::from_vec(width, height, data).expect("valid image")
}

fn bench_smooth_int(c: &mut Criterion) {
    let (width, height) = (1920usize, 1080usize);
    let src = build_ramp_u16(width, height);
    let mut scratch = Image::new_fill(width, height, 0u16);
    let mut dst = Image::new_fill(width, height, 0u16);
    let taps = IntKernel::default().at_level(2);

    c.bench_function("smooth_separable_int_level2_1920x1080", |b| {
        b.iter(|| {
            smooth_separable(
                black_box(&src),
                &taps,
                BorderMode::Clamp,
                &mut scratch,
                &mut dst,
            );
            black_box(dst.data()[0]);
        });
    });
}

fn bench_smooth_f64(c: &mut Criterion) {
    let (width, height) = (1920usize, 1080usize);
    let src = build_ramp_u16(width, height).as_view().map(f64::from);
    let mut scratch = Image::new_fill(width, height, 0.0f64);
    let mut dst = Image::new_fill(width, height, 0.0f64);
    let taps = Taps::b3(2);

    c.bench_function("smooth_separable_b3_level2_1920x1080", |b| {
        b.iter(|| {
            smooth_separable(
                black_box(&src),
                &taps,
                BorderMode::Reflect101,
                &mut scratch,
                &mut dst,
            );
            black_box(dst.data()[0]);
        });
    });
}

criterion_group!(benches, bench_smooth_int, bench_smooth_f64);
criterion_main!(benches);
