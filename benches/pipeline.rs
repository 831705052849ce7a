use criterion::{Criterion, criterion_group, criterion_main};
use foilcsv::Point2;
use foilcsv::airfoil::{
    CorrectionParams, ToleranceFactors, ToleranceSet, correct_profile, split_profile, validate,
};
use foilcsv::common::linear_space;
use foilcsv::io::{CsvFormat, ParseMode, format_profile, parse_profile_text};
use std::f64::consts::PI;
use std::hint::black_box;

/// Symmetric NACA 4-digit thickness distribution, closed trailing edge variant
fn naca_thickness(x: f64, t: f64) -> f64 {
    5.0 * t
        * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
            - 0.1036 * x.powi(4))
}

/// A dense 12% thick profile running from the trailing edge over the upper surface and back
/// along the lower surface, with the trailing edge row repeated twice at the end
fn dense_profile(stations: usize) -> Vec<Point2> {
    let xs = linear_space(0.0, PI, stations)
        .into_iter()
        .map(|t| 0.5 * (1.0 - t.cos()))
        .collect::<Vec<_>>();

    let mut points = xs
        .iter()
        .rev()
        .map(|&x| Point2::new(x, naca_thickness(x, 0.12)))
        .collect::<Vec<_>>();
    points.extend(xs.iter().skip(1).map(|&x| Point2::new(x, -naca_thickness(x, 0.12))));

    let te = points[points.len() - 1];
    points.push(te);
    points.push(te);
    points
}

fn benchmark(c: &mut Criterion) {
    let points = dense_profile(2_000);
    let params = CorrectionParams::default();
    let text = format_profile(&points, &CsvFormat::default());

    c.bench_function("parse_profile_text", |b| {
        b.iter(|| parse_profile_text(black_box(&text), ParseMode::Auto))
    });

    c.bench_function("correct_profile", |b| {
        b.iter(|| correct_profile(black_box(&points), &params))
    });

    let clean = correct_profile(&points, &params)
        .expect("benchmark profile corrects cleanly")
        .points;
    let tol = ToleranceSet::estimate(&clean, &ToleranceFactors::default())
        .expect("benchmark profile has a chord");

    c.bench_function("validate", |b| b.iter(|| validate(black_box(&clean), &tol)));

    c.bench_function("split_profile", |b| {
        b.iter(|| split_profile(black_box(&clean)))
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
