use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shooting::{
    nalgebra as na,
    noise::{Noise, NoiseOptions},
    spline::SplineKind,
    Bounds, InitialGuess, InterpolationType, Phase, Program,
};

const N_SHOOTING: usize = 100;
const N_ELEMENTS: usize = 20;

fn evaluate_all(guess: &InitialGuess) -> f64 {
    (0..=N_SHOOTING)
        .map(|node| guess.evaluate_at(node).map(|x| x.sum()).unwrap_or(f64::NAN))
        .sum()
}

fn adjusted(mut guess: InitialGuess) -> InitialGuess {
    guess
        .check_and_adjust_dimensions(N_ELEMENTS, N_SHOOTING, "x_init")
        .unwrap();
    guess
}

fn linear(c: &mut Criterion) {
    let values = na::DMatrix::from_fn(N_ELEMENTS, 2, |i, j| (i * (j + 1)) as f64);
    let guess = adjusted(InitialGuess::new(values, InterpolationType::Linear).unwrap());

    c.bench_function("linear evaluation", |b| {
        b.iter(|| black_box(evaluate_all(&guess)))
    });
}

fn spline(c: &mut Criterion) {
    let time = (0..10).map(|t| t as f64 * 0.3).collect::<Vec<_>>();
    let values = na::DMatrix::from_fn(N_ELEMENTS, 10, |i, j| ((i + j) as f64).sin());

    let linear = adjusted(InitialGuess::with_time(values.clone(), time.clone(), SplineKind::Linear).unwrap());
    let cubic = adjusted(InitialGuess::with_time(values, time, SplineKind::Cubic).unwrap());

    c.bench_function("linear spline evaluation", |b| {
        b.iter(|| black_box(evaluate_all(&linear)))
    });

    c.bench_function("cubic spline evaluation", |b| {
        b.iter(|| black_box(evaluate_all(&cubic)))
    });
}

fn custom(c: &mut Criterion) {
    let guess = adjusted(InitialGuess::custom(|node, n_shooting| {
        na::DVector::from_fn(N_ELEMENTS, |i, _| (i * node) as f64 / n_shooting as f64)
    }));

    c.bench_function("custom evaluation", |b| {
        b.iter(|| black_box(evaluate_all(&guess)))
    });
}

fn noise(c: &mut Criterion) {
    let guess = InitialGuess::constant(&[0.0; N_ELEMENTS]);
    let bounds = Bounds::constant(&[-1.0; N_ELEMENTS], &[1.0; N_ELEMENTS]).unwrap();

    let mut options = NoiseOptions::default();
    options.set_seed(Some(42));
    let mut noise = Noise::new(options);

    c.bench_function("noised guess", |b| {
        b.iter(|| black_box(noise.apply(&guess, &bounds, N_ELEMENTS, N_SHOOTING).unwrap()))
    });
}

fn optimization_vector(c: &mut Criterion) {
    let phases = (0..5)
        .map(|_| Phase::new(N_ELEMENTS, N_ELEMENTS / 2, N_SHOOTING, 1.0).unwrap())
        .collect();
    let program = Program::new(phases).unwrap();

    c.bench_function("optimization vector init", |b| {
        b.iter(|| black_box(program.v().init().unwrap()))
    });
}

criterion_group!(
    benches,
    linear,
    spline,
    custom,
    noise,
    optimization_vector
);
criterion_main!(benches);
