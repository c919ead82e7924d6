//! Benchmarks for grid indexing and table generation.
//!
//! # Benchmarks
//!
//! - **`flat_index`**: Maps every index tuple of a 4-variable grid to its table
//!   offset.
//! - **`generate_sequential`** / **`generate_parallel`**: Fills the table of the
//!   same grid with the `NewtonianFlatPlate` strategy.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, time::Duration};

use aerocoef_core::{CoefficientGrid, IndependentVariable, ReferenceQuantities};
use aerocoef_generator::{CoefficientGenerator, GenerationOptions, NewtonianFlatPlate};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn linspace(start: f64, end: f64, count: u32) -> Vec<f64> {
    let step = (end - start) / f64::from(count - 1);
    (0..count).map(|i| start + step * f64::from(i)).collect()
}

fn build_grid() -> CoefficientGrid {
    let mut grid = CoefficientGrid::new(6);
    grid.set_variable_count(4).unwrap();
    let samples = [
        (IndependentVariable::MachNumber, linspace(2.0, 25.0, 12)),
        (IndependentVariable::AngleOfAttack, linspace(-10.0, 60.0, 36)),
        (IndependentVariable::AngleOfSideslip, linspace(-10.0, 10.0, 9)),
        (IndependentVariable::ReynoldsNumber, linspace(1.0e5, 1.0e7, 4)),
    ];
    for (slot, (role, points)) in samples.into_iter().enumerate() {
        grid.assign_role(role, slot).unwrap();
        grid.set_samples(role, &points).unwrap();
    }
    grid
}

fn bench_flat_index(c: &mut Criterion) {
    let grid = build_grid();
    let tuples: Vec<_> = grid.indices().unwrap().collect();
    c.bench_function("flat_index", |b| {
        b.iter(|| {
            for tuple in &tuples {
                hint::black_box(grid.to_flat_index(hint::black_box(tuple)).unwrap());
            }
        });
    });
}

fn bench_generate(c: &mut Criterion) {
    let reference = ReferenceQuantities::new(1.0, 1.0, [0.0; 3]).unwrap();
    let plate = NewtonianFlatPlate::new(1.0, [-0.25, 0.0, 0.0], reference).unwrap();

    for (name, parallel) in [("generate_sequential", false), ("generate_parallel", true)] {
        let generator =
            CoefficientGenerator::new(&plate).with_options(GenerationOptions { parallel });
        c.bench_function(name, |b| {
            b.iter_batched(
                build_grid,
                |mut grid| generator.generate(&mut grid).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(8));
    targets =
        bench_flat_index,
        bench_generate
);
criterion_main!(benches);
