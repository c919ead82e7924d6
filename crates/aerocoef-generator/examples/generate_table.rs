//! Example generating a flat-plate coefficient table.
//!
//! This example shows how to:
//! - Declare a grid over Mach number, angle of attack and angle of sideslip
//! - Fill its table with the `NewtonianFlatPlate` strategy
//! - Print the table, or dump it as a JSON snapshot
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_table
//! ```
//!
//! Choose the sample points (degrees for angles):
//!
//! ```sh
//! cargo run --example generate_table -- --mach 5 --mach 10 --alpha 0 --alpha 15 --alpha 30
//! ```
//!
//! Evaluate in parallel and emit JSON:
//!
//! ```sh
//! cargo run --example generate_table -- --parallel --json
//! ```
//!
//! Set `RUST_LOG=debug` to see the generation pass.

use std::process;

use aerocoef_core::{
    CoefficientGrid, CoefficientGridDto, CoefficientSource as _, GridError, IndependentVariable,
    ReferenceQuantities,
};
use aerocoef_generator::{CoefficientGenerator, GenerationOptions, NewtonianFlatPlate};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Mach number sample point. Repeatable.
    #[arg(long = "mach", value_name = "MACH", default_values_t = [4.0, 8.0, 16.0])]
    mach: Vec<f64>,

    /// Angle of attack sample point in degrees. Repeatable.
    #[arg(long = "alpha", value_name = "DEG", default_values_t = [0.0, 10.0, 20.0, 30.0])]
    alpha: Vec<f64>,

    /// Angle of sideslip sample point in degrees. Repeatable; omitted from the grid if not given.
    #[arg(long = "beta", value_name = "DEG")]
    beta: Vec<f64>,

    /// Plate area.
    #[arg(long, value_name = "AREA", default_value_t = 1.0)]
    plate_area: f64,

    /// Reference area.
    #[arg(long, value_name = "AREA", default_value_t = 1.0)]
    reference_area: f64,

    /// Reference length.
    #[arg(long, value_name = "LENGTH", default_value_t = 1.0)]
    reference_length: f64,

    /// Evaluate grid points in parallel.
    #[arg(long)]
    parallel: bool,

    /// Print the grid as a JSON snapshot instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();

    let plate = match build_plate(&args) {
        Ok(plate) => plate,
        Err(err) => {
            eprintln!("Invalid geometry: {err}");
            process::exit(2);
        }
    };

    let mut grid = match build_grid(&args) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("Invalid grid: {err}");
            process::exit(2);
        }
    };
    if let Err(err) = grid.check_monotonic() {
        log::warn!("{err}");
    }

    let generator = CoefficientGenerator::new(&plate).with_options(GenerationOptions {
        parallel: args.parallel,
    });
    let stats = match generator.generate(&mut grid) {
        Ok(stats) => stats,
        Err(err) => {
            eprintln!("Generation failed: {err}");
            process::exit(1);
        }
    };

    if args.json {
        let result = CoefficientGridDto::try_from(&grid)
            .map_err(|err| err.to_string())
            .and_then(|dto| serde_json::to_string_pretty(&dto).map_err(|err| err.to_string()));
        match result {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Serialization failed: {err}");
                process::exit(1);
            }
        }
        return;
    }

    if let Err(err) = print_table(&grid) {
        eprintln!("{err}");
        process::exit(1);
    }
    println!();
    println!("Cases: {}", stats.case_count);
    println!("Elapsed: {:?}", stats.elapsed);
}

fn build_plate(args: &Args) -> Result<NewtonianFlatPlate, aerocoef_core::ReferenceError> {
    let reference = ReferenceQuantities::new(args.reference_area, args.reference_length, [0.0; 3])?;
    NewtonianFlatPlate::new(args.plate_area, [0.0; 3], reference)
}

fn build_grid(args: &Args) -> Result<CoefficientGrid, GridError> {
    let mut variables = vec![
        (IndependentVariable::MachNumber, &args.mach),
        (IndependentVariable::AngleOfAttack, &args.alpha),
    ];
    if !args.beta.is_empty() {
        variables.push((IndependentVariable::AngleOfSideslip, &args.beta));
    }

    let mut grid = CoefficientGrid::new(6);
    grid.set_variable_count(variables.len())?;
    for (slot, (role, points)) in variables.into_iter().enumerate() {
        grid.assign_role(role, slot)?;
        grid.set_samples(role, points)?;
    }
    Ok(grid)
}

fn print_table(grid: &CoefficientGrid) -> Result<(), GridError> {
    let header = (0..grid.variable_count())
        .map(|slot| {
            grid.role_at(slot)
                .map_or_else(|| format!("slot {slot}"), |role| role.to_string())
        })
        .collect::<Vec<_>>();
    println!(
        "{:>8} {} | {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "offset",
        header
            .iter()
            .map(|name| format!("{name:>18}"))
            .collect::<Vec<_>>()
            .join(" "),
        "C_D",
        "C_S",
        "C_L",
        "C_l",
        "C_m",
        "C_n"
    );
    for tuple in grid.indices()? {
        let offset = grid.to_flat_index(&tuple)?;
        let values = grid.sample_values(&tuple)?;
        let coefficients = grid.coefficients(&tuple)?;
        println!(
            "{offset:>8} {} | {}",
            values
                .iter()
                .map(|v| format!("{v:>18.3}"))
                .collect::<Vec<_>>()
                .join(" "),
            coefficients
                .iter()
                .map(|c| format!("{c:>10.5}"))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }
    Ok(())
}
