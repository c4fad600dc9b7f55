use shooting::nalgebra::{dmatrix, dvector};
use shooting::spline::SplineKind;
use shooting::{Error, InitialGuess, InterpolationType};

const N_SHOOTING: usize = 8;

fn show(label: &str, mut guess: InitialGuess) -> Result<(), Error> {
    guess.check_and_adjust_dimensions(2, N_SHOOTING, label)?;

    println!("{} ({})", label, guess.interpolation());
    for node in 0..=N_SHOOTING {
        let x = guess.evaluate_at(node)?;
        println!("  node {:>2}: {:>8.4} {:>8.4}", node, x[0], x[1]);
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    show("constant", InitialGuess::constant(&[1.0, -1.0]))?;

    show(
        "first and last different",
        InitialGuess::new(
            dmatrix![0.0, 1.0, 2.0; 0.0, -1.0, -2.0],
            InterpolationType::ConstantWithFirstAndLastDifferent,
        )?,
    )?;

    show(
        "linear",
        InitialGuess::new(dmatrix![0.0, 4.0; 1.0, -1.0], InterpolationType::Linear)?,
    )?;

    show(
        "each frame",
        InitialGuess::new(
            dmatrix![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0;
                     1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
            InterpolationType::EachFrame,
        )?,
    )?;

    let values = dmatrix![0.0, 1.0, 0.0, -1.0; 0.0, 0.5, 2.0, 4.5];
    let time = vec![0.0, 1.0, 2.0, 3.0];

    show(
        "linear spline",
        InitialGuess::with_time(values.clone(), time.clone(), SplineKind::Linear)?,
    )?;
    show(
        "cubic spline",
        InitialGuess::with_time(values, time, SplineKind::Cubic)?,
    )?;

    show(
        "custom",
        InitialGuess::custom(|node, n_shooting| {
            let s = node as f64 / n_shooting as f64;
            dvector![(std::f64::consts::PI * s).sin(), s * s]
        }),
    )?;

    Ok(())
}
