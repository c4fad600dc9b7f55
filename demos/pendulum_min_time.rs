use std::f64::consts::PI;

use shooting::nalgebra::{
    storage::{Storage, StorageMut},
    DMatrix, Dynamic, Vector,
};
use shooting::noise::{Noise, NoiseOptions};
use shooting::simulate::{Dynamics, Simulate, SimulateOptions};
use shooting::{
    Bounds, Error, GuessUpdate, InitialGuess, InterpolationType, Parameter, Phase, Program,
};

/// Simple pendulum actuated at the pivot. States are `[q, qdot]`.
struct Pendulum {
    mass: f64,
    length: f64,
}

impl Dynamics for Pendulum {
    fn n_states(&self) -> usize {
        2
    }

    fn n_controls(&self) -> usize {
        1
    }

    fn eval<Sx, Su, Sxd>(
        &self,
        x: &Vector<f64, Dynamic, Sx>,
        u: &Vector<f64, Dynamic, Su>,
        xdot: &mut Vector<f64, Dynamic, Sxd>,
    ) -> Result<(), Error>
    where
        Sx: Storage<f64, Dynamic>,
        Su: Storage<f64, Dynamic>,
        Sxd: StorageMut<f64, Dynamic>,
    {
        let inertia = self.mass * self.length * self.length;
        xdot[0] = x[1];
        xdot[1] = (u[0] - self.mass * 9.81 * self.length * x[0].sin()) / inertia;
        Ok(())
    }
}

fn main() -> Result<(), Error> {
    let pendulum = Pendulum {
        mass: 1.0,
        length: 0.5,
    };
    let (n_shooting, final_time) = (30, 1.5);

    let mut x_bounds = Bounds::new(
        DMatrix::from_fn(2, 3, |i, _| [-2.0 * PI, -30.0][i]),
        DMatrix::from_fn(2, 3, |i, _| [2.0 * PI, 30.0][i]),
        InterpolationType::ConstantWithFirstAndLastDifferent,
    )?;
    x_bounds.pin(0, 0, 0.0)?;
    x_bounds.pin(1, 0, 0.0)?;
    x_bounds.pin(0, 2, PI)?;
    x_bounds.pin(1, 2, 0.0)?;

    // Swing up guessed as a straight line between both pinned poses.
    let x_init = InitialGuess::new(
        DMatrix::from_row_slice(2, 2, &[0.0, PI, 0.0, 0.0]),
        InterpolationType::Linear,
    )?;

    let phase = Phase::new(2, 1, n_shooting, final_time)?
        .with_x_init(x_init)?
        .with_x_bounds(x_bounds.clone())?
        .with_u_bounds(Bounds::constant(&[-5.0], &[5.0])?)?;

    let time = Parameter::new("time", InitialGuess::constant(&[final_time]))?
        .with_bounds(Bounds::constant(&[0.5], &[3.0])?)?;

    let mut program = Program::new(vec![phase])?.with_parameter(time)?;
    println!("optimization variables: {}", program.v().n_variables());

    let simulate = Simulate::new(&pendulum, SimulateOptions::default());
    let phase = program.phase(0)?;
    let solution =
        simulate.from_controls_and_initial_states(&program, 0, phase.x_init(), phase.u_init())?;

    let defects = (0..n_shooting)
        .map(|k| {
            let guess = phase.x_init().evaluate_at(k + 1)?;
            Ok((solution.state_at(k + 1)? - guess).norm())
        })
        .collect::<Result<Vec<_>, Error>>()?;
    println!(
        "largest continuity defect of the linear guess: {:.4}",
        defects.iter().cloned().fold(0.0, f64::max)
    );

    let mut options = NoiseOptions::default();
    options.set_magnitude(0.1).set_seed(Some(0));
    let noised = Noise::new(options).apply(phase.x_init(), &x_bounds, 2, n_shooting)?;

    program.update_initial_guess(
        GuessUpdate::new()
            .with_states(noised)
            .with_parameters(InitialGuess::constant(&[1.2]).with_name("time")),
    )?;

    let init = program.v().init()?;
    let (min, max) = program.v().bounds()?;
    let inside = init
        .iter()
        .zip(min.iter().zip(max.iter()))
        .all(|(x, (l, u))| l <= x && x <= u);

    println!("noised guess within bounds: {}", inside);
    println!("time guess: {}", init[init.len() - 1]);

    Ok(())
}
