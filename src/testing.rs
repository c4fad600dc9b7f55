//! Reference dynamics and programs useful for testing, debugging and smoke
//! testing.
//!
//! [`Pendulum`] is a pendulum on a cart driven by two generalized forces and
//! [`pendulum_program`] builds the classic swing-up program around it.
//! [`DoubleIntegrator`] has a closed-form solution and is recommended for
//! checking integrators.

#![allow(unused)]

use std::f64::consts::PI;

use nalgebra::{
    storage::{Storage, StorageMut},
    DMatrix, DVector, Dynamic, Vector,
};

use crate::core::{Bounds, Error, InitialGuess, InterpolationType};
use crate::program::{Parameter, Phase, Program};
use crate::simulate::Dynamics;

/// Point mass on a line with the force as the only control.
///
/// States are position and velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleIntegrator;

impl Dynamics for DoubleIntegrator {
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
        xdot[0] = x[1];
        xdot[1] = u[0];
        Ok(())
    }
}

/// Pendulum hanging from a cart.
///
/// States are `[y, theta, ydot, thetadot]` where `y` is the cart position and
/// `theta` the rotation of the pendulum (zero when hanging down). Controls are
/// the force acting on the cart and the torque acting on the pendulum.
#[derive(Debug, Clone, Copy)]
pub struct Pendulum {
    /// Mass of the cart.
    pub cart_mass: f64,
    /// Mass of the pendulum bob.
    pub mass: f64,
    /// Length of the pendulum.
    pub length: f64,
    /// Gravity.
    pub gravity: f64,
}

impl Default for Pendulum {
    fn default() -> Self {
        Self {
            cart_mass: 1.0,
            mass: 1.0,
            length: 0.5,
            gravity: 9.81,
        }
    }
}

impl Pendulum {
    /// Total mechanical energy at given state.
    pub fn energy<Sx>(&self, x: &Vector<f64, Dynamic, Sx>) -> f64
    where
        Sx: Storage<f64, Dynamic>,
    {
        let Self {
            cart_mass,
            mass,
            length,
            gravity,
        } = *self;
        let (theta, yd, thetad) = (x[1], x[2], x[3]);

        let kinetic = 0.5 * (cart_mass + mass) * yd * yd
            + mass * length * theta.cos() * yd * thetad
            + 0.5 * mass * length * length * thetad * thetad;
        let potential = -mass * gravity * length * theta.cos();

        kinetic + potential
    }
}

impl Dynamics for Pendulum {
    fn n_states(&self) -> usize {
        4
    }

    fn n_controls(&self) -> usize {
        2
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
        let Self {
            cart_mass,
            mass,
            length,
            gravity,
        } = *self;
        let (theta, yd, thetad) = (x[1], x[2], x[3]);
        let (sin, cos) = theta.sin_cos();

        // Mass matrix and right-hand side of M * [ydd, thetadd] = b.
        let (m11, m12, m22) = (
            cart_mass + mass,
            mass * length * cos,
            mass * length * length,
        );
        let b1 = u[0] + mass * length * sin * thetad * thetad;
        let b2 = u[1] - mass * gravity * length * sin;

        let det = m11 * m22 - m12 * m12;

        if det.abs() < f64::EPSILON {
            return Err(Error::InvalidValue);
        }

        xdot[0] = yd;
        xdot[1] = thetad;
        xdot[2] = (b1 * m22 - m12 * b2) / det;
        xdot[3] = (m11 * b2 - m12 * b1) / det;

        Ok(())
    }
}

/// Builds the swing-up program of [`Pendulum`].
///
/// The pendulum starts at rest hanging down and must end at rest upside down.
/// Only the cart is actuated. The final time is a free parameter named
/// `"time"` initially guessed as `final_time`. All initial guesses are zero.
pub fn pendulum_program(n_shooting: usize, final_time: f64) -> Result<Program, Error> {
    let min = [-1.0, -2.0 * PI, -31.42, -31.42];
    let max = [5.0, 2.0 * PI, 31.42, 31.42];

    let mut x_bounds = Bounds::new(
        DMatrix::from_fn(4, 3, |i, _| min[i]),
        DMatrix::from_fn(4, 3, |i, _| max[i]),
        InterpolationType::ConstantWithFirstAndLastDifferent,
    )?;

    for row in 0..4 {
        x_bounds.pin(row, 0, 0.0)?;
        x_bounds.pin(row, 2, 0.0)?;
    }
    x_bounds.pin(1, 2, PI)?;

    let u_bounds = Bounds::constant(&[-100.0, 0.0], &[100.0, 0.0])?;

    let phase = Phase::new(4, 2, n_shooting, final_time)?
        .with_x_init(InitialGuess::constant(&[0.0; 4]))?
        .with_u_init(InitialGuess::constant(&[0.0; 2]))?
        .with_x_bounds(x_bounds)?
        .with_u_bounds(u_bounds)?;

    let time = Parameter::new("time", InitialGuess::constant(&[final_time]))?
        .with_bounds(Bounds::constant(&[0.1 * final_time], &[10.0 * final_time])?)?;

    Program::new(vec![phase])?.with_parameter(time)
}
