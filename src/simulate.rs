//! Forward simulation of initial guesses.
//!
//! Integrating the dynamics from the guessed states with the guessed controls
//! shows how far the guess is from a dynamically consistent trajectory.
//!
//! # Defining dynamics
//!
//! Dynamics are any type that implements [`Dynamics`] trait.
//!
//! ```rust
//! use shooting::nalgebra as na;
//! use shooting::simulate::Dynamics;
//! use shooting::Error;
//! use na::{storage::{Storage, StorageMut}, Dynamic, Vector};
//!
//! // Point mass on a line pushed by a force.
//! struct Mass {
//!     m: f64,
//! }
//!
//! impl Dynamics for Mass {
//!     fn n_states(&self) -> usize {
//!         2
//!     }
//!
//!     fn n_controls(&self) -> usize {
//!         1
//!     }
//!
//!     fn eval<Sx, Su, Sxd>(
//!         &self,
//!         x: &Vector<f64, Dynamic, Sx>,
//!         u: &Vector<f64, Dynamic, Su>,
//!         xdot: &mut Vector<f64, Dynamic, Sxd>,
//!     ) -> Result<(), Error>
//!     where
//!         Sx: Storage<f64, Dynamic>,
//!         Su: Storage<f64, Dynamic>,
//!         Sxd: StorageMut<f64, Dynamic>,
//!     {
//!         xdot[0] = x[1];
//!         xdot[1] = u[0] / self.m;
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Simulating
//!
//! ```rust
//! # use shooting::nalgebra as na;
//! # use shooting::simulate::Dynamics;
//! # use shooting::Error;
//! # use na::{storage::{Storage, StorageMut}, Dynamic, Vector};
//! # struct Mass { m: f64 }
//! # impl Dynamics for Mass {
//! #     fn n_states(&self) -> usize { 2 }
//! #     fn n_controls(&self) -> usize { 1 }
//! #     fn eval<Sx, Su, Sxd>(&self, x: &Vector<f64, Dynamic, Sx>, u: &Vector<f64, Dynamic, Su>, xdot: &mut Vector<f64, Dynamic, Sxd>) -> Result<(), Error>
//! #     where Sx: Storage<f64, Dynamic>, Su: Storage<f64, Dynamic>, Sxd: StorageMut<f64, Dynamic>,
//! #     { xdot[0] = x[1]; xdot[1] = u[0] / self.m; Ok(()) }
//! # }
//! use shooting::simulate::{Simulate, SimulateOptions};
//! use shooting::{InitialGuess, Phase, Program};
//!
//! # fn main() -> Result<(), Error> {
//! let program = Program::new(vec![Phase::new(2, 1, 10, 1.0)?])?;
//!
//! let mut options = SimulateOptions::default();
//! options.set_single_shoot(true);
//!
//! let solution = Simulate::new(&Mass { m: 2.0 }, options).from_controls_and_initial_states(
//!     &program,
//!     0,
//!     &InitialGuess::constant(&[0.0, 0.0]),
//!     &InitialGuess::constant(&[2.0]),
//! )?;
//!
//! // x(t) = t^2 / 2 for unit acceleration.
//! assert!((solution.final_state()[0] - 0.5).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```

use getset::{CopyGetters, Getters, Setters};
use log::debug;
use nalgebra::{
    storage::{Storage, StorageMut},
    DMatrix, DVector, Dynamic, Vector,
};

use crate::core::{Error, InitialGuess};
use crate::program::{Phase, Program};

/// Dynamics of the system, i.e., `xdot = f(x, u)`.
pub trait Dynamics {
    /// Number of states.
    fn n_states(&self) -> usize;

    /// Number of controls.
    fn n_controls(&self) -> usize;

    /// Computes the time derivative of the states.
    fn eval<Sx, Su, Sxd>(
        &self,
        x: &Vector<f64, Dynamic, Sx>,
        u: &Vector<f64, Dynamic, Su>,
        xdot: &mut Vector<f64, Dynamic, Sxd>,
    ) -> Result<(), Error>
    where
        Sx: Storage<f64, Dynamic>,
        Su: Storage<f64, Dynamic>,
        Sxd: StorageMut<f64, Dynamic>;
}

/// Explicit Runge-Kutta integrator used over each shooting interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdeSolver {
    /// Forward Euler.
    Rk1 {
        /// Number of steps per shooting interval.
        n_integration_steps: usize,
    },
    /// Midpoint method.
    Rk2 {
        /// Number of steps per shooting interval.
        n_integration_steps: usize,
    },
    /// Classic fourth-order method.
    Rk4 {
        /// Number of steps per shooting interval.
        n_integration_steps: usize,
    },
}

impl Default for OdeSolver {
    fn default() -> Self {
        Self::Rk4 {
            n_integration_steps: 5,
        }
    }
}

impl OdeSolver {
    /// Gets the number of steps per shooting interval.
    pub fn n_integration_steps(&self) -> usize {
        match *self {
            Self::Rk1 {
                n_integration_steps,
            }
            | Self::Rk2 {
                n_integration_steps,
            }
            | Self::Rk4 {
                n_integration_steps,
            } => n_integration_steps,
        }
    }

    /// Integrates `x` over one shooting interval of length `dt` with control
    /// `u` held constant.
    pub fn integrate<D: Dynamics>(
        &self,
        dynamics: &D,
        x: &mut DVector<f64>,
        u: &DVector<f64>,
        dt: f64,
    ) -> Result<(), Error> {
        let n = self.n_integration_steps().max(1);
        let h = dt / n as f64;

        let mut k1 = DVector::zeros(x.len());

        for _ in 0..n {
            dynamics.eval(&*x, u, &mut k1)?;

            match self {
                Self::Rk1 { .. } => {
                    x.axpy(h, &k1, 1.0);
                }
                Self::Rk2 { .. } => {
                    let mut k2 = DVector::zeros(x.len());
                    dynamics.eval(&(&*x + &k1 * (h / 2.0)), u, &mut k2)?;
                    x.axpy(h, &k2, 1.0);
                }
                Self::Rk4 { .. } => {
                    let mut k2 = DVector::zeros(x.len());
                    let mut k3 = DVector::zeros(x.len());
                    let mut k4 = DVector::zeros(x.len());

                    dynamics.eval(&(&*x + &k1 * (h / 2.0)), u, &mut k2)?;
                    dynamics.eval(&(&*x + &k2 * (h / 2.0)), u, &mut k3)?;
                    dynamics.eval(&(&*x + &k3 * h), u, &mut k4)?;

                    let increment = (k1.clone() + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0);
                    *x += increment;
                }
            }
        }

        Ok(())
    }
}

/// Options for [`Simulate`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SimulateOptions {
    /// Integrator. Default: [`OdeSolver::Rk4`] with 5 steps.
    ode_solver: OdeSolver,
    /// Chain the intervals from the first state instead of restarting each
    /// interval from the guessed state. Default: `false`.
    single_shoot: bool,
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            ode_solver: OdeSolver::default(),
            single_shoot: false,
        }
    }
}

/// Simulated trajectory over the shooting grid.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Solution {
    /// States at the nodes, one column per node.
    states: DMatrix<f64>,
    /// Controls applied over the intervals, one column per interval.
    controls: DMatrix<f64>,
    /// Time at the nodes.
    time: DVector<f64>,
}

impl Solution {
    /// Gets the states at given node.
    pub fn state_at(&self, node: usize) -> Result<DVector<f64>, Error> {
        if node >= self.states.ncols() {
            return Err(Error::NodeOutOfRange {
                node,
                n_shooting: self.states.ncols().saturating_sub(1),
            });
        }

        Ok(self.states.column(node).into_owned())
    }

    /// Gets the controls applied from given node.
    pub fn control_at(&self, node: usize) -> Result<DVector<f64>, Error> {
        if node >= self.controls.ncols() {
            return Err(Error::NodeOutOfRange {
                node,
                n_shooting: self.controls.ncols().saturating_sub(1),
            });
        }

        Ok(self.controls.column(node).into_owned())
    }

    /// Gets the states at the end of the phase.
    pub fn final_state(&self) -> DVector<f64> {
        self.states.column(self.states.ncols() - 1).into_owned()
    }
}

/// Forward simulation of a phase. See [module](self) documentation for more
/// details.
pub struct Simulate<'d, D> {
    dynamics: &'d D,
    options: SimulateOptions,
}

impl<'d, D: Dynamics> Simulate<'d, D> {
    /// Initializes the simulation.
    pub fn new(dynamics: &'d D, options: SimulateOptions) -> Self {
        Self { dynamics, options }
    }

    /// Gets the options.
    pub fn options(&self) -> &SimulateOptions {
        &self.options
    }

    /// Integrates given phase of the program from the state guess `x` with the
    /// control guess `u`.
    ///
    /// With single shooting, each interval starts where the previous one
    /// ended. Otherwise, interval `k` starts from the guessed state at node
    /// `k`.
    pub fn from_controls_and_initial_states(
        &self,
        program: &Program,
        phase: usize,
        x: &InitialGuess,
        u: &InitialGuess,
    ) -> Result<Solution, Error> {
        let phase = program.phase(phase)?;
        self.check_dynamics(phase)?;

        let mut x = x.clone();
        phase.check_states(&mut x)?;
        let mut u = u.clone();
        phase.check_controls(&mut u)?;

        let ns = phase.n_shooting();
        let dt = phase.dt();
        let ode_solver = self.options.ode_solver();
        let single_shoot = self.options.single_shoot();

        let mut states = DMatrix::zeros(phase.n_states(), ns + 1);
        let mut controls = DMatrix::zeros(phase.n_controls(), ns);

        let mut current = x.evaluate_at(0)?;
        states.set_column(0, &current);

        for k in 0..ns {
            if !single_shoot && k > 0 {
                current = x.evaluate_at(k)?;
            }

            let uk = u.evaluate_at(k)?;
            ode_solver.integrate(self.dynamics, &mut current, &uk, dt)?;

            if current.iter().any(|xi| !xi.is_finite()) {
                debug!("simulation diverged in interval {}", k);
                return Err(Error::InvalidValue);
            }

            states.set_column(k + 1, &current);
            controls.set_column(k, &uk);
        }

        debug!(
            "simulated {} intervals (dt = {}, single shoot = {}, {:?})",
            ns, dt, single_shoot, ode_solver
        );

        let time = DVector::from_fn(ns + 1, |k, _| k as f64 * dt);

        Ok(Solution {
            states,
            controls,
            time,
        })
    }

    fn check_dynamics(&self, phase: &Phase) -> Result<(), Error> {
        if self.dynamics.n_states() != phase.n_states() {
            return Err(Error::InvalidElements {
                name: "dynamics states".to_string(),
                found: self.dynamics.n_states(),
                expected: phase.n_states(),
            });
        }

        if self.dynamics.n_controls() != phase.n_controls() {
            return Err(Error::InvalidElements {
                name: "dynamics controls".to_string(),
                found: self.dynamics.n_controls(),
                expected: phase.n_controls(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::{dmatrix, dvector};

    use super::*;
    use crate::core::InterpolationType;
    use crate::testing::{pendulum_program, DoubleIntegrator, Pendulum};

    fn options(ode_solver: OdeSolver, single_shoot: bool) -> SimulateOptions {
        let mut options = SimulateOptions::default();
        options
            .set_ode_solver(ode_solver)
            .set_single_shoot(single_shoot);
        options
    }

    fn double_integrator_program(n_shooting: usize, final_time: f64) -> Program {
        Program::new(vec![Phase::new(2, 1, n_shooting, final_time).unwrap()]).unwrap()
    }

    #[test]
    fn rk4_is_exact_for_constant_acceleration() {
        let program = double_integrator_program(4, 2.0);
        let solution = Simulate::new(&DoubleIntegrator, options(OdeSolver::default(), true))
            .from_controls_and_initial_states(
                &program,
                0,
                &InitialGuess::constant(&[1.0, -1.0]),
                &InitialGuess::constant(&[3.0]),
            )
            .unwrap();

        for (k, t) in solution.time().iter().enumerate() {
            let expected = dvector![1.0 - t + 1.5 * t * t, -1.0 + 3.0 * t];
            assert_abs_diff_eq!(solution.state_at(k).unwrap(), expected, epsilon = 1e-12);
        }

        assert_eq!(solution.controls().shape(), (1, 4));
        assert_abs_diff_eq!(solution.time()[4], 2.0);
    }

    #[test]
    fn euler_steps() {
        let program = double_integrator_program(1, 1.0);
        let solution = Simulate::new(
            &DoubleIntegrator,
            options(
                OdeSolver::Rk1 {
                    n_integration_steps: 2,
                },
                true,
            ),
        )
        .from_controls_and_initial_states(
            &program,
            0,
            &InitialGuess::constant(&[0.0, 0.0]),
            &InitialGuess::constant(&[1.0]),
        )
        .unwrap();

        // Two Euler steps of 0.5: v = 0.5, 1.0 and x = 0.0, 0.25.
        assert_abs_diff_eq!(solution.final_state(), dvector![0.25, 1.0], epsilon = 1e-12);
    }

    #[test]
    fn midpoint_is_exact_for_constant_acceleration() {
        let program = double_integrator_program(3, 1.5);
        let solution = Simulate::new(
            &DoubleIntegrator,
            options(
                OdeSolver::Rk2 {
                    n_integration_steps: 1,
                },
                true,
            ),
        )
        .from_controls_and_initial_states(
            &program,
            0,
            &InitialGuess::constant(&[0.0, 0.0]),
            &InitialGuess::constant(&[2.0]),
        )
        .unwrap();

        assert_abs_diff_eq!(solution.final_state(), dvector![2.25, 3.0], epsilon = 1e-12);
    }

    #[test]
    fn multiple_shooting_restarts_from_guess() {
        let program = double_integrator_program(2, 2.0);
        let x = InitialGuess::new(
            dmatrix![0.0, 10.0, 20.0; 0.0, 0.0, 0.0],
            InterpolationType::EachFrame,
        )
        .unwrap();
        let u = InitialGuess::constant(&[0.0]);

        let multiple = Simulate::new(&DoubleIntegrator, options(OdeSolver::default(), false))
            .from_controls_and_initial_states(&program, 0, &x, &u)
            .unwrap();
        let single = Simulate::new(&DoubleIntegrator, options(OdeSolver::default(), true))
            .from_controls_and_initial_states(&program, 0, &x, &u)
            .unwrap();

        // Zero velocity keeps each interval at its starting position.
        assert_abs_diff_eq!(
            multiple.states().clone(),
            dmatrix![0.0, 0.0, 10.0; 0.0, 0.0, 0.0],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(single.final_state(), dvector![0.0, 0.0]);
    }

    #[test]
    fn pendulum_at_rest_stays_at_rest() {
        let program = pendulum_program(10, 2.0).unwrap();
        let phase = program.phase(0).unwrap();

        let solution = Simulate::new(&Pendulum::default(), SimulateOptions::default())
            .from_controls_and_initial_states(&program, 0, phase.x_init(), phase.u_init())
            .unwrap();

        assert_abs_diff_eq!(solution.states().clone(), DMatrix::zeros(4, 11), epsilon = 1e-12);
    }

    #[test]
    fn pendulum_conserves_energy() {
        let pendulum = Pendulum::default();
        let program = pendulum_program(20, 1.0).unwrap();

        let x0 = [0.0, 0.5, 0.0, 0.0];
        let options = options(
            OdeSolver::Rk4 {
                n_integration_steps: 20,
            },
            true,
        );

        let solution = Simulate::new(&pendulum, options)
            .from_controls_and_initial_states(
                &program,
                0,
                &InitialGuess::constant(&x0),
                &InitialGuess::constant(&[0.0, 0.0]),
            )
            .unwrap();

        let initial = pendulum.energy(&solution.state_at(0).unwrap());
        let last = pendulum.energy(&solution.final_state());
        assert_abs_diff_eq!(initial, last, epsilon = 1e-6);
        assert!(solution.final_state()[1] != 0.5);
    }

    #[test]
    fn dimensions_are_checked() {
        let program = double_integrator_program(2, 1.0);
        let simulate = Simulate::new(&DoubleIntegrator, SimulateOptions::default());

        assert!(matches!(
            simulate.from_controls_and_initial_states(
                &program,
                0,
                &InitialGuess::constant(&[0.0, 0.0, 0.0]),
                &InitialGuess::constant(&[0.0]),
            ),
            Err(Error::InvalidElements { .. })
        ));
        assert!(matches!(
            simulate.from_controls_and_initial_states(
                &program,
                1,
                &InitialGuess::constant(&[0.0, 0.0]),
                &InitialGuess::constant(&[0.0]),
            ),
            Err(Error::PhaseOutOfRange(1))
        ));

        let pendulum_program = pendulum_program(2, 1.0).unwrap();
        assert!(matches!(
            simulate.from_controls_and_initial_states(
                &pendulum_program,
                0,
                &InitialGuess::constant(&[0.0; 4]),
                &InitialGuess::constant(&[0.0; 2]),
            ),
            Err(Error::InvalidElements { .. })
        ));
    }

    #[test]
    fn out_of_range_nodes_report_last_index() {
        let program = double_integrator_program(3, 1.0);
        let solution = Simulate::new(&DoubleIntegrator, SimulateOptions::default())
            .from_controls_and_initial_states(
                &program,
                0,
                &InitialGuess::constant(&[0.0, 0.0]),
                &InitialGuess::constant(&[1.0]),
            )
            .unwrap();

        assert!(solution.control_at(2).is_ok());
        assert!(matches!(
            solution.control_at(3),
            Err(Error::NodeOutOfRange {
                node: 3,
                n_shooting: 2
            })
        ));
        assert!(matches!(
            solution.state_at(4),
            Err(Error::NodeOutOfRange {
                node: 4,
                n_shooting: 3
            })
        ));
    }

    #[test]
    fn divergence_is_reported() {
        let program = double_integrator_program(2, 1.0);
        let result = Simulate::new(&DoubleIntegrator, SimulateOptions::default())
            .from_controls_and_initial_states(
                &program,
                0,
                &InitialGuess::constant(&[0.0, 0.0]),
                &InitialGuess::constant(&[f64::INFINITY]),
            );

        assert!(matches!(result, Err(Error::InvalidValue)));
    }
}
