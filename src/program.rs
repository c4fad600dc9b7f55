//! Optimal control programs and their flattened optimization vector.
//!
//! A [`Program`] is a sequence of [phases](Phase) and a set of free
//! [parameters](Parameter). Each phase discretizes its time horizon into
//! `n_shooting` intervals; states live on the `n_shooting + 1` nodes and
//! controls on the `n_shooting` interval starts. All these variables are
//! flattened into a single [`OptimizationVector`] that is handed to the NLP
//! solver, in this order:
//!
//! 1. states of all phases (node by node),
//! 2. controls of all phases (node by node),
//! 3. parameters in declaration order.
//!
//! ```rust
//! use shooting::{GuessUpdate, InitialGuess, Parameter, Phase, Program};
//!
//! # fn main() -> Result<(), shooting::Error> {
//! let phase = Phase::new(4, 2, 10, 2.0)?
//!     .with_x_init(InitialGuess::constant(&[0.0; 4]))?
//!     .with_u_init(InitialGuess::constant(&[0.0; 2]))?;
//! let time = Parameter::new("time", InitialGuess::constant(&[2.0]))?;
//!
//! let mut program = Program::new(vec![phase])?.with_parameter(time)?;
//! assert_eq!(program.v().n_variables(), 4 * 11 + 2 * 10 + 1);
//!
//! program.update_initial_guess(
//!     GuessUpdate::new()
//!         .with_states(InitialGuess::constant(&[1.0; 4]))
//!         .with_parameters(InitialGuess::constant(&[4.0]).with_name("time")),
//! )?;
//!
//! let init = program.v().init()?;
//! assert_eq!(init[0], 1.0);
//! assert_eq!(init[4 * 11 + 2 * 10], 4.0);
//! # Ok(())
//! # }
//! ```

use getset::Getters;
use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::core::{Bounds, Error, InitialGuess, InitialGuessList, InterpolationType};

/// One phase of a program. See [module](self) documentation.
#[derive(Debug, Clone)]
pub struct Phase {
    n_states: usize,
    n_controls: usize,
    n_shooting: usize,
    final_time: f64,
    x_init: InitialGuess,
    u_init: InitialGuess,
    x_bounds: Bounds,
    u_bounds: Bounds,
}

impl Phase {
    /// Creates a phase with zero initial guesses and no bounds.
    pub fn new(
        n_states: usize,
        n_controls: usize,
        n_shooting: usize,
        final_time: f64,
    ) -> Result<Self, Error> {
        if n_shooting == 0 {
            return Err(Error::NoShootingInterval);
        }

        if !final_time.is_finite() || final_time <= 0.0 {
            return Err(Error::InvalidValue);
        }

        Self {
            n_states,
            n_controls,
            n_shooting,
            final_time,
            x_init: InitialGuess::constant(&vec![0.0; n_states]),
            u_init: InitialGuess::constant(&vec![0.0; n_controls]),
            x_bounds: Bounds::unbounded(n_states),
            u_bounds: Bounds::unbounded(n_controls),
        }
        .adjusted()
    }

    fn adjusted(mut self) -> Result<Self, Error> {
        let (nx, nu, ns) = (self.n_states, self.n_controls, self.n_shooting);

        self.x_init.check_and_adjust_dimensions(nx, ns, "x_init")?;
        self.u_init.check_and_adjust_dimensions(nu, ns - 1, "u_init")?;
        self.x_bounds.check_and_adjust_dimensions(nx, ns, "x_bounds")?;
        self.u_bounds.check_and_adjust_dimensions(nu, ns - 1, "u_bounds")?;

        Ok(self)
    }

    /// Sets the initial guess of the states.
    pub fn with_x_init(mut self, mut x_init: InitialGuess) -> Result<Self, Error> {
        self.check_states(&mut x_init)?;
        self.x_init = x_init;
        Ok(self)
    }

    /// Sets the initial guess of the controls.
    pub fn with_u_init(mut self, mut u_init: InitialGuess) -> Result<Self, Error> {
        self.check_controls(&mut u_init)?;
        self.u_init = u_init;
        Ok(self)
    }

    /// Sets the bounds of the states.
    pub fn with_x_bounds(mut self, mut x_bounds: Bounds) -> Result<Self, Error> {
        x_bounds.check_and_adjust_dimensions(self.n_states, self.n_shooting, "x_bounds")?;
        self.x_bounds = x_bounds;
        Ok(self)
    }

    /// Sets the bounds of the controls.
    pub fn with_u_bounds(mut self, mut u_bounds: Bounds) -> Result<Self, Error> {
        u_bounds.check_and_adjust_dimensions(self.n_controls, self.n_shooting - 1, "u_bounds")?;
        self.u_bounds = u_bounds;
        Ok(self)
    }

    /// Checks and adjusts a guess of the states of this phase.
    pub fn check_states(&self, guess: &mut InitialGuess) -> Result<(), Error> {
        guess.check_and_adjust_dimensions(self.n_states, self.n_shooting, "x_init")
    }

    /// Checks and adjusts a guess of the controls of this phase.
    pub fn check_controls(&self, guess: &mut InitialGuess) -> Result<(), Error> {
        guess.check_and_adjust_dimensions(self.n_controls, self.n_shooting - 1, "u_init")
    }

    /// Gets the number of states.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Gets the number of controls.
    pub fn n_controls(&self) -> usize {
        self.n_controls
    }

    /// Gets the number of shooting intervals.
    pub fn n_shooting(&self) -> usize {
        self.n_shooting
    }

    /// Gets the duration of the phase.
    pub fn final_time(&self) -> f64 {
        self.final_time
    }

    /// Gets the duration of one shooting interval.
    pub fn dt(&self) -> f64 {
        self.final_time / self.n_shooting as f64
    }

    /// Gets the initial guess of the states.
    pub fn x_init(&self) -> &InitialGuess {
        &self.x_init
    }

    /// Gets the initial guess of the controls.
    pub fn u_init(&self) -> &InitialGuess {
        &self.u_init
    }

    /// Gets the bounds of the states.
    pub fn x_bounds(&self) -> &Bounds {
        &self.x_bounds
    }

    /// Gets the bounds of the controls.
    pub fn u_bounds(&self) -> &Bounds {
        &self.u_bounds
    }

    fn n_state_variables(&self) -> usize {
        self.n_states * (self.n_shooting + 1)
    }

    fn n_control_variables(&self) -> usize {
        self.n_controls * self.n_shooting
    }
}

/// A free parameter of the program, such as the final time.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    size: usize,
    initial_guess: InitialGuess,
    bounds: Bounds,
}

impl Parameter {
    /// Declares a parameter. Its size is given by the number of elements of the
    /// initial guess, which must be constant.
    pub fn new(name: impl Into<String>, initial_guess: InitialGuess) -> Result<Self, Error> {
        let name = name.into();
        let size = initial_guess.shape().0;

        let initial_guess = Self::checked_guess(&name, size, initial_guess)?;

        Ok(Self {
            bounds: Bounds::unbounded(size).adjusted_for_parameter(&name, size)?,
            name,
            size,
            initial_guess,
        })
    }

    fn checked_guess(name: &str, size: usize, guess: InitialGuess) -> Result<InitialGuess, Error> {
        if guess.interpolation() != InterpolationType::Constant {
            return Err(Error::ParameterInterpolation {
                name: name.to_string(),
                interpolation: guess.interpolation(),
            });
        }

        let mut guess = guess.with_name(name);
        guess.check_and_adjust_dimensions(size, 0, name)?;
        Ok(guess)
    }

    /// Sets the bounds of the parameter.
    pub fn with_bounds(mut self, bounds: Bounds) -> Result<Self, Error> {
        self.bounds = bounds.adjusted_for_parameter(&self.name, self.size)?;
        Ok(self)
    }

    /// Gets the name of the parameter.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the number of entries of the parameter.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the initial guess of the parameter.
    pub fn initial_guess(&self) -> &InitialGuess {
        &self.initial_guess
    }

    /// Gets the bounds of the parameter.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

impl Bounds {
    fn adjusted_for_parameter(mut self, name: &str, size: usize) -> Result<Self, Error> {
        if self.interpolation() != InterpolationType::Constant {
            return Err(Error::ParameterInterpolation {
                name: name.to_string(),
                interpolation: self.interpolation(),
            });
        }

        self.check_and_adjust_dimensions(size, 0, name)?;
        Ok(self)
    }
}

/// New initial guesses for [`Program::update_initial_guess`]. Every part is
/// optional; the parts left out keep their current guesses.
#[derive(Debug, Clone, Default)]
pub struct GuessUpdate {
    states: Option<InitialGuessList>,
    controls: Option<InitialGuessList>,
    parameters: Option<InitialGuessList>,
}

impl GuessUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets new state guesses, one per phase.
    pub fn with_states(mut self, states: impl Into<InitialGuessList>) -> Self {
        self.states = Some(states.into());
        self
    }

    /// Sets new control guesses, one per phase.
    pub fn with_controls(mut self, controls: impl Into<InitialGuessList>) -> Self {
        self.controls = Some(controls.into());
        self
    }

    /// Sets new parameter guesses. Each guess must be named after a declared
    /// parameter.
    pub fn with_parameters(mut self, parameters: impl Into<InitialGuessList>) -> Self {
        self.parameters = Some(parameters.into());
        self
    }
}

/// An optimal control program. See [module](self) documentation.
#[derive(Debug, Clone)]
pub struct Program {
    phases: Vec<Phase>,
    parameters: Vec<Parameter>,
}

impl Program {
    /// Creates a program from its phases.
    pub fn new(phases: Vec<Phase>) -> Result<Self, Error> {
        if phases.is_empty() {
            return Err(Error::PhaseMismatch {
                found: 0,
                expected: 1,
            });
        }

        Ok(Self {
            phases,
            parameters: Vec::new(),
        })
    }

    /// Declares a free parameter.
    pub fn with_parameter(mut self, parameter: Parameter) -> Result<Self, Error> {
        if self.parameter_index(parameter.name()).is_some() {
            return Err(Error::DuplicateParameter(parameter.name().to_string()));
        }

        self.parameters.push(parameter);
        Ok(self)
    }

    /// Gets the phases.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Gets the phase with given index.
    pub fn phase(&self, index: usize) -> Result<&Phase, Error> {
        self.phases.get(index).ok_or(Error::PhaseOutOfRange(index))
    }

    /// Gets the declared parameters.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Finds the position of the parameter with given name.
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name() == name)
    }

    /// Gets the view of the flattened optimization vector.
    pub fn v(&self) -> OptimizationVector<'_> {
        OptimizationVector { program: self }
    }

    /// Replaces initial guesses of states, controls and parameters.
    ///
    /// All new guesses are validated before any of them is applied, so on
    /// error the program is left untouched.
    pub fn update_initial_guess(&mut self, update: GuessUpdate) -> Result<(), Error> {
        let GuessUpdate {
            states,
            controls,
            parameters,
        } = update;

        let states = states
            .map(|list| self.checked_phase_guesses(list, Phase::check_states))
            .transpose()?;
        let controls = controls
            .map(|list| self.checked_phase_guesses(list, Phase::check_controls))
            .transpose()?;

        let mut params = Vec::new();

        for guess in parameters.into_iter().flatten() {
            let name = guess
                .name()
                .ok_or(Error::UnnamedParameter)?
                .to_string();
            let index = self
                .parameter_index(&name)
                .ok_or_else(|| Error::UnknownParameter(name.clone()))?;
            let size = self.parameters[index].size();

            params.push((index, Parameter::checked_guess(&name, size, guess)?));
        }

        if let Some(states) = states {
            for (phase, guess) in self.phases.iter_mut().zip(states) {
                phase.x_init = guess;
            }
        }

        if let Some(controls) = controls {
            for (phase, guess) in self.phases.iter_mut().zip(controls) {
                phase.u_init = guess;
            }
        }

        for (index, guess) in params {
            debug!("update initial guess of parameter `{}`", guess.name().unwrap_or_default());
            self.parameters[index].initial_guess = guess;
        }

        Ok(())
    }

    fn checked_phase_guesses<C>(
        &self,
        list: InitialGuessList,
        check: C,
    ) -> Result<Vec<InitialGuess>, Error>
    where
        C: Fn(&Phase, &mut InitialGuess) -> Result<(), Error>,
    {
        if list.len() != self.phases.len() {
            return Err(Error::PhaseMismatch {
                found: list.len(),
                expected: self.phases.len(),
            });
        }

        list.into_iter()
            .zip(self.phases.iter())
            .map(|(mut guess, phase)| {
                check(phase, &mut guess)?;
                Ok(guess)
            })
            .collect()
    }
}

/// The flattened vector of all optimization variables of a program. See
/// [module](self) documentation for the layout.
pub struct OptimizationVector<'a> {
    program: &'a Program,
}

/// Optimization variables split back per phase. See
/// [`OptimizationVector::unpack`].
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Unpacked {
    /// States of each phase (one column per node).
    states: Vec<DMatrix<f64>>,
    /// Controls of each phase (one column per interval).
    controls: Vec<DMatrix<f64>>,
    /// Parameter values with their names.
    parameters: Vec<(String, DVector<f64>)>,
}

impl<'a> OptimizationVector<'a> {
    /// Gets the number of state variables of all phases.
    pub fn n_states(&self) -> usize {
        self.program.phases.iter().map(Phase::n_state_variables).sum()
    }

    /// Gets the number of control variables of all phases.
    pub fn n_controls(&self) -> usize {
        self.program.phases.iter().map(Phase::n_control_variables).sum()
    }

    /// Gets the number of parameter variables.
    pub fn n_parameters(&self) -> usize {
        self.program.parameters.iter().map(Parameter::size).sum()
    }

    /// Gets the total number of variables.
    pub fn n_variables(&self) -> usize {
        self.n_states() + self.n_controls() + self.n_parameters()
    }

    /// Gets the declared parameters in the order of the vector.
    pub fn parameters_in_list(&self) -> &'a [Parameter] {
        &self.program.parameters
    }

    /// Builds the vector of initial guesses.
    pub fn init(&self) -> Result<DVector<f64>, Error> {
        self.flatten(
            |phase| phase.x_init(),
            |phase| phase.u_init(),
            |parameter| parameter.initial_guess().evaluate_at(0),
        )
    }

    /// Builds the vectors of lower and upper bounds.
    pub fn bounds(&self) -> Result<(DVector<f64>, DVector<f64>), Error> {
        let mut min = Vec::with_capacity(self.n_variables());
        let mut max = Vec::with_capacity(self.n_variables());

        for phase in &self.program.phases {
            for node in 0..=phase.n_shooting {
                min.extend(phase.x_bounds.min_at(node)?.iter());
                max.extend(phase.x_bounds.max_at(node)?.iter());
            }
        }

        for phase in &self.program.phases {
            for node in 0..phase.n_shooting {
                min.extend(phase.u_bounds.min_at(node)?.iter());
                max.extend(phase.u_bounds.max_at(node)?.iter());
            }
        }

        for parameter in &self.program.parameters {
            min.extend(parameter.bounds.min_at(0)?.iter());
            max.extend(parameter.bounds.max_at(0)?.iter());
        }

        Ok((DVector::from_vec(min), DVector::from_vec(max)))
    }

    fn flatten<X, U, P>(&self, x: X, u: U, p: P) -> Result<DVector<f64>, Error>
    where
        X: Fn(&Phase) -> &InitialGuess,
        U: Fn(&Phase) -> &InitialGuess,
        P: Fn(&Parameter) -> Result<DVector<f64>, Error>,
    {
        let mut data = Vec::with_capacity(self.n_variables());

        for phase in &self.program.phases {
            for node in 0..=phase.n_shooting {
                data.extend(x(phase).evaluate_at(node)?.iter());
            }
        }

        for phase in &self.program.phases {
            for node in 0..phase.n_shooting {
                data.extend(u(phase).evaluate_at(node)?.iter());
            }
        }

        for parameter in &self.program.parameters {
            data.extend(p(parameter)?.iter());
        }

        Ok(DVector::from_vec(data))
    }

    /// Splits a flattened vector (e.g., the solution of the solver) back into
    /// states, controls and parameters.
    pub fn unpack(&self, data: &DVector<f64>) -> Result<Unpacked, Error> {
        let expected = self.n_variables();

        if data.len() != expected {
            return Err(Error::VectorLength {
                found: data.len(),
                expected,
            });
        }

        let data = data.as_slice();
        let mut offset = 0;
        let mut take = |rows: usize, cols: usize| {
            let block = DMatrix::from_column_slice(rows, cols, &data[offset..offset + rows * cols]);
            offset += rows * cols;
            block
        };

        let phases = &self.program.phases;
        let states = phases
            .iter()
            .map(|phase| take(phase.n_states, phase.n_shooting + 1))
            .collect();
        let controls = phases
            .iter()
            .map(|phase| take(phase.n_controls, phase.n_shooting))
            .collect();
        let parameters = self
            .program
            .parameters
            .iter()
            .map(|parameter| {
                let block = take(parameter.size, 1);
                (parameter.name.clone(), block.column(0).into_owned())
            })
            .collect();

        Ok(Unpacked {
            states,
            controls,
            parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::{dmatrix, dvector};

    use super::*;
    use crate::testing::pendulum_program;

    #[test]
    fn pendulum_initial_vector() {
        let program = pendulum_program(10, 2.0).unwrap();
        let v = program.v();

        assert_eq!(v.n_variables(), 4 * 11 + 2 * 10 + 1);

        let index = program.parameter_index("time").unwrap();
        assert_eq!(
            v.parameters_in_list()[index]
                .initial_guess()
                .evaluate_at(0)
                .unwrap(),
            dvector![2.0]
        );

        let mut expected = DVector::zeros(4 * 11 + 2 * 10 + 1);
        expected[4 * 11 + 2 * 10] = 2.0;
        assert_eq!(v.init().unwrap(), expected);
    }

    #[test]
    fn update_initial_guess() {
        let mut program = pendulum_program(10, 2.0).unwrap();

        let wrong_x_init = InitialGuess::constant(&[1.0; 6]);
        let x_init = InitialGuess::constant(&[1.0; 4]);
        let wrong_u_init = InitialGuess::constant(&[3.0; 4]);
        let u_init = InitialGuess::constant(&[3.0; 2]);
        let time_init = InitialGuess::constant(&[4.0]);

        let update = |x: &InitialGuess, u: &InitialGuess, p: &InitialGuess| {
            GuessUpdate::new()
                .with_states(x.clone())
                .with_controls(u.clone())
                .with_parameters(p.clone())
        };

        let error = program
            .update_initial_guess(update(&x_init, &u_init, &time_init))
            .unwrap_err();
        assert!(error
            .to_string()
            .contains("update_initial_guess must specify a name for the parameters"));

        let error = program
            .update_initial_guess(update(
                &x_init,
                &u_init,
                &time_init.clone().with_name("dumb name"),
            ))
            .unwrap_err();
        assert!(error
            .to_string()
            .contains("update_initial_guess cannot declare new parameters"));

        let time_init = time_init.with_name("time");

        assert!(matches!(
            program.update_initial_guess(update(&x_init, &wrong_u_init, &time_init)),
            Err(Error::InvalidElements { .. })
        ));
        assert!(matches!(
            program.update_initial_guess(update(&wrong_x_init, &wrong_u_init, &time_init)),
            Err(Error::InvalidElements { .. })
        ));

        // Failed updates leave the program untouched.
        assert_eq!(program.v().init().unwrap()[0], 0.0);

        program
            .update_initial_guess(update(&x_init, &u_init, &time_init))
            .unwrap();

        let phase = program.phase(0).unwrap();
        assert_eq!(phase.x_init().evaluate_at(0).unwrap(), dvector![1.0, 1.0, 1.0, 1.0]);
        assert_eq!(phase.u_init().evaluate_at(0).unwrap(), dvector![3.0, 3.0]);

        let index = program.parameter_index("time").unwrap();
        assert_eq!(
            program.parameters()[index]
                .initial_guess()
                .evaluate_at(0)
                .unwrap(),
            dvector![4.0]
        );

        let mut expected = vec![1.0; 4 * 11];
        expected.extend(vec![3.0; 2 * 10]);
        expected.push(4.0);
        assert_eq!(program.v().init().unwrap(), DVector::from_vec(expected));
    }

    #[test]
    fn partial_update() {
        let mut program = pendulum_program(4, 1.0).unwrap();

        program
            .update_initial_guess(
                GuessUpdate::new().with_controls(
                    InitialGuess::new(
                        dmatrix![-1.0, 1.0; 0.0, 0.0],
                        InterpolationType::Linear,
                    )
                    .unwrap(),
                ),
            )
            .unwrap();

        let init = program.v().init().unwrap();
        let controls = &init.as_slice()[4 * 5..4 * 5 + 2 * 4];

        // Controls are interpolated over the interval starts 0..=3.
        assert_abs_diff_eq!(controls[0], -1.0);
        assert_abs_diff_eq!(controls[2], -1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(controls[6], 1.0);
        assert_eq!(init[init.len() - 1], 1.0);
    }

    #[test]
    fn phase_count_must_match() {
        let mut program = pendulum_program(4, 1.0).unwrap();
        let states = (0..2)
            .map(|_| InitialGuess::constant(&[0.0; 4]))
            .collect::<InitialGuessList>();

        assert!(matches!(
            program.update_initial_guess(GuessUpdate::new().with_states(states)),
            Err(Error::PhaseMismatch {
                found: 2,
                expected: 1
            })
        ));
    }

    #[test]
    fn multi_phase_layout() {
        let first = Phase::new(2, 1, 2, 1.0)
            .unwrap()
            .with_x_init(InitialGuess::constant(&[1.0, 2.0]))
            .unwrap()
            .with_u_init(InitialGuess::constant(&[10.0]))
            .unwrap();
        let second = Phase::new(1, 2, 1, 1.0)
            .unwrap()
            .with_x_init(InitialGuess::constant(&[3.0]))
            .unwrap()
            .with_u_init(InitialGuess::constant(&[20.0, 30.0]))
            .unwrap();

        let program = Program::new(vec![first, second])
            .unwrap()
            .with_parameter(Parameter::new("mass", InitialGuess::constant(&[5.0, 6.0])).unwrap())
            .unwrap();

        let init = program.v().init().unwrap();
        assert_eq!(
            init.as_slice(),
            &[
                1.0, 2.0, 1.0, 2.0, 1.0, 2.0, // states of the first phase
                3.0, 3.0, // states of the second phase
                10.0, 10.0, // controls of the first phase
                20.0, 30.0, // controls of the second phase
                5.0, 6.0, // parameter
            ]
        );

        let unpacked = program.v().unpack(&init).unwrap();
        assert_eq!(unpacked.states()[0], dmatrix![1.0, 1.0, 1.0; 2.0, 2.0, 2.0]);
        assert_eq!(unpacked.controls()[1], dmatrix![20.0; 30.0]);
        assert_eq!(unpacked.parameters()[0], ("mass".to_string(), dvector![5.0, 6.0]));

        assert!(matches!(
            program.v().unpack(&dvector![1.0]),
            Err(Error::VectorLength {
                found: 1,
                expected: 14
            })
        ));
    }

    #[test]
    fn flattened_bounds() {
        let program = pendulum_program(10, 2.0).unwrap();
        let (min, max) = program.v().bounds().unwrap();

        assert_eq!(min.len(), program.v().n_variables());

        // Everything is fixed at the first node.
        assert_eq!(&min.as_slice()[..4], &[0.0; 4]);
        assert_eq!(&max.as_slice()[..4], &[0.0; 4]);

        // Rotation is pinned upward at the last node.
        assert_eq!(min[4 * 10 + 1], std::f64::consts::PI);

        // The second control cannot rotate the pendulum.
        assert_eq!(min[4 * 11 + 1], 0.0);
        assert_eq!(max[4 * 11 + 1], 0.0);
        assert_eq!(min[4 * 11], -100.0);
    }

    #[test]
    fn invalid_declarations() {
        assert!(matches!(Phase::new(1, 1, 0, 1.0), Err(Error::NoShootingInterval)));
        assert!(matches!(
            Parameter::new(
                "time",
                InitialGuess::new(dmatrix![1.0, 2.0], InterpolationType::Linear).unwrap()
            ),
            Err(Error::ParameterInterpolation { .. })
        ));

        let program = pendulum_program(4, 1.0).unwrap();
        assert!(matches!(
            program.with_parameter(Parameter::new("time", InitialGuess::constant(&[1.0])).unwrap()),
            Err(Error::DuplicateParameter(_))
        ));
    }
}
