//! Initial guesses of states, controls and parameters.

use std::ops::{Index, IndexMut};

use nalgebra::{DMatrix, DVector};

use super::{base::Error, condition::PathCondition, interpolation::InterpolationType};
use crate::spline::SplineKind;

/// Initial guess of a set of elements over the shooting grid.
///
/// It is a [`PathCondition`] with an optional name. The name is required when
/// the guess refers to a parameter of the program (see
/// [`Program::update_initial_guess`](crate::Program::update_initial_guess)).
///
/// ```rust
/// use shooting::InitialGuess;
///
/// let mut x_init = InitialGuess::constant(&[0.0, 0.0, 0.0, 0.0]);
/// x_init.check_and_adjust_dimensions(4, 10, "x_init").unwrap();
///
/// let time_init = InitialGuess::constant(&[2.0]).with_name("time");
/// assert_eq!(time_init.name(), Some("time"));
/// ```
#[derive(Debug, Clone)]
pub struct InitialGuess {
    name: Option<String>,
    init: PathCondition,
}

impl InitialGuess {
    /// Creates a guess from a value matrix (one row per element). See
    /// [`PathCondition::new`].
    pub fn new(values: DMatrix<f64>, interpolation: InterpolationType) -> Result<Self, Error> {
        PathCondition::new(values, interpolation).map(Self::from)
    }

    /// Creates a constant guess.
    pub fn constant(values: &[f64]) -> Self {
        Self::from(PathCondition::constant(values))
    }

    /// Creates a spline guess. See [`PathCondition::with_time`].
    pub fn with_time(values: DMatrix<f64>, time: Vec<f64>, kind: SplineKind) -> Result<Self, Error> {
        PathCondition::with_time(values, time, kind).map(Self::from)
    }

    /// Creates a guess computed by `f(node, n_shooting)`.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(usize, usize) -> DVector<f64> + Send + Sync + 'static,
    {
        Self::from(PathCondition::custom(f))
    }

    /// Names the guess.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets or clears the name of the guess.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Gets the name of the guess.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Gets the underlying path condition.
    pub fn init(&self) -> &PathCondition {
        &self.init
    }

    /// Gets the underlying path condition mutably.
    pub fn init_mut(&mut self) -> &mut PathCondition {
        &mut self.init
    }

    /// Gets the interpolation type.
    pub fn interpolation(&self) -> InterpolationType {
        self.init.interpolation()
    }

    /// Gets the shape (elements, columns) of the guess.
    pub fn shape(&self) -> (usize, usize) {
        self.init.shape()
    }

    /// See [`PathCondition::check_and_adjust_dimensions`].
    pub fn check_and_adjust_dimensions(
        &mut self,
        n_elements: usize,
        n_shooting: usize,
        element_name: &str,
    ) -> Result<(), Error> {
        self.init
            .check_and_adjust_dimensions(n_elements, n_shooting, element_name)
    }

    /// See [`PathCondition::evaluate_at`].
    pub fn evaluate_at(&self, node: usize) -> Result<DVector<f64>, Error> {
        self.init.evaluate_at(node)
    }

    /// Stacks the elements of `other` below the elements of this guess. See
    /// [`PathCondition::concatenate`].
    pub fn concatenate(&mut self, other: &InitialGuess) -> Result<(), Error> {
        self.init.concatenate(&other.init)
    }
}

impl From<PathCondition> for InitialGuess {
    fn from(init: PathCondition) -> Self {
        Self { name: None, init }
    }
}

/// Initial guesses of a multi-phase program, one per phase.
#[derive(Debug, Clone, Default)]
pub struct InitialGuessList {
    guesses: Vec<InitialGuess>,
}

impl InitialGuessList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the guess of the next phase.
    pub fn add(&mut self, guess: InitialGuess) {
        self.guesses.push(guess);
    }

    /// Gets the number of guesses.
    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    /// Determines whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }

    /// Iterates over the guesses.
    pub fn iter(&self) -> std::slice::Iter<'_, InitialGuess> {
        self.guesses.iter()
    }

    /// Iterates mutably over the guesses.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, InitialGuess> {
        self.guesses.iter_mut()
    }
}

impl From<InitialGuess> for InitialGuessList {
    fn from(guess: InitialGuess) -> Self {
        Self {
            guesses: vec![guess],
        }
    }
}

impl FromIterator<InitialGuess> for InitialGuessList {
    fn from_iter<I: IntoIterator<Item = InitialGuess>>(iter: I) -> Self {
        Self {
            guesses: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for InitialGuessList {
    type Item = InitialGuess;
    type IntoIter = std::vec::IntoIter<InitialGuess>;

    fn into_iter(self) -> Self::IntoIter {
        self.guesses.into_iter()
    }
}

impl<'a> IntoIterator for &'a InitialGuessList {
    type Item = &'a InitialGuess;
    type IntoIter = std::slice::Iter<'a, InitialGuess>;

    fn into_iter(self) -> Self::IntoIter {
        self.guesses.iter()
    }
}

impl Index<usize> for InitialGuessList {
    type Output = InitialGuess;

    fn index(&self, index: usize) -> &Self::Output {
        &self.guesses[index]
    }
}

impl IndexMut<usize> for InitialGuessList {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.guesses[index]
    }
}
