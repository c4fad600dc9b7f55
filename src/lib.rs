#![allow(clippy::many_single_char_names)]
#![warn(missing_docs)]

//! # Shooting
//!
//! Initial guesses, bounds and forward simulation for optimal control
//! problems transcribed by direct multiple shooting.
//!
//! In direct multiple shooting, the time horizon of each phase is divided into
//! `n_shooting` intervals. The states are optimization variables at each of
//! the `n_shooting + 1` nodes and the controls at each of the `n_shooting`
//! interval starts. A nonlinear programming solver then needs an initial value
//! and bounds for every one of these variables, which is tedious to write by
//! hand. This library lets you describe them compactly and expands them over
//! the grid.
//!
//! ## Interpolation
//!
//! A [`PathCondition`] holds a matrix of values with one row per element. The
//! [`InterpolationType`] says how its columns map onto the nodes:
//!
//! * [Constant](InterpolationType::Constant) -- one column for all nodes.
//! * [Constant with first and last
//!   different](InterpolationType::ConstantWithFirstAndLastDifferent) -- three
//!   columns, typical for bounds with fixed initial and final states.
//! * [Linear](InterpolationType::Linear) -- straight line between the first
//!   and the last column.
//! * [Each frame](InterpolationType::EachFrame) -- explicit value at each node.
//! * [Spline](InterpolationType::Spline) -- interpolation of values at given
//!   times (see [`spline`]).
//! * [Custom](InterpolationType::Custom) -- user function of the node.
//!
//! Conditions are declared without knowing the grid and checked against it by
//! [`check_and_adjust_dimensions`](PathCondition::check_and_adjust_dimensions).
//! [`InitialGuess`] and [`Bounds`] are built on top of them.
//!
//! ## Programs
//!
//! A [`Program`] gathers [phases](Phase) and free [parameters](Parameter) and
//! flattens all their guesses into an
//! [optimization vector](program::OptimizationVector). Guesses can be replaced
//! later with [`Program::update_initial_guess`], for example by the solution
//! of a simpler problem.
//!
//! ## Tools
//!
//! * [Noise](noise) -- randomly perturbed guesses kept inside the bounds.
//! * [Simulate](simulate) -- integration of the dynamics from a guess to see
//!   how consistent it is.
//!
//! ## License
//!
//! Licensed under MIT.

mod core;
pub mod noise;
pub mod program;
pub mod simulate;
pub mod spline;

pub use core::*;
pub use program::{GuessUpdate, Parameter, Phase, Program};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
