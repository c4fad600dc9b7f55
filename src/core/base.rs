use thiserror::Error;

use super::interpolation::InterpolationType;
use crate::spline::SplineError;

/// Error encountered while building, validating or evaluating path conditions
/// and the programs composed from them.
#[derive(Debug, Error)]
pub enum Error {
    /// The number of rows does not match the number of elements (states,
    /// controls or parameter entries) of the problem.
    #[error("invalid number of {name} ({found}), the expected size is {expected}")]
    InvalidElements {
        /// Name of the checked elements (e.g., "x_init").
        name: String,
        /// Number of rows found in the condition.
        found: usize,
        /// Number of rows the problem requires.
        expected: usize,
    },
    /// The number of columns is not compatible with the interpolation type.
    #[error(
        "invalid number of column for {interpolation} (ncols = {found}), the expected number of column is {expected}"
    )]
    InvalidColumns {
        /// Interpolation of the condition.
        interpolation: InterpolationType,
        /// Number of columns found in the condition.
        found: usize,
        /// Number of columns the interpolation requires.
        expected: usize,
    },
    /// Spline interpolation was requested without knot times.
    #[error("spline interpolation necessitates a time vector")]
    MissingTime,
    /// Custom interpolation was requested without a function.
    #[error("custom interpolation necessitates a function, use the custom constructor")]
    MissingFunction,
    /// The number of knot times differs from the number of value columns.
    #[error("time vector has {found} knots but there are {expected} columns of values")]
    TimeMismatch {
        /// Length of the time vector.
        found: usize,
        /// Number of value columns.
        expected: usize,
    },
    /// Knot times or values are not suitable for spline fitting.
    #[error("{0}")]
    Spline(#[from] SplineError),
    /// The condition was evaluated before its dimensions were adjusted.
    #[error("check_and_adjust_dimensions must be called at least once before evaluating a point")]
    NotAdjusted,
    /// The requested node lies outside of the shooting grid.
    #[error("node {node} is out of range, the last node is {n_shooting}")]
    NodeOutOfRange {
        /// Requested node.
        node: usize,
        /// Index of the last node.
        n_shooting: usize,
    },
    /// Two conditions cannot be stacked together.
    #[error("cannot concatenate: {0}")]
    Concatenate(&'static str),
    /// Minimum and maximum bounds do not describe the same grid.
    #[error("min and max bounds differ in shape ({min:?} vs {max:?})")]
    BoundsShape {
        /// Shape of the minimum bound.
        min: (usize, usize),
        /// Shape of the maximum bound.
        max: (usize, usize),
    },
    /// Minimum and maximum bounds use different interpolations.
    #[error("min and max bounds differ in interpolation ({min} vs {max})")]
    BoundsInterpolation {
        /// Interpolation of the minimum bound.
        min: InterpolationType,
        /// Interpolation of the maximum bound.
        max: InterpolationType,
    },
    /// Minimum and maximum spline bounds use different knots or spline kinds.
    #[error("min and max spline bounds differ in knot times or spline kind")]
    BoundsKnots,
    /// A row or column index does not exist in the condition.
    #[error("index ({row}, {col}) is out of range for shape {shape:?}")]
    IndexOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Shape of the condition.
        shape: (usize, usize),
    },
    /// The noise magnitude is not valid for its type.
    #[error("invalid noise magnitude {0}")]
    InvalidMagnitude(f64),
    /// The bound push is not a fraction in [0, 0.5).
    #[error("invalid bound push {0}, must be in [0, 0.5)")]
    InvalidBoundPush(f64),
    /// A parameter guess passed to the update has no name.
    #[error("update_initial_guess must specify a name for the parameters")]
    UnnamedParameter,
    /// A parameter guess passed to the update refers to an unknown parameter.
    #[error("update_initial_guess cannot declare new parameters (`{0}`)")]
    UnknownParameter(String),
    /// A parameter is declared more than once.
    #[error("parameter `{0}` is declared more than once")]
    DuplicateParameter(String),
    /// Parameters only support constant initial guesses.
    #[error("parameter `{name}` must use constant interpolation, got {interpolation}")]
    ParameterInterpolation {
        /// Name of the parameter.
        name: String,
        /// The offending interpolation.
        interpolation: InterpolationType,
    },
    /// The number of per-phase guesses differs from the number of phases.
    #[error("expected {expected} phase guesses, got {found}")]
    PhaseMismatch {
        /// Number of guesses provided.
        found: usize,
        /// Number of phases of the program.
        expected: usize,
    },
    /// The phase index does not exist.
    #[error("phase {0} does not exist")]
    PhaseOutOfRange(usize),
    /// A phase needs at least one shooting interval.
    #[error("a phase needs at least one shooting interval")]
    NoShootingInterval,
    /// The flattened vector does not have the expected length.
    #[error("optimization vector has {found} entries, the expected size is {expected}")]
    VectorLength {
        /// Length of the provided vector.
        found: usize,
        /// Number of variables of the program.
        expected: usize,
    },
    /// An invalid value (NaN, positive or negative infinity) occurred.
    #[error("invalid value encountered")]
    InvalidValue,
    /// A custom error specific to user-provided dynamics or functions.
    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}
