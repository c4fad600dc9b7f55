//! Path conditions: values spread over the shooting grid.
//!
//! A [`PathCondition`] is the common building block of initial guesses and
//! bounds. It holds a matrix of values with one row per element (e.g., a state
//! or a control) and a number of columns given by the
//! [interpolation type](InterpolationType). Before it can be evaluated, its
//! dimensions must be checked against the problem by
//! [`check_and_adjust_dimensions`](PathCondition::check_and_adjust_dimensions),
//! which also fixes the number of shooting intervals.
//!
//! ```rust
//! use shooting::nalgebra::dmatrix;
//! use shooting::{InterpolationType, PathCondition};
//!
//! let mut condition = PathCondition::new(
//!     dmatrix![0.0, 1.0;
//!              2.0, 4.0],
//!     InterpolationType::Linear,
//! )
//! .unwrap();
//!
//! condition.check_and_adjust_dimensions(2, 4, "x_init").unwrap();
//!
//! let mid = condition.evaluate_at(2).unwrap();
//! assert_eq!(mid.as_slice(), &[0.5, 3.0]);
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;
use nalgebra::{DMatrix, DVector};

use super::{base::Error, interpolation::InterpolationType};
use crate::spline::{validate_knots, Spline, SplineKind};

/// User function for [`InterpolationType::Custom`]. It takes the node and the
/// number of shooting intervals and returns the values of all elements.
pub type CustomFn = Arc<dyn Fn(usize, usize) -> DVector<f64> + Send + Sync>;

#[derive(Clone)]
enum Data {
    Matrix(DMatrix<f64>),
    Spline {
        values: DMatrix<f64>,
        time: Vec<f64>,
        kind: SplineKind,
        rows: Vec<Spline<f64>>,
    },
    Custom {
        f: CustomFn,
        n_elements: usize,
    },
}

/// Values over the shooting grid. See [module](self) documentation for more
/// details.
#[derive(Clone)]
pub struct PathCondition {
    data: Data,
    interpolation: InterpolationType,
    n_shooting: Option<usize>,
}

fn fit_rows(
    values: &DMatrix<f64>,
    time: &[f64],
    kind: SplineKind,
) -> Result<Vec<Spline<f64>>, Error> {
    values
        .row_iter()
        .map(|row| {
            let y = row.iter().copied().collect::<Vec<_>>();
            Spline::fit(kind, time, &y).map_err(Error::from)
        })
        .collect()
}

fn stack(top: &DMatrix<f64>, bottom: &DMatrix<f64>) -> DMatrix<f64> {
    let split = top.nrows();
    DMatrix::from_fn(split + bottom.nrows(), top.ncols(), |i, j| {
        if i < split {
            top[(i, j)]
        } else {
            bottom[(i - split, j)]
        }
    })
}

impl PathCondition {
    /// Creates a condition from a value matrix (one row per element).
    ///
    /// [`Spline`](InterpolationType::Spline) and
    /// [`Custom`](InterpolationType::Custom) need extra data and must be
    /// created with [`with_time`](PathCondition::with_time) and
    /// [`custom`](PathCondition::custom), respectively.
    pub fn new(values: DMatrix<f64>, interpolation: InterpolationType) -> Result<Self, Error> {
        match interpolation {
            InterpolationType::Spline => Err(Error::MissingTime),
            InterpolationType::Custom => Err(Error::MissingFunction),
            _ => Ok(Self {
                data: Data::Matrix(values),
                interpolation,
                n_shooting: None,
            }),
        }
    }

    /// Creates a constant condition with given values.
    pub fn constant(values: &[f64]) -> Self {
        Self {
            data: Data::Matrix(DMatrix::from_column_slice(values.len(), 1, values)),
            interpolation: InterpolationType::Constant,
            n_shooting: None,
        }
    }

    /// Creates a spline condition. Column `j` of `values` is the value at the
    /// knot time `time[j]`.
    pub fn with_time(values: DMatrix<f64>, time: Vec<f64>, kind: SplineKind) -> Result<Self, Error> {
        if time.len() != values.ncols() {
            return Err(Error::TimeMismatch {
                found: time.len(),
                expected: values.ncols(),
            });
        }

        validate_knots(&time)?;
        let rows = fit_rows(&values, &time, kind)?;

        Ok(Self {
            data: Data::Spline {
                values,
                time,
                kind,
                rows,
            },
            interpolation: InterpolationType::Spline,
            n_shooting: None,
        })
    }

    /// Creates a condition whose values are computed by `f(node, n_shooting)`.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(usize, usize) -> DVector<f64> + Send + Sync + 'static,
    {
        Self {
            data: Data::Custom {
                f: Arc::new(f),
                n_elements: 0,
            },
            interpolation: InterpolationType::Custom,
            n_shooting: None,
        }
    }

    /// Gets the interpolation type.
    pub fn interpolation(&self) -> InterpolationType {
        self.interpolation
    }

    /// Gets the number of shooting intervals, if the dimensions were already
    /// adjusted.
    pub fn n_shooting(&self) -> Option<usize> {
        self.n_shooting
    }

    /// Gets the shape (elements, columns) of the value matrix.
    ///
    /// Custom conditions have no columns and their number of elements is known
    /// only after the dimensions were adjusted.
    pub fn shape(&self) -> (usize, usize) {
        match &self.data {
            Data::Matrix(values) | Data::Spline { values, .. } => values.shape(),
            Data::Custom { n_elements, .. } => (*n_elements, 0),
        }
    }

    /// Gets the number of elements.
    pub fn n_elements(&self) -> usize {
        self.shape().0
    }

    /// Gets the value matrix. Custom conditions have none.
    pub fn values(&self) -> Option<&DMatrix<f64>> {
        match &self.data {
            Data::Matrix(values) | Data::Spline { values, .. } => Some(values),
            Data::Custom { .. } => None,
        }
    }

    /// Gets the knot times of a spline condition.
    pub fn time(&self) -> Option<&[f64]> {
        match &self.data {
            Data::Spline { time, .. } => Some(time),
            _ => None,
        }
    }

    /// Gets the spline kind of a spline condition.
    pub fn spline_kind(&self) -> Option<SplineKind> {
        match &self.data {
            Data::Spline { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Checks that the condition describes `n_elements` elements over
    /// `n_shooting` intervals and fixes the number of intervals for further
    /// evaluation.
    ///
    /// The `element_name` is used only for error reporting.
    pub fn check_and_adjust_dimensions(
        &mut self,
        n_elements: usize,
        n_shooting: usize,
        element_name: &str,
    ) -> Result<(), Error> {
        let (found, ncols) = match &self.data {
            Data::Custom { f, .. } => (f(0, n_shooting).len(), None),
            Data::Matrix(values) | Data::Spline { values, .. } => {
                (values.nrows(), Some(values.ncols()))
            }
        };

        if found != n_elements {
            return Err(Error::InvalidElements {
                name: element_name.to_string(),
                found,
                expected: n_elements,
            });
        }

        if let (Some(found), Some(expected)) =
            (ncols, self.interpolation.expected_columns(n_shooting))
        {
            if found != expected {
                return Err(Error::InvalidColumns {
                    interpolation: self.interpolation,
                    found,
                    expected,
                });
            }
        }

        if let Data::Custom { n_elements: n, .. } = &mut self.data {
            *n = n_elements;
        }

        debug!(
            "{}: {} elements over {} shooting intervals ({})",
            element_name, n_elements, n_shooting, self.interpolation
        );

        self.n_shooting = Some(n_shooting);
        Ok(())
    }

    /// Evaluates the condition at given shooting node.
    pub fn evaluate_at(&self, node: usize) -> Result<DVector<f64>, Error> {
        let n_shooting = self.n_shooting.ok_or(Error::NotAdjusted)?;

        if node > n_shooting {
            return Err(Error::NodeOutOfRange { node, n_shooting });
        }

        match &self.data {
            Data::Matrix(values) => {
                let column = |j: usize| values.column(j).into_owned();

                let value = match self.interpolation {
                    InterpolationType::Constant => column(0),
                    InterpolationType::ConstantWithFirstAndLastDifferent => {
                        if node == 0 {
                            column(0)
                        } else if node == n_shooting {
                            column(2)
                        } else {
                            column(1)
                        }
                    }
                    InterpolationType::Linear => {
                        if n_shooting == 0 {
                            column(0)
                        } else {
                            let s = node as f64 / n_shooting as f64;
                            let (first, last) = (values.column(0), values.column(1));
                            first + (last - first) * s
                        }
                    }
                    InterpolationType::EachFrame => column(node),
                    interpolation @ (InterpolationType::Spline | InterpolationType::Custom) => {
                        unreachable!("matrix data never use {}", interpolation)
                    }
                };

                Ok(value)
            }
            Data::Spline { time, rows, .. } => {
                let (t0, tn) = (time[0], time[time.len() - 1]);
                let t = if n_shooting == 0 {
                    t0
                } else {
                    t0 + (tn - t0) * node as f64 / n_shooting as f64
                };

                Ok(DVector::from_iterator(
                    rows.len(),
                    rows.iter().map(|spline| spline.eval(t)),
                ))
            }
            Data::Custom { f, n_elements } => {
                let value = f(node, n_shooting);

                if value.len() != *n_elements {
                    return Err(Error::InvalidElements {
                        name: format!("custom values at node {}", node),
                        found: value.len(),
                        expected: *n_elements,
                    });
                }

                Ok(value)
            }
        }
    }

    /// Stacks the elements of `other` below the elements of this condition.
    ///
    /// Both conditions must use the same interpolation (and the same knots in
    /// case of splines). The dimensions must be adjusted again afterwards.
    pub fn concatenate(&mut self, other: &PathCondition) -> Result<(), Error> {
        if self.interpolation != other.interpolation {
            return Err(Error::Concatenate("interpolation types differ"));
        }

        match (&mut self.data, &other.data) {
            (Data::Matrix(values), Data::Matrix(bottom)) => {
                if values.ncols() != bottom.ncols() {
                    return Err(Error::Concatenate("number of columns differ"));
                }

                *values = stack(values, bottom);
            }
            (
                Data::Spline {
                    values,
                    time,
                    kind,
                    rows,
                },
                Data::Spline {
                    values: bottom,
                    time: other_time,
                    kind: other_kind,
                    rows: other_rows,
                },
            ) => {
                if time != other_time || kind != other_kind {
                    return Err(Error::Concatenate("spline knots differ"));
                }

                *values = stack(values, bottom);
                rows.extend(other_rows.iter().cloned());
            }
            _ => return Err(Error::Concatenate("custom conditions cannot be stacked")),
        }

        self.n_shooting = None;
        Ok(())
    }

    /// Sets the value of the element `row` in column `col`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), Error> {
        let shape = self.shape();

        if row >= shape.0 || col >= shape.1 {
            return Err(Error::IndexOutOfRange { row, col, shape });
        }

        match &mut self.data {
            Data::Matrix(values) => values[(row, col)] = value,
            Data::Spline {
                values,
                time,
                kind,
                rows,
            } => {
                let mut y = values.row(row).iter().copied().collect::<Vec<_>>();
                y[col] = value;
                rows[row] = Spline::fit(*kind, time, &y)?;
                values[(row, col)] = value;
            }
            Data::Custom { .. } => unreachable!("custom data have no columns"),
        }

        Ok(())
    }

    /// Sets the value of the element `row` in all columns.
    pub fn set_row(&mut self, row: usize, value: f64) -> Result<(), Error> {
        let ncols = self.shape().1.max(1);
        (0..ncols).try_for_each(|col| self.set(row, col, value))
    }
}

impl fmt::Debug for PathCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("PathCondition");
        s.field("interpolation", &self.interpolation)
            .field("n_shooting", &self.n_shooting);

        match &self.data {
            Data::Matrix(values) => s.field("values", values),
            Data::Spline {
                values, time, kind, ..
            } => s
                .field("values", values)
                .field("time", time)
                .field("kind", kind),
            Data::Custom { n_elements, .. } => s.field("n_elements", n_elements),
        };

        s.finish()
    }
}
