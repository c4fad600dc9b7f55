//! Bound constraints over the shooting grid.

use nalgebra::{storage::StorageMut, DMatrix, DVector, Dim, Vector};

use super::{base::Error, condition::PathCondition, interpolation::InterpolationType};

/// Lower and upper bounds of a set of elements over the shooting grid.
///
/// Both bounds are [`PathCondition`]s sharing the interpolation type and the
/// shape. Positive and negative infinity can be used to indicate that an
/// element is unbounded in that direction.
///
/// ```rust
/// use shooting::Bounds;
/// use shooting::nalgebra::dvector;
///
/// let mut bounds = Bounds::constant(&[-1.0, 0.0], &[1.0, f64::INFINITY]).unwrap();
/// bounds.check_and_adjust_dimensions(2, 10, "x_bounds").unwrap();
///
/// let mut x = dvector![2.0, -3.0];
/// bounds.clip(0, &mut x).unwrap();
/// assert_eq!(x, dvector![1.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Bounds {
    min: PathCondition,
    max: PathCondition,
}

impl Bounds {
    /// Creates bounds from two value matrices of the same shape.
    pub fn new(
        min: DMatrix<f64>,
        max: DMatrix<f64>,
        interpolation: InterpolationType,
    ) -> Result<Self, Error> {
        Self::from_conditions(
            PathCondition::new(min, interpolation)?,
            PathCondition::new(max, interpolation)?,
        )
    }

    /// Creates constant bounds.
    pub fn constant(min: &[f64], max: &[f64]) -> Result<Self, Error> {
        Self::from_conditions(PathCondition::constant(min), PathCondition::constant(max))
    }

    /// Creates unbounded constant bounds for `n_elements` elements.
    pub fn unbounded(n_elements: usize) -> Self {
        Self {
            min: PathCondition::constant(&vec![f64::NEG_INFINITY; n_elements]),
            max: PathCondition::constant(&vec![f64::INFINITY; n_elements]),
        }
    }

    /// Creates bounds from two path conditions.
    pub fn from_conditions(min: PathCondition, max: PathCondition) -> Result<Self, Error> {
        if min.interpolation() != max.interpolation() {
            return Err(Error::BoundsInterpolation {
                min: min.interpolation(),
                max: max.interpolation(),
            });
        }

        if min.shape() != max.shape() {
            return Err(Error::BoundsShape {
                min: min.shape(),
                max: max.shape(),
            });
        }

        if min.time() != max.time() || min.spline_kind() != max.spline_kind() {
            return Err(Error::BoundsKnots);
        }

        Ok(Self { min, max })
    }

    /// Gets the lower bound.
    pub fn min(&self) -> &PathCondition {
        &self.min
    }

    /// Gets the upper bound.
    pub fn max(&self) -> &PathCondition {
        &self.max
    }

    /// Gets the interpolation type.
    pub fn interpolation(&self) -> InterpolationType {
        self.min.interpolation()
    }

    /// Gets the shape (elements, columns) of the bounds.
    pub fn shape(&self) -> (usize, usize) {
        self.min.shape()
    }

    /// Checks and adjusts the dimensions of both bounds. See
    /// [`PathCondition::check_and_adjust_dimensions`].
    pub fn check_and_adjust_dimensions(
        &mut self,
        n_elements: usize,
        n_shooting: usize,
        element_name: &str,
    ) -> Result<(), Error> {
        let (mut min, mut max) = (self.min.clone(), self.max.clone());
        min.check_and_adjust_dimensions(n_elements, n_shooting, element_name)?;
        max.check_and_adjust_dimensions(n_elements, n_shooting, element_name)?;

        self.min = min;
        self.max = max;
        Ok(())
    }

    /// Evaluates the lower bound at given node.
    pub fn min_at(&self, node: usize) -> Result<DVector<f64>, Error> {
        self.min.evaluate_at(node)
    }

    /// Evaluates the upper bound at given node.
    pub fn max_at(&self, node: usize) -> Result<DVector<f64>, Error> {
        self.max.evaluate_at(node)
    }

    /// Stacks the elements of `other` below the elements of these bounds. On
    /// error, the bounds are left unchanged.
    pub fn concatenate(&mut self, other: &Bounds) -> Result<(), Error> {
        let (mut min, mut max) = (self.min.clone(), self.max.clone());
        min.concatenate(&other.min)?;
        max.concatenate(&other.max)?;

        self.min = min;
        self.max = max;
        Ok(())
    }

    /// Sets both bounds of element `row` in column `col` to `value`, i.e.,
    /// fixes the element there.
    pub fn pin(&mut self, row: usize, col: usize, value: f64) -> Result<(), Error> {
        self.set(row, col, value, value)
    }

    /// Sets the bounds of element `row` in column `col`.
    pub fn set(&mut self, row: usize, col: usize, min: f64, max: f64) -> Result<(), Error> {
        self.min.set(row, col, min)?;
        self.max.set(row, col, max)
    }

    /// Sets the bounds of element `row` in all columns.
    pub fn set_row(&mut self, row: usize, min: f64, max: f64) -> Result<(), Error> {
        self.min.set_row(row, min)?;
        self.max.set_row(row, max)
    }

    /// Determines whether `x` satisfies the bounds at given node.
    pub fn contains<D, Sx>(&self, node: usize, x: &Vector<f64, D, Sx>) -> Result<bool, Error>
    where
        D: Dim,
        Sx: nalgebra::storage::Storage<f64, D>,
    {
        let (min, max) = (self.min_at(node)?, self.max_at(node)?);

        Ok(x.len() == min.len()
            && x.iter()
                .zip(min.iter().zip(max.iter()))
                .all(|(xi, (li, ui))| li <= xi && xi <= ui))
    }

    /// Projects `x` into the bounds at given node. Returns whether any value
    /// was not feasible.
    pub fn clip<D, Sx>(&self, node: usize, x: &mut Vector<f64, D, Sx>) -> Result<bool, Error>
    where
        D: Dim,
        Sx: StorageMut<f64, D>,
    {
        let (min, max) = (self.min_at(node)?, self.max_at(node)?);

        if x.len() != min.len() {
            return Err(Error::InvalidElements {
                name: "clipped values".to_string(),
                found: x.len(),
                expected: min.len(),
            });
        }

        let mut not_feasible = false;

        x.iter_mut()
            .zip(min.iter().zip(max.iter()))
            .for_each(|(xi, (li, ui))| {
                if *xi < *li {
                    *xi = *li;
                    not_feasible = true;
                } else if *xi > *ui {
                    *xi = *ui;
                    not_feasible = true;
                }
            });

        Ok(not_feasible)
    }
}
