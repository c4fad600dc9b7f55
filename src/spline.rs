//! One-dimensional interpolants through a set of knots.
//!
//! Two interpolants are provided:
//!
//! * [`LinearSpline`] -- piecewise linear segments between consecutive knots.
//! * [`CubicSpline`] -- [natural cubic
//!   spline](https://en.wikipedia.org/wiki/Spline_interpolation) with
//!   continuous first and second derivatives and vanishing second derivative
//!   at both ends.
//!
//! Both clamp the evaluation point to the knot range, i.e., there is no
//! extrapolation.
//!
//! ```rust
//! use shooting::spline::{CubicSpline, LinearSpline};
//!
//! let t: [f64; 3] = [0.0, 1.0, 2.0];
//! let y: [f64; 3] = [0.0, 1.0, 0.0];
//!
//! let linear = LinearSpline::new(&t, &y).unwrap();
//! assert_eq!(linear.eval(0.5), 0.5);
//!
//! let cubic = CubicSpline::new(&t, &y).unwrap();
//! assert!((cubic.eval(0.5) - 0.6875).abs() < 1e-12);
//! ```

use num_traits::Float;
use thiserror::Error;

/// Kind of the interpolant used for spline initial guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplineKind {
    /// Piecewise linear segments between knots.
    #[default]
    Linear,
    /// Natural cubic spline.
    Cubic,
}

/// Error when fitting a spline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplineError {
    /// At least two knots are required.
    #[error("spline needs at least 2 knots, got {0}")]
    TooFewKnots(usize),
    /// The number of knots differs from the number of values.
    #[error("spline has {knots} knots but {values} values")]
    LengthMismatch {
        /// Number of knot times.
        knots: usize,
        /// Number of values.
        values: usize,
    },
    /// Knot times must be strictly increasing.
    #[error("spline knots are not strictly increasing at index {0}")]
    NotIncreasing(usize),
    /// Knot times and values must be finite.
    #[error("spline knots or values are not finite")]
    NonFinite,
}

fn validate<T: Float>(t: &[T], y: &[T]) -> Result<(), SplineError> {
    if t.len() != y.len() {
        return Err(SplineError::LengthMismatch {
            knots: t.len(),
            values: y.len(),
        });
    }

    if y.iter().any(|v| !v.is_finite()) {
        return Err(SplineError::NonFinite);
    }

    validate_knots(t)
}

/// Checks that the knot times are at least two, finite and strictly
/// increasing.
pub fn validate_knots<T: Float>(t: &[T]) -> Result<(), SplineError> {
    if t.len() < 2 {
        return Err(SplineError::TooFewKnots(t.len()));
    }

    if t.iter().any(|v| !v.is_finite()) {
        return Err(SplineError::NonFinite);
    }

    match t.windows(2).position(|pair| pair[1] <= pair[0]) {
        Some(i) => Err(SplineError::NotIncreasing(i + 1)),
        None => Ok(()),
    }
}

/// Finds the segment `[t[i], t[i + 1]]` for `x`, clamped into the knot range.
fn segment<T: Float>(t: &[T], x: T) -> (usize, T) {
    let last = t.len() - 1;
    let x = x.max(t[0]).min(t[last]);
    let i = t.partition_point(|ti| *ti <= x).saturating_sub(1).min(last - 1);
    (i, x)
}

/// Piecewise linear interpolant. See [module](self) documentation.
#[derive(Debug, Clone)]
pub struct LinearSpline<T: Float> {
    t: Vec<T>,
    y: Vec<T>,
}

impl<T: Float> LinearSpline<T> {
    /// Fits the interpolant through the knots `(t[i], y[i])`.
    pub fn new(t: &[T], y: &[T]) -> Result<Self, SplineError> {
        validate(t, y)?;

        Ok(Self {
            t: t.to_vec(),
            y: y.to_vec(),
        })
    }

    /// Evaluates the interpolant at `x`.
    pub fn eval(&self, x: T) -> T {
        let (i, x) = segment(&self.t, x);
        let (t0, t1) = (self.t[i], self.t[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);

        y0 + (y1 - y0) * (x - t0) / (t1 - t0)
    }
}

/// Natural cubic spline. See [module](self) documentation.
#[derive(Debug, Clone)]
pub struct CubicSpline<T: Float> {
    t: Vec<T>,
    y: Vec<T>,
    // Second derivatives at the knots.
    m: Vec<T>,
}

impl<T: Float> CubicSpline<T> {
    /// Fits the natural cubic spline through the knots `(t[i], y[i])`.
    pub fn new(t: &[T], y: &[T]) -> Result<Self, SplineError> {
        validate(t, y)?;

        let n = t.len();
        let two = T::one() + T::one();
        let six = two * (two + T::one());

        let mut m = vec![T::zero(); n];

        if n > 2 {
            // Tridiagonal system for the interior second derivatives:
            //
            // h[i-1] m[i-1] + 2 (h[i-1] + h[i]) m[i] + h[i] m[i+1] = rhs[i],
            //
            // with m[0] = m[n-1] = 0. Solved by the Thomas algorithm.
            let h: Vec<T> = t.windows(2).map(|pair| pair[1] - pair[0]).collect();
            let k = n - 2;

            let mut diag = vec![T::zero(); k];
            let mut rhs = vec![T::zero(); k];

            for j in 0..k {
                let i = j + 1;
                diag[j] = two * (h[i - 1] + h[i]);
                rhs[j] = six * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
            }

            // Forward sweep. Sub- and super-diagonal of row j are h[j] and
            // h[j + 1] respectively.
            for j in 1..k {
                let w = h[j] / diag[j - 1];
                diag[j] = diag[j] - w * h[j];
                rhs[j] = rhs[j] - w * rhs[j - 1];
            }

            // Back substitution.
            m[k] = rhs[k - 1] / diag[k - 1];
            for j in (0..k - 1).rev() {
                m[j + 1] = (rhs[j] - h[j + 1] * m[j + 2]) / diag[j];
            }
        }

        Ok(Self {
            t: t.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    /// Evaluates the spline at `x`.
    pub fn eval(&self, x: T) -> T {
        let three = T::one() + T::one() + T::one();
        let six = three + three;

        let (i, x) = segment(&self.t, x);
        let h = self.t[i + 1] - self.t[i];
        let a = (self.t[i + 1] - x) / h;
        let b = (x - self.t[i]) / h;

        let (m0, m1) = (self.m[i], self.m[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);

        a * y0 + b * y1 + ((a * a * a - a) * m0 + (b * b * b - b) * m1) * h * h / six
    }
}

/// Spline of either [kind](SplineKind).
#[derive(Debug, Clone)]
pub enum Spline<T: Float> {
    /// See [`LinearSpline`].
    Linear(LinearSpline<T>),
    /// See [`CubicSpline`].
    Cubic(CubicSpline<T>),
}

impl<T: Float> Spline<T> {
    /// Fits a spline of given kind through the knots `(t[i], y[i])`.
    pub fn fit(kind: SplineKind, t: &[T], y: &[T]) -> Result<Self, SplineError> {
        match kind {
            SplineKind::Linear => LinearSpline::new(t, y).map(Self::Linear),
            SplineKind::Cubic => CubicSpline::new(t, y).map(Self::Cubic),
        }
    }

    /// Evaluates the spline at `x`.
    pub fn eval(&self, x: T) -> T {
        match self {
            Self::Linear(spline) => spline.eval(x),
            Self::Cubic(spline) => spline.eval(x),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn linear_hits_knots_and_midpoints() {
        let spline = LinearSpline::new(&[0.0, 1.0, 2.2, 6.0], &[0.5, 0.6, 0.2, 0.8]).unwrap();

        assert_eq!(spline.eval(0.0), 0.5);
        assert_abs_diff_eq!(spline.eval(2.2), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.eval(6.0), 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.eval(1.8), 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.eval(3.0), 0.2 + 0.6 * 0.8 / 3.8, epsilon = 1e-12);
    }

    #[test]
    fn evaluation_is_clamped() {
        let spline = LinearSpline::new(&[1.0, 2.0], &[3.0, 5.0]).unwrap();

        assert_eq!(spline.eval(-10.0), 3.0);
        assert_eq!(spline.eval(10.0), 5.0);
    }

    #[test]
    fn cubic_natural_tent() {
        let spline = CubicSpline::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();

        assert_abs_diff_eq!(spline.eval(0.5), 0.6875, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.eval(1.5), 0.6875, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.eval(1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cubic_reproduces_lines() {
        let t = [0.0, 0.3, 1.1, 2.0, 4.5];
        let y: Vec<f64> = t.iter().map(|t| 2.0 * t - 1.0).collect();
        let spline = CubicSpline::new(&t, &y).unwrap();

        for x in [0.1, 0.7, 1.5, 3.3, 4.4] {
            assert_abs_diff_eq!(spline.eval(x), 2.0 * x - 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn cubic_interpolates_knots() {
        let t = [0.0, 1.0, 2.2, 6.0];
        let y = [0.4, 0.6, 0.8, 0.2];
        let spline = CubicSpline::new(&t, &y).unwrap();

        for (ti, yi) in t.iter().zip(y.iter()) {
            assert_abs_diff_eq!(spline.eval(*ti), *yi, epsilon = 1e-12);
        }
    }

    #[test]
    fn invalid_knots() {
        assert_eq!(
            LinearSpline::new(&[0.0], &[1.0]).unwrap_err(),
            SplineError::TooFewKnots(1)
        );
        assert_eq!(
            LinearSpline::new(&[0.0, 1.0], &[1.0]).unwrap_err(),
            SplineError::LengthMismatch {
                knots: 2,
                values: 1
            }
        );
        assert_eq!(
            CubicSpline::new(&[0.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err(),
            SplineError::NotIncreasing(2)
        );
        assert_eq!(
            Spline::fit(SplineKind::Cubic, &[0.0, f64::NAN], &[1.0, 2.0]).unwrap_err(),
            SplineError::NonFinite
        );
    }
}
