//! Noised initial guesses.
//!
//! Starting the solver from a slightly perturbed initial guess is a cheap way
//! to check that a solution does not depend on the initial point. The noise
//! is uniform, scaled by the range of the bounds (or absolute), and the
//! perturbed values are kept inside the bounds.
//!
//! ```rust
//! use shooting::noise::{Noise, NoiseOptions};
//! use shooting::{Bounds, InitialGuess};
//!
//! let guess = InitialGuess::constant(&[0.0, 0.0]);
//! let bounds = Bounds::constant(&[-1.0, -10.0], &[1.0, 10.0]).unwrap();
//!
//! let mut options = NoiseOptions::default();
//! options.set_seed(Some(42));
//!
//! let noised = Noise::new(options).apply(&guess, &bounds, 2, 10).unwrap();
//! assert_eq!(noised.shape(), (2, 11));
//! ```

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::DMatrix;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::core::{Bounds, Error, InitialGuess, InterpolationType};

/// Interpretation of the noise magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeType {
    /// Fraction of the bound range. Must be in [0, 1]. Unbounded elements
    /// receive no noise.
    Relative,
    /// Absolute amplitude in the units of the elements.
    Absolute,
}

/// Options for [`Noise`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct NoiseOptions {
    /// Amplitude of the noise. Default: `0.2`.
    magnitude: f64,
    /// Interpretation of the amplitude. Default: relative (see
    /// [`MagnitudeType`]).
    magnitude_type: MagnitudeType,
    /// Fraction of the bound range by which a value that ended outside the
    /// bounds is pushed inside. Default: `0.1`.
    bound_push: f64,
    /// Seed of the random generator. Default: `None` (seeded from entropy).
    seed: Option<u64>,
}

impl Default for NoiseOptions {
    fn default() -> Self {
        Self {
            magnitude: 0.2,
            magnitude_type: MagnitudeType::Relative,
            bound_push: 0.1,
            seed: None,
        }
    }
}

/// Generator of noised initial guesses. See [module](self) documentation for
/// more details.
pub struct Noise<R: Rng> {
    options: NoiseOptions,
    rng: R,
}

impl Noise<StdRng> {
    /// Initializes the generator, seeding it from the options.
    pub fn new(options: NoiseOptions) -> Self {
        let rng = match options.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::with_rng(options, rng)
    }
}

impl<R: Rng> Noise<R> {
    /// Initializes the generator with given random generator. The seed in the
    /// options is ignored.
    pub fn with_rng(options: NoiseOptions, rng: R) -> Self {
        Self { options, rng }
    }

    /// Gets the options.
    pub fn options(&self) -> &NoiseOptions {
        &self.options
    }

    /// Produces a noised copy of `guess` with an explicit value at each of the
    /// `n_shooting + 1` nodes.
    ///
    /// Both the guess and the bounds are checked against `n_elements` and
    /// `n_shooting`. The name of the guess is preserved.
    pub fn apply(
        &mut self,
        guess: &InitialGuess,
        bounds: &Bounds,
        n_elements: usize,
        n_shooting: usize,
    ) -> Result<InitialGuess, Error> {
        let NoiseOptions {
            magnitude,
            magnitude_type,
            bound_push,
            ..
        } = self.options;

        let valid_magnitude = match magnitude_type {
            MagnitudeType::Relative => (0.0..=1.0).contains(&magnitude),
            MagnitudeType::Absolute => magnitude.is_finite() && magnitude >= 0.0,
        };

        if !valid_magnitude {
            return Err(Error::InvalidMagnitude(magnitude));
        }

        if !(0.0..0.5).contains(&bound_push) {
            return Err(Error::InvalidBoundPush(bound_push));
        }

        let mut guess = guess.clone();
        guess.check_and_adjust_dimensions(n_elements, n_shooting, "noised initial guess")?;

        let mut bounds = bounds.clone();
        bounds.check_and_adjust_dimensions(n_elements, n_shooting, "noise bounds")?;

        let uniform = Uniform::new_inclusive(-1.0, 1.0);
        let mut values = DMatrix::zeros(n_elements, n_shooting + 1);

        for node in 0..=n_shooting {
            let x = guess.evaluate_at(node)?;
            let (min, max) = (bounds.min_at(node)?, bounds.max_at(node)?);

            for e in 0..n_elements {
                let (li, ui) = (min[e], max[e]);
                let range = ui - li;

                let amplitude = match magnitude_type {
                    MagnitudeType::Relative if range.is_finite() => magnitude * range,
                    MagnitudeType::Relative => 0.0,
                    MagnitudeType::Absolute => magnitude,
                };

                let push = if range.is_finite() {
                    bound_push * range
                } else {
                    0.0
                };

                let mut xi = x[e] + amplitude * uniform.sample(&mut self.rng);

                if xi < li {
                    xi = li + push;
                } else if xi > ui {
                    xi = ui - push;
                }

                values[(e, node)] = xi;
            }
        }

        debug!(
            "noised {} elements over {} nodes (magnitude = {}, {:?})",
            n_elements,
            n_shooting + 1,
            magnitude,
            magnitude_type
        );

        let mut noised = InitialGuess::new(values, InterpolationType::EachFrame)?;
        noised.set_name(guess.name().map(str::to_string));
        noised.check_and_adjust_dimensions(n_elements, n_shooting, "noised initial guess")?;

        Ok(noised)
    }
}
